//! Device behaviour settings.

use serde::Deserialize;

/// Which fact categories [`Device::facts`](crate::Device::facts) gathers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactsOptions {
    /// Read `sh ver`.
    pub system: bool,

    /// Read the VLAN table (skipped when the device rejects the probe).
    pub vlans: bool,

    /// Interfaces to describe. `None` discovers them with
    /// `sh ip interface brief`; an empty list describes none.
    pub interfaces: Option<Vec<String>>,
}

impl Default for FactsOptions {
    fn default() -> Self {
        Self {
            system: true,
            vlans: true,
            interfaces: None,
        }
    }
}

/// Commands and selections used by a [`Device`](crate::Device).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceOptions {
    /// Sent right after login to disable output paging.
    pub paging_command: String,

    /// Sent once per session to detect VLAN support.
    pub capability_probe: String,

    pub facts: FactsOptions,
}

impl Default for DeviceOptions {
    fn default() -> Self {
        Self {
            paging_command: "terminal length 0".to_string(),
            capability_probe: "sh vlan brief".to_string(),
            facts: FactsOptions::default(),
        }
    }
}
