//! Facts aggregation.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::device::Device;
use super::options::FactsOptions;
use crate::error::Result;
use crate::model::{InterfaceRecord, SystemFacts, VlanTable};
use crate::parse::canonicalize;
use crate::transport::Transport;

/// Everything gathered from one device in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facts {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub system: Option<SystemFacts>,

    /// `None` when not selected or when the device lacks `sh vlan brief`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vlans: Option<VlanTable>,

    /// Interface records keyed by canonical name, in query order.
    #[serde(default)]
    pub interfaces: IndexMap<String, InterfaceRecord>,
}

/// Drives a ready [`Device`] through the selected fact queries.
#[derive(Debug, Clone, Default)]
pub struct FactsCollector {
    options: FactsOptions,
}

impl FactsCollector {
    pub fn new(options: FactsOptions) -> Self {
        Self { options }
    }

    pub async fn collect<T: Transport>(&self, device: &mut Device<T>) -> Result<Facts> {
        let mut facts = Facts::default();

        if self.options.system {
            facts.system = Some(device.system_facts().await?);
        }
        if self.options.vlans {
            facts.vlans = device.parse_vlans().await?;
        }

        let names = match &self.options.interfaces {
            Some(names) => names.iter().map(|n| canonicalize(n)).collect(),
            None => device.interface_names().await?,
        };
        debug!("Collecting facts for {} interfaces", names.len());

        for name in names {
            let record = device.interface(&name).await?;
            facts.interfaces.insert(name, record);
        }

        Ok(facts)
    }
}
