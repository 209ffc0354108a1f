//! Structured records produced by the output parsers and consumed by the
//! reconcilers.
//!
//! Every record is a snapshot of one command's output. Records hold no
//! reference to the session that produced them; querying the device again
//! yields a new record.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Whether a resource exists (interface up, VLAN defined).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// Interface duplex setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duplex {
    Half,
    Full,
    Auto,
}

impl Duplex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Duplex::Half => "half",
            Duplex::Full => "full",
            Duplex::Auto => "auto",
        }
    }
}

impl fmt::Display for Duplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interface speed: negotiated, or fixed in Mb/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Speed {
    Auto,
    Mbps(u32),
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Auto => f.write_str("auto"),
            Speed::Mbps(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Speed::Auto);
        }
        s.parse()
            .map(Speed::Mbps)
            .map_err(|_| format!("invalid speed '{s}'"))
    }
}

impl From<Speed> for String {
    fn from(speed: Speed) -> Self {
        speed.to_string()
    }
}

impl TryFrom<String> for Speed {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Switchport administrative mode.
///
/// Negotiation states (`dynamic auto`, `dynamic desirable`) keep the raw
/// string the device printed; static modes are normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SwitchportMode {
    Access,
    Trunk,
    Negotiated(String),
}

impl SwitchportMode {
    pub fn as_str(&self) -> &str {
        match self {
            SwitchportMode::Access => "access",
            SwitchportMode::Trunk => "trunk",
            SwitchportMode::Negotiated(raw) => raw,
        }
    }
}

impl fmt::Display for SwitchportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SwitchportMode> for String {
    fn from(mode: SwitchportMode) -> Self {
        mode.as_str().to_string()
    }
}

impl From<String> for SwitchportMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "access" => SwitchportMode::Access,
            "trunk" => SwitchportMode::Trunk,
            _ => SwitchportMode::Negotiated(s),
        }
    }
}

/// Trunk encapsulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encapsulation {
    Dot1q,
    Isl,
    Negotiate,
}

impl Encapsulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encapsulation::Dot1q => "dot1q",
            Encapsulation::Isl => "isl",
            Encapsulation::Negotiate => "negotiate",
        }
    }
}

impl fmt::Display for Encapsulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// VLANs allowed on a trunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum AllowedVlans {
    All,
    None,
    /// Comma/range list exactly as printed, e.g. `1,10-20,99`.
    List(String),
}

impl fmt::Display for AllowedVlans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowedVlans::All => f.write_str("all"),
            AllowedVlans::None => f.write_str("none"),
            AllowedVlans::List(list) => f.write_str(list),
        }
    }
}

impl From<AllowedVlans> for String {
    fn from(vlans: AllowedVlans) -> Self {
        vlans.to_string()
    }
}

impl From<String> for AllowedVlans {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("all") {
            AllowedVlans::All
        } else if s.eq_ignore_ascii_case("none") {
            AllowedVlans::None
        } else {
            AllowedVlans::List(s)
        }
    }
}

/// One address assigned to a routed interface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpAddressEntry {
    pub prefix_length: u8,
    pub address: IpAddr,
    /// Trailing qualifier (`secondary`, `eui-64`, `link-local`); `None` for
    /// a primary IPv4 address or a plain IPv6 prefix.
    pub tag: Option<String>,
}

impl IpAddressEntry {
    pub fn new(prefix_length: u8, address: IpAddr, tag: Option<&str>) -> Self {
        Self {
            prefix_length,
            address,
            tag: tag.map(str::to_string),
        }
    }
}

/// Fields read from `sh interface <name>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<Duplex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InterfaceStatus {
    /// No status line or attribute was recognized.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields read from `sh interface <name> switchport`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchportRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SwitchportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encapsulation: Option<Encapsulation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_vlan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_vlan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_trunk_vlans: Option<AllowedVlans>,
}

/// Fields read from an interface's running-config block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ip_addresses: Vec<IpAddressEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etherchannel: Option<String>,
}

/// Everything known about one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Canonical interface name.
    pub name: String,
    pub ensure: Ensure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplex: Option<Duplex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
    #[serde(flatten)]
    pub switchport: SwitchportRecord,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ip_addresses: Vec<IpAddressEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etherchannel: Option<String>,
}

impl InterfaceRecord {
    /// An interface the device does not report.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ensure: Ensure::Absent,
            description: None,
            duplex: None,
            speed: None,
            switchport: SwitchportRecord::default(),
            ip_addresses: Vec::new(),
            etherchannel: None,
        }
    }

    /// Merge the three per-interface parses into one record.
    ///
    /// An empty status parse means the interface does not exist; the other
    /// parses are then ignored.
    pub fn merge(
        name: impl Into<String>,
        status: InterfaceStatus,
        switchport: SwitchportRecord,
        config: InterfaceConfig,
    ) -> Self {
        if status.is_empty() {
            return Self::absent(name);
        }
        Self {
            name: name.into(),
            ensure: status.ensure.unwrap_or_default(),
            description: status.description,
            duplex: status.duplex,
            speed: status.speed,
            switchport,
            ip_addresses: config.ip_addresses,
            etherchannel: config.etherchannel,
        }
    }
}

/// One row of `sh vlan brief`.
///
/// Serializes as `{id, name, status, interfaces}`. In resource terms `id` is
/// the VLAN resource name and `name` (the name column) is what
/// [`VlanDesiredState::description`] sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRecord {
    /// Numeric VLAN id, as printed.
    pub id: String,
    /// VLAN name column (e.g. `default`, `VLAN0010`).
    pub name: String,
    pub status: String,
    /// Canonical names of member ports, in device order.
    pub interfaces: Vec<String>,
}

impl VlanRecord {
    /// Current state of this VLAN as seen by the reconciler.
    pub fn current_state(&self) -> VlanState {
        VlanState {
            ensure: Ensure::Present,
            name: Some(self.name.clone()),
        }
    }
}

/// VLAN table keyed by id, in device order.
pub type VlanTable = IndexMap<String, VlanRecord>;

/// Observed VLAN attributes the reconciler compares against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanState {
    pub ensure: Ensure,
    #[serde(default)]
    pub name: Option<String>,
}

impl VlanState {
    pub fn absent() -> Self {
        Self {
            ensure: Ensure::Absent,
            name: None,
        }
    }
}

/// Caller-supplied target for one VLAN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanDesiredState {
    pub ensure: Ensure,
    /// Resource name. Equal to the id unless the caller uses it as the
    /// VLAN's textual name.
    #[serde(default)]
    pub name: Option<String>,
    /// Textual VLAN name set with the `name` sub-command.
    #[serde(default)]
    pub description: Option<String>,
}

/// Caller-supplied target for one interface. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceDesiredState {
    pub ensure: Ensure,
    pub description: Option<String>,
    pub speed: Option<Speed>,
    pub duplex: Option<Duplex>,
    pub mode: Option<SwitchportMode>,
    pub encapsulation: Option<Encapsulation>,
    pub access_vlan: Option<String>,
    pub native_vlan: Option<String>,
    pub allowed_trunk_vlans: Option<AllowedVlans>,
    /// `Some("")` removes the interface from its channel group.
    pub etherchannel: Option<String>,
    /// Full desired address list; `None` leaves addressing untouched.
    pub ip_addresses: Option<Vec<IpAddressEntry>>,
}

/// Platform facts read from `sh ver`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardwaremodel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardwarerevision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memorysize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatingsystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatingsystemrelease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatingsystemmajrelease: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operatingsystemfeature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialnumber: Option<String>,
}
