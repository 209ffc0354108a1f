//! Parsers turning raw IOS command output into structured records.
//!
//! Every parser is a pure function over one command's text. Lines a parser
//! does not recognize are skipped, so output from unseen models and releases
//! degrades to missing fields rather than errors.

mod ifname;
mod interface;
mod ip_brief;
mod running_config;
mod switchport;
mod version;
mod vlan;

pub use ifname::canonicalize;
pub use interface::parse_interface_status;
pub use ip_brief::parse_interface_names;
pub use running_config::{mask_to_prefix, parse_interface_config, prefix_to_mask};
pub use switchport::parse_switchport;
pub use version::{major_release, parse_version, uptime_seconds};
pub use vlan::parse_vlan_brief;
