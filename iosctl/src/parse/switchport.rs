//! `sh interface <name> switchport` parser.

use log::debug;

use crate::channel::patterns::strip_echo_and_prompt;
use crate::model::{AllowedVlans, Encapsulation, SwitchportMode, SwitchportRecord};

/// Split `Key: value` on the first colon, trimming both sides.
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Leading VLAN id of a value such as `1 (default)`.
///
/// Returns `None` for values whose comment marks the VLAN inactive
/// (`0 ((Inactive))`) or that carry no id.
fn vlan_id(value: &str) -> Option<String> {
    if value.contains("(Inactive)") {
        return None;
    }
    let id = value.split_whitespace().next()?;
    id.chars()
        .all(|c| c.is_ascii_digit())
        .then(|| id.to_string())
}

fn mode(value: &str) -> Option<SwitchportMode> {
    match value {
        "trunk" => Some(SwitchportMode::Trunk),
        "access" | "static access" => Some(SwitchportMode::Access),
        v if v.starts_with("dynamic") => Some(SwitchportMode::Negotiated(v.to_string())),
        _ => None,
    }
}

fn encapsulation(value: &str) -> Option<Encapsulation> {
    match value {
        "dot1q" | "802.1q" => Some(Encapsulation::Dot1q),
        "isl" => Some(Encapsulation::Isl),
        "negotiate" => Some(Encapsulation::Negotiate),
        _ => None,
    }
}

/// Parse `sh interface <name> switchport` key/value lines.
///
/// The administrative mode decides the reported mode. Access ports report
/// neither a static trunk encapsulation nor an allowed-VLAN list. Lines are
/// folded in order, so the mode line must precede the trunk lines, as it
/// does in IOS output.
pub fn parse_switchport(output: &str) -> SwitchportRecord {
    let mut record = SwitchportRecord::default();

    for line in strip_echo_and_prompt(output) {
        let Some((key, value)) = key_value(line) else {
            continue;
        };
        let is_access = record.mode == Some(SwitchportMode::Access);

        match key.to_ascii_lowercase().as_str() {
            "administrative mode" => {
                record.mode = mode(value);
                if record.mode.is_none() {
                    debug!("unrecognized switchport mode '{}'", value);
                }
            }
            "administrative trunking encapsulation" => match encapsulation(value) {
                Some(Encapsulation::Negotiate) => {
                    record.encapsulation = Some(Encapsulation::Negotiate);
                }
                Some(static_encap) if !is_access => {
                    record.encapsulation = Some(static_encap);
                }
                _ => {}
            },
            "access mode vlan" => {
                record.access_vlan = vlan_id(value);
            }
            "trunking native mode vlan" => {
                record.native_vlan = vlan_id(value);
            }
            "trunking vlans enabled" if !is_access => {
                record.allowed_trunk_vlans = Some(AllowedVlans::from(value.to_string()));
            }
            _ => {}
        }
    }

    record
}
