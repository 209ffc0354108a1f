use std::fmt::Display;
use std::net::IpAddr;

use crate::model::{Ensure, InterfaceDesiredState, InterfaceRecord, IpAddressEntry};
use crate::parse::prefix_to_mask;

/// `ip address ...` / `ipv6 address ...` for one entry, without `no`.
fn address_command(entry: &IpAddressEntry) -> String {
    let mut command = match entry.address {
        IpAddr::V4(addr) => format!("ip address {addr} {}", prefix_to_mask(entry.prefix_length)),
        IpAddr::V6(addr) => format!("ipv6 address {addr}/{}", entry.prefix_length),
    };
    if let Some(tag) = &entry.tag {
        command.push(' ');
        command.push_str(tag);
    }
    command
}

/// Push `<prefix> <desired>` when `desired` is set and differs from `current`.
fn set_if_changed<T: PartialEq + Display>(
    commands: &mut Vec<String>,
    prefix: &str,
    current: Option<&T>,
    desired: Option<&T>,
) {
    if let Some(value) = desired {
        if current != Some(value) {
            commands.push(format!("{prefix} {value}"));
        }
    }
}

fn plan_addresses(commands: &mut Vec<String>, current: &[IpAddressEntry], desired: &[IpAddressEntry]) {
    let mut removed: Vec<&IpAddressEntry> = current.iter().filter(|e| !desired.contains(e)).collect();
    // IOS refuses to drop a primary address while secondaries remain
    removed.sort_by_key(|e| e.tag.as_deref() != Some("secondary"));

    commands.extend(removed.into_iter().map(|e| format!("no {}", address_command(e))));
    commands.extend(
        desired
            .iter()
            .filter(|e| !current.contains(e))
            .map(address_command),
    );
}

/// Commands moving interface `name` from `current` to `desired`.
///
/// Returns an empty list when nothing differs; otherwise `interface <name>`
/// comes first, followed by one command per changed attribute.
pub fn plan_interface_update(
    name: &str,
    current: &InterfaceRecord,
    desired: &InterfaceDesiredState,
) -> Vec<String> {
    let mut commands = Vec::new();
    let switchport = &current.switchport;

    if desired.ensure != current.ensure {
        commands.push(match desired.ensure {
            Ensure::Present => "no shutdown".to_string(),
            Ensure::Absent => "shutdown".to_string(),
        });
    }

    match desired.description.as_deref() {
        Some("") if current.description.is_some() => commands.push("no description".to_string()),
        Some("") | None => {}
        Some(text) => {
            if current.description.as_deref() != Some(text) {
                commands.push(format!("description {text}"));
            }
        }
    }

    set_if_changed(&mut commands, "speed", current.speed.as_ref(), desired.speed.as_ref());
    set_if_changed(&mut commands, "duplex", current.duplex.as_ref(), desired.duplex.as_ref());
    set_if_changed(
        &mut commands,
        "switchport mode",
        switchport.mode.as_ref(),
        desired.mode.as_ref(),
    );
    set_if_changed(
        &mut commands,
        "switchport trunk encapsulation",
        switchport.encapsulation.as_ref(),
        desired.encapsulation.as_ref(),
    );
    set_if_changed(
        &mut commands,
        "switchport access vlan",
        switchport.access_vlan.as_ref(),
        desired.access_vlan.as_ref(),
    );
    set_if_changed(
        &mut commands,
        "switchport trunk native vlan",
        switchport.native_vlan.as_ref(),
        desired.native_vlan.as_ref(),
    );
    set_if_changed(
        &mut commands,
        "switchport trunk allowed vlan",
        switchport.allowed_trunk_vlans.as_ref(),
        desired.allowed_trunk_vlans.as_ref(),
    );

    match desired.etherchannel.as_deref() {
        Some("") if current.etherchannel.is_some() => {
            commands.push("no channel-group".to_string());
        }
        Some("") | None => {}
        Some(group) => {
            if current.etherchannel.as_deref() != Some(group) {
                commands.push(format!("channel-group {group} mode on"));
            }
        }
    }

    if let Some(addresses) = &desired.ip_addresses {
        plan_addresses(&mut commands, &current.ip_addresses, addresses);
    }

    if !commands.is_empty() {
        commands.insert(0, format!("interface {name}"));
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AllowedVlans, Duplex, Speed, SwitchportMode, SwitchportRecord};

    fn access_port() -> InterfaceRecord {
        InterfaceRecord {
            ensure: Ensure::Present,
            duplex: Some(Duplex::Auto),
            speed: Some(Speed::Auto),
            switchport: SwitchportRecord {
                mode: Some(SwitchportMode::Access),
                access_vlan: Some("100".to_string()),
                native_vlan: Some("1".to_string()),
                ..Default::default()
            },
            ..InterfaceRecord::absent("FastEthernet0/1")
        }
    }

    #[test]
    fn test_unchanged_interface_yields_empty_plan() {
        let desired = InterfaceDesiredState {
            speed: Some(Speed::Auto),
            access_vlan: Some("100".to_string()),
            ..Default::default()
        };
        assert!(plan_interface_update("FastEthernet0/1", &access_port(), &desired).is_empty());
    }

    #[test]
    fn test_convert_access_port_to_trunk() {
        let desired = InterfaceDesiredState {
            description: Some("uplink".to_string()),
            mode: Some(SwitchportMode::Trunk),
            encapsulation: Some(crate::model::Encapsulation::Dot1q),
            allowed_trunk_vlans: Some(AllowedVlans::List("10,20-30".to_string())),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("FastEthernet0/1", &access_port(), &desired),
            vec![
                "interface FastEthernet0/1",
                "description uplink",
                "switchport mode trunk",
                "switchport trunk encapsulation dot1q",
                "switchport trunk allowed vlan 10,20-30",
            ]
        );
    }

    #[test]
    fn test_shutdown_and_fixed_speed() {
        let desired = InterfaceDesiredState {
            ensure: Ensure::Absent,
            speed: Some(Speed::Mbps(100)),
            duplex: Some(Duplex::Full),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("FastEthernet0/1", &access_port(), &desired),
            vec!["interface FastEthernet0/1", "shutdown", "speed 100", "duplex full"]
        );
    }

    #[test]
    fn test_negotiated_mode_uses_raw_string() {
        let desired = InterfaceDesiredState {
            mode: Some(SwitchportMode::Negotiated("dynamic desirable".to_string())),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("FastEthernet0/1", &access_port(), &desired),
            vec!["interface FastEthernet0/1", "switchport mode dynamic desirable"]
        );
    }

    #[test]
    fn test_etherchannel_join_and_leave() {
        let join = InterfaceDesiredState {
            etherchannel: Some("1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("FastEthernet0/1", &access_port(), &join),
            vec!["interface FastEthernet0/1", "channel-group 1 mode on"]
        );

        let member = InterfaceRecord {
            etherchannel: Some("1".to_string()),
            ..access_port()
        };
        let leave = InterfaceDesiredState {
            etherchannel: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("FastEthernet0/1", &member, &leave),
            vec!["interface FastEthernet0/1", "no channel-group"]
        );
    }

    #[test]
    fn test_address_changes() {
        let current = InterfaceRecord {
            ensure: Ensure::Present,
            ip_addresses: vec![
                IpAddressEntry::new(24, "192.168.0.1".parse().unwrap(), None),
                IpAddressEntry::new(24, "192.168.0.24".parse().unwrap(), Some("secondary")),
            ],
            ..InterfaceRecord::absent("VLAN1")
        };
        let desired = InterfaceDesiredState {
            ip_addresses: Some(vec![
                IpAddressEntry::new(24, "10.0.0.1".parse().unwrap(), None),
                IpAddressEntry::new(64, "2001:7a8:71c1::".parse().unwrap(), Some("eui-64")),
            ]),
            ..Default::default()
        };
        assert_eq!(
            plan_interface_update("VLAN1", &current, &desired),
            vec![
                "interface VLAN1",
                "no ip address 192.168.0.24 255.255.255.0 secondary",
                "no ip address 192.168.0.1 255.255.255.0",
                "ip address 10.0.0.1 255.255.255.0",
                "ipv6 address 2001:7a8:71c1::/64 eui-64",
            ]
        );
    }
}
