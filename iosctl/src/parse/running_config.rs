//! Interface running-config parser.
//!
//! Reads the block printed by `sh running-config interface <name> | begin
//! interface`: address assignments and EtherChannel membership. Every other
//! configuration line is ignored.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::model::{InterfaceConfig, IpAddressEntry};

/// Prefix length of a contiguous IPv4 netmask.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    (bits.checked_shl(len).unwrap_or(0) == 0).then_some(len as u8)
}

/// Dotted netmask for an IPv4 prefix length.
pub fn prefix_to_mask(prefix_length: u8) -> Ipv4Addr {
    let bits = match prefix_length {
        0 => 0,
        n if n >= 32 => u32::MAX,
        n => u32::MAX << (32 - u32::from(n)),
    };
    Ipv4Addr::from(bits)
}

/// `ip address <addr> <mask> [secondary]`
fn ipv4_entry(args: &[&str]) -> Option<IpAddressEntry> {
    let (addr, mask, tag) = match args {
        [addr, mask] => (addr, mask, None),
        [addr, mask, "secondary"] => (addr, mask, Some("secondary")),
        _ => return None,
    };
    let address: Ipv4Addr = addr.parse().ok()?;
    let prefix = mask_to_prefix(mask.parse().ok()?)?;
    Some(IpAddressEntry::new(prefix, IpAddr::V4(address), tag))
}

/// `ipv6 address <prefix>/<len> [eui-64|link-local|anycast]`
fn ipv6_entry(args: &[&str]) -> Option<IpAddressEntry> {
    let (cidr, tag) = match args {
        [cidr] => (cidr, None),
        [cidr, tag @ ("eui-64" | "link-local" | "anycast")] => (cidr, Some(*tag)),
        _ => return None,
    };
    let (addr, len) = cidr.split_once('/')?;
    let address: Ipv6Addr = addr.parse().ok()?;
    let prefix: u8 = len.parse().ok().filter(|p| *p <= 128)?;
    Some(IpAddressEntry::new(prefix, IpAddr::V6(address), tag))
}

/// Parse an interface's running-config block.
pub fn parse_interface_config(output: &str) -> InterfaceConfig {
    let mut config = InterfaceConfig::default();

    for line in output.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["ip", "address", args @ ..] => {
                if let Some(entry) = ipv4_entry(args) {
                    config.ip_addresses.push(entry);
                }
            }
            ["ipv6", "address", args @ ..] => {
                if let Some(entry) = ipv6_entry(args) {
                    config.ip_addresses.push(entry);
                }
            }
            ["channel-group", group, ..] if group.chars().all(|c| c.is_ascii_digit()) => {
                config.etherchannel = Some(group.to_string());
            }
            _ => {}
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_conversion() {
        assert_eq!(mask_to_prefix("255.255.255.0".parse().unwrap()), Some(24));
        assert_eq!(mask_to_prefix("255.255.255.255".parse().unwrap()), Some(32));
        assert_eq!(mask_to_prefix("0.0.0.0".parse().unwrap()), Some(0));
        assert_eq!(mask_to_prefix("255.0.255.0".parse().unwrap()), None);
        assert_eq!(prefix_to_mask(24), "255.255.255.0".parse::<Ipv4Addr>().unwrap());
        assert_eq!(prefix_to_mask(0), Ipv4Addr::UNSPECIFIED);
        assert_eq!(prefix_to_mask(32), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn test_parse_ip_addresses() {
        let output = "\
router#sh running-config interface Vlan 1 | begin interface
interface Vlan1
 description $ETH-SW-LAUNCH$$INTF-INFO-HWIC 4ESW$$FW_INSIDE$
 ip address 192.168.0.24 255.255.255.0 secondary
 ip address 192.168.0.1 255.255.255.0
 ip access-group 100 in
 no ip redirects
 no ip proxy-arp
 ip nbar protocol-discovery
 ip nat inside
 ipv6 address 2001:7A8:71C1::/64 eui-64
 ipv6 enable
 ipv6 traffic-filter DENY-ACL6 out
 ipv6 nd prefix 2001:7A8:71C1::/64
 ipv6 nd ra interval 60
end

router#
";
        let config = parse_interface_config(output);
        assert_eq!(
            config.ip_addresses,
            vec![
                IpAddressEntry::new(24, "192.168.0.24".parse().unwrap(), Some("secondary")),
                IpAddressEntry::new(24, "192.168.0.1".parse().unwrap(), None),
                IpAddressEntry::new(64, "2001:07a8:71c1::".parse().unwrap(), Some("eui-64")),
            ]
        );
        assert!(config.etherchannel.is_none());
    }

    #[test]
    fn test_parse_etherchannel_membership() {
        let output = "\
c2960#sh running-config interface Gi0/17 | begin interface
interface GigabitEthernet0/17
 description member of Po1
 switchport mode access
 channel-protocol lacp
 channel-group 1 mode passive
 spanning-tree portfast
end

c2960#
";
        assert_eq!(
            parse_interface_config(output),
            InterfaceConfig {
                ip_addresses: vec![],
                etherchannel: Some("1".to_string()),
            }
        );
    }

    #[test]
    fn test_no_ip_address_and_dhcp_are_ignored() {
        let output = "interface Gi0/1\n no ip address\n ip address dhcp\n ipv6 address autoconfig\nend\n";
        assert_eq!(parse_interface_config(output), InterfaceConfig::default());
    }

    /// Render a config block as `sh running-config interface` prints it.
    fn render(config: &InterfaceConfig) -> String {
        let mut out = String::from("interface Vlan1\n description rendered\n");
        for entry in &config.ip_addresses {
            let tag = entry.tag.as_deref().map(|t| format!(" {t}")).unwrap_or_default();
            match entry.address {
                IpAddr::V4(addr) => out.push_str(&format!(
                    " ip address {addr} {}{tag}\n",
                    prefix_to_mask(entry.prefix_length)
                )),
                IpAddr::V6(addr) => out.push_str(&format!(
                    " ipv6 address {addr}/{}{tag}\n",
                    entry.prefix_length
                )),
            }
        }
        if let Some(group) = &config.etherchannel {
            out.push_str(&format!(" channel-group {group} mode active\n"));
        }
        out.push_str("end\n");
        out
    }

    #[test]
    fn test_rendered_config_parses_back_equal() {
        let configs = [
            InterfaceConfig {
                ip_addresses: vec![
                    IpAddressEntry::new(24, "192.168.0.24".parse().unwrap(), Some("secondary")),
                    IpAddressEntry::new(24, "192.168.0.1".parse().unwrap(), None),
                    IpAddressEntry::new(64, "2001:7a8:71c1::".parse().unwrap(), Some("eui-64")),
                    IpAddressEntry::new(48, "2001:db8:1::1".parse().unwrap(), None),
                ],
                etherchannel: None,
            },
            InterfaceConfig {
                ip_addresses: vec![IpAddressEntry::new(30, "10.0.0.1".parse().unwrap(), None)],
                etherchannel: Some("12".to_string()),
            },
            InterfaceConfig {
                ip_addresses: vec![],
                etherchannel: Some("1".to_string()),
            },
        ];

        for config in configs {
            assert_eq!(parse_interface_config(&render(&config)), config);
        }
    }
}
