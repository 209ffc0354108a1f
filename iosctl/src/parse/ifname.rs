//! Interface name canonicalization.
//!
//! IOS accepts and prints many abbreviations of the same interface
//! (`Fa0/1`, `FastEth 0/1`, `FastEthernet0/1`). Records always carry the
//! full form so names from different commands compare equal.

/// Media types and the abbreviations IOS accepts for them.
///
/// Order matters: the first media type with an abbreviation followed by a
/// port number wins, and each list runs from longest to shortest.
const MEDIA_TYPES: &[(&str, &[&str])] = &[
    ("FastEthernet", &["FastEthernet", "FastEth", "Fast", "FE", "Fa", "F"]),
    ("GigabitEthernet", &["GigabitEthernet", "GigEthernet", "GigEth", "GE", "Gi", "G"]),
    ("TenGigabitEthernet", &["TenGigabitEthernet", "TE", "Te"]),
    ("Ethernet", &["Ethernet", "Eth", "E"]),
    ("Serial", &["Serial", "Se", "S"]),
    ("Port-channel", &["Port-channel", "PortChannel", "Po"]),
    ("POS", &["POS", "P"]),
    ("VLAN", &["VLAN", "VL", "V"]),
    ("Loopback", &["Loopback", "Loop", "Lo"]),
    ("ATM", &["ATM", "AT", "A"]),
    ("Dialer", &["Dialer", "Dial", "Di", "D"]),
    ("Virtual-Access", &["Virtual-Access", "Virtual-A", "Virtual", "Virt"]),
];

/// Expand an abbreviated interface name to its canonical form.
///
/// Whitespace is removed from the port designator. Names with no known
/// prefix are returned unchanged.
///
/// ```
/// use iosctl::parse::canonicalize;
///
/// assert_eq!(canonicalize("Fa 0/1"), "FastEthernet0/1");
/// assert_eq!(canonicalize("Gi1"), "GigabitEthernet1");
/// assert_eq!(canonicalize("Tunnel0"), "Tunnel0");
/// ```
pub fn canonicalize(raw: &str) -> String {
    let name = raw.trim();

    for (full, abbreviations) in MEDIA_TYPES {
        for abbrev in *abbreviations {
            if let Some(port) = port_after(name, abbrev) {
                let mut canonical = String::with_capacity(full.len() + port.len());
                canonical.push_str(full);
                canonical.extend(port.chars().filter(|c| !c.is_whitespace()));
                return canonical;
            }
        }
    }

    name.to_string()
}

/// The port designator following `abbrev`, if `name` starts with `abbrev`
/// (ignoring case) followed by optional whitespace and a digit.
fn port_after<'a>(name: &'a str, abbrev: &str) -> Option<&'a str> {
    let prefix = name.get(..abbrev.len())?;
    if !prefix.eq_ignore_ascii_case(abbrev) {
        return None;
    }
    let port = name[abbrev.len()..].trim_start();
    port.starts_with(|c: char| c.is_ascii_digit()).then_some(port)
}
