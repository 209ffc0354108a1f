//! `sh ip interface brief` parser.

use std::sync::LazyLock;

use regex::Regex;

use super::ifname::canonicalize;

/// `Interface  IP-Address  OK? Method Status  Protocol`
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+(?:\S+)\s+(?:YES|NO)\s+\S+\s+\S").expect("valid ip brief row regex")
});

/// Canonical names of every interface listed, in device order.
pub fn parse_interface_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| ROW.captures(line.trim_end_matches('\r')))
        .map(|caps| canonicalize(&caps[1]))
        .collect()
}
