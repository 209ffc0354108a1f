//! `sh vlan brief` parser.
//!
//! ```text
//! VLAN Name                             Status    Ports
//! ---- -------------------------------- --------- -------------------------------
//! 1    default                          active    Fa0/3, Fa0/4, Fa0/5, Fa0/6,
//!                                                 Fa0/7, Fa0/8
//! 10   VLAN0010                         active
//! ```
//!
//! A row starts with a numeric id; indented lines continue the ports
//! column of the row above.

use std::sync::LazyLock;

use regex::Regex;

use super::ifname::canonicalize;
use crate::model::{VlanRecord, VlanTable};

static ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(\S+)\s+(\S+)\s*(.*)$").expect("valid vlan row regex")
});
static CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+(\S.*)$").expect("valid continuation regex"));

/// Classification of one line of the listing.
enum Line<'a> {
    Row {
        id: &'a str,
        name: &'a str,
        status: &'a str,
        ports: &'a str,
    },
    Continuation(&'a str),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = ROW.captures(line) {
        let (_, [id, name, status, ports]) = caps.extract();
        return Line::Row {
            id,
            name,
            status,
            ports,
        };
    }
    if let Some(caps) = CONTINUATION.captures(line) {
        let (_, [ports]) = caps.extract();
        return Line::Continuation(ports);
    }
    Line::Other
}

fn push_ports(record: &mut VlanRecord, ports: &str) {
    record.interfaces.extend(
        ports
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(canonicalize),
    );
}

/// Parse a `sh vlan brief` listing into a table keyed by VLAN id.
///
/// Header, separator and prompt lines are skipped. If an id appears twice
/// the later row replaces the earlier one.
pub fn parse_vlan_brief(output: &str) -> VlanTable {
    let mut table = VlanTable::new();
    let mut current: Option<VlanRecord> = None;

    for raw in output.lines() {
        let line = raw.trim_end_matches('\r');
        match classify(line) {
            Line::Row {
                id,
                name,
                status,
                ports,
            } => {
                if let Some(done) = current.take() {
                    table.insert(done.id.clone(), done);
                }
                let mut record = VlanRecord {
                    id: id.to_string(),
                    name: name.to_string(),
                    status: status.to_string(),
                    interfaces: Vec::new(),
                };
                push_ports(&mut record, ports);
                current = Some(record);
            }
            Line::Continuation(ports) => {
                if let Some(record) = current.as_mut() {
                    push_ports(record, ports);
                }
            }
            Line::Other => {
                // A non-indented, non-row line (prompt, trailer) ends the row
                if let Some(done) = current.take() {
                    table.insert(done.id.clone(), done);
                }
            }
        }
    }

    if let Some(done) = current.take() {
        table.insert(done.id.clone(), done);
    }
    table
}
