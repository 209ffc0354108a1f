//! `sh interface <name>` parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::channel::patterns::strip_echo_and_prompt;
use crate::model::{Duplex, Ensure, InterfaceStatus, Speed};

static STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\S+ is (.+?), line protocol is ").expect("valid status regex")
});
static AUTO_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)auto[ -]speed").expect("valid auto speed regex"));
static FIXED_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s?([MG])b/s").expect("valid speed regex"));
static DUPLEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(half|full|auto)-duplex").expect("valid duplex regex"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*Description: (.+?)\s*$").expect("valid description regex"));

/// Parse the banner of `sh interface <name>`.
///
/// Only the line-protocol status, duplex, speed and description lines are
/// read. Output without a status line yields an empty record, which callers
/// treat as an absent interface.
pub fn parse_interface_status(output: &str) -> InterfaceStatus {
    let mut status = InterfaceStatus::default();

    for line in strip_echo_and_prompt(output) {
        if let Some(caps) = STATUS.captures(line) {
            status.ensure = Some(if &caps[1] == "up" {
                Ensure::Present
            } else {
                Ensure::Absent
            });
            continue;
        }

        if let Some(caps) = DESCRIPTION.captures(line) {
            status.description = Some(caps[1].to_string());
            continue;
        }

        if let Some(caps) = DUPLEX.captures(line) {
            status.duplex = match caps[1].to_ascii_lowercase().as_str() {
                "half" => Some(Duplex::Half),
                "full" => Some(Duplex::Full),
                _ => Some(Duplex::Auto),
            };
        }

        if AUTO_SPEED.is_match(line) {
            status.speed = Some(Speed::Auto);
        } else if let Some(caps) = FIXED_SPEED.captures(line) {
            if let Ok(n) = caps[1].parse::<u32>() {
                let mbps = if &caps[2] == "G" { n.saturating_mul(1000) } else { n };
                status.speed = Some(Speed::Mbps(mbps));
            }
        }
    }

    status
}
