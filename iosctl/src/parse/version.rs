//! `sh ver` parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::SystemFacts;

static HARDWARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)cisco ([\w-]+) (?:\(([\w-]+)\) processor )?\(revision (.+)\) with (\d+[KMG])(?:/\d+[KMG])? bytes of memory",
    )
    .expect("valid hardware regex")
});
static UPTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\w-]+)\s+uptime is (.*?)\s*$").expect("valid uptime regex")
});
static UPTIME_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s+(year|week|day|hour|minute)s?").expect("valid uptime part regex")
});
static IOS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Cisco )?IOS\b.*? Software \(([^-]+)-(\w+)-\w+\), Version ([^,\s]+)")
        .expect("valid IOS version regex")
});
static MAJOR_RELEASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\(.+\)([A-Z]+)([\da-z]+)?").expect("valid release regex")
});
static SERIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Processor board ID (\S+)").expect("valid serial regex")
});

/// Seconds in an uptime text such as `1 year, 2 weeks, 3 days, 4 hours, 5 minutes`.
pub fn uptime_seconds(text: &str) -> u64 {
    UPTIME_PART
        .captures_iter(text)
        .filter_map(|caps| {
            let n: u64 = caps[1].parse().ok()?;
            let unit = match &caps[2] {
                "year" => 31_536_000,
                "week" => 604_800,
                "day" => 86_400,
                "hour" => 3_600,
                _ => 60,
            };
            Some(n.saturating_mul(unit))
        })
        .fold(0, u64::saturating_add)
}

/// Major release train of an IOS version: `12.2(58)SE2` is `12.2SE`.
pub fn major_release(release: &str) -> String {
    MAJOR_RELEASE.replace(release, "${1}.${2}${3}").into_owned()
}

/// Parse `sh ver` output into system facts. Unmatched lines are skipped.
pub fn parse_version(output: &str) -> SystemFacts {
    let mut facts = SystemFacts::default();

    for line in output.lines().map(|l| l.trim_end_matches('\r')) {
        if let Some(caps) = HARDWARE.captures(line) {
            facts.hardwaremodel = Some(caps[1].to_string());
            facts.processor = caps.get(2).map(|m| m.as_str().to_string());
            facts.hardwarerevision = Some(caps[3].to_string());
            facts.memorysize = Some(caps[4].to_string());
        } else if let Some(caps) = UPTIME.captures(line) {
            let seconds = uptime_seconds(&caps[2]);
            facts.hostname = Some(caps[1].to_string());
            facts.uptime = Some(caps[2].to_string());
            facts.uptime_seconds = Some(seconds);
            facts.uptime_days = Some(seconds / 86_400);
        } else if let Some(caps) = IOS_VERSION.captures(line) {
            let release = caps[3].to_string();
            facts.operatingsystem = Some("IOS".to_string());
            facts.operatingsystemfeature = Some(caps[2].to_string());
            facts.operatingsystemmajrelease = Some(major_release(&release));
            facts.operatingsystemrelease = Some(release);
        } else if let Some(caps) = SERIAL.captures(line) {
            facts.serialnumber = Some(caps[1].to_string());
        }
    }

    facts
}
