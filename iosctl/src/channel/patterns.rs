//! Prompt patterns for IOS command-line sessions.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// Default prompt: a whole line such as `Switch>`, `Switch#` or
/// `Switch(config-if)#` at the end of output.
///
/// The hostname part has no whitespace, so indented config lines and banner
/// rules that merely end in `#` or `>` do not count as a prompt.
pub static DEFAULT_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\w.\-@()/:]{1,63}[#>]\s?$").expect("valid default prompt regex")
});

/// Password prompt, case-sensitive and anchored at a line start.
pub static PASSWORD_PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Password:").expect("valid password prompt regex"));

/// Signature of the IOS command disambiguation error.
pub const AMBIGUOUS_COMMAND: &str = "% Ambiguous command";

/// Prompt character of the privilege level reported by `prompt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// `>`: user exec, `enable` required.
    User,
    /// `#`: privileged exec.
    Privileged,
    /// No recognizable prompt at the end of the output.
    Unknown,
}

/// Classify the trailing prompt of a command's raw output.
pub fn prompt_kind(output: &str) -> PromptKind {
    let last = output
        .lines()
        .rev()
        .map(str::trim_end)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if last.ends_with('>') {
        PromptKind::User
    } else if last.ends_with('#') {
        PromptKind::Privileged
    } else {
        PromptKind::Unknown
    }
}

/// Strip the command echo (first line) and trailing prompt (last line).
///
/// Outputs that do not carry an echo or prompt are returned as-is minus the
/// lines that look like them, so parsers can be fed either form.
pub fn strip_echo_and_prompt(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = raw.lines().map(|l| l.trim_end_matches('\r')).collect();

    if lines
        .first()
        .is_some_and(|l| looks_like_prompt_line(l))
    {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.last().is_some_and(|l| looks_like_prompt_line(l)) {
        lines.pop();
    }
    lines
}

/// `Switch#`, `Switch>` or `Switch#sh vlan brief`.
fn looks_like_prompt_line(line: &str) -> bool {
    let Some(pos) = line.find(['#', '>']) else {
        return false;
    };
    pos > 0 && !line[..pos].contains(char::is_whitespace)
}
