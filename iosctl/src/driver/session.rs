//! Session lifecycle states.

use std::fmt;

/// Lifecycle of one device session.
///
/// ```text
/// Disconnected -> Connected -> Authenticated -> PrivilegeResolved -> Ready
///        \______________\______________\_______________\______________\__> Closed
/// ```
///
/// `Closed` is terminal; a closed device cannot reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Authenticated,
    /// Paging disabled and the privilege level settled (escalated if needed).
    PrivilegeResolved,
    /// Capabilities probed; commands may be executed.
    Ready,
    Closed,
}

impl SessionState {
    /// Whether the transport is open and logged in.
    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            SessionState::Authenticated | SessionState::PrivilegeResolved | SessionState::Ready
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connected => "connected",
            SessionState::Authenticated => "authenticated",
            SessionState::PrivilegeResolved => "privilege-resolved",
            SessionState::Ready => "ready",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Result of the capability probe, recorded once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The device accepts `sh vlan brief`.
    pub vlan_brief: bool,
}
