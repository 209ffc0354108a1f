//! Interactive transport layer.
//!
//! The device session only talks to the wire through the [`Transport`]
//! trait: connect, close, send a line and wait for a prompt, wait for a
//! pattern, and report whether the transport authenticates by itself.
//! Telnet and SSH implementations are provided; [`AnyTransport`] selects one
//! from the URL scheme.

pub mod config;
mod ssh;
mod telnet;

#[cfg(test)]
pub(crate) mod mock;

use std::future::Future;

use regex::bytes::Regex;

pub use config::{AuthMethod, HostKeyVerification, TransportConfig};
pub use ssh::SshTransport;
pub use telnet::TelnetTransport;

use crate::error::Result;

/// An interactive line-oriented connection to a device.
///
/// Timeouts and disconnect detection belong to the implementation; callers
/// treat any error as fatal for the session.
pub trait Transport: Send {
    /// Open the connection.
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Release the connection. Must be safe to call when not connected.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send `text` as one line and return everything received up to and
    /// including the prompt. `prompt` overrides the default `[#>]` prompt.
    fn command(
        &mut self,
        text: &str,
        prompt: Option<&Regex>,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Wait for `pattern` without sending anything.
    fn expect(&mut self, pattern: &Regex) -> impl Future<Output = Result<String>> + Send;

    /// Whether the transport authenticates during `connect()`.
    fn handles_login(&self) -> bool;
}

/// Transport selected from a URL scheme.
pub enum AnyTransport {
    Telnet(TelnetTransport),
    Ssh(SshTransport),
}

impl Transport for AnyTransport {
    async fn connect(&mut self) -> Result<()> {
        match self {
            AnyTransport::Telnet(t) => t.connect().await,
            AnyTransport::Ssh(t) => t.connect().await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            AnyTransport::Telnet(t) => t.close().await,
            AnyTransport::Ssh(t) => t.close().await,
        }
    }

    async fn command(&mut self, text: &str, prompt: Option<&Regex>) -> Result<String> {
        match self {
            AnyTransport::Telnet(t) => t.command(text, prompt).await,
            AnyTransport::Ssh(t) => t.command(text, prompt).await,
        }
    }

    async fn expect(&mut self, pattern: &Regex) -> Result<String> {
        match self {
            AnyTransport::Telnet(t) => t.expect(pattern).await,
            AnyTransport::Ssh(t) => t.expect(pattern).await,
        }
    }

    fn handles_login(&self) -> bool {
        match self {
            AnyTransport::Telnet(t) => t.handles_login(),
            AnyTransport::Ssh(t) => t.handles_login(),
        }
    }
}

impl std::fmt::Debug for AnyTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyTransport::Telnet(_) => f.write_str("AnyTransport::Telnet"),
            AnyTransport::Ssh(_) => f.write_str("AnyTransport::Ssh"),
        }
    }
}
