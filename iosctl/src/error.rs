//! Error types for iosctl.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for iosctl operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level errors (connection, prompt wait, disconnect)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Session lifecycle errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Caller-supplied configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Whether this error ends the current session.
    ///
    /// Transport failures are always fatal: the session is closed before the
    /// error reaches the caller and must be recreated.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Transport layer errors (connection, authentication, prompt matching).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host key not found in known_hosts (strict mode)
    #[error("Host key for {host}:{port} not found in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the known_hosts entry
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation attempted before connect()
    #[error("Transport not connected")]
    NotConnected,

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Operation not valid in the current lifecycle state
    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },

    /// Session was already connected
    #[error("Session already connected")]
    AlreadyConnected,

    /// Session has been closed and cannot be reused
    #[error("Session closed - create a new device to reconnect")]
    Closed,
}

/// Configuration errors, raised before any device interaction.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Privilege escalation requested without an enable password
    #[error("cannot escalate privilege without an enable password")]
    MissingEnablePassword,

    /// Connection URL could not be parsed
    #[error("Invalid device URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// URL scheme has no transport
    #[error("Unsupported transport scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// Invalid builder or option value
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Result type alias using iosctl's Error.
pub type Result<T> = std::result::Result<T, Error>;
