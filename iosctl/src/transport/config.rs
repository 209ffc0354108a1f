//! Transport connection configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Default)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys.
    Strict,

    /// Accept and learn unknown keys, but reject changed keys.
    #[default]
    AcceptNew,

    /// Accept all keys without checking. For lab use only.
    Disabled,
}

/// Connection settings shared by the telnet and SSH transports.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Login username (may be empty).
    pub username: String,

    /// Authentication method used by transports that log in themselves.
    pub auth: AuthMethod,

    /// Timeout for connecting and for each prompt wait.
    pub timeout: Duration,

    /// Log every chunk received.
    pub debug: bool,

    /// Bytes from the end of the buffer searched for a prompt.
    pub search_depth: usize,

    /// Terminal width for the SSH PTY.
    pub terminal_width: u32,

    /// Terminal height for the SSH PTY.
    pub terminal_height: u32,

    /// Host key verification mode (SSH only).
    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file (SSH only).
    pub known_hosts_path: Option<PathBuf>,
}

impl TransportConfig {
    /// Create a configuration with defaults for the given endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: String::new(),
            auth: AuthMethod::None,
            timeout: Duration::from_secs(30),
            debug: false,
            search_depth: 1000,
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Authentication method for transports that authenticate during connect.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// No authentication.
    None,

    /// Password authentication.
    Password(SecretString),

    /// Private key authentication.
    PrivateKey {
        /// Path to the private key file.
        path: PathBuf,
        /// Optional passphrase for encrypted keys.
        passphrase: Option<SecretString>,
    },
}
