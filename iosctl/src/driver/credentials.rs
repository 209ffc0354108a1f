//! Device URL and credentials.

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ConfigError, Result};

/// Transport selected by the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Telnet,
    Ssh,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Telnet => 23,
            Scheme::Ssh => 22,
        }
    }
}

/// Login and privilege-escalation secrets for one device.
#[derive(Clone)]
pub struct Credentials {
    /// Login user; empty when the device only asks for a password.
    pub user: String,
    pub password: SecretString,
    pub enable_password: Option<SecretString>,
}

impl Credentials {
    /// Whether an enable password is configured and non-empty.
    pub fn has_enable_password(&self) -> bool {
        self.enable_password
            .as_ref()
            .is_some_and(|p| !p.expose_secret().is_empty())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field(
                "enable_password",
                &self.enable_password.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// A parsed `scheme://[user[:password]@]host[:port][/][?enable=<secret>]`.
#[derive(Debug, Clone)]
pub struct DeviceUrl {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
}

impl DeviceUrl {
    /// Parse a device URL.
    ///
    /// The enable password is read only from the `enable` query parameter
    /// and is percent-decoded. The user and password are taken verbatim from
    /// the authority.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: String| ConfigError::InvalidUrl {
            url: input.to_string(),
            message,
        };

        let url = Url::parse(input).map_err(|e| invalid(e.to_string()))?;

        let scheme = match url.scheme() {
            "telnet" => Scheme::Telnet,
            "ssh" => Scheme::Ssh,
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    scheme: other.to_string(),
                }
                .into());
            }
        };

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host".to_string()))?
            .to_string();

        let enable_password = url
            .query_pairs()
            .find(|(key, _)| key == "enable")
            .map(|(_, value)| SecretString::from(value.into_owned()));

        Ok(Self {
            scheme,
            host,
            port: url.port().unwrap_or(scheme.default_port()),
            credentials: Credentials {
                user: url.username().to_string(),
                password: SecretString::from(url.password().unwrap_or_default().to_string()),
                enable_password,
            },
        })
    }
}
