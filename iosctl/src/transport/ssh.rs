//! SSH transport implementation using russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use regex::bytes::Regex;
use russh::client::{self, Handle, Msg};
use russh::keys::{PrivateKeyWithHashAlg, PublicKey, load_secret_key};
use russh::{Channel, ChannelMsg};
use secrecy::ExposeSecret;
use tokio::time::Instant;

use super::Transport;
use super::config::{AuthMethod, HostKeyVerification, TransportConfig};
use crate::channel::PatternBuffer;
use crate::channel::patterns::DEFAULT_PROMPT;
use crate::error::{Result, TransportError};

/// SSH transport: authenticates during the handshake, then drives an
/// interactive PTY shell.
pub struct SshTransport {
    config: TransportConfig,
    session: Option<SshSession>,
}

struct SshSession {
    handle: Handle<SshHandler>,
    channel: Channel<Msg>,
    buffer: PatternBuffer,
}

impl SshTransport {
    /// Create an unconnected SSH transport.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Authenticate with the server.
    async fn authenticate(session: &mut Handle<SshHandler>, config: &TransportConfig) -> Result<()> {
        let success = match &config.auth {
            AuthMethod::None => session
                .authenticate_none(&config.username)
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::Password(password) => session
                .authenticate_password(&config.username, password.expose_secret())
                .await
                .map_err(TransportError::Ssh)?
                .success(),
            AuthMethod::PrivateKey { path, passphrase } => {
                let key = load_secret_key(path, passphrase.as_ref().map(|p| p.expose_secret()))
                    .map_err(|e| TransportError::Key(e.to_string()))?;

                let hash_alg = session
                    .best_supported_rsa_hash()
                    .await
                    .map_err(TransportError::Ssh)?
                    .flatten();

                session
                    .authenticate_publickey(
                        &config.username,
                        PrivateKeyWithHashAlg::new(Arc::new(key), hash_alg),
                    )
                    .await
                    .map_err(TransportError::Ssh)?
                    .success()
            }
        };

        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: config.username.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Open a PTY shell channel on the authenticated connection.
    async fn open_shell(handle: &Handle<SshHandler>, config: &TransportConfig) -> Result<Channel<Msg>> {
        let channel = handle
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_pty(
                true,
                "vt100",
                config.terminal_width,
                config.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_shell(true)
            .await
            .map_err(TransportError::Ssh)?;

        Ok(channel)
    }

    fn session(&mut self) -> Result<&mut SshSession> {
        self.session
            .as_mut()
            .ok_or_else(|| TransportError::NotConnected.into())
    }
}

impl SshSession {
    async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.channel
            .data(&bytes[..])
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }

    async fn read_until(&mut self, pattern: &Regex, config: &TransportConfig) -> Result<String> {
        let deadline = Instant::now() + config.timeout;

        loop {
            if let Some(end) = self.buffer.search_tail(pattern) {
                let data = self.buffer.take_through(end);
                return Ok(String::from_utf8_lossy(&data).into_owned());
            }

            let msg = tokio::time::timeout_at(deadline, self.channel.wait())
                .await
                .map_err(|_| TransportError::Timeout(config.timeout))?;

            match msg {
                Some(ChannelMsg::Data { ref data }) | Some(ChannelMsg::ExtendedData { ref data, .. }) => {
                    if config.debug {
                        debug!("<< {}", String::from_utf8_lossy(data));
                    }
                    self.buffer.extend(data);
                }
                Some(ChannelMsg::Eof) | Some(ChannelMsg::Close) | None => {
                    return Err(TransportError::Disconnected.into());
                }
                Some(_) => {}
            }
        }
    }
}

impl Transport for SshTransport {
    async fn connect(&mut self) -> Result<()> {
        debug!("ssh: connecting to {}", self.config.socket_addr());

        let ssh_config = Arc::new(client::Config {
            inactivity_timeout: Some(self.config.timeout),
            ..Default::default()
        });

        let host_key_error: Arc<Mutex<Option<TransportError>>> = Arc::new(Mutex::new(None));

        let handler = SshHandler {
            host: self.config.host.clone(),
            port: self.config.port,
            host_key_verification: self.config.host_key_verification.clone(),
            known_hosts_path: self.config.known_hosts_path.clone(),
            host_key_error: host_key_error.clone(),
        };

        let mut handle = tokio::time::timeout(
            self.config.timeout,
            client::connect(
                ssh_config,
                (self.config.host.as_str(), self.config.port),
                handler,
            ),
        )
        .await
        .map_err(|_| TransportError::Timeout(self.config.timeout))?
        .map_err(|e| {
            // Prefer the detailed host key error recorded by the handler
            host_key_error
                .lock()
                .ok()
                .and_then(|mut slot| slot.take())
                .unwrap_or(TransportError::Ssh(e))
        })?;

        Self::authenticate(&mut handle, &self.config).await?;
        let channel = Self::open_shell(&handle, &self.config).await?;

        let mut session = SshSession {
            handle,
            channel,
            buffer: PatternBuffer::new(self.config.search_depth),
        };

        // Consume the banner and first prompt
        session.read_until(&DEFAULT_PROMPT, &self.config).await?;
        self.session = Some(session);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session
                .handle
                .disconnect(russh::Disconnect::ByApplication, "", "en")
                .await
                .map_err(TransportError::Ssh)?;
        }
        Ok(())
    }

    async fn command(&mut self, text: &str, prompt: Option<&Regex>) -> Result<String> {
        let config = self.config.clone();
        let session = self.session()?;
        session.send_line(text).await?;
        session
            .read_until(prompt.unwrap_or(&*DEFAULT_PROMPT), &config)
            .await
    }

    async fn expect(&mut self, pattern: &Regex) -> Result<String> {
        let config = self.config.clone();
        self.session()?.read_until(pattern, &config).await
    }

    fn handles_login(&self) -> bool {
        true
    }
}

/// SSH client handler for russh.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Detailed host key error surfaced by connect() instead of the
    /// generic russh::Error::UnknownKey.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    /// Check the host key against known_hosts.
    ///
    /// Returns `Ok(true)` if matched, `Ok(false)` if host not found.
    fn check_known_hosts(&self, pubkey: &PublicKey) -> std::result::Result<bool, TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::check_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::check_known_hosts(&self.host, self.port, pubkey)
        };

        match result {
            Ok(matched) => Ok(matched),
            Err(russh::keys::Error::KeyChanged { line }) => Err(TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            }),
            Err(e) => Err(TransportError::KnownHosts(e.to_string())),
        }
    }

    /// Save a new host key to known_hosts.
    fn learn_host_key(&self, pubkey: &PublicKey) -> std::result::Result<(), TransportError> {
        let result = if let Some(ref path) = self.known_hosts_path {
            russh::keys::known_hosts::learn_known_hosts_path(&self.host, self.port, pubkey, path)
        } else {
            russh::keys::known_hosts::learn_known_hosts(&self.host, self.port, pubkey)
        };

        result.map_err(|e| TransportError::KnownHosts(e.to_string()))
    }

    fn reject(&self, error: TransportError) -> bool {
        if let Ok(mut slot) = self.host_key_error.lock() {
            *slot = Some(error);
        }
        false
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        let accepted = match self.host_key_verification {
            HostKeyVerification::Disabled => true,

            HostKeyVerification::AcceptNew => match self.check_known_hosts(server_public_key) {
                Ok(true) => true,
                Ok(false) => {
                    if let Err(e) = self.learn_host_key(server_public_key) {
                        warn!("Failed to save host key: {}", e);
                    }
                    true
                }
                Err(e) => self.reject(e),
            },

            HostKeyVerification::Strict => match self.check_known_hosts(server_public_key) {
                Ok(true) => true,
                Ok(false) => self.reject(TransportError::HostKeyUnknown {
                    host: self.host.clone(),
                    port: self.port,
                }),
                Err(e) => self.reject(e),
            },
        };
        Ok(accepted)
    }
}
