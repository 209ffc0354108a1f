//! Telnet transport over tokio TCP.
//!
//! Implements just enough of RFC 854 to drive an IOS vty line: IAC
//! sequences are removed from the data stream and option negotiation is
//! answered the way a plain line-mode client would (server echo and
//! suppress-go-ahead accepted, everything else refused).

use std::time::Duration;

use bytes::{BufMut, BytesMut};
use log::{debug, trace};
use memchr::memchr;
use regex::bytes::Regex;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;

use super::Transport;
use super::config::TransportConfig;
use crate::channel::PatternBuffer;
use crate::channel::patterns::DEFAULT_PROMPT;
use crate::error::{Result, TransportError};

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

const OPT_ECHO: u8 = 1;
const OPT_SGA: u8 = 3;

/// Connect timeout used when opening the TCP connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    Iac,
    Negotiate(u8),
    Sub,
    SubIac,
}

/// Incremental IAC decoder.
///
/// State survives across reads, so a sequence split between two TCP
/// segments is still recognised.
#[derive(Debug)]
pub(crate) struct TelnetDecoder {
    state: State,
}

impl TelnetDecoder {
    pub(crate) fn new() -> Self {
        Self { state: State::Data }
    }

    /// Decode a chunk into `data`, appending negotiation answers to `replies`.
    pub(crate) fn decode(&mut self, mut input: &[u8], data: &mut BytesMut, replies: &mut BytesMut) {
        while !input.is_empty() {
            if self.state == State::Data {
                match memchr(IAC, input) {
                    Some(pos) => {
                        data.extend_from_slice(&input[..pos]);
                        self.state = State::Iac;
                        input = &input[pos + 1..];
                    }
                    None => {
                        data.extend_from_slice(input);
                        return;
                    }
                }
                continue;
            }

            let byte = input[0];
            input = &input[1..];
            self.state = match self.state {
                State::Iac => match byte {
                    IAC => {
                        data.put_u8(IAC);
                        State::Data
                    }
                    WILL | WONT | DO | DONT => State::Negotiate(byte),
                    SB => State::Sub,
                    _ => State::Data,
                },
                State::Negotiate(verb) => {
                    if let Some(answer) = answer(verb, byte) {
                        replies.extend_from_slice(&[IAC, answer, byte]);
                    }
                    State::Data
                }
                State::Sub => {
                    if byte == IAC {
                        State::SubIac
                    } else {
                        State::Sub
                    }
                }
                State::SubIac => {
                    if byte == SE {
                        State::Data
                    } else {
                        State::Sub
                    }
                }
                State::Data => State::Data,
            };
        }
    }
}

/// Answer to a negotiation verb for an option, if one is owed.
fn answer(verb: u8, option: u8) -> Option<u8> {
    match (verb, option) {
        (WILL, OPT_ECHO | OPT_SGA) => Some(DO),
        (WILL, _) => Some(DONT),
        (DO, OPT_SGA) => Some(WILL),
        (DO, _) => Some(WONT),
        _ => None,
    }
}

/// A telnet session over any byte stream.
pub(crate) struct TelnetChannel<S> {
    stream: S,
    decoder: TelnetDecoder,
    buffer: PatternBuffer,
    /// Raw bytes of the last read, before IAC decoding.
    read_buf: BytesMut,
    timeout: Duration,
    debug: bool,
}

impl<S> TelnetChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub(crate) fn new(stream: S, config: &TransportConfig) -> Self {
        Self {
            stream,
            decoder: TelnetDecoder::new(),
            buffer: PatternBuffer::new(config.search_depth),
            read_buf: BytesMut::with_capacity(4096),
            timeout: config.timeout,
            debug: config.debug,
        }
    }

    /// Send one line, terminated with CR LF.
    pub(crate) async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut bytes = BytesMut::with_capacity(line.len() + 2);
        bytes.put_slice(line.as_bytes());
        bytes.put_slice(b"\r\n");
        self.stream.write_all(&bytes).await.map_err(io_error)?;
        self.stream.flush().await.map_err(io_error)?;
        Ok(())
    }

    /// Read until `pattern` matches the tail of the buffered output.
    pub(crate) async fn read_until(&mut self, pattern: &Regex) -> Result<String> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(end) = self.buffer.search_tail(pattern) {
                let data = self.buffer.take_through(end);
                return Ok(String::from_utf8_lossy(&data).into_owned());
            }

            self.read_buf.clear();
            let n = tokio::time::timeout_at(deadline, self.stream.read_buf(&mut self.read_buf))
                .await
                .map_err(|_| TransportError::Timeout(self.timeout))?
                .map_err(io_error)?;
            if n == 0 {
                return Err(TransportError::Disconnected.into());
            }

            let mut data = BytesMut::with_capacity(n);
            let mut replies = BytesMut::new();
            self.decoder.decode(&self.read_buf, &mut data, &mut replies);

            if !replies.is_empty() {
                trace!("telnet negotiation reply: {:?}", replies);
                self.stream.write_all(&replies).await.map_err(io_error)?;
            }
            if self.debug {
                debug!("<< {}", String::from_utf8_lossy(&data));
            }
            self.buffer.extend(&data);
        }
    }

    pub(crate) async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(io_error)?;
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> TransportError {
    if matches!(
        e.kind(),
        std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::UnexpectedEof
    ) {
        TransportError::Disconnected
    } else {
        TransportError::Io(e)
    }
}

/// Telnet transport. The device session performs the login dialogue.
pub struct TelnetTransport {
    config: TransportConfig,
    channel: Option<TelnetChannel<TcpStream>>,
}

impl TelnetTransport {
    /// Create an unconnected telnet transport.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            channel: None,
        }
    }

    fn channel(&mut self) -> Result<&mut TelnetChannel<TcpStream>> {
        self.channel
            .as_mut()
            .ok_or_else(|| TransportError::NotConnected.into())
    }
}

impl Transport for TelnetTransport {
    async fn connect(&mut self) -> Result<()> {
        debug!("telnet: connecting to {}", self.config.socket_addr());

        let stream = tokio::time::timeout(
            CONNECT_TIMEOUT,
            TcpStream::connect((self.config.host.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| TransportError::Timeout(CONNECT_TIMEOUT))?
        .map_err(|source| TransportError::ConnectionFailed {
            host: self.config.host.clone(),
            port: self.config.port,
            source,
        })?;
        stream.set_nodelay(true).map_err(TransportError::Io)?;

        self.channel = Some(TelnetChannel::new(stream, &self.config));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            channel.shutdown().await?;
        }
        Ok(())
    }

    async fn command(&mut self, text: &str, prompt: Option<&Regex>) -> Result<String> {
        let channel = self.channel()?;
        channel.send_line(text).await?;
        channel.read_until(prompt.unwrap_or(&*DEFAULT_PROMPT)).await
    }

    async fn expect(&mut self, pattern: &Regex) -> Result<String> {
        self.channel()?.read_until(pattern).await
    }

    fn handles_login(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::patterns::PASSWORD_PROMPT;
    use crate::error::Error;

    fn decode(input: &[u8]) -> (BytesMut, BytesMut) {
        let mut decoder = TelnetDecoder::new();
        let mut data = BytesMut::new();
        let mut replies = BytesMut::new();
        decoder.decode(input, &mut data, &mut replies);
        (data, replies)
    }

    #[test]
    fn test_decoder_strips_negotiation() {
        let (data, replies) = decode(&[IAC, WILL, OPT_ECHO, IAC, DO, 31, b'O', b'K']);
        assert_eq!(&data[..], b"OK");
        assert_eq!(replies, vec![IAC, DO, OPT_ECHO, IAC, WONT, 31]);
    }

    #[test]
    fn test_decoder_escaped_iac_and_subnegotiation() {
        let (data, replies) = decode(&[b'a', IAC, IAC, IAC, SB, 24, 1, IAC, SE, b'b']);
        assert_eq!(data, vec![b'a', IAC, b'b']);
        assert!(replies.is_empty());
    }

    #[test]
    fn test_decoder_sequence_split_across_chunks() {
        let mut decoder = TelnetDecoder::new();
        let mut data = BytesMut::new();
        let mut replies = BytesMut::new();
        decoder.decode(&[b'x', IAC], &mut data, &mut replies);
        decoder.decode(&[WILL], &mut data, &mut replies);
        decoder.decode(&[OPT_SGA, b'y'], &mut data, &mut replies);
        assert_eq!(&data[..], b"xy");
        assert_eq!(replies, vec![IAC, DO, OPT_SGA]);
    }

    #[tokio::test]
    async fn test_channel_login_dialogue() {
        let stream = tokio_test::io::Builder::new()
            .read(&[IAC, WILL, OPT_ECHO])
            .write(&[IAC, DO, OPT_ECHO])
            .read(b"\r\nUser Access Verification\r\n\r\nUsername: ")
            .write(b"admin\r\n")
            .read(b"admin\r\nPassword: ")
            .write(b"secret\r\n")
            .read(b"\r\nSwitch>")
            .build();

        let config = TransportConfig::new("switch", 23);
        let mut channel = TelnetChannel::new(stream, &config);

        let username = Regex::new(r"Username:\s?$").unwrap();
        let banner = channel.read_until(&username).await.unwrap();
        assert!(banner.contains("User Access Verification"));

        channel.send_line("admin").await.unwrap();
        let out = channel.read_until(&PASSWORD_PROMPT).await.unwrap();
        assert!(out.ends_with("Password:"));

        channel.send_line("secret").await.unwrap();
        let out = channel.read_until(&DEFAULT_PROMPT).await.unwrap();
        assert!(out.ends_with("Switch>"));
    }

    #[tokio::test]
    async fn test_channel_read_split_after_inline_prompt_char() {
        let stream = tokio_test::io::Builder::new()
            .read(b"sh running-config interface Gi0/1 | begin interface\r\ninterface GigabitEthernet0/1\r\n description uplink->")
            .read(b" core\r\n channel-group 1 mode active\r\nend\r\n\r\nSwitch#")
            .read(b"sh ver\r\nSwitch#")
            .build();
        let config = TransportConfig::new("switch", 23);
        let mut channel = TelnetChannel::new(stream, &config);

        let out = channel.read_until(&DEFAULT_PROMPT).await.unwrap();
        assert!(out.ends_with("Switch#"));
        assert_eq!(
            crate::parse::parse_interface_config(&out).etherchannel.as_deref(),
            Some("1")
        );

        let out = channel.read_until(&DEFAULT_PROMPT).await.unwrap();
        assert_eq!(out, "sh ver\r\nSwitch#");
    }

    #[tokio::test]
    async fn test_channel_banner_rule_is_not_a_prompt() {
        let stream = tokio_test::io::Builder::new()
            .read(b"\r\n##########")
            .read(b"\r\n Authorized access only\r\n##########\r\n\r\nSwitch>")
            .read(b"terminal length 0\r\nSwitch>")
            .build();
        let config = TransportConfig::new("switch", 23);
        let mut channel = TelnetChannel::new(stream, &config);

        let banner = channel.read_until(&DEFAULT_PROMPT).await.unwrap();
        assert!(banner.contains("Authorized access only"));
        assert_eq!(
            crate::channel::patterns::prompt_kind(&banner),
            crate::channel::patterns::PromptKind::User
        );

        let out = channel.read_until(&DEFAULT_PROMPT).await.unwrap();
        assert_eq!(out, "terminal length 0\r\nSwitch>");
    }

    #[tokio::test]
    async fn test_channel_eof_is_disconnect() {
        let stream = tokio_test::io::Builder::new().read(b"Switch").build();
        let config = TransportConfig::new("switch", 23);
        let mut channel = TelnetChannel::new(stream, &config);

        let err = channel.read_until(&DEFAULT_PROMPT).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Disconnected)
        ));
    }

    #[tokio::test]
    async fn test_command_before_connect() {
        let mut transport = TelnetTransport::new(TransportConfig::new("switch", 23));
        let err = transport.command("sh ver", None).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::NotConnected)));
        assert!(!transport.handles_login());
    }
}
