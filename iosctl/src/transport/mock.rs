//! Scripted transport for unit tests.

use std::collections::{HashMap, HashSet, VecDeque};

use regex::bytes::Regex;

use super::Transport;
use crate::error::{Result, TransportError};

/// One recorded transport interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Connect,
    Close,
    /// Line sent, with the prompt override pattern if one was given.
    Command(String, Option<String>),
    Expect(String),
}

/// Transport that replays scripted output and records every call.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    replies: HashMap<String, VecDeque<String>>,
    failures: HashSet<String>,
    handles_login: bool,
    fail_connect: bool,
    calls: Vec<Call>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reply with `output` the next time `command` is sent.
    ///
    /// Several replies for the same command are served in order; the last
    /// one is repeated. Unscripted commands reply with an empty string.
    pub(crate) fn reply(mut self, command: &str, output: &str) -> Self {
        self.replies
            .entry(command.to_string())
            .or_default()
            .push_back(output.to_string());
        self
    }

    /// Time out when `command` is sent.
    pub(crate) fn fail_on(mut self, command: &str) -> Self {
        self.failures.insert(command.to_string());
        self
    }

    pub(crate) fn fail_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub(crate) fn handling_login(mut self) -> Self {
        self.handles_login = true;
        self
    }

    pub(crate) fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Only the lines sent with `command`, in order.
    pub(crate) fn commands(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Command(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn closed(&self) -> bool {
        self.calls.contains(&Call::Close)
    }
}

impl Transport for MockTransport {
    async fn connect(&mut self) -> Result<()> {
        self.calls.push(Call::Connect);
        if self.fail_connect {
            return Err(TransportError::ConnectionFailed {
                host: "mock".to_string(),
                port: 23,
                source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            }
            .into());
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.calls.push(Call::Close);
        Ok(())
    }

    async fn command(&mut self, text: &str, prompt: Option<&Regex>) -> Result<String> {
        self.calls.push(Call::Command(
            text.to_string(),
            prompt.map(|p| p.as_str().to_string()),
        ));
        if self.failures.contains(text) {
            return Err(TransportError::Timeout(std::time::Duration::from_secs(1)).into());
        }
        let output = match self.replies.get_mut(text) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => String::new(),
        };
        Ok(output)
    }

    async fn expect(&mut self, pattern: &Regex) -> Result<String> {
        self.calls.push(Call::Expect(pattern.as_str().to_string()));
        Ok(String::new())
    }

    fn handles_login(&self) -> bool {
        self.handles_login
    }
}
