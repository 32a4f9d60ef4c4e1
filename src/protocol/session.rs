// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telnet session implementation.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout, timeout_at};

use crate::command::{Command, MonitoringCommand};
use crate::error::ProtocolError;
use crate::protocol::{COMMAND_PROMPT, CommandResponse, LOGIN_PROMPT, PASSWORD_PROMPT};

/// Default integration interface port.
pub const DEFAULT_PORT: u16 = 23;

/// Default integration username.
pub const DEFAULT_USERNAME: &str = "lutron";

/// Default integration password.
pub const DEFAULT_PASSWORD: &str = "integration";

/// Default per-exchange timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read chunk size for socket reads.
const READ_CHUNK: usize = 4096;

/// Connection parameters for a bridge session.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use casetel::protocol::SessionConfig;
///
/// let config = SessionConfig::new("192.168.1.40")
///     .credentials("lutron", "integration")
///     .timeout(Duration::from_secs(3));
/// assert_eq!(config.host(), "192.168.1.40");
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SessionConfig {
    /// Creates a config for the given host with protocol defaults
    /// (port 23, `lutron`/`integration`, 5 second timeout).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the TCP port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the per-exchange timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the bridge host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// A logged-in telnet session with a Lutron bridge.
///
/// The session is one exchange at a time: [`send_command`](Self::send_command)
/// writes a line and blocks until the prompt sentinel reappears. For
/// unsolicited event traffic see [`next_line`](Self::next_line) and the
/// [`event`](crate::event) module.
///
/// There is no retry or reconnect logic; a failed exchange leaves the
/// session in an undefined state and callers should drop it.
#[derive(Debug)]
pub struct TelnetSession {
    stream: TcpStream,
    buffer: Vec<u8>,
    timeout: Duration,
}

impl TelnetSession {
    /// Connects to the bridge and performs the login handshake.
    ///
    /// The username is sent only after the `login: ` sentinel is observed,
    /// the password only after `password: `, and the session is ready once
    /// `GNET> ` has been seen.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ConnectionFailed` if the TCP connect fails,
    /// `ProtocolError::Timeout` if a sentinel does not arrive in time.
    pub async fn connect(config: &SessionConfig) -> Result<Self, ProtocolError> {
        tracing::info!(host = %config.host, port = config.port, "connecting to bridge");

        let connect = TcpStream::connect((config.host.as_str(), config.port));
        let stream = timeout(config.timeout, connect)
            .await
            .map_err(|_| ProtocolError::Timeout(as_millis(config.timeout)))?
            .map_err(|e| ProtocolError::ConnectionFailed(e.to_string()))?;

        let mut session = Self {
            stream,
            buffer: Vec::new(),
            timeout: config.timeout,
        };

        session.read_until(LOGIN_PROMPT).await?;
        session.send_line(&config.username).await?;
        session.read_until(PASSWORD_PROMPT).await?;
        session.send_line(&config.password).await?;
        session.read_until(COMMAND_PROMPT).await?;

        tracing::info!(host = %config.host, "logged in to bridge");
        Ok(session)
    }

    /// Sends a typed command and reads the response up to the prompt.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Bridge` if the response contains an `~ERROR`
    /// line, `ProtocolError::Timeout` if the prompt does not reappear in
    /// time.
    pub async fn send_command<C: Command>(
        &mut self,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError> {
        self.send_raw(&command.encode()).await
    }

    /// Sends a raw command line and reads the response up to the prompt.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`send_command`](Self::send_command).
    pub async fn send_raw(&mut self, line: &str) -> Result<CommandResponse, ProtocolError> {
        tracing::debug!(command = %line, "sending command");
        self.send_line(line).await?;

        let raw = self.read_until(COMMAND_PROMPT).await?;
        let body = String::from_utf8_lossy(&raw);

        let mut lines = Vec::new();
        for candidate in body.split("\r\n") {
            let candidate = candidate.trim();
            // Drop blanks, prompt fragments and the command echo.
            if candidate.is_empty() || candidate.starts_with("GNET>") || candidate == line {
                continue;
            }
            if candidate.starts_with("~ERROR") {
                return Err(ProtocolError::Bridge(candidate.to_string()));
            }
            lines.push(candidate.to_string());
        }

        tracing::debug!(lines = lines.len(), "received response");
        Ok(CommandResponse::new(lines))
    }

    /// Enables unsolicited event reporting on this session.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    pub async fn enable_monitoring(&mut self) -> Result<(), ProtocolError> {
        self.send_command(&MonitoringCommand::Enable).await?;
        tracing::info!("monitoring enabled");
        Ok(())
    }

    /// Disables unsolicited event reporting on this session.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the exchange fails.
    pub async fn disable_monitoring(&mut self) -> Result<(), ProtocolError> {
        self.send_command(&MonitoringCommand::Disable).await?;
        tracing::info!("monitoring disabled");
        Ok(())
    }

    /// Reads the next complete line from the bridge, waiting indefinitely.
    ///
    /// Prompt fragments are stripped; blank lines are skipped. Returns
    /// `Ok(None)` when the bridge closes the connection. Intended for
    /// monitoring sessions, where event lines arrive unprompted.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Io` on socket failure.
    pub async fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            if let Some(pos) = find_subsequence(&self.buffer, b"\r\n") {
                let mut raw: Vec<u8> = self.buffer.drain(..pos + 2).collect();
                raw.truncate(pos);
                let decoded = String::from_utf8_lossy(&raw);
                let line = decoded
                    .trim_start_matches("GNET> ")
                    .trim_start_matches("GNET>")
                    .trim();
                if line.is_empty() {
                    continue;
                }
                return Ok(Some(line.to_string()));
            }

            let mut chunk = [0u8; READ_CHUNK];
            let read = self.stream.read(&mut chunk).await?;
            if read == 0 {
                return Ok(None);
            }
            self.buffer.extend_from_slice(&chunk[..read]);
        }
    }

    /// Writes a line with the CRLF terminator.
    async fn send_line(&mut self, line: &str) -> Result<(), ProtocolError> {
        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        Ok(())
    }

    /// Reads until the sentinel appears, returning everything up to and
    /// including it. The per-exchange timeout covers the whole wait, not
    /// each individual read.
    async fn read_until(&mut self, sentinel: &[u8]) -> Result<Vec<u8>, ProtocolError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(pos) = find_subsequence(&self.buffer, sentinel) {
                let end = pos + sentinel.len();
                let chunk: Vec<u8> = self.buffer.drain(..end).collect();
                return Ok(chunk);
            }

            let mut chunk = [0u8; READ_CHUNK];
            let read = timeout_at(deadline, self.stream.read(&mut chunk))
                .await
                .map_err(|_| ProtocolError::Timeout(as_millis(self.timeout)))??;
            if read == 0 {
                return Err(ProtocolError::ConnectionClosed);
            }
            self.buffer.extend_from_slice(&chunk[..read]);
        }
    }
}

/// Millisecond count for timeout error reporting.
#[allow(clippy::cast_possible_truncation)]
fn as_millis(duration: Duration) -> u64 {
    // Safe: practical timeouts never exceed u64::MAX milliseconds
    duration.as_millis() as u64
}

/// Finds the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_subsequence_locates_sentinel() {
        assert_eq!(find_subsequence(b"abc GNET> xyz", b"GNET> "), Some(4));
        assert_eq!(find_subsequence(b"login: ", b"login: "), Some(0));
        assert_eq!(find_subsequence(b"logi", b"login: "), None);
        assert_eq!(find_subsequence(b"", b"x"), None);
    }

    #[test]
    fn config_defaults() {
        let config = SessionConfig::new("10.0.0.2");
        assert_eq!(config.host(), "10.0.0.2");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.username, DEFAULT_USERNAME);
        assert_eq!(config.password, DEFAULT_PASSWORD);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn config_overrides() {
        let config = SessionConfig::new("10.0.0.2")
            .port(2300)
            .credentials("user", "pass")
            .timeout(Duration::from_secs(1));
        assert_eq!(config.port, 2300);
        assert_eq!(config.username, "user");
        assert_eq!(config.password, "pass");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    #[test]
    fn millis_conversion() {
        assert_eq!(as_millis(Duration::from_secs(5)), 5000);
        assert_eq!(as_millis(Duration::from_millis(200)), 200);
    }
}
