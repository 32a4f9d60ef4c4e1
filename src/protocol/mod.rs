// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telnet session layer for the integration protocol.
//!
//! The bridge speaks a line-oriented dialect over TCP port 23. A session is
//! established with a fixed login handshake and thereafter carries one
//! request/response exchange at a time, each terminated by the `GNET> `
//! prompt sentinel.
//!
//! # Session phases
//!
//! 1. Read until `login: `, send the username line
//! 2. Read until `password: `, send the password line
//! 3. Read until `GNET> ` - the session is established
//! 4. Per command: write a line, read until `GNET> `, everything before the
//!    prompt is the response body

mod session;

pub use session::{
    DEFAULT_PASSWORD, DEFAULT_PORT, DEFAULT_TIMEOUT, DEFAULT_USERNAME, SessionConfig,
    TelnetSession,
};

/// Sentinel marking the username phase of the login handshake.
pub const LOGIN_PROMPT: &[u8] = b"login: ";

/// Sentinel marking the password phase of the login handshake.
pub const PASSWORD_PROMPT: &[u8] = b"password: ";

/// Prompt sentinel terminating the handshake and every command response.
pub const COMMAND_PROMPT: &[u8] = b"GNET> ";

/// Response body of a single command exchange.
///
/// Holds the trimmed, non-empty lines the bridge emitted before the prompt
/// sentinel, with prompt fragments and the command echo removed.
#[derive(Debug, Clone, Default)]
pub struct CommandResponse {
    lines: Vec<String>,
}

impl CommandResponse {
    /// Creates a response from pre-filtered body lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Returns the response body lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` if the bridge sent nothing but the prompt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the body lines as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}
