// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration protocol command definitions.
//!
//! This module provides typed representations of the commands a Lutron
//! bridge understands over its telnet integration interface.
//!
//! # Available Commands
//!
//! | Command Type | Purpose | Example |
//! |-------------|---------|---------|
//! | [`OutputCommand`] | Set or query a zone level | `#OUTPUT,27,1,75.00` |
//! | [`QueryCommand`] | Enumerate installation topology | `?AREA`, `?ZONE` |
//! | [`MonitoringCommand`] | Toggle unsolicited event reporting | `#MONITORING,255,1` |
//!
//! # Command Structure
//!
//! Every command is a single ASCII line. Set commands start with `#`,
//! queries with `?`, and the bridge replies with `~`-prefixed lines
//! followed by the `GNET> ` prompt.
//!
//! # Examples
//!
//! ```
//! use casetel::command::{Command, OutputCommand};
//! use casetel::types::{Level, ZoneId};
//!
//! let cmd = OutputCommand::Set {
//!     zone: ZoneId::new(27).unwrap(),
//!     level: Level::new(75.0).unwrap(),
//! };
//! assert_eq!(cmd.encode(), "#OUTPUT,27,1,75.00");
//! ```

mod monitoring;
mod output;
mod query;

pub use monitoring::MonitoringCommand;
pub use output::OutputCommand;
pub use query::QueryCommand;

/// A command that can be sent to a Lutron bridge.
///
/// Commands serialize to a single integration protocol line; the session
/// appends the CRLF terminator on send.
pub trait Command {
    /// Returns the wire form of the command, without the line terminator.
    fn encode(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Level, ZoneId};

    #[test]
    fn output_command_encodes_as_line() {
        let cmd = OutputCommand::Set {
            zone: ZoneId::new(10).unwrap(),
            level: Level::FULL,
        };
        assert_eq!(cmd.encode(), "#OUTPUT,10,1,100.00");
    }

    #[test]
    fn query_command_encodes_as_line() {
        assert_eq!(QueryCommand::Areas.encode(), "?AREA");
    }
}
