// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Monitoring mode commands.

use crate::command::Command;

/// Monitoring target covering all event classes.
const MONITOR_ALL: u8 = 255;

/// Command to toggle unsolicited event reporting.
///
/// With monitoring enabled the bridge pushes `~OUTPUT`, `~DEVICE` and
/// `~ERROR` lines without being asked.
///
/// # Examples
///
/// ```
/// use casetel::command::{Command, MonitoringCommand};
///
/// assert_eq!(MonitoringCommand::Enable.encode(), "#MONITORING,255,1");
/// assert_eq!(MonitoringCommand::Disable.encode(), "#MONITORING,255,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitoringCommand {
    /// Enable monitoring for all event classes.
    Enable,
    /// Disable monitoring for all event classes.
    Disable,
}

impl Command for MonitoringCommand {
    fn encode(&self) -> String {
        let flag = match self {
            Self::Enable => 1,
            Self::Disable => 0,
        };
        format!("#MONITORING,{MONITOR_ALL},{flag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_wire_forms() {
        assert_eq!(MonitoringCommand::Enable.encode(), "#MONITORING,255,1");
        assert_eq!(MonitoringCommand::Disable.encode(), "#MONITORING,255,0");
    }
}
