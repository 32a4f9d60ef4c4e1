// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology enumeration queries.

use crate::command::Command;

/// Command to enumerate the installation topology.
///
/// The bridge answers each query with zero or more `~`-prefixed lines of the
/// matching record type, terminated by the prompt.
///
/// # Examples
///
/// ```
/// use casetel::command::{Command, QueryCommand};
///
/// assert_eq!(QueryCommand::Areas.encode(), "?AREA");
/// assert_eq!(QueryCommand::Zones.encode(), "?ZONE");
/// assert_eq!(QueryCommand::Outputs.encode(), "?OUTPUT");
/// assert_eq!(QueryCommand::Devices.encode(), "?DEVICE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCommand {
    /// Enumerate areas (`~AREA,<id>,<name>`).
    Areas,
    /// Enumerate zones (`~ZONE,<id>,<area-id>,<name>`).
    Zones,
    /// Enumerate outputs (`~OUTPUT,<id>,<zone-id>,<type>`).
    Outputs,
    /// Enumerate devices (`~DEVICE,<id>,<name>,<type>`).
    Devices,
}

impl Command for QueryCommand {
    fn encode(&self) -> String {
        match self {
            Self::Areas => "?AREA",
            Self::Zones => "?ZONE",
            Self::Outputs => "?OUTPUT",
            Self::Devices => "?DEVICE",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_wire_forms() {
        assert_eq!(QueryCommand::Areas.encode(), "?AREA");
        assert_eq!(QueryCommand::Zones.encode(), "?ZONE");
        assert_eq!(QueryCommand::Outputs.encode(), "?OUTPUT");
        assert_eq!(QueryCommand::Devices.encode(), "?DEVICE");
    }
}
