// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge event types.

use std::fmt;

use crate::response::OutputStatus;

/// An unsolicited event line from the bridge.
///
/// Parsing is best effort: event lines are comma-separated positional field
/// lists, and anything that does not match a known event shape is ignored.
///
/// # Examples
///
/// ```
/// use casetel::event::BridgeEvent;
///
/// let event = BridgeEvent::parse("~OUTPUT,30,1,25.00").unwrap();
/// assert!(matches!(event, BridgeEvent::Output(_)));
///
/// // Non-event lines yield None
/// assert!(BridgeEvent::parse("GNET> ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// A zone reported its output state.
    Output(OutputStatus),

    /// A device component reported an action (button press and the like).
    Device {
        /// Integration id of the device.
        device: u32,
        /// Component number within the device.
        component: u32,
        /// Action number.
        action: u32,
    },

    /// The bridge reported an error.
    Error(String),
}

impl BridgeEvent {
    /// Parses an event from a single bridge line.
    ///
    /// Returns `None` for lines that are not events (prompt fragments,
    /// command echoes, unknown `~` prefixes, malformed field lists).
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.starts_with("~OUTPUT") {
            return OutputStatus::parse(line).ok().map(Self::Output);
        }
        if line.starts_with("~DEVICE") {
            let mut fields = line.split(',').skip(1);
            let device = fields.next()?.trim().parse().ok()?;
            let component = fields.next()?.trim().parse().ok()?;
            let action = fields.next()?.trim().parse().ok()?;
            return Some(Self::Device {
                device,
                component,
                action,
            });
        }
        if line.starts_with("~ERROR") {
            return Some(Self::Error(line.to_string()));
        }
        None
    }
}

impl fmt::Display for BridgeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(status) => match status.level {
                Some(level) => write!(
                    f,
                    "zone {} action {} level {level}",
                    status.zone, status.action
                ),
                None => write!(f, "zone {} action {}", status.zone, status.action),
            },
            Self::Device {
                device,
                component,
                action,
            } => write!(f, "device {device} component {component} action {action}"),
            Self::Error(message) => write!(f, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_output_event() {
        let event = BridgeEvent::parse("~OUTPUT,27,1,75.50").unwrap();
        match event {
            BridgeEvent::Output(status) => {
                assert_eq!(status.zone.value(), 27);
                assert_eq!(status.level.unwrap().value(), 75.5);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn parses_device_event() {
        let event = BridgeEvent::parse("~DEVICE,3,2,4").unwrap();
        assert_eq!(
            event,
            BridgeEvent::Device {
                device: 3,
                component: 2,
                action: 4
            }
        );
    }

    #[test]
    fn parses_error_event() {
        let event = BridgeEvent::parse("~ERROR,6").unwrap();
        assert_eq!(event, BridgeEvent::Error("~ERROR,6".to_string()));
    }

    #[test]
    fn ignores_non_event_lines() {
        assert!(BridgeEvent::parse("GNET> ").is_none());
        assert!(BridgeEvent::parse("~MONITORING,255,1").is_none());
        assert!(BridgeEvent::parse("").is_none());
        assert!(BridgeEvent::parse("~DEVICE,not,a,number").is_none());
    }

    #[test]
    fn display_is_readable() {
        let event = BridgeEvent::parse("~OUTPUT,30,1,25.00").unwrap();
        assert_eq!(event.to_string(), "zone 30 action 1 level 25.0%");
    }
}
