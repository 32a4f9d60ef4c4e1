// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone output commands.

use crate::command::Command;
use crate::types::{FadeTime, Level, ZoneId};

/// Output action for setting or querying a zone level.
const ACTION_LEVEL: u8 = 1;

/// Command to set or query a zone output level.
///
/// # Examples
///
/// ```
/// use casetel::command::{Command, OutputCommand};
/// use casetel::types::{FadeTime, Level, ZoneId};
///
/// let zone = ZoneId::new(30).unwrap();
///
/// // Set a zone to 50%
/// let set = OutputCommand::Set { zone, level: Level::HALF };
/// assert_eq!(set.encode(), "#OUTPUT,30,1,50.00");
///
/// // Set with a 3 second fade
/// let fade = OutputCommand::SetWithFade {
///     zone,
///     level: Level::FULL,
///     fade: FadeTime::from_secs(3),
/// };
/// assert_eq!(fade.encode(), "#OUTPUT,30,1,100.00,3");
///
/// // Query the current level
/// let get = OutputCommand::Get { zone };
/// assert_eq!(get.encode(), "?OUTPUT,30,1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputCommand {
    /// Set the zone to a specific level.
    Set {
        /// The zone to control.
        zone: ZoneId,
        /// The target level.
        level: Level,
    },

    /// Set the zone to a specific level over a fade time.
    SetWithFade {
        /// The zone to control.
        zone: ZoneId,
        /// The target level.
        level: Level,
        /// Fade duration in whole seconds, as the wire carries it.
        fade: FadeTime,
    },

    /// Query the current zone level.
    Get {
        /// The zone to query.
        zone: ZoneId,
    },
}

impl OutputCommand {
    /// Creates a command to set a zone to a specific level.
    #[must_use]
    pub const fn set(zone: ZoneId, level: Level) -> Self {
        Self::Set { zone, level }
    }
}

impl Command for OutputCommand {
    fn encode(&self) -> String {
        match self {
            Self::Set { zone, level } => {
                format!("#OUTPUT,{zone},{ACTION_LEVEL},{}", level.wire())
            }
            Self::SetWithFade { zone, level, fade } => {
                format!(
                    "#OUTPUT,{zone},{ACTION_LEVEL},{},{}",
                    level.wire(),
                    fade.as_secs()
                )
            }
            Self::Get { zone } => format!("?OUTPUT,{zone},{ACTION_LEVEL}"),
        }
    }
}
