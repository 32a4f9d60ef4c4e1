// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone level status parser.

use crate::error::ParseError;
use crate::response::{fields_after, numeric_field};
use crate::types::{Level, ZoneId};

/// A zone level report from a `~OUTPUT,<zone>,<action>,<level>` line.
///
/// The bridge emits this form both as the answer to `?OUTPUT,<zone>,1` and
/// unsolicited while monitoring is enabled.
///
/// # Examples
///
/// ```
/// use casetel::response::OutputStatus;
///
/// let status = OutputStatus::parse("~OUTPUT,27,1,75.50").unwrap();
/// assert_eq!(status.zone.value(), 27);
/// assert_eq!(status.action, 1);
/// assert_eq!(status.level.unwrap().value(), 75.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputStatus {
    /// The reporting zone.
    pub zone: ZoneId,
    /// Output action number; `1` is a level report.
    pub action: u8,
    /// Reported level, absent for non-level actions.
    pub level: Option<Level>,
}

impl OutputStatus {
    /// Parses a single status `~OUTPUT` line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the prefix or a numeric field is malformed.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields = fields_after(line, "~OUTPUT")?;
        let zone: u32 = numeric_field(&fields, 0, "zone id")?;
        let zone = ZoneId::new(zone).map_err(|_| ParseError::InvalidValue {
            field: "zone id".to_string(),
            message: format!("not a positive integer: {zone}"),
        })?;
        let action: u8 = numeric_field(&fields, 1, "action")?;

        let level = match fields.get(2) {
            Some(raw) => {
                let value: f32 = raw.trim().parse().map_err(|_| ParseError::InvalidValue {
                    field: "level".to_string(),
                    message: format!("not a number: {raw}"),
                })?;
                Some(Level::clamped(value))
            }
            None => None,
        };

        Ok(Self { zone, action, level })
    }

    /// Returns `true` if this is a level report (action 1).
    #[must_use]
    pub fn is_level_report(&self) -> bool {
        self.action == 1
    }
}
