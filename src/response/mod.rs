// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsers for bridge response lines.
//!
//! The integration protocol answers in comma-separated ASCII lines prefixed
//! with `~`. This module turns those positional field lists into typed
//! records:
//!
//! - [`AreaRecord`], [`ZoneRecord`], [`OutputRecord`], [`DeviceRecord`] for
//!   topology enumeration replies
//! - [`OutputStatus`] for zone level reports (both solicited and pushed)
//!
//! Bulk parsers skip malformed lines; the single-line parsers report them
//! as [`ParseError`](crate::error::ParseError).

mod status;
mod topology;

pub use status::OutputStatus;
pub use topology::{AreaRecord, DeviceRecord, OutputRecord, ZoneRecord};

use crate::error::ParseError;

/// Splits a `~`-prefixed response line into its positional fields, checking
/// the expected prefix.
///
/// The returned fields exclude the prefix itself.
pub(crate) fn fields_after<'a>(line: &'a str, prefix: &str) -> Result<Vec<&'a str>, ParseError> {
    let trimmed = line.trim();
    let mut parts = trimmed.split(',');
    match parts.next() {
        Some(head) if head == prefix => Ok(parts.collect()),
        _ => Err(ParseError::UnexpectedFormat(trimmed.to_string())),
    }
}

/// Parses a required numeric field.
pub(crate) fn numeric_field<T: std::str::FromStr>(
    fields: &[&str],
    index: usize,
    name: &str,
) -> Result<T, ParseError> {
    let raw = fields
        .get(index)
        .ok_or_else(|| ParseError::MissingField(name.to_string()))?;
    raw.trim().parse().map_err(|_| ParseError::InvalidValue {
        field: name.to_string(),
        message: format!("not a number: {raw}"),
    })
}

/// Returns an optional text field, falling back to `"Unknown"` when absent.
///
/// The bridge omits trailing fields on some firmware revisions.
pub(crate) fn text_field_or_unknown(fields: &[&str], index: usize) -> String {
    fields
        .get(index)
        .map_or_else(|| "Unknown".to_string(), |s| s.trim().to_string())
}
