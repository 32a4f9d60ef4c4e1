// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology record parsers for `?AREA` / `?ZONE` / `?OUTPUT` / `?DEVICE`
//! replies.

use crate::error::ParseError;
use crate::response::{fields_after, numeric_field, text_field_or_unknown};
use crate::types::ZoneId;

/// An area record from a `~AREA,<id>,<name>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRecord {
    /// Integration id of the area.
    pub id: u32,
    /// Display name of the area.
    pub name: String,
}

impl AreaRecord {
    /// Parses a single `~AREA` line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the prefix or the id field is malformed.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields = fields_after(line, "~AREA")?;
        Ok(Self {
            id: numeric_field(&fields, 0, "area id")?,
            name: text_field_or_unknown(&fields, 1),
        })
    }

    /// Parses every well-formed `~AREA` line in a response body.
    #[must_use]
    pub fn parse_all<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Vec<Self> {
        lines
            .into_iter()
            .filter_map(|line| Self::parse(line).ok())
            .collect()
    }
}

/// A zone record from a `~ZONE,<id>,<area-id>,<name>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Integration id of the zone.
    pub id: ZoneId,
    /// Integration id of the containing area.
    pub area_id: u32,
    /// Display name of the zone.
    pub name: String,
}

impl ZoneRecord {
    /// Parses a single `~ZONE` line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the prefix or a numeric field is malformed.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields = fields_after(line, "~ZONE")?;
        let id: u32 = numeric_field(&fields, 0, "zone id")?;
        let id = ZoneId::new(id).map_err(|_| ParseError::InvalidValue {
            field: "zone id".to_string(),
            message: format!("not a positive integer: {id}"),
        })?;
        Ok(Self {
            id,
            area_id: numeric_field(&fields, 1, "area id")?,
            name: text_field_or_unknown(&fields, 2),
        })
    }

    /// Parses every well-formed `~ZONE` line in a response body.
    #[must_use]
    pub fn parse_all<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Vec<Self> {
        lines
            .into_iter()
            .filter_map(|line| Self::parse(line).ok())
            .collect()
    }
}

/// An output record from a `~OUTPUT,<id>,<zone-id>,<type>` topology line.
///
/// Not to be confused with the status form of `~OUTPUT`, which
/// [`OutputStatus`](crate::response::OutputStatus) handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Integration id of the output.
    pub id: u32,
    /// The zone this output belongs to.
    pub zone_id: ZoneId,
    /// Output type tag, for example `DIMMER`.
    pub kind: String,
}

impl OutputRecord {
    /// Parses a single topology `~OUTPUT` line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the prefix or a numeric field is malformed.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields = fields_after(line, "~OUTPUT")?;
        let zone_id: u32 = numeric_field(&fields, 1, "zone id")?;
        let zone_id = ZoneId::new(zone_id).map_err(|_| ParseError::InvalidValue {
            field: "zone id".to_string(),
            message: format!("not a positive integer: {zone_id}"),
        })?;
        Ok(Self {
            id: numeric_field(&fields, 0, "output id")?,
            zone_id,
            kind: text_field_or_unknown(&fields, 2),
        })
    }

    /// Parses every well-formed topology `~OUTPUT` line in a response body.
    #[must_use]
    pub fn parse_all<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Vec<Self> {
        lines
            .into_iter()
            .filter_map(|line| Self::parse(line).ok())
            .collect()
    }
}

/// A device record from a `~DEVICE,<id>,<name>,<type>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Integration id of the device.
    pub id: u32,
    /// Display name of the device.
    pub name: String,
    /// Device type tag, for example `PICO`.
    pub kind: String,
}

impl DeviceRecord {
    /// Parses a single `~DEVICE` line.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the prefix or the id field is malformed.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let fields = fields_after(line, "~DEVICE")?;
        Ok(Self {
            id: numeric_field(&fields, 0, "device id")?,
            name: text_field_or_unknown(&fields, 1),
            kind: text_field_or_unknown(&fields, 2),
        })
    }

    /// Parses every well-formed `~DEVICE` line in a response body.
    #[must_use]
    pub fn parse_all<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Vec<Self> {
        lines
            .into_iter()
            .filter_map(|line| Self::parse(line).ok())
            .collect()
    }
}
