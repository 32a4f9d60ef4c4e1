// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration report parsing.
//!
//! Bridges export their programming database as a JSON integration report.
//! The document nests everything under a `LIPIdList` object with `Zones` and
//! `Devices` arrays; [`IntegrationReport`] deserializes it and converts the
//! zone entries into a [`ZoneRegistry`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{ParseError, Result};
use crate::registry::{Zone, ZoneRegistry};
use crate::types::ZoneId;

/// Area name used when a zone entry carries no area.
const UNKNOWN_AREA: &str = "Unknown";

/// A parsed integration report.
///
/// # Examples
///
/// ```
/// use casetel::report::IntegrationReport;
///
/// let json = r#"{"LIPIdList":{"Zones":[
///     {"ID":27,"Name":"Sink Light","Area":{"Name":"Kitchen"}}
/// ]}}"#;
///
/// let report = IntegrationReport::from_json(json).unwrap();
/// assert_eq!(report.zone_count(), 1);
///
/// let registry = report.to_registry();
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationReport {
    #[serde(rename = "LIPIdList", default)]
    lip_id_list: LipIdList,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LipIdList {
    #[serde(rename = "Zones", default)]
    zones: Vec<ZoneEntry>,
    #[serde(rename = "Devices", default)]
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneEntry {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Area")]
    area: Option<AreaRef>,
}

#[derive(Debug, Clone, Deserialize)]
struct AreaRef {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DeviceEntry {
    #[serde(rename = "ID")]
    #[allow(dead_code)]
    id: u32,
    #[serde(rename = "Name")]
    #[allow(dead_code)]
    name: Option<String>,
}

impl IntegrationReport {
    /// Parses a report from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the document is not valid JSON or does
    /// not match the report shape.
    pub fn from_json(json: &str) -> std::result::Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads and parses a report from a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Parse` if
    /// the contents are not a valid report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Returns the number of zone entries.
    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.lip_id_list.zones.len()
    }

    /// Returns the number of device entries.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.lip_id_list.devices.len()
    }

    /// Converts the zone entries into a registry.
    ///
    /// Entries with an id of zero are skipped. Missing names become
    /// `Zone <id>` and missing areas become `Unknown`.
    #[must_use]
    pub fn to_registry(&self) -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        for entry in &self.lip_id_list.zones {
            let Ok(id) = ZoneId::new(entry.id) else {
                tracing::warn!(id = entry.id, "skipping zone entry with invalid id");
                continue;
            };
            let name = entry
                .name
                .clone()
                .unwrap_or_else(|| format!("Zone {}", entry.id));
            let area = entry
                .area
                .as_ref()
                .map_or(UNKNOWN_AREA, |a| a.name.as_str());
            registry.insert(Zone::new(id, name, area));
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "LIPIdList": {
            "Zones": [
                {"ID": 27, "Name": "Sink Light", "Area": {"Name": "Kitchen"}},
                {"ID": 30, "Name": "Island Pendants", "Area": {"Name": "Kitchen"}},
                {"ID": 10, "Name": "Bay Window Lights", "Area": {"Name": "Master Bedroom"}}
            ],
            "Devices": [
                {"ID": 1, "Name": "Smart Bridge"}
            ]
        }
    }"#;

    #[test]
    fn parses_sample_report() {
        let report = IntegrationReport::from_json(SAMPLE).unwrap();
        assert_eq!(report.zone_count(), 3);
        assert_eq!(report.device_count(), 1);
    }

    #[test]
    fn converts_to_registry() {
        let report = IntegrationReport::from_json(SAMPLE).unwrap();
        let registry = report.to_registry();
        assert_eq!(registry.len(), 3);

        let zone = registry.get(ZoneId::new(27).unwrap()).unwrap();
        assert_eq!(zone.name(), "Sink Light");
        assert_eq!(zone.area(), "Kitchen");
    }

    #[test]
    fn missing_name_and_area_get_placeholders() {
        let json = r#"{"LIPIdList":{"Zones":[{"ID":5}]}}"#;
        let registry = IntegrationReport::from_json(json).unwrap().to_registry();

        let zone = registry.get(ZoneId::new(5).unwrap()).unwrap();
        assert_eq!(zone.name(), "Zone 5");
        assert_eq!(zone.area(), "Unknown");
    }

    #[test]
    fn zero_id_entries_are_skipped() {
        let json = r#"{"LIPIdList":{"Zones":[{"ID":0},{"ID":7}]}}"#;
        let registry = IntegrationReport::from_json(json).unwrap().to_registry();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_document_yields_empty_report() {
        let report = IntegrationReport::from_json("{}").unwrap();
        assert_eq!(report.zone_count(), 0);
        assert!(report.to_registry().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(IntegrationReport::from_json("not json").is_err());
    }
}
