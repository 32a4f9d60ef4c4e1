// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone and area lookup tables.
//!
//! A [`ZoneRegistry`] is a process-lifetime lookup table from zone id to
//! [`Zone`]. Registries are populated from the built-in table, from a JSON
//! integration report, or from a live topology sweep
//! ([`Bridge::discover`](crate::bridge::Bridge::discover)).

use std::collections::BTreeMap;

use crate::types::{Level, ZoneId};

/// Built-in installation table: (id, name, area).
const BUILTIN_ZONES: &[(u32, &str, &str)] = &[
    (10, "Bay Window Lights", "Master Bedroom"),
    (27, "Sink Light", "Kitchen"),
    (30, "Island Pendants", "Kitchen"),
    (31, "Island Lights", "Kitchen"),
    (33, "Main Lights", "Kitchen"),
];

/// A controllable lighting output.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    id: ZoneId,
    name: String,
    area: String,
    kind: Option<String>,
    last_level: Option<Level>,
}

impl Zone {
    /// Creates a zone with a display name and area name.
    pub fn new(id: ZoneId, name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            area: area.into(),
            kind: None,
            last_level: None,
        }
    }

    /// Sets the output type tag (for example `DIMMER`).
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Returns the zone id.
    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the area name.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Returns the output type tag, if known.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the last level observed for this zone, if any.
    #[must_use]
    pub fn last_level(&self) -> Option<Level> {
        self.last_level
    }
}

/// An area with its member zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    /// Area display name.
    pub name: String,
    /// Ids of the zones in this area, sorted.
    pub zones: Vec<ZoneId>,
}

/// Lookup table from zone id to zone.
///
/// # Examples
///
/// ```
/// use casetel::registry::ZoneRegistry;
///
/// let registry = ZoneRegistry::builtin();
/// assert!(!registry.is_empty());
///
/// let kitchen: Vec<_> = registry.filter_area("kitchen").collect();
/// assert_eq!(kitchen.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: BTreeMap<ZoneId, Zone>,
}

impl ZoneRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in installation table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (id, name, area) in BUILTIN_ZONES {
            if let Ok(id) = ZoneId::new(*id) {
                registry.insert(Zone::new(id, *name, *area));
            }
        }
        registry
    }

    /// Inserts a zone, replacing any existing entry with the same id.
    pub fn insert(&mut self, zone: Zone) {
        self.zones.insert(zone.id, zone);
    }

    /// Looks up a zone by id.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// Returns `true` if the registry knows the given id.
    #[must_use]
    pub fn contains(&self, id: ZoneId) -> bool {
        self.zones.contains_key(&id)
    }

    /// Iterates over all zones, ordered by id.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// Returns the number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns `true` if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Groups the zones into areas, ordered by area name.
    #[must_use]
    pub fn areas(&self) -> Vec<Area> {
        let mut grouped: BTreeMap<&str, Vec<ZoneId>> = BTreeMap::new();
        for zone in self.zones.values() {
            grouped.entry(zone.area()).or_default().push(zone.id);
        }
        grouped
            .into_iter()
            .map(|(name, zones)| Area {
                name: name.to_string(),
                zones,
            })
            .collect()
    }

    /// Iterates over the zones whose area or name contains the given
    /// filter, case-insensitively.
    pub fn filter_area<'a>(&'a self, filter: &str) -> impl Iterator<Item = &'a Zone> {
        let needle = filter.to_lowercase();
        self.zones.values().filter(move |zone| {
            zone.area().to_lowercase().contains(&needle)
                || zone.name().to_lowercase().contains(&needle)
        })
    }

    /// Records the last observed level for a zone, if it is known.
    pub fn record_level(&mut self, id: ZoneId, level: Level) {
        if let Some(zone) = self.zones.get_mut(&id) {
            zone.last_level = Some(level);
        }
    }
}

/// Ids of the kitchen zones from the built-in table, in fixture order.
#[must_use]
pub fn kitchen_zone_ids() -> Vec<ZoneId> {
    [27, 30, 31, 33]
        .into_iter()
        .filter_map(|id| ZoneId::new(id).ok())
        .collect()
}

/// Ids of the master bedroom zones from the built-in table.
#[must_use]
pub fn master_bedroom_zone_ids() -> Vec<ZoneId> {
    [10].into_iter().filter_map(|id| ZoneId::new(id).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_id(id: u32) -> ZoneId {
        ZoneId::new(id).unwrap()
    }

    #[test]
    fn builtin_registry_contents() {
        let registry = ZoneRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(zone_id(27)).unwrap().name(), "Sink Light");
        assert_eq!(registry.get(zone_id(10)).unwrap().area(), "Master Bedroom");
    }

    #[test]
    fn zones_iterate_sorted_by_id() {
        let registry = ZoneRegistry::builtin();
        let ids: Vec<u32> = registry.zones().map(|z| z.id().value()).collect();
        assert_eq!(ids, vec![10, 27, 30, 31, 33]);
    }

    #[test]
    fn areas_group_zones() {
        let registry = ZoneRegistry::builtin();
        let areas = registry.areas();
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "Kitchen");
        assert_eq!(areas[0].zones.len(), 4);
        assert_eq!(areas[1].name, "Master Bedroom");
    }

    #[test]
    fn filter_matches_area_and_name() {
        let registry = ZoneRegistry::builtin();
        assert_eq!(registry.filter_area("KITCHEN").count(), 4);
        assert_eq!(registry.filter_area("bedroom").count(), 1);
        assert_eq!(registry.filter_area("pendants").count(), 1);
        assert_eq!(registry.filter_area("garage").count(), 0);
    }

    #[test]
    fn record_level_updates_known_zone() {
        let mut registry = ZoneRegistry::builtin();
        registry.record_level(zone_id(27), Level::HALF);
        assert_eq!(registry.get(zone_id(27)).unwrap().last_level(), Some(Level::HALF));

        // Unknown zones are ignored
        registry.record_level(zone_id(99), Level::FULL);
        assert!(registry.get(zone_id(99)).is_none());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut registry = ZoneRegistry::builtin();
        registry.insert(Zone::new(zone_id(27), "Renamed", "Kitchen"));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get(zone_id(27)).unwrap().name(), "Renamed");
    }

    #[test]
    fn room_tables() {
        assert_eq!(kitchen_zone_ids().len(), 4);
        assert_eq!(master_bedroom_zone_ids().len(), 1);
    }
}
