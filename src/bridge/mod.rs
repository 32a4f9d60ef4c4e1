// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level bridge client.
//!
//! [`Bridge`] wraps a logged-in [`TelnetSession`] behind an async mutex and
//! pairs it with a [`ZoneRegistry`] that tracks names and last observed
//! levels. Multi-zone operations come in two flavors: sequential with a
//! configurable delay, and concurrent dispatch with a fixed stagger.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::command::{OutputCommand, QueryCommand};
use crate::error::{Error, ProtocolError, Result};
use crate::event::Monitor;
use crate::protocol::{SessionConfig, TelnetSession};
use crate::registry::{Zone, ZoneRegistry};
use crate::report::IntegrationReport;
use crate::response::{AreaRecord, DeviceRecord, OutputRecord, OutputStatus, ZoneRecord};
use crate::types::{FadeTime, Level, ZoneId};

/// Delay between task starts in [`Bridge::set_zones_batch`].
const BATCH_STAGGER: Duration = Duration::from_millis(100);

/// Builder for connecting to a bridge.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
///
/// use casetel::bridge::BridgeBuilder;
///
/// # async fn example() -> casetel::Result<()> {
/// let bridge = BridgeBuilder::new("192.168.1.40")
///     .timeout(Duration::from_secs(3))
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeBuilder {
    config: SessionConfig,
}

impl BridgeBuilder {
    /// Creates a builder for the given bridge host with protocol defaults.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            config: SessionConfig::new(host),
        }
    }

    /// Sets the TCP port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config = self.config.port(port);
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config = self.config.credentials(username, password);
        self
    }

    /// Sets the per-exchange timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Connects and logs in, returning a ready bridge client.
    ///
    /// The registry starts from the built-in installation table; call
    /// [`Bridge::discover`] or [`Bridge::load_report`] to replace it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the connection or handshake fails.
    pub async fn connect(self) -> Result<Bridge> {
        let session = TelnetSession::connect(&self.config).await?;
        Ok(Bridge {
            config: self.config,
            session: Arc::new(Mutex::new(session)),
            registry: Arc::new(parking_lot::RwLock::new(ZoneRegistry::builtin())),
        })
    }
}

/// Result of a concurrent multi-zone dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of zones the batch attempted.
    pub attempted: usize,
    /// Zones whose command failed.
    pub failed: Vec<ZoneId>,
}

impl BatchReport {
    /// Returns `true` if every zone command succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A connected bridge client.
///
/// Cloning is cheap; clones share the same session and registry.
#[derive(Debug, Clone)]
pub struct Bridge {
    config: SessionConfig,
    session: Arc<Mutex<TelnetSession>>,
    registry: Arc<parking_lot::RwLock<ZoneRegistry>>,
}

impl Bridge {
    /// Sets a zone to the given level.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange fails.
    pub async fn set_level(&self, zone: ZoneId, level: Level) -> Result<()> {
        let command = OutputCommand::set(zone, level);
        self.session.lock().await.send_command(&command).await?;
        self.registry.write().record_level(zone, level);
        Ok(())
    }

    /// Sets a zone to the given level over a fade time.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange fails.
    pub async fn set_level_with_fade(
        &self,
        zone: ZoneId,
        level: Level,
        fade: FadeTime,
    ) -> Result<()> {
        let command = OutputCommand::SetWithFade { zone, level, fade };
        self.session.lock().await.send_command(&command).await?;
        self.registry.write().record_level(zone, level);
        Ok(())
    }

    /// Turns a zone fully on.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange fails.
    pub async fn turn_on(&self, zone: ZoneId) -> Result<()> {
        self.set_level(zone, Level::FULL).await
    }

    /// Turns a zone off.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange fails.
    pub async fn turn_off(&self, zone: ZoneId) -> Result<()> {
        self.set_level(zone, Level::OFF).await
    }

    /// Queries the current level of a zone.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the exchange fails and `Error::Parse` if
    /// the bridge answered without a level report for the zone.
    pub async fn output_level(&self, zone: ZoneId) -> Result<Level> {
        let command = OutputCommand::Get { zone };
        let response = self.session.lock().await.send_command(&command).await?;

        let status = response
            .iter()
            .filter_map(|line| OutputStatus::parse(line).ok())
            .find(|status| status.zone == zone && status.is_level_report());

        match status.and_then(|s| s.level) {
            Some(level) => {
                self.registry.write().record_level(zone, level);
                Ok(level)
            }
            None => Err(crate::error::ParseError::UnexpectedFormat(format!(
                "no level report for zone {zone}"
            ))
            .into()),
        }
    }

    /// Sweeps the bridge topology and rebuilds the registry from it.
    ///
    /// Runs the `?AREA`, `?ZONE`, `?OUTPUT` and `?DEVICE` queries in order.
    /// A failed query is logged and skipped; the sweep continues with
    /// whatever the bridge did answer. Returns the number of zones found.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` only if every query failed.
    pub async fn discover(&self) -> Result<usize> {
        let mut session = self.session.lock().await;
        let mut last_error: Option<ProtocolError> = None;

        let areas = match session.send_command(&QueryCommand::Areas).await {
            Ok(response) => AreaRecord::parse_all(response.iter()),
            Err(e) => {
                tracing::warn!(error = %e, "area query failed");
                last_error = Some(e);
                Vec::new()
            }
        };

        let zones = match session.send_command(&QueryCommand::Zones).await {
            Ok(response) => ZoneRecord::parse_all(response.iter()),
            Err(e) => {
                tracing::warn!(error = %e, "zone query failed");
                last_error = Some(e);
                Vec::new()
            }
        };

        let outputs = match session.send_command(&QueryCommand::Outputs).await {
            Ok(response) => OutputRecord::parse_all(response.iter()),
            Err(e) => {
                tracing::warn!(error = %e, "output query failed");
                last_error = Some(e);
                Vec::new()
            }
        };

        let devices = match session.send_command(&QueryCommand::Devices).await {
            Ok(response) => DeviceRecord::parse_all(response.iter()),
            Err(e) => {
                tracing::warn!(error = %e, "device query failed");
                last_error = Some(e);
                Vec::new()
            }
        };
        drop(session);

        // A sweep that produced nothing and at least one failure is a
        // failure; the registry keeps its previous contents.
        if areas.is_empty() && zones.is_empty() && outputs.is_empty() && devices.is_empty() {
            if let Some(e) = last_error {
                return Err(Error::Protocol(e));
            }
        }

        tracing::info!(
            areas = areas.len(),
            zones = zones.len(),
            outputs = outputs.len(),
            devices = devices.len(),
            "topology sweep complete"
        );

        let mut registry = ZoneRegistry::new();
        for record in &zones {
            let area = areas
                .iter()
                .find(|a| a.id == record.area_id)
                .map_or("Unknown", |a| a.name.as_str());
            let mut zone = Zone::new(record.id, record.name.clone(), area);
            if let Some(output) = outputs.iter().find(|o| o.zone_id == record.id) {
                zone = zone.with_kind(output.kind.clone());
            }
            registry.insert(zone);
        }

        let count = registry.len();
        *self.registry.write() = registry;
        Ok(count)
    }

    /// Replaces the registry with zones from a JSON integration report.
    ///
    /// Returns the number of zones loaded.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Parse` if
    /// it is not a valid report.
    pub fn load_report(&self, path: impl AsRef<Path>) -> Result<usize> {
        let report = IntegrationReport::load(path)?;
        let registry = report.to_registry();
        let count = registry.len();
        *self.registry.write() = registry;
        Ok(count)
    }

    /// Returns a snapshot of the current registry.
    #[must_use]
    pub fn registry(&self) -> ZoneRegistry {
        self.registry.read().clone()
    }

    /// Sets each zone in turn, pausing between commands.
    ///
    /// # Errors
    ///
    /// Returns on the first failed zone.
    pub async fn set_zones_sequential(
        &self,
        zones: &[ZoneId],
        level: Level,
        delay: Duration,
    ) -> Result<()> {
        for (i, &zone) in zones.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }
            self.set_level(zone, level).await?;
        }
        Ok(())
    }

    /// Sets all zones concurrently, one task per zone.
    ///
    /// Task starts are staggered by 100 ms to keep the bridge from dropping
    /// commands. All tasks are joined before this returns; a partial failure
    /// is reported per zone rather than as an error.
    pub async fn set_zones_batch(&self, zones: &[ZoneId], level: Level) -> BatchReport {
        let mut tasks = JoinSet::new();
        for (i, &zone) in zones.iter().enumerate() {
            let bridge = self.clone();
            let stagger = BATCH_STAGGER * u32::try_from(i).unwrap_or(u32::MAX);
            tasks.spawn(async move {
                tokio::time::sleep(stagger).await;
                (zone, bridge.set_level(zone, level).await)
            });
        }

        let mut report = BatchReport {
            attempted: zones.len(),
            failed: Vec::new(),
        };
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((zone, Err(e))) => {
                    tracing::warn!(zone = zone.value(), error = %e, "batch zone command failed");
                    report.failed.push(zone);
                }
                Err(e) => {
                    tracing::error!(error = %e, "batch task panicked");
                }
            }
        }
        report.failed.sort_unstable();
        report
    }

    /// Opens a dedicated monitoring session and starts its read loop.
    ///
    /// The command session stays free for requests while the monitor runs.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the second connection or the
    /// monitoring-enable exchange fails.
    pub async fn monitor(&self) -> Result<Monitor> {
        let session = TelnetSession::connect(&self.config).await?;
        Ok(Monitor::start(session).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_report_completeness() {
        let report = BatchReport {
            attempted: 4,
            failed: Vec::new(),
        };
        assert!(report.is_complete());

        let report = BatchReport {
            attempted: 4,
            failed: vec![ZoneId::new(27).unwrap()],
        };
        assert!(!report.is_complete());
    }
}
