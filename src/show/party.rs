// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Randomized party mode.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;
use tokio::time::Instant;

use crate::bridge::Bridge;
use crate::error::{Result, ValueError};
use crate::types::{Level, ZoneId};

/// Fixed beat of the strobe pattern.
const STROBE_BEAT: Duration = Duration::from_millis(100);

/// Level step used by the wave and pulse ramps, in percent.
const RAMP_STEP: f32 = 20.0;

/// Timing configuration for party mode.
///
/// # Examples
///
/// ```
/// use casetel::show::PartyConfig;
///
/// let config = PartyConfig::new(0.5, 1.5, 8.0).unwrap();
/// assert!(PartyConfig::new(2.0, 0.5, 8.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartyConfig {
    min_interval: f32,
    max_interval: f32,
    pattern_duration: f32,
}

impl PartyConfig {
    /// Creates a config from intervals in seconds.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidDuration` if any value is negative or
    /// not a number, and `ValueError::IntervalOrder` if `min_interval`
    /// exceeds `max_interval`.
    pub fn new(
        min_interval: f32,
        max_interval: f32,
        pattern_duration: f32,
    ) -> std::result::Result<Self, ValueError> {
        for value in [min_interval, max_interval, pattern_duration] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValueError::InvalidDuration { actual: value });
            }
        }
        if min_interval > max_interval {
            return Err(ValueError::IntervalOrder {
                min: min_interval,
                max: max_interval,
            });
        }
        Ok(Self {
            min_interval,
            max_interval,
            pattern_duration,
        })
    }

    /// How long each randomly chosen pattern runs.
    #[must_use]
    pub fn pattern_duration(&self) -> Duration {
        Duration::from_secs_f32(self.pattern_duration)
    }

    /// Draws a random beat interval between the configured bounds.
    fn random_interval(&self) -> Duration {
        if self.max_interval <= self.min_interval {
            return Duration::from_secs_f32(self.min_interval);
        }
        let secs = rand::thread_rng().gen_range(self.min_interval..=self.max_interval);
        Duration::from_secs_f32(secs)
    }
}

impl Default for PartyConfig {
    /// 0.2 to 2.0 second beats, 10 seconds per pattern.
    fn default() -> Self {
        Self {
            min_interval: 0.2,
            max_interval: 2.0,
            pattern_duration: 10.0,
        }
    }
}

/// A party mode pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// All zones flash on and off together.
    FlashAll,
    /// A single lit zone travels across the room.
    Chase,
    /// One random zone toggles per beat.
    RandomIndividual,
    /// A brightness ramp sweeps across the zones with per-zone offsets.
    Wave,
    /// All zones ramp up and back down together.
    Pulse,
    /// Rapid fixed-beat flashing.
    Strobe,
    /// Alternate halves of the room swap on and off.
    Alternate,
    /// Every zone jumps to an independent random level per beat.
    RandomLevels,
}

impl Pattern {
    /// All patterns, in selection order.
    pub const ALL: [Self; 8] = [
        Self::FlashAll,
        Self::Chase,
        Self::RandomIndividual,
        Self::Wave,
        Self::Pulse,
        Self::Strobe,
        Self::Alternate,
        Self::RandomLevels,
    ];

    /// Picks a random pattern.
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        *Self::ALL.choose(&mut rng).unwrap_or(&Self::FlashAll)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FlashAll => "flash all",
            Self::Chase => "chase",
            Self::RandomIndividual => "random individual",
            Self::Wave => "wave",
            Self::Pulse => "pulse",
            Self::Strobe => "strobe",
            Self::Alternate => "alternate",
            Self::RandomLevels => "random levels",
        };
        f.write_str(name)
    }
}

/// Runs party mode until the future is dropped.
///
/// Each round picks a random pattern and runs it for the configured
/// duration. Cancellation is the caller's job, typically by racing this
/// future against a shutdown signal.
///
/// # Errors
///
/// Returns the first command failure.
pub async fn run_party(bridge: &Bridge, zones: &[ZoneId], config: PartyConfig) -> Result<()> {
    tracing::info!(zones = zones.len(), "party mode started");
    loop {
        let pattern = Pattern::random();
        tracing::info!(pattern = %pattern, "switching pattern");
        run_pattern(bridge, zones, pattern, config).await?;
    }
}

/// Runs a single pattern until its duration elapses.
async fn run_pattern(
    bridge: &Bridge,
    zones: &[ZoneId],
    pattern: Pattern,
    config: PartyConfig,
) -> Result<()> {
    let deadline = Instant::now() + config.pattern_duration();
    match pattern {
        Pattern::FlashAll => flash_all(bridge, zones, config, deadline).await,
        Pattern::Chase => chase(bridge, zones, config, deadline).await,
        Pattern::RandomIndividual => random_individual(bridge, zones, config, deadline).await,
        Pattern::Wave => wave(bridge, zones, config, deadline).await,
        Pattern::Pulse => pulse(bridge, zones, config, deadline).await,
        Pattern::Strobe => strobe(bridge, zones, deadline).await,
        Pattern::Alternate => alternate(bridge, zones, config, deadline).await,
        Pattern::RandomLevels => random_levels(bridge, zones, config, deadline).await,
    }
}

async fn flash_all(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    let mut on = false;
    while Instant::now() < deadline {
        let level = if on { Level::FULL } else { Level::OFF };
        bridge.set_zones_batch(zones, level).await;
        on = !on;
        tokio::time::sleep(config.random_interval()).await;
    }
    Ok(())
}

async fn chase(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    'outer: loop {
        for &zone in zones {
            if Instant::now() >= deadline {
                break 'outer;
            }
            bridge.set_level(zone, Level::FULL).await?;
            tokio::time::sleep(config.random_interval()).await;
            bridge.set_level(zone, Level::OFF).await?;
        }
    }
    Ok(())
}

async fn random_individual(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    while Instant::now() < deadline {
        let Some((zone, level)) = random_zone_toggle(zones) else {
            break;
        };
        bridge.set_level(zone, level).await?;
        tokio::time::sleep(config.random_interval()).await;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
async fn wave(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    let mut base = 0.0f32;
    let mut rising = true;
    while Instant::now() < deadline {
        for (i, &zone) in zones.iter().enumerate() {
            // Offset each zone along the ramp so the crest travels
            let offset = RAMP_STEP * i as f32;
            let level = Level::clamped((base + offset) % 120.0);
            bridge.set_level(zone, level).await?;
        }
        base += if rising { RAMP_STEP } else { -RAMP_STEP };
        if base >= 100.0 {
            rising = false;
        } else if base <= 0.0 {
            rising = true;
        }
        tokio::time::sleep(config.random_interval()).await;
    }
    Ok(())
}

async fn pulse(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    while Instant::now() < deadline {
        let mut level = 0.0f32;
        while level <= 100.0 && Instant::now() < deadline {
            bridge.set_zones_batch(zones, Level::clamped(level)).await;
            level += RAMP_STEP;
            tokio::time::sleep(config.random_interval()).await;
        }
        while level >= 0.0 && Instant::now() < deadline {
            bridge.set_zones_batch(zones, Level::clamped(level)).await;
            level -= RAMP_STEP;
            tokio::time::sleep(config.random_interval()).await;
        }
    }
    Ok(())
}

async fn strobe(bridge: &Bridge, zones: &[ZoneId], deadline: Instant) -> Result<()> {
    let mut on = false;
    while Instant::now() < deadline {
        let level = if on { Level::FULL } else { Level::OFF };
        bridge.set_zones_batch(zones, level).await;
        on = !on;
        tokio::time::sleep(STROBE_BEAT).await;
    }
    // Leave the room lit rather than mid-flash
    bridge.set_zones_batch(zones, Level::FULL).await;
    Ok(())
}

async fn alternate(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    let mut flip = false;
    while Instant::now() < deadline {
        for (i, &zone) in zones.iter().enumerate() {
            let lit = (i % 2 == 0) ^ flip;
            let level = if lit { Level::FULL } else { Level::OFF };
            bridge.set_level(zone, level).await?;
        }
        flip = !flip;
        tokio::time::sleep(config.random_interval()).await;
    }
    Ok(())
}

async fn random_levels(
    bridge: &Bridge,
    zones: &[ZoneId],
    config: PartyConfig,
    deadline: Instant,
) -> Result<()> {
    while Instant::now() < deadline {
        let levels = random_level_assignment(zones);
        for (zone, level) in levels {
            bridge.set_level(zone, level).await?;
        }
        tokio::time::sleep(config.random_interval()).await;
    }
    Ok(())
}

/// Picks a random zone and a random on/off state for it.
///
/// Sampling happens before any await so the pattern futures stay `Send`.
fn random_zone_toggle(zones: &[ZoneId]) -> Option<(ZoneId, Level)> {
    let mut rng = rand::thread_rng();
    let zone = *zones.choose(&mut rng)?;
    let level = if rng.gen_bool(0.5) {
        Level::FULL
    } else {
        Level::OFF
    };
    Some((zone, level))
}

/// Draws an independent random level for every zone.
fn random_level_assignment(zones: &[ZoneId]) -> Vec<(ZoneId, Level)> {
    let mut rng = rand::thread_rng();
    zones
        .iter()
        .map(|&zone| (zone, Level::clamped(rng.gen_range(0.0..=100.0))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_inverted_intervals() {
        let err = PartyConfig::new(3.0, 1.0, 10.0).unwrap_err();
        assert!(matches!(err, ValueError::IntervalOrder { .. }));
    }

    #[test]
    fn config_rejects_negative_intervals() {
        // Negative bounds would panic later in Duration::from_secs_f32
        let err = PartyConfig::new(-1.0, -0.5, 10.0).unwrap_err();
        assert!(matches!(err, ValueError::InvalidDuration { .. }));
        assert!(PartyConfig::new(-0.1, 2.0, 10.0).is_err());
        assert!(PartyConfig::new(0.2, -2.0, 10.0).is_err());
    }

    #[test]
    fn config_rejects_negative_pattern_duration() {
        let err = PartyConfig::new(0.2, 2.0, -10.0).unwrap_err();
        assert!(matches!(
            err,
            ValueError::InvalidDuration { actual } if actual == -10.0
        ));
    }

    #[test]
    fn config_rejects_non_finite_values() {
        assert!(PartyConfig::new(f32::NAN, 2.0, 10.0).is_err());
        assert!(PartyConfig::new(0.2, f32::INFINITY, 10.0).is_err());
        assert!(PartyConfig::new(0.2, 2.0, f32::NAN).is_err());
    }

    #[test]
    fn validated_config_produces_usable_durations() {
        let config = PartyConfig::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(config.pattern_duration(), Duration::ZERO);
        assert_eq!(config.random_interval(), Duration::ZERO);
    }

    #[test]
    fn config_defaults() {
        let config = PartyConfig::default();
        assert_eq!(config.min_interval, 0.2);
        assert_eq!(config.max_interval, 2.0);
        assert_eq!(config.pattern_duration(), Duration::from_secs(10));
    }

    #[test]
    fn equal_intervals_are_allowed() {
        let config = PartyConfig::new(1.0, 1.0, 5.0).unwrap();
        assert_eq!(config.random_interval(), Duration::from_secs(1));
    }

    #[test]
    fn random_interval_stays_in_bounds() {
        let config = PartyConfig::new(0.2, 2.0, 10.0).unwrap();
        for _ in 0..100 {
            let interval = config.random_interval();
            assert!(interval >= Duration::from_secs_f32(0.2));
            assert!(interval <= Duration::from_secs_f32(2.0));
        }
    }

    #[test]
    fn all_patterns_are_listed_once() {
        assert_eq!(Pattern::ALL.len(), 8);
        for (i, a) in Pattern::ALL.iter().enumerate() {
            for b in &Pattern::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn random_toggle_uses_known_zones() {
        let zones = vec![ZoneId::new(27).unwrap(), ZoneId::new(30).unwrap()];
        for _ in 0..20 {
            let (zone, level) = random_zone_toggle(&zones).unwrap();
            assert!(zones.contains(&zone));
            assert!(level == Level::FULL || level == Level::OFF);
        }
    }

    #[test]
    fn random_toggle_on_empty_slice() {
        assert!(random_zone_toggle(&[]).is_none());
    }

    #[test]
    fn random_assignment_covers_every_zone() {
        let zones = vec![ZoneId::new(27).unwrap(), ZoneId::new(30).unwrap()];
        let levels = random_level_assignment(&zones);
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].0, zones[0]);
    }
}
