// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed show choreographies.

use std::time::Duration;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::types::{Level, ZoneId};

/// Pause between the blink phases.
const BLINK_PAUSE: Duration = Duration::from_secs(1);

/// Delay between zones during the sequential ramp phase.
const RAMP_DELAY: Duration = Duration::from_secs(1);

/// How long the show holds at full brightness.
const HOLD: Duration = Duration::from_secs(10);

/// Ramp levels walked through during the build-up phase.
const RAMP_LEVELS: [f32; 4] = [25.0, 50.0, 75.0, 100.0];

/// Level step of the slow cascade dim, in percent.
const CASCADE_STEP: f32 = 2.0;

/// Delay between zones within one cascade step.
const CASCADE_ZONE_DELAY: Duration = Duration::from_millis(50);

/// Delay between cascade steps.
const CASCADE_STEP_DELAY: Duration = Duration::from_millis(100);

/// Level step of the fast cascade dim used by the optimized show.
const FAST_CASCADE_STEP: f32 = 10.0;

/// Runs the standard show: blink, staged ramp, hold, cascade dim to off.
///
/// The ramp is deliberately sequential so the build-up travels across the
/// room zone by zone.
///
/// # Errors
///
/// Returns the first command failure.
pub async fn run_sequence_show(bridge: &Bridge, zones: &[ZoneId]) -> Result<()> {
    tracing::info!(zones = zones.len(), "starting show");

    blink(bridge, zones).await?;

    for raw in RAMP_LEVELS {
        let level = Level::clamped(raw);
        tracing::debug!(level = %level, "ramp step");
        bridge.set_zones_sequential(zones, level, RAMP_DELAY).await?;
    }

    tracing::debug!("holding at full");
    tokio::time::sleep(HOLD).await;

    cascade_dim(bridge, zones, CASCADE_STEP).await?;

    tracing::info!("show finished");
    Ok(())
}

/// Runs the optimized show: the same arc, but every phase dispatches the
/// zones as a batch and the dim uses coarser steps, so it finishes sooner.
///
/// # Errors
///
/// Returns the first command failure.
pub async fn run_optimized_show(bridge: &Bridge, zones: &[ZoneId]) -> Result<()> {
    tracing::info!(zones = zones.len(), "starting optimized show");

    blink(bridge, zones).await?;

    for raw in RAMP_LEVELS {
        let level = Level::clamped(raw);
        bridge.set_zones_batch(zones, level).await;
        tokio::time::sleep(RAMP_DELAY).await;
    }

    tokio::time::sleep(HOLD).await;

    cascade_dim(bridge, zones, FAST_CASCADE_STEP).await?;

    tracing::info!("optimized show finished");
    Ok(())
}

/// Off, on, off with one second pauses.
async fn blink(bridge: &Bridge, zones: &[ZoneId]) -> Result<()> {
    for level in [Level::OFF, Level::FULL, Level::OFF] {
        bridge.set_zones_batch(zones, level).await;
        tokio::time::sleep(BLINK_PAUSE).await;
    }
    Ok(())
}

/// Dims from full to off in `step` percent decrements, walking the zones in
/// order within each step.
async fn cascade_dim(bridge: &Bridge, zones: &[ZoneId], step: f32) -> Result<()> {
    let mut current = 100.0;
    while current > 0.0 {
        current -= step;
        let level = Level::clamped(current.max(0.0));
        for &zone in zones {
            bridge.set_level(zone, level).await?;
            tokio::time::sleep(CASCADE_ZONE_DELAY).await;
        }
        tokio::time::sleep(CASCADE_STEP_DELAY).await;
    }
    Ok(())
}
