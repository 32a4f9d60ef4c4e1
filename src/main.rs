// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line interface for Lutron Caseta bridge control.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use casetel::bridge::{Bridge, BridgeBuilder};
use casetel::error::{Error, ProtocolError};
use casetel::registry::{ZoneRegistry, kitchen_zone_ids, master_bedroom_zone_ids};
use casetel::report::IntegrationReport;
use casetel::show::{PartyConfig, run_optimized_show, run_party, run_sequence_show};
use casetel::types::{Level, ZoneId};

#[derive(Parser)]
#[command(name = "casetel", version, about = "Control Lutron Caseta lighting over telnet")]
struct Cli {
    /// Bridge IP address or hostname
    #[arg(short, long)]
    ip: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Control a single zone
    Zone {
        /// Integration id of the zone
        #[arg(long)]
        zone_id: u32,

        #[command(subcommand)]
        action: LevelAction,
    },

    /// Control every zone in a room
    Room {
        /// The room to control
        room: RoomName,

        /// How to dispatch the zone commands
        #[arg(long, value_enum, default_value = "batch")]
        mode: DispatchMode,

        /// Delay between zones in sequential mode, in seconds
        #[arg(long, default_value_t = 0.5)]
        delay: f32,

        #[command(subcommand)]
        action: LevelAction,
    },

    /// List known zones grouped by area
    List {
        /// Only show zones matching this area or name filter
        #[arg(long)]
        area: Option<String>,

        /// Read zones from a JSON integration report instead of the bridge
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Run a scripted light show on the kitchen zones
    Show {
        /// Which choreography to run
        #[arg(value_enum, default_value = "kitchen-standard")]
        style: ShowStyle,
    },

    /// Run randomized party mode on the kitchen zones until interrupted
    Party {
        /// Shortest beat between pattern steps, in seconds
        #[arg(long, default_value_t = 0.2)]
        min_interval: f32,

        /// Longest beat between pattern steps, in seconds
        #[arg(long, default_value_t = 2.0)]
        max_interval: f32,

        /// How long each pattern runs before the next is chosen, in seconds
        #[arg(long, default_value_t = 10.0)]
        pattern_duration: f32,
    },

    /// Watch live bridge events
    Monitor {
        /// Stop after this many seconds; 0 watches until interrupted
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
}

#[derive(Subcommand)]
enum LevelAction {
    /// Full brightness
    On,
    /// Lights off
    Off,
    /// Half brightness
    Half,
    /// A specific level in percent; out-of-range values are clamped
    Set {
        #[arg(long)]
        level: f32,
    },
}

impl LevelAction {
    fn level(&self) -> Level {
        match self {
            Self::On => Level::FULL,
            Self::Off => Level::OFF,
            Self::Half => Level::HALF,
            Self::Set { level } => Level::clamped(*level),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoomName {
    Kitchen,
    Bedroom,
}

impl RoomName {
    fn zones(self) -> Vec<ZoneId> {
        match self {
            Self::Kitchen => kitchen_zone_ids(),
            Self::Bedroom => master_bedroom_zone_ids(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DispatchMode {
    /// One zone at a time with a delay in between
    Sequential,
    /// All zones concurrently with staggered starts
    Batch,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShowStyle {
    /// Blink, staged sequential ramp, hold, slow cascade dim
    KitchenStandard,
    /// The same arc with batch dispatch and coarser dim steps
    KitchenOptimized,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> casetel::Result<()> {
    match cli.command {
        Commands::Zone { zone_id, action } => {
            let zone = ZoneId::new(zone_id)?;
            let bridge = connect(&cli.ip).await?;
            let level = action.level();
            bridge.set_level(zone, level).await?;
            println!("zone {zone} set to {level}");
            Ok(())
        }

        Commands::Room {
            room,
            mode,
            delay,
            action,
        } => {
            let bridge = connect(&cli.ip).await?;
            let zones = room.zones();
            let level = action.level();
            match mode {
                DispatchMode::Sequential => {
                    let delay = Duration::from_secs_f32(delay.max(0.0));
                    bridge.set_zones_sequential(&zones, level, delay).await?;
                }
                DispatchMode::Batch => {
                    let report = bridge.set_zones_batch(&zones, level).await;
                    if !report.is_complete() {
                        let failed: Vec<String> =
                            report.failed.iter().map(ToString::to_string).collect();
                        return Err(Error::Protocol(ProtocolError::Bridge(format!(
                            "commands failed for zones {}",
                            failed.join(", ")
                        ))));
                    }
                }
            }
            println!("{} zones set to {level}", zones.len());
            Ok(())
        }

        Commands::List { area, report } => {
            let registry = match report {
                Some(path) => IntegrationReport::load(path)?.to_registry(),
                None => {
                    let bridge = connect(&cli.ip).await?;
                    let found = bridge.discover().await?;
                    tracing::info!(zones = found, "discovery complete");
                    bridge.registry()
                }
            };
            print_registry(&registry, area.as_deref());
            Ok(())
        }

        Commands::Show { style } => {
            let bridge = connect(&cli.ip).await?;
            let zones = kitchen_zone_ids();
            let show = async {
                match style {
                    ShowStyle::KitchenStandard => run_sequence_show(&bridge, &zones).await,
                    ShowStyle::KitchenOptimized => run_optimized_show(&bridge, &zones).await,
                }
            };
            run_interruptible(&bridge, &zones, show).await
        }

        Commands::Party {
            min_interval,
            max_interval,
            pattern_duration,
        } => {
            let config = PartyConfig::new(min_interval, max_interval, pattern_duration)?;
            let bridge = connect(&cli.ip).await?;
            let zones = kitchen_zone_ids();
            run_interruptible(&bridge, &zones, run_party(&bridge, &zones, config)).await
        }

        Commands::Monitor { timeout } => {
            let bridge = connect(&cli.ip).await?;
            watch_events(&bridge, timeout).await
        }
    }
}

async fn connect(ip: &str) -> casetel::Result<Bridge> {
    BridgeBuilder::new(ip).connect().await
}

/// Races a show future against ctrl-c; on interrupt, turns the zones off.
async fn run_interruptible<F>(bridge: &Bridge, zones: &[ZoneId], show: F) -> casetel::Result<()>
where
    F: Future<Output = casetel::Result<()>>,
{
    tokio::select! {
        result = show => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\ninterrupted, turning lights off");
            bridge.set_zones_batch(zones, Level::OFF).await;
            Err(Error::Interrupted)
        }
    }
}

async fn watch_events(bridge: &Bridge, timeout_secs: u64) -> casetel::Result<()> {
    let monitor = bridge.monitor().await?;
    let mut events = monitor.subscribe();

    println!("watching bridge events (ctrl-c to stop)");
    let watch = async {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let stamp = chrono::Local::now().format("[%H:%M:%S]");
                    println!("{stamp} {event}");
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "event subscriber lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    if timeout_secs == 0 {
        tokio::select! {
            () = watch => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        tokio::select! {
            () = watch => {}
            _ = tokio::signal::ctrl_c() => {}
            () = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {}
        }
    }

    monitor.stop().await;
    Ok(())
}

fn print_registry(registry: &ZoneRegistry, filter: Option<&str>) {
    let mut zones: Vec<_> = match filter {
        Some(filter) => registry.filter_area(filter).collect(),
        None => registry.zones().collect(),
    };
    zones.sort_by(|a, b| a.area().cmp(b.area()).then(a.id().cmp(&b.id())));

    if zones.is_empty() {
        println!("no zones found");
        return;
    }

    let mut current_area: Option<&str> = None;
    for zone in zones {
        if current_area != Some(zone.area()) {
            println!("{}:", zone.area());
            current_area = Some(zone.area());
        }
        let level = zone
            .last_level()
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        let kind = zone.kind().map_or(String::new(), |k| format!(" [{k}]"));
        println!("  {:>4}  {}{kind}  {level}", zone.id().to_string(), zone.name());
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn zone_takes_a_long_zone_id_flag() {
        let cli = Cli::try_parse_from([
            "casetel", "--ip", "10.0.0.2", "zone", "--zone-id", "30", "set", "--level", "75",
        ])
        .unwrap();
        match cli.command {
            Commands::Zone { zone_id, action } => {
                assert_eq!(zone_id, 30);
                assert_eq!(action.level(), Level::new(75.0).unwrap());
            }
            _ => panic!("expected the zone subcommand"),
        }
    }

    #[test]
    fn zone_rejects_a_bare_positional_id() {
        assert!(
            Cli::try_parse_from(["casetel", "--ip", "10.0.0.2", "zone", "30", "on"]).is_err()
        );
    }

    #[test]
    fn room_defaults_to_batch_mode() {
        let cli =
            Cli::try_parse_from(["casetel", "--ip", "10.0.0.2", "room", "kitchen", "on"]).unwrap();
        match cli.command {
            Commands::Room { mode, delay, .. } => {
                assert!(matches!(mode, DispatchMode::Batch));
                assert_eq!(delay, 0.5);
            }
            _ => panic!("expected the room subcommand"),
        }
    }

    #[test]
    fn set_action_clamps_out_of_range_levels() {
        let action = LevelAction::Set { level: 150.0 };
        assert_eq!(action.level(), Level::FULL);
    }
}
