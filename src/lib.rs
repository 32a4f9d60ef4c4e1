// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Async client library for Lutron Caseta Smart Bridge Pro lighting
//! control over the telnet integration protocol.
//!
//! The bridge exposes a line-oriented protocol on TCP port 23: a login
//! handshake guarded by prompt sentinels, `#OUTPUT` commands to set zone
//! levels, `?`-prefixed queries for topology and state, and an optional
//! monitoring mode in which the bridge pushes `~`-prefixed event lines.
//!
//! # Quick start
//!
//! ```no_run
//! use casetel::bridge::BridgeBuilder;
//! use casetel::types::{Level, ZoneId};
//!
//! #[tokio::main]
//! async fn main() -> casetel::Result<()> {
//!     let bridge = BridgeBuilder::new("192.168.1.40").connect().await?;
//!
//!     let island = ZoneId::new(30)?;
//!     bridge.set_level(island, Level::new(75.0)?).await?;
//!
//!     let level = bridge.output_level(island).await?;
//!     println!("island is at {level}");
//!
//!     bridge.turn_off(island).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Monitoring
//!
//! ```no_run
//! use casetel::bridge::BridgeBuilder;
//!
//! # async fn example() -> casetel::Result<()> {
//! let bridge = BridgeBuilder::new("192.168.1.40").connect().await?;
//! let monitor = bridge.monitor().await?;
//!
//! let mut events = monitor.subscribe();
//! while let Ok(event) = events.recv().await {
//!     println!("{event}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module overview
//!
//! - [`types`]: validated protocol values ([`Level`], [`ZoneId`], [`FadeTime`])
//! - [`command`]: typed command encoders for the wire dialect
//! - [`response`]: parsers for `~`-prefixed reply lines
//! - [`protocol`]: the telnet session and login handshake
//! - [`event`]: monitoring mode events and the broadcast bus
//! - [`bridge`]: the high-level [`Bridge`] client
//! - [`registry`]: zone and area lookup tables
//! - [`report`]: JSON integration report parsing
//! - [`show`]: scripted effects and party mode

pub mod bridge;
pub mod command;
pub mod error;
pub mod event;
pub mod protocol;
pub mod registry;
pub mod report;
pub mod response;
pub mod show;
pub mod types;

pub use bridge::{BatchReport, Bridge, BridgeBuilder};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{BridgeEvent, EventBus, Monitor};
pub use protocol::{CommandResponse, SessionConfig, TelnetSession};
pub use registry::{Area, Zone, ZoneRegistry};
pub use report::IntegrationReport;
pub use types::{FadeTime, Level, ZoneId};
