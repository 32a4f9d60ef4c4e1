// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unsolicited bridge events.
//!
//! With monitoring enabled (`#MONITORING,255,1`) the bridge pushes
//! `~OUTPUT`, `~DEVICE` and `~ERROR` lines without being asked. This module
//! parses those lines into [`BridgeEvent`] values and fans them out over a
//! broadcast [`EventBus`]; [`Monitor`] owns the session read loop.

mod bridge_event;
mod event_bus;
mod monitor;

pub use bridge_event::BridgeEvent;
pub use event_bus::EventBus;
pub use monitor::Monitor;
