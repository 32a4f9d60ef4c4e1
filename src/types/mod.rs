// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Lutron zone control.
//!
//! This module provides type-safe representations of values used in
//! integration protocol commands. Each type ensures values are within their
//! valid ranges at construction time, preventing runtime errors.
//!
//! # Types
//!
//! - [`ZoneId`] - Integration id of a lighting output (positive integer)
//! - [`Level`] - Light level (0.0-100.0%)
//! - [`FadeTime`] - Level transition time (whole seconds)

mod fade_time;
mod level;
mod zone_id;

pub use fade_time::FadeTime;
pub use level::Level;
pub use zone_id::ZoneId;
