// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scripted lighting effects.
//!
//! Two families of effects run over a [`Bridge`](crate::bridge::Bridge):
//! fixed choreographies ([`run_sequence_show`], [`run_optimized_show`]) and
//! an endless randomized party mode ([`run_party`]).

mod party;
mod sequence;

pub use party::{PartyConfig, Pattern, run_party};
pub use sequence::{run_optimized_show, run_sequence_show};
