// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light level type for zone control.
//!
//! This module provides a type-safe representation of light levels,
//! ensuring values are always within the valid range of 0.0-100.0%.

use std::fmt;

use crate::error::ValueError;

/// Light level as a percentage (0.0-100.0).
///
/// Lutron bridges use 0-100 for output levels, where 0 is off and 100 is
/// full brightness. The integration protocol carries levels with two
/// decimals, which [`Level::wire`] produces.
///
/// # Examples
///
/// ```
/// use casetel::types::Level;
///
/// // Create a level at 75%
/// let level = Level::new(75.0).unwrap();
/// assert_eq!(level.value(), 75.0);
/// assert_eq!(level.wire(), "75.00");
///
/// // Use predefined values
/// assert_eq!(Level::OFF.value(), 0.0);
/// assert_eq!(Level::FULL.value(), 100.0);
///
/// // Invalid values return an error
/// assert!(Level::new(150.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Level(f32);

impl Level {
    /// Zone fully off (0%).
    pub const OFF: Self = Self(0.0);

    /// Half brightness (50%).
    pub const HALF: Self = Self(50.0);

    /// Full brightness (100%).
    pub const FULL: Self = Self(100.0);

    /// Creates a new level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::LevelOutOfRange` if the value lies outside
    /// [0.0, 100.0] or is not a number.
    pub fn new(value: f32) -> Result<Self, ValueError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ValueError::LevelOutOfRange { actual: value });
        }
        Ok(Self(value))
    }

    /// Creates a level, clamping to the valid range.
    ///
    /// Values below 0 clamp to 0, values above 100 clamp to 100, and NaN
    /// maps to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use casetel::types::Level;
    ///
    /// assert_eq!(Level::clamped(150.0), Level::FULL);
    /// assert_eq!(Level::clamped(-3.0), Level::OFF);
    /// ```
    #[must_use]
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            return Self::OFF;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the level percentage value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Returns the level formatted for the wire, with two decimals.
    #[must_use]
    pub fn wire(&self) -> String {
        format!("{:.2}", self.0)
    }

    /// Returns `true` if the level is fully off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl TryFrom<f32> for Level {
    type Error = ValueError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_valid_values() {
        for v in [0.0, 0.01, 33.3, 50.0, 99.99, 100.0] {
            let level = Level::new(v).unwrap();
            assert_eq!(level.value(), v);
        }
    }

    #[test]
    fn level_invalid_values() {
        assert!(Level::new(100.01).is_err());
        assert!(Level::new(-0.01).is_err());
        assert!(Level::new(f32::NAN).is_err());
    }

    #[test]
    fn level_clamped() {
        assert_eq!(Level::clamped(50.0).value(), 50.0);
        assert_eq!(Level::clamped(150.0).value(), 100.0);
        assert_eq!(Level::clamped(-10.0).value(), 0.0);
        assert_eq!(Level::clamped(f32::NAN).value(), 0.0);
    }

    #[test]
    fn level_wire_has_two_decimals() {
        assert_eq!(Level::new(50.0).unwrap().wire(), "50.00");
        assert_eq!(Level::new(33.335).unwrap().wire(), "33.33");
        assert_eq!(Level::OFF.wire(), "0.00");
        assert_eq!(Level::FULL.wire(), "100.00");
    }

    #[test]
    fn level_display() {
        assert_eq!(Level::new(75.0).unwrap().to_string(), "75.0%");
    }

    #[test]
    fn level_is_off() {
        assert!(Level::OFF.is_off());
        assert!(!Level::HALF.is_off());
    }

    #[test]
    fn level_ordering() {
        assert!(Level::OFF < Level::FULL);
        assert!(Level::new(25.0).unwrap() < Level::HALF);
    }
}
