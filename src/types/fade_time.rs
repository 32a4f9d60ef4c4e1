// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fade time type for level transitions.

use std::fmt;
use std::time::Duration;

use crate::error::ValueError;

/// Fade duration for a level change.
///
/// The integration protocol carries fade times as whole seconds, so a
/// `FadeTime` counts seconds. Converting from a [`Duration`] with
/// sub-second precision is an error rather than a silent truncation.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use casetel::types::FadeTime;
///
/// let fade = FadeTime::from_secs(3);
/// assert_eq!(fade.as_secs(), 3);
///
/// // Whole-second durations convert
/// let fade = FadeTime::try_from(Duration::from_secs(5)).unwrap();
/// assert_eq!(fade.as_secs(), 5);
///
/// // Sub-second precision does not
/// assert!(FadeTime::try_from(Duration::from_millis(1500)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FadeTime(u32);

impl FadeTime {
    /// No fade; the level changes immediately.
    pub const INSTANT: Self = Self(0);

    /// Creates a fade time from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the fade length in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FadeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl TryFrom<Duration> for FadeTime {
    type Error = ValueError;

    fn try_from(value: Duration) -> Result<Self, Self::Error> {
        if value.subsec_nanos() != 0 {
            return Err(ValueError::InvalidFadeTime(value));
        }
        let secs =
            u32::try_from(value.as_secs()).map_err(|_| ValueError::InvalidFadeTime(value))?;
        Ok(Self(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_time_from_secs() {
        assert_eq!(FadeTime::from_secs(3).as_secs(), 3);
        assert_eq!(FadeTime::INSTANT.as_secs(), 0);
    }

    #[test]
    fn fade_time_from_whole_second_duration() {
        let fade = FadeTime::try_from(Duration::from_secs(10)).unwrap();
        assert_eq!(fade.as_secs(), 10);
    }

    #[test]
    fn fade_time_rejects_sub_second_precision() {
        let err = FadeTime::try_from(Duration::from_millis(1500)).unwrap_err();
        assert!(matches!(err, ValueError::InvalidFadeTime(_)));
        assert!(FadeTime::try_from(Duration::from_nanos(1)).is_err());
    }

    #[test]
    fn fade_time_rejects_overflowing_duration() {
        let huge = Duration::from_secs(u64::from(u32::MAX) + 1);
        assert!(FadeTime::try_from(huge).is_err());
    }

    #[test]
    fn fade_time_display() {
        assert_eq!(FadeTime::from_secs(3).to_string(), "3s");
    }
}
