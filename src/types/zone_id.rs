// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone identifier type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Integration id of a controllable lighting output.
///
/// Zone ids are positive integers, unique within an installation.
///
/// # Examples
///
/// ```
/// use casetel::types::ZoneId;
///
/// let zone = ZoneId::new(27).unwrap();
/// assert_eq!(zone.value(), 27);
/// assert_eq!(zone.to_string(), "27");
///
/// // Zero is not a valid id
/// assert!(ZoneId::new(0).is_err());
///
/// // Ids parse from response fields
/// let parsed: ZoneId = "30".parse().unwrap();
/// assert_eq!(parsed.value(), 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(u32);

impl ZoneId {
    /// Creates a new zone id.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidZoneId` if the value is zero.
    pub fn new(value: u32) -> Result<Self, ValueError> {
        if value == 0 {
            return Err(ValueError::InvalidZoneId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for ZoneId {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for ZoneId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| ValueError::InvalidZoneId(s.to_string()))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_id_valid() {
        assert_eq!(ZoneId::new(1).unwrap().value(), 1);
        assert_eq!(ZoneId::new(27).unwrap().value(), 27);
    }

    #[test]
    fn zone_id_zero_rejected() {
        assert!(ZoneId::new(0).is_err());
    }

    #[test]
    fn zone_id_from_str() {
        assert_eq!("33".parse::<ZoneId>().unwrap().value(), 33);
        assert_eq!(" 10 ".parse::<ZoneId>().unwrap().value(), 10);
        assert!("0".parse::<ZoneId>().is_err());
        assert!("abc".parse::<ZoneId>().is_err());
        assert!("-1".parse::<ZoneId>().is_err());
    }

    #[test]
    fn zone_id_ordering() {
        assert!(ZoneId::new(10).unwrap() < ZoneId::new(27).unwrap());
    }
}
