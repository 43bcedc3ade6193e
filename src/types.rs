// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constrained value types.

use std::fmt;

use crate::error::ValueError;

/// Flame power level of the stove (1-5).
///
/// The vendor accepts five discrete levels; anything outside that set is
/// rejected before a request is made.
///
/// # Examples
///
/// ```
/// use winet_stove::PowerLevel;
///
/// let level = PowerLevel::new(3).unwrap();
/// assert_eq!(level.value(), 3);
///
/// assert!(PowerLevel::new(0).is_err());
/// assert!(PowerLevel::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerLevel(u8);

impl PowerLevel {
    /// Lowest flame level.
    pub const MIN: Self = Self(1);

    /// Highest flame level.
    pub const MAX: Self = Self(5);

    /// Creates a new power level.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnsupportedPowerLevel`] if the value is not
    /// in the set 1-5.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if !(1..=5).contains(&value) {
            return Err(ValueError::UnsupportedPowerLevel(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for PowerLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels() {
        for v in 1..=5 {
            assert_eq!(PowerLevel::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn invalid_levels() {
        assert!(matches!(
            PowerLevel::new(0),
            Err(ValueError::UnsupportedPowerLevel(0))
        ));
        assert!(matches!(
            PowerLevel::new(6),
            Err(ValueError::UnsupportedPowerLevel(6))
        ));
    }

    #[test]
    fn min_max() {
        assert_eq!(PowerLevel::MIN.value(), 1);
        assert_eq!(PowerLevel::MAX.value(), 5);
        assert!(PowerLevel::MIN < PowerLevel::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(PowerLevel::new(4).unwrap().to_string(), "4");
    }
}
