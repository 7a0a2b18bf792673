//! Detail filter: which formatting fields a destination omits

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Bitmask of omission flags.
///
/// A set bit suppresses the corresponding field, so [`DetailsFilter::ALL`]
/// (no bits) renders every field and [`DetailsFilter::MESSAGE_ONLY`] renders
/// just the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct DetailsFilter(u32);

impl DetailsFilter {
    pub const ALL: Self = Self(0x0);
    pub const WITHOUT_APP_NAME: Self = Self(0x1);
    pub const WITHOUT_TIME: Self = Self(0x2);
    pub const WITHOUT_MICROSECONDS: Self = Self(0x4);
    pub const WITHOUT_LEVEL: Self = Self(0x8);
    pub const WITHOUT_THREAD_INFO: Self = Self(0x10);
    pub const WITHOUT_SOURCE_CODE: Self = Self(0x20);

    /// Only the level tag and the message text.
    pub const MESSAGE_WITH_LEVEL: Self = Self(
        Self::WITHOUT_APP_NAME.0
            | Self::WITHOUT_TIME.0
            | Self::WITHOUT_MICROSECONDS.0
            | Self::WITHOUT_THREAD_INFO.0
            | Self::WITHOUT_SOURCE_CODE.0,
    );
    pub const MESSAGE_WITHOUT_SOURCE_CODE: Self =
        Self(Self::WITHOUT_APP_NAME.0 | Self::WITHOUT_SOURCE_CODE.0);
    pub const MESSAGE_ONLY: Self = Self(Self::MESSAGE_WITH_LEVEL.0 | Self::WITHOUT_LEVEL.0);

    pub const MAX_BITS: u32 = Self::MESSAGE_ONLY.0;

    /// Validate a raw bitmask.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidFilter`] when `bits` is outside
    /// `[0, MAX_BITS]`.
    pub fn from_bits(bits: i64) -> Result<Self> {
        if (0..=i64::from(Self::MAX_BITS)).contains(&bits) {
            Ok(Self(bits as u32))
        } else {
            Err(LoggerError::invalid_filter("details", bits, Self::MAX_BITS))
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `flag` is set, i.e. the field is suppressed.
    #[inline]
    pub const fn contains(self, flag: DetailsFilter) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// True when the field guarded by `flag` should be rendered.
    #[inline]
    pub const fn shows(self, flag: DetailsFilter) -> bool {
        self.0 & flag.0 == 0
    }
}

impl Default for DetailsFilter {
    fn default() -> Self {
        Self::WITHOUT_APP_NAME
    }
}

impl BitOr for DetailsFilter {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<i64> for DetailsFilter {
    type Error = LoggerError;

    fn try_from(bits: i64) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl From<DetailsFilter> for u32 {
    fn from(filter: DetailsFilter) -> Self {
        filter.0
    }
}

impl fmt::Display for DetailsFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_values() {
        assert_eq!(DetailsFilter::ALL.bits(), 0);
        assert_eq!(DetailsFilter::WITHOUT_APP_NAME.bits(), 1);
        assert_eq!(DetailsFilter::MESSAGE_WITH_LEVEL.bits(), 55);
        assert_eq!(DetailsFilter::MESSAGE_WITHOUT_SOURCE_CODE.bits(), 33);
        assert_eq!(DetailsFilter::MESSAGE_ONLY.bits(), 63);
        assert_eq!(DetailsFilter::MAX_BITS, 63);
    }

    #[test]
    fn test_shows_and_contains() {
        let filter = DetailsFilter::WITHOUT_TIME | DetailsFilter::WITHOUT_LEVEL;

        assert!(filter.contains(DetailsFilter::WITHOUT_TIME));
        assert!(!filter.shows(DetailsFilter::WITHOUT_LEVEL));
        assert!(filter.shows(DetailsFilter::WITHOUT_SOURCE_CODE));
        assert!(DetailsFilter::MESSAGE_WITH_LEVEL.shows(DetailsFilter::WITHOUT_LEVEL));
    }

    #[test]
    fn test_from_bits_range() {
        assert_eq!(DetailsFilter::from_bits(63).unwrap(), DetailsFilter::MESSAGE_ONLY);
        assert!(DetailsFilter::from_bits(64).is_err());
        assert!(DetailsFilter::from_bits(-3).is_err());
    }

    #[test]
    fn test_default_hides_app_name() {
        assert_eq!(DetailsFilter::default(), DetailsFilter::WITHOUT_APP_NAME);
    }
}
