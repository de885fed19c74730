//! Color saturation for Hue lights.

use serde::{Deserialize, Serialize};

/// Color saturation from 1 (least saturated) to 254 (most saturated).
///
/// This is the one attribute the bridge documents strict bounds for, so an
/// out-of-range value is rejected here instead of being clamped.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Saturation {
    value: u8,
}

impl Saturation {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 254;

    /// The least saturated value the bridge accepts.
    pub fn lowest() -> Self {
        Saturation { value: Self::MIN }
    }

    /// The most saturated value the bridge accepts.
    pub fn highest() -> Self {
        Saturation { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside the valid range (1-254).
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Saturation;
    ///
    /// assert!(Saturation::create(0).is_none());
    /// assert!(Saturation::create(1).is_some());
    /// assert!(Saturation::create(254).is_some());
    /// assert!(Saturation::create(255).is_none());
    /// ```
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Saturation { value })
        } else {
            None
        }
    }

    /// Returns the most saturated value if `value` is invalid.
    pub fn create_or(value: u8) -> Self {
        if Self::is_valid(value) {
            Saturation { value }
        } else {
            Self::highest()
        }
    }

    fn is_valid(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self::highest()
    }
}
