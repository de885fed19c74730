//! Color mode reported by a bulb.

use serde::{Deserialize, Serialize};

/// Which color representation the bulb currently treats as authoritative.
///
/// The bridge coerces this as a side effect of commands: sending a hue or
/// saturation switches the bulb to `Hs`, sending a color temperature
/// switches it to `Ct`.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Hue and saturation.
    Hs,
    /// CIE xy coordinates.
    Xy,
    /// Mired color temperature.
    Ct,
    /// Not reported, typically a white-only bulb.
    #[default]
    None,
}
