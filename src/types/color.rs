//! Predefined and random color commands.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::command::Command;

use super::Saturation;

/// Colors with known-good hue or color-temperature values on Hue bulbs.
///
/// Each name resolves to a full [`Command`] at maximum brightness: the
/// chromatic names carry a hue at full saturation, the two whites carry a
/// mired color temperature instead.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use hue_lights_rs::NamedColor;
///
/// assert_eq!(NamedColor::from_str("warmwhite").unwrap(), NamedColor::WarmWhite);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Green,
    Red,
    Blue,
    CoolWhite,
    WarmWhite,
    Orange,
    Yellow,
    Pink,
    Purple,
}

impl NamedColor {
    /// The full-brightness command for this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::NamedColor;
    ///
    /// let wire = serde_json::to_value(NamedColor::Green.command()).unwrap();
    /// assert_eq!(wire["hue"], 25480);
    /// assert_eq!(wire["sat"], 254);
    /// assert_eq!(wire["bri"], 254);
    /// ```
    pub fn command(&self) -> Command {
        let mut command = Command::new();
        command.brightness(Command::BRIGHTNESS_MAX);

        match self {
            NamedColor::CoolWhite => command.color_temperature(150),
            NamedColor::WarmWhite => command.color_temperature(500),
            chromatic => {
                command.hue(chromatic.hue());
                command.saturation(&Saturation::highest());
            }
        }

        command
    }

    /// The hue value for chromatic names; the whites sit at hue 0.
    fn hue(&self) -> u16 {
        // 182 steps per degree on the 0-65535 wheel.
        match self {
            NamedColor::Red => 0,
            NamedColor::Orange => 182 * 25,
            NamedColor::Yellow => 182 * 85,
            NamedColor::Green => 182 * 140,
            NamedColor::Blue => 182 * 250,
            NamedColor::Purple => 182 * 270,
            NamedColor::Pink => 182 * 300,
            NamedColor::CoolWhite | NamedColor::WarmWhite => 0,
        }
    }
}

/// Gin up a random color command.
pub fn random_color() -> Command {
    let mut rng = rand::rng();
    let mut command = Command::new();
    command.hue(rng.random());
    command.saturation(&Saturation::create_or(
        rng.random_range(Saturation::MIN..=Saturation::MAX),
    ));
    command.brightness(rng.random_range(0..=Command::BRIGHTNESS_MAX));
    command
}

/// Gin up a random temp-based white command.
pub fn random_white() -> Command {
    let mut rng = rand::rng();
    let mut command = Command::new();
    command.color_temperature(rng.random_range(Command::COLOR_TEMP_MIN..=Command::COLOR_TEMP_MAX));
    command.brightness(rng.random_range(0..=Command::BRIGHTNESS_MAX));
    command
}
