//! Sparse state commands for Hue lights.

use serde::{Deserialize, Serialize};

use crate::types::{Alert, Effect, NamedColor, Saturation};

/// A sparse attribute set to PUT to a light's state endpoint.
///
/// Commands only carry the fields that were explicitly set; everything else
/// is left untouched on the device. A command with no attributes at all is
/// rejected before any network call.
///
/// # Creating Commands
///
/// You can create a command in two ways:
///
/// 1. **From a named color** using the [`From`] trait:
///    ```
///    use hue_lights_rs::{Command, NamedColor};
///    let command = Command::from(NamedColor::Red);
///    ```
///
/// 2. **Builder pattern** for combining multiple attributes:
///    ```
///    use hue_lights_rs::{Command, Saturation};
///    let mut command = Command::new();
///    command.power(true);
///    command.brightness(200);
///    command.saturation(&Saturation::create(120).unwrap());
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Command {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
    pub(crate) ct: Option<u16>,
    pub(crate) alert: Option<Alert>,
    pub(crate) effect: Option<Effect>,
}

impl Command {
    /// Highest brightness a bulb accepts.
    pub const BRIGHTNESS_MAX: u8 = 254;
    /// Coolest mired color temperature a bulb accepts.
    pub const COLOR_TEMP_MIN: u16 = 150;
    /// Warmest mired color temperature a bulb accepts.
    pub const COLOR_TEMP_MAX: u16 = 500;

    /// Create a new empty command.
    ///
    /// At least one attribute must be set before the command can be sent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no attribute has been set yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Command;
    ///
    /// let mut command = Command::new();
    /// assert!(command.is_empty());
    ///
    /// command.power(true);
    /// assert!(!command.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.bri.is_none()
            && self.hue.is_none()
            && self.sat.is_none()
            && self.ct.is_none()
            && self.alert.is_none()
            && self.effect.is_none()
    }

    /// Set the power state.
    pub fn power(&mut self, on: bool) {
        self.on = Some(on);
    }

    /// Set the brightness, clamped to 0-254.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_lights_rs::Command;
    ///
    /// let mut command = Command::new();
    /// command.brightness(255);
    /// assert_eq!(serde_json::to_value(&command).unwrap()["bri"], 254);
    /// ```
    pub fn brightness(&mut self, brightness: u8) {
        self.bri = Some(brightness.min(Self::BRIGHTNESS_MAX));
    }

    /// Set the hue. The full `u16` range is the device's documented range.
    pub fn hue(&mut self, hue: u16) {
        self.hue = Some(hue);
    }

    /// Set the color saturation.
    ///
    /// Saturation is the one strictly validated attribute; it can only enter
    /// a command through [`Saturation`], so an out-of-range value is caught
    /// long before the bridge sees it.
    pub fn saturation(&mut self, saturation: &Saturation) {
        self.sat = Some(saturation.value());
    }

    /// Set the mired color temperature, clamped to 150-500.
    pub fn color_temperature(&mut self, color_temperature: u16) {
        self.ct = Some(color_temperature.clamp(Self::COLOR_TEMP_MIN, Self::COLOR_TEMP_MAX));
    }

    /// Set the alert effect.
    pub fn alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    /// Set the dynamic effect.
    pub fn effect(&mut self, effect: Effect) {
        self.effect = Some(effect);
    }

    /// Overlay `other` onto this command; fields set in `other` win.
    pub(crate) fn merge(&mut self, other: &Command) {
        if let Some(on) = other.on {
            self.on = Some(on);
        }
        if let Some(bri) = other.bri {
            self.bri = Some(bri);
        }
        if let Some(hue) = other.hue {
            self.hue = Some(hue);
        }
        if let Some(sat) = other.sat {
            self.sat = Some(sat);
        }
        if let Some(ct) = other.ct {
            self.ct = Some(ct);
        }
        if let Some(alert) = other.alert {
            self.alert = Some(alert);
        }
        if let Some(effect) = other.effect {
            self.effect = Some(effect);
        }
    }
}

impl From<NamedColor> for Command {
    fn from(color: NamedColor) -> Self {
        color.command()
    }
}

impl From<Effect> for Command {
    fn from(effect: Effect) -> Self {
        let mut command = Command::new();
        command.effect(effect);
        command
    }
}

impl From<Alert> for Command {
    fn from(alert: Alert) -> Self {
        let mut command = Command::new();
        command.alert(alert);
        command
    }
}
