//! Canonical light state and the projection merge.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::command::Command;
use crate::errors::Error;
use crate::types::{Alert, ColorMode, Effect};

type Result<T> = std::result::Result<T, Error>;

/// Bridge-assigned device id, fixed at discovery.
pub type LightId = u32;

/// Last-known snapshot of a single light.
///
/// Snapshots are replaced wholesale on [`refresh`](crate::Light::refresh) and
/// patched in place by the optimistic update that follows a successful
/// command. They are plain values: cloning one detaches it from the handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightState {
    pub id: LightId,
    pub name: String,
    pub device_type: String,
    pub model_id: String,
    pub software_version: String,
    pub power: bool,
    pub reachable: bool,
    /// 0 (dimmest the bulb can go) to 254.
    pub brightness: u8,
    /// Full color wheel, 0 to 65535.
    pub hue: u16,
    /// 1 (least saturated) to 254 (most saturated).
    pub saturation: u8,
    /// Mired color temperature, 150 (cool) to 500 (warm). Only meaningful
    /// while `color_mode` is [`ColorMode::Ct`].
    pub color_temperature: u16,
    pub alert: Alert,
    pub effect: Effect,
    /// Which of hue/saturation, xy, or color temperature the bulb currently
    /// treats as authoritative.
    pub color_mode: ColorMode,
}

impl LightState {
    pub(crate) fn new(id: LightId) -> Self {
        LightState {
            id,
            name: String::new(),
            device_type: String::new(),
            model_id: String::new(),
            software_version: String::new(),
            power: false,
            reachable: false,
            brightness: 0,
            hue: 0,
            saturation: 0,
            color_temperature: 150,
            alert: Alert::None,
            effect: Effect::None,
            color_mode: ColorMode::None,
        }
    }

    /// Merges a raw bridge payload over this snapshot, returning the result.
    ///
    /// The bridge reports some attributes at the top level of a payload
    /// (name, model, reachability) and others nested under a `state` object
    /// (power, brightness, hue), and different endpoints expose different
    /// subsets. For every canonical field the top-level value wins, then the
    /// value nested under `state`, and a key absent from both leaves the
    /// field at its current value.
    ///
    /// A payload without a `state` key does not describe a light and is
    /// ignored: the snapshot comes back unchanged.
    ///
    /// This is a pure merge. On a type mismatch it fails with
    /// [`Error::MalformedState`] and `self` is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use hue_lights_rs::LightState;
    ///
    /// let state = LightState::default();
    /// let next = state
    ///     .project(&json!({"name": "Kitchen", "state": {"on": true, "bri": 200}}))
    ///     .unwrap();
    /// assert_eq!(next.name, "Kitchen");
    /// assert!(next.power);
    /// assert_eq!(next.brightness, 200);
    /// ```
    pub fn project(&self, raw: &Value) -> Result<LightState> {
        let mut next = self.clone();
        if raw.get("state").is_none() {
            return Ok(next);
        }

        merge(raw, "name", &mut next.name)?;
        merge(raw, "type", &mut next.device_type)?;
        merge(raw, "modelid", &mut next.model_id)?;
        merge(raw, "swversion", &mut next.software_version)?;
        merge(raw, "on", &mut next.power)?;
        merge(raw, "reachable", &mut next.reachable)?;
        merge(raw, "bri", &mut next.brightness)?;
        merge(raw, "hue", &mut next.hue)?;
        merge(raw, "sat", &mut next.saturation)?;
        merge(raw, "ct", &mut next.color_temperature)?;
        merge(raw, "alert", &mut next.alert)?;
        merge(raw, "effect", &mut next.effect)?;
        merge(raw, "colormode", &mut next.color_mode)?;

        Ok(next)
    }

    /// Patches the snapshot with the fields a command named, leaving the
    /// rest untouched. This is the optimistic local update performed after
    /// a successful PUT.
    pub(crate) fn apply(&mut self, command: &Command) {
        if let Some(on) = command.on {
            self.power = on;
        }
        if let Some(bri) = command.bri {
            self.brightness = bri;
        }
        if let Some(hue) = command.hue {
            self.hue = hue;
        }
        if let Some(sat) = command.sat {
            self.saturation = sat;
        }
        if let Some(ct) = command.ct {
            self.color_temperature = ct;
        }
        if let Some(alert) = command.alert {
            self.alert = alert;
        }
        if let Some(effect) = command.effect {
            self.effect = effect;
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Two-level key lookup: top level first, then the nested `state` object.
fn lookup<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key)
        .or_else(|| raw.get("state").and_then(|state| state.get(key)))
}

fn merge<T: DeserializeOwned>(raw: &Value, key: &str, slot: &mut T) -> Result<()> {
    if let Some(value) = lookup(raw, key) {
        *slot = serde_json::from_value(value.clone()).map_err(|_| Error::malformed(key, value))?;
    }
    Ok(())
}

/// Single-level variant used by payloads without the nested `state` shape.
pub(crate) fn merge_flat<T: DeserializeOwned>(raw: &Value, key: &str, slot: &mut T) -> Result<()> {
    if let Some(value) = raw.get(key) {
        *slot = serde_json::from_value(value.clone()).map_err(|_| Error::malformed(key, value))?;
    }
    Ok(())
}
