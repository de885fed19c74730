//! Individual light control.

use tokio::sync::Mutex;

use crate::command::Command;
use crate::errors::Error;
use crate::gateway::Gateway;
use crate::state::{LightId, LightState};
use crate::types::{Alert, Effect, NamedColor, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// In-process owner of one device's last-known state plus its command path.
///
/// A `Light` holds the last [`LightState`] it saw and a [`Gateway`] to reach
/// the device. Successful commands are applied to the local snapshot
/// optimistically instead of triggering a re-fetch, trading a round trip for
/// staleness risk: if the bridge accepts a PUT but the device only partially
/// honors it (an unreachable bulb, a rounded value), the local view diverges
/// until the next [`refresh`](Light::refresh). Callers needing ground truth
/// must refresh explicitly.
///
/// All state access goes through an internal lock that is held across the
/// network call of every state-changing operation, so per-device commands
/// are ordered and a refresh can never interleave with an optimistic update.
#[derive(Debug)]
pub struct Light {
    id: LightId,
    gateway: Gateway,
    state: Mutex<LightState>,
}

impl Light {
    pub(crate) fn new(id: LightId, gateway: Gateway) -> Self {
        Light {
            id,
            gateway,
            state: Mutex::new(LightState::new(id)),
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }

    /// The last known snapshot.
    pub async fn state(&self) -> LightState {
        self.state.lock().await.clone()
    }

    /// Fetches the device detail and replaces the snapshot wholesale.
    pub async fn refresh(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let raw = self.gateway.fetch_light(self.id).await?;
        *state = state.project(&raw)?;
        Ok(())
    }

    /// Sends a sparse command and optimistically applies it to the local
    /// snapshot. Fields the command does not name are untouched.
    ///
    /// An empty command fails with [`Error::InvalidArgument`] before any
    /// network call.
    pub async fn send(&self, command: &Command) -> Result<()> {
        if command.is_empty() {
            return Err(Error::InvalidArgument(
                "command has no attributes set".into(),
            ));
        }

        let mut state = self.state.lock().await;
        self.gateway.put_state(self.id, command).await?;
        state.apply(command);
        Ok(())
    }

    /// Turns on the light. If the light is already on nothing will happen.
    pub async fn turn_on(&self) -> Result<()> {
        let mut command = Command::new();
        command.power(true);
        self.send(&command).await
    }

    /// Turns off the light. If the light is already off nothing will happen.
    pub async fn turn_off(&self) -> Result<()> {
        let mut command = Command::new();
        command.power(false);
        self.send(&command).await
    }

    /// Inverts the light's power state, as this handle last saw it.
    pub async fn toggle(&self) -> Result<()> {
        // The lock spans the PUT so a concurrent toggle cannot read a stale
        // power bit.
        let mut state = self.state.lock().await;
        let mut command = Command::new();
        command.power(!state.power);
        self.gateway.put_state(self.id, &command).await?;
        state.apply(&command);
        Ok(())
    }

    /// Sets the hue, the full 0-65535 color wheel.
    pub async fn set_hue(&self, hue: u16) -> Result<()> {
        let mut command = Command::new();
        command.hue(hue);
        self.send(&command).await
    }

    /// Sets the color saturation.
    ///
    /// Values can be between 1 and 254 (included); anything else fails with
    /// [`Error::OutOfRange`] before any network call.
    pub async fn set_saturation(&self, saturation: u8) -> Result<()> {
        let Some(saturation) = Saturation::create(saturation) else {
            return Err(Error::out_of_range(
                "saturation",
                i64::from(saturation),
                i64::from(Saturation::MIN),
                i64::from(Saturation::MAX),
            ));
        };

        let mut command = Command::new();
        command.saturation(&saturation);
        self.send(&command).await
    }

    /// Sets the brightness, clamped to 0-254.
    pub async fn set_brightness(&self, brightness: u8) -> Result<()> {
        let mut command = Command::new();
        command.brightness(brightness);
        self.send(&command).await
    }

    /// Sets the mired color temperature, clamped to 150-500.
    pub async fn set_color_temperature(&self, color_temperature: u16) -> Result<()> {
        let mut command = Command::new();
        command.color_temperature(color_temperature);
        self.send(&command).await
    }

    /// Sets the alert effect, a temporary change to the bulb's state.
    pub async fn set_alert(&self, alert: Alert) -> Result<()> {
        self.send(&Command::from(alert)).await
    }

    /// Sets the dynamic effect.
    pub async fn set_effect(&self, effect: Effect) -> Result<()> {
        self.send(&Command::from(effect)).await
    }

    /// Applies a predefined color at full brightness.
    pub async fn set_color(&self, color: NamedColor) -> Result<()> {
        self.send(&color.command()).await
    }

    /// Renames the light on the bridge.
    ///
    /// Naming is a resource-level rename, not a state transition, so this
    /// PUTs to the detail path rather than the state path. An empty name
    /// fails with [`Error::InvalidArgument`] before any network call.
    pub async fn set_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("light name must not be empty".into()));
        }

        let mut state = self.state.lock().await;
        self.gateway.rename(self.id, name).await?;
        state.name = name.to_string();
        Ok(())
    }
}
