//! Continuous multi-light effects.

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::collection::{LightCollection, Setup};
use crate::command::Command;
use crate::errors::Error;
use crate::light::Light;
use crate::types::{Effect, NamedColor, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// Ceiling of the drift range; hues below it stay in warm/orange tones.
const DRIFT_CEILING: u16 = 8000;
const DRIFT_STEP: u16 = 100;
const DRIFT_INTERVAL: Duration = Duration::from_secs(4);
const STROBE_INTERVAL: Duration = Duration::from_secs(1);

/// Drives long-running, repeating effects over a [`LightCollection`].
///
/// Each effect seeds the collection once and then loops forever, one full
/// pass over the lights per tick, until the scheduler's cancellation token
/// fires. Cancellation is observed only between ticks: an in-flight
/// command always completes or fails before the loop stops. A restart
/// re-seeds from scratch; loops are not resumable mid-cycle.
///
/// A single light failing during a pass is logged and skipped for the rest
/// of that pass; no effect loop terminates itself on error.
pub struct EffectScheduler {
    lights: LightCollection,
    cancel: CancellationToken,
    drift_interval: Duration,
    strobe_interval: Duration,
}

impl EffectScheduler {
    pub fn new(lights: LightCollection) -> Self {
        EffectScheduler {
            lights,
            cancel: CancellationToken::new(),
            drift_interval: DRIFT_INTERVAL,
            strobe_interval: STROBE_INTERVAL,
        }
    }

    /// Overrides the per-tick pacing, mainly for demos and tests.
    pub fn with_intervals(mut self, drift: Duration, strobe: Duration) -> Self {
        self.drift_interval = drift;
        self.strobe_interval = strobe;
        self
    }

    /// The token a running effect watches at every tick boundary.
    ///
    /// Cancel it to stop the loop; the effect then returns `Ok(())`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The collection this scheduler drives.
    pub fn lights(&self) -> &LightCollection {
        &self.lights
    }

    /// Warm orange and red tones, slowly drifting.
    ///
    /// Every light is seeded with a random hue inside the warm range at
    /// full saturation and brightness; each tick then advances every
    /// light's hue by a fixed step, in collection order, wrapping over the
    /// warm-range ceiling.
    pub async fn warm_drift(&self) -> Result<()> {
        let setup = Setup {
            effect: Some(Effect::None),
            saturation: Some(Saturation::highest()),
            brightness: Some(Command::BRIGHTNESS_MAX),
            color: None,
        };
        self.lights.setup_all(&setup).await;

        for light in self.lights.iter() {
            let hue = { rand::rng().random_range(1..DRIFT_CEILING) };
            if let Err(error) = light.set_hue(hue).await {
                warn!("drift seed failed for light {}: {error}", light.id());
            }
        }

        let mut ticker = time::interval(self.drift_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }
            self.drift_pass().await;
        }
    }

    /// White strobe.
    ///
    /// Every light is seeded to cool white at full brightness and minimum
    /// saturation; each tick then flips every light on and immediately off
    /// again, in an order reshuffled per pass.
    pub async fn strobe(&self) -> Result<()> {
        let setup = Setup {
            effect: Some(Effect::None),
            saturation: Some(Saturation::lowest()),
            brightness: Some(Command::BRIGHTNESS_MAX),
            color: Some(NamedColor::CoolWhite),
        };
        self.lights.setup_all(&setup).await;

        let mut ticker = time::interval(self.strobe_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }
            self.strobe_pass().await;
        }
    }

    /// One drift tick: exactly one hue update per light, collection order.
    async fn drift_pass(&self) {
        for light in self.lights.iter() {
            let hue = light.state().await.hue;
            if let Err(error) = light.set_hue(next_drift_hue(hue, DRIFT_STEP)).await {
                warn!("drift failed for light {}: {error}", light.id());
            }
        }
    }

    /// One strobe tick: on-then-off per light, shuffled order.
    async fn strobe_pass(&self) {
        let mut order: Vec<Arc<Light>> = self.lights.lights().to_vec();
        {
            order.shuffle(&mut rand::rng());
        }

        for light in &order {
            if let Err(error) = light.turn_on().await {
                warn!("strobe failed for light {}: {error}", light.id());
                continue;
            }
            if let Err(error) = light.turn_off().await {
                warn!("strobe failed for light {}: {error}", light.id());
            }
        }
    }
}

/// Advances a hue by `step`, wrapping over the warm-range ceiling.
fn next_drift_hue(hue: u16, step: u16) -> u16 {
    ((u32::from(hue) + u32::from(step)) % u32::from(DRIFT_CEILING)) as u16
}
