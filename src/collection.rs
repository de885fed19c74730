//! Filtered working sets over registry-owned lights.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::batch::BatchReport;
use crate::command::Command;
use crate::errors::Error;
use crate::light::Light;
use crate::state::LightId;
use crate::types::{Effect, NamedColor, Saturation};

type Result<T> = std::result::Result<T, Error>;

/// Attributes applied by [`LightCollection::setup_all`]; absent fields are
/// left untouched on every light.
///
/// The fields compose in a fixed order (effect, saturation, brightness,
/// color), so a named color's own saturation and brightness win when both
/// are given.
#[derive(Debug, Default, Clone)]
pub struct Setup {
    pub effect: Option<Effect>,
    pub saturation: Option<Saturation>,
    pub brightness: Option<u8>,
    pub color: Option<NamedColor>,
}

impl Setup {
    pub(crate) fn command(&self) -> Command {
        let mut command = Command::new();
        if let Some(effect) = self.effect {
            command.effect(effect);
        }
        if let Some(saturation) = &self.saturation {
            command.saturation(saturation);
        }
        if let Some(brightness) = self.brightness {
            command.brightness(brightness);
        }
        if let Some(color) = self.color {
            command.merge(&color.command());
        }
        command
    }
}

/// An ordered view over a subset of handles owned by a [`Bridge`](crate::Bridge).
///
/// Collections narrow the working set for bulk commands and effects; they
/// never own or copy device state. Filters shrink the collection in place
/// without reordering the survivors, and a collection never grows.
#[derive(Debug)]
pub struct LightCollection {
    lights: Vec<Arc<Light>>,
}

impl LightCollection {
    /// Builds a collection, dropping unreachable lights up front.
    ///
    /// An empty input set fails with [`Error::InvalidArgument`]; a
    /// collection *emptied* by filtering stays valid and makes every bulk
    /// command a no-op.
    pub async fn new(lights: Vec<Arc<Light>>) -> Result<Self> {
        if lights.is_empty() {
            return Err(Error::InvalidArgument("no lights given".into()));
        }

        let mut collection = LightCollection { lights };
        collection.drop_unreachable().await;
        Ok(collection)
    }

    /// Removes lights the bridge last reported as unreachable.
    ///
    /// Returns the number of removed lights.
    pub async fn drop_unreachable(&mut self) -> usize {
        let before = self.lights.len();
        let mut kept = Vec::with_capacity(before);
        for light in self.lights.drain(..) {
            if light.state().await.reachable {
                kept.push(light);
            }
        }
        self.lights = kept;
        before - self.lights.len()
    }

    /// Removes lights whose name contains `pattern`.
    ///
    /// Useful for excluding named always-on or decorative lights from bulk
    /// effects. Returns the number of removed lights; an empty pattern
    /// fails with [`Error::InvalidArgument`].
    pub async fn drop_by_name(&mut self, pattern: &str) -> Result<usize> {
        if pattern.is_empty() {
            return Err(Error::InvalidArgument("name pattern must not be empty".into()));
        }

        let before = self.lights.len();
        let mut kept = Vec::with_capacity(before);
        for light in self.lights.drain(..) {
            if !light.state().await.name.contains(pattern) {
                kept.push(light);
            }
        }
        self.lights = kept;
        Ok(before - self.lights.len())
    }

    /// The surviving lights, in collection order.
    pub fn lights(&self) -> &[Arc<Light>] {
        &self.lights
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Light>> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Turns on every light, in collection order.
    pub async fn turn_on_all(&self) -> BatchReport {
        let mut command = Command::new();
        command.power(true);
        self.send_all(&command).await
    }

    /// Turns off every light, in collection order.
    pub async fn turn_off_all(&self) -> BatchReport {
        let mut command = Command::new();
        command.power(false);
        self.send_all(&command).await
    }

    /// Inverts every light's power state independently.
    ///
    /// Each light toggles against its own last-known power bit, so a mixed
    /// collection ends fully inverted, not fully uniform.
    pub async fn toggle_all(&self) -> BatchReport {
        let mut report = BatchReport::new();
        for light in &self.lights {
            match light.toggle().await {
                Ok(()) => report.success(light.id()),
                Err(error) => {
                    warn!("toggle failed for light {}: {error}", light.id());
                    report.failure(light.id(), error);
                }
            }
        }
        report
    }

    /// Turns every light on first, unconditionally, then applies the
    /// non-absent [`Setup`] attributes to every light.
    ///
    /// The turn-on pass runs over the whole collection before any attribute
    /// is sent; effects are visually meaningless on an off bulb. A light
    /// that fails the turn-on pass is skipped in the attribute pass and
    /// recorded once.
    pub async fn setup_all(&self, setup: &Setup) -> BatchReport {
        let command = setup.command();
        let mut report = BatchReport::new();
        let mut failed: HashSet<LightId> = HashSet::new();

        for light in &self.lights {
            if let Err(error) = light.turn_on().await {
                warn!("turn on failed for light {}: {error}", light.id());
                failed.insert(light.id());
                report.failure(light.id(), error);
            }
        }

        for light in &self.lights {
            if failed.contains(&light.id()) {
                continue;
            }
            if command.is_empty() {
                report.success(light.id());
                continue;
            }
            match light.send(&command).await {
                Ok(()) => report.success(light.id()),
                Err(error) => {
                    warn!("setup failed for light {}: {error}", light.id());
                    report.failure(light.id(), error);
                }
            }
        }
        report
    }

    async fn send_all(&self, command: &Command) -> BatchReport {
        let mut report = BatchReport::new();
        for light in &self.lights {
            match light.send(command).await {
                Ok(()) => report.success(light.id()),
                Err(error) => {
                    warn!("command failed for light {}: {error}", light.id());
                    report.failure(light.id(), error);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{MockTransport, light_from, light_payload};

    async fn named_lights(
        transport: &Arc<MockTransport>,
        names: &[(LightId, &str, bool, bool)],
    ) -> Vec<Arc<Light>> {
        let mut lights = Vec::new();
        for &(id, name, on, reachable) in names {
            lights.push(light_from(transport, id, light_payload(name, on, reachable)).await);
        }
        lights
    }

    #[tokio::test]
    async fn empty_input_is_rejected() {
        let err = LightCollection::new(Vec::new()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn unreachable_lights_are_dropped_on_construction() {
        let transport = MockTransport::new();
        let lights = named_lights(
            &transport,
            &[(1, "Kitchen", true, true), (2, "Cellar", true, false)],
        )
        .await;

        let collection = LightCollection::new(lights).await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.lights()[0].id(), 1);
    }

    #[tokio::test]
    async fn drop_by_name_counts_removals_and_keeps_order() {
        let transport = MockTransport::new();
        let lights = named_lights(
            &transport,
            &[
                (1, "Kitchen Lamp", true, true),
                (2, "Hallway", true, true),
                (3, "Lamp 2", true, true),
            ],
        )
        .await;

        let mut collection = LightCollection::new(lights).await.unwrap();
        let removed = collection.drop_by_name("Lamp").await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.lights()[0].state().await.name, "Hallway");
    }

    #[tokio::test]
    async fn empty_pattern_is_rejected() {
        let transport = MockTransport::new();
        let lights = named_lights(&transport, &[(1, "Kitchen", true, true)]).await;

        let mut collection = LightCollection::new(lights).await.unwrap();
        let err = collection.drop_by_name("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn toggle_all_inverts_each_light_independently() {
        let transport = MockTransport::new();
        let lights = named_lights(
            &transport,
            &[
                (1, "A", true, true),
                (2, "B", false, true),
                (3, "C", true, true),
            ],
        )
        .await;

        let collection = LightCollection::new(lights).await.unwrap();
        let report = collection.toggle_all().await;
        assert!(report.is_complete());

        let mut powers = Vec::new();
        for light in collection.iter() {
            powers.push(light.state().await.power);
        }
        assert_eq!(powers, vec![false, true, false]);
    }

    #[tokio::test]
    async fn setup_all_turns_on_before_applying_attributes() {
        let transport = MockTransport::new();
        let lights = named_lights(
            &transport,
            &[(1, "A", false, true), (2, "B", false, true)],
        )
        .await;

        let collection = LightCollection::new(lights).await.unwrap();
        let setup = Setup {
            brightness: Some(200),
            saturation: Some(Saturation::highest()),
            ..Setup::default()
        };
        let report = collection.setup_all(&setup).await;
        assert!(report.is_complete());

        let puts = transport.puts();
        assert_eq!(puts.len(), 4);
        // Both turn-on PUTs precede any attribute PUT.
        assert_eq!(puts[0].body, Some(json!({"on": true})));
        assert_eq!(puts[1].body, Some(json!({"on": true})));
        assert_eq!(puts[2].body, Some(json!({"sat": 254, "bri": 200})));
        assert_eq!(puts[2].path, "lights/1/state");
        assert_eq!(puts[3].path, "lights/2/state");
    }

    #[tokio::test]
    async fn bulk_commands_report_per_device_failures() {
        let transport = MockTransport::new();
        let lights = named_lights(
            &transport,
            &[
                (1, "A", false, true),
                (2, "B", false, true),
                (3, "C", false, true),
            ],
        )
        .await;

        let collection = LightCollection::new(lights).await.unwrap();
        transport.fail("lights/2/state");

        let report = collection.turn_on_all().await;
        assert_eq!(report.succeeded(), &[1, 3]);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].id, 2);

        // The surviving lights changed; partial application is observable.
        assert!(collection.lights()[0].state().await.power);
        assert!(!collection.lights()[1].state().await.power);
        assert!(collection.lights()[2].state().await.power);
    }
}
