//! Bridge registry: the full set of known lights and scenes.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use log::warn;
use serde_json::Value;

use crate::batch::BatchReport;
use crate::collection::LightCollection;
use crate::errors::Error;
use crate::gateway::Gateway;
use crate::light::Light;
use crate::scene::Scene;
use crate::state::LightId;
use crate::transport::{HttpTransport, Transport};

type Result<T> = std::result::Result<T, Error>;

/// Owns one [`Light`] handle per discovered device, keyed by id.
///
/// The handle map is read-mostly after discovery; the operations that add
/// or prune handles take `&mut self`, which keeps them exclusive with
/// lookups. Handles are shared out as `Arc`s, so collections and effect
/// loops keep working against lights the registry still owns.
#[derive(Debug)]
pub struct Bridge {
    gateway: Gateway,
    lights: BTreeMap<LightId, Arc<Light>>,
}

impl Bridge {
    /// Creates an empty registry over the given transport.
    ///
    /// No network traffic happens until [`discover`](Bridge::discover) or
    /// [`update`](Bridge::update) is called.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Bridge {
            gateway: Gateway::new(transport),
            lights: BTreeMap::new(),
        }
    }

    /// Connects to a bridge over HTTP with a paired credential.
    pub fn connect(address: &str, credential: &str) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(address, credential)?)))
    }

    /// Fetches the bridge's id set, creates a handle per id, and refreshes
    /// them all.
    ///
    /// Ids that vanished from the bridge are pruned. A detail fetch failing
    /// for a single light is recorded in the report and skipped, not fatal
    /// to the batch; the registry keeps every handle that refreshed.
    pub async fn discover(&mut self) -> Result<BatchReport> {
        let ids = self.gateway.light_ids().await?;

        self.lights.retain(|id, _| ids.contains(id));
        for &id in &ids {
            self.ensure_handle(id);
        }

        Ok(self.refresh_ids(&ids).await)
    }

    /// Refreshes one handle, creating it first if the id is new.
    pub async fn update(&mut self, id: LightId) -> Result<()> {
        self.ensure_handle(id);
        self.light(id)?.refresh().await
    }

    /// Refreshes the given handles, creating any that are new.
    pub async fn update_many(&mut self, ids: &[LightId]) -> Result<BatchReport> {
        for &id in ids {
            self.ensure_handle(id);
        }
        Ok(self.refresh_ids(ids).await)
    }

    /// Refreshes every known handle.
    pub async fn update_all(&self) -> Result<BatchReport> {
        let ids: Vec<LightId> = self.lights.keys().copied().collect();
        Ok(self.refresh_ids(&ids).await)
    }

    /// Looks up a discovered light.
    pub fn light(&self, id: LightId) -> Result<Arc<Light>> {
        self.lights.get(&id).cloned().ok_or(Error::LightNotFound(id))
    }

    /// Every known handle, ordered by id.
    pub fn lights(&self) -> Vec<Arc<Light>> {
        self.lights.values().cloned().collect()
    }

    /// Every known id, ascending.
    pub fn ids(&self) -> Vec<LightId> {
        self.lights.keys().copied().collect()
    }

    /// A working set over every known handle.
    ///
    /// Unreachable lights are dropped up front; see [`LightCollection`].
    pub async fn collection(&self) -> Result<LightCollection> {
        LightCollection::new(self.lights()).await
    }

    /// Every scene stored on the bridge.
    pub async fn scenes(&self) -> Result<Vec<Scene>> {
        let raw = self.gateway.fetch_scenes().await?;
        let Some(map) = raw.as_object() else {
            return Err(Error::MalformedState("scene listing is not an object".into()));
        };

        let mut scenes = Vec::with_capacity(map.len());
        for (id, data) in map {
            scenes.push(Scene::new(id).project(data)?);
        }
        Ok(scenes)
    }

    /// One scene by id.
    pub async fn scene(&self, id: &str) -> Result<Scene> {
        if id.is_empty() {
            return Err(Error::InvalidArgument("scene id must not be empty".into()));
        }

        let raw = self.gateway.fetch_scene(id).await?;
        if !raw.is_object() {
            return Err(Error::SceneNotFound(id.to_string()));
        }
        Scene::new(id).project(&raw)
    }

    /// Resolves a scene's member ids against the registry.
    ///
    /// Ids the registry no longer knows (pruned lights) are silently
    /// skipped; scenes hold ids, never handles.
    pub fn lights_for_scene(&self, scene: &Scene) -> Vec<Arc<Light>> {
        scene
            .light_ids()
            .iter()
            .filter_map(|id| self.lights.get(id).cloned())
            .collect()
    }

    /// The bridge's entire datastore, undecoded.
    pub async fn full_state(&self) -> Result<Value> {
        self.gateway.full_state().await
    }

    /// The bridge's schedule listing, undecoded.
    pub async fn schedules(&self) -> Result<Value> {
        self.gateway.schedules().await
    }

    fn ensure_handle(&mut self, id: LightId) {
        self.lights
            .entry(id)
            .or_insert_with(|| Arc::new(Light::new(id, self.gateway.clone())));
    }

    /// Refreshes the given ids concurrently; calls targeting different
    /// devices may overlap, per-device ordering is preserved by the handle
    /// lock.
    async fn refresh_ids(&self, ids: &[LightId]) -> BatchReport {
        let refreshes = ids.iter().filter_map(|id| {
            self.lights.get(id).map(|light| {
                let light = Arc::clone(light);
                let id = *id;
                async move { (id, light.refresh().await) }
            })
        });

        let mut report = BatchReport::new();
        for (id, result) in join_all(refreshes).await {
            match result {
                Ok(()) => report.success(id),
                Err(error) => {
                    warn!("refresh failed for light {id}: {error}");
                    report.failure(id, error);
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
    use crate::test_support::{MockTransport, light_payload};

    fn bridge_over(transport: &Arc<MockTransport>) -> Bridge {
        Bridge::new(Arc::clone(transport) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn discover_builds_one_handle_per_id() {
        let transport = MockTransport::new();
        transport.respond("lights", json!({"1": {}, "2": {}}));
        transport.respond("lights/1", light_payload("Kitchen", true, true));
        transport.respond("lights/2", light_payload("Hallway", false, true));

        let mut bridge = bridge_over(&transport);
        let report = bridge.discover().await.unwrap();

        assert!(report.is_complete());
        assert_eq!(bridge.ids(), vec![1, 2]);
        assert_eq!(bridge.light(1).unwrap().state().await.name, "Kitchen");
    }

    #[tokio::test]
    async fn discover_tolerates_a_failing_detail_fetch() {
        let transport = MockTransport::new();
        transport.respond("lights", json!({"1": {}, "2": {}, "3": {}}));
        transport.respond("lights/1", light_payload("Kitchen", true, true));
        transport.fail("lights/2");
        transport.respond("lights/3", light_payload("Hallway", false, true));

        let mut bridge = bridge_over(&transport);
        let report = bridge.discover().await.unwrap();

        assert_eq!(report.succeeded(), &[1, 3]);
        assert!(bridge.light(1).is_ok());
        assert!(bridge.light(3).is_ok());

        let err = report.into_result().unwrap_err();
        let Error::PartialFailure(failures) = err else {
            panic!("expected a partial failure");
        };
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, 2);
    }

    #[tokio::test]
    async fn lookup_of_unknown_id_fails() {
        let transport = MockTransport::new();
        let bridge = bridge_over(&transport);

        assert!(matches!(
            bridge.light(9).unwrap_err(),
            Error::LightNotFound(9)
        ));
    }

    #[tokio::test]
    async fn update_creates_the_handle_on_demand() {
        let transport = MockTransport::new();
        transport.respond("lights/5", light_payload("New lamp", true, true));

        let mut bridge = bridge_over(&transport);
        bridge.update(5).await.unwrap();

        assert_eq!(bridge.light(5).unwrap().state().await.name, "New lamp");
    }

    #[tokio::test]
    async fn discover_prunes_vanished_ids() {
        let transport = MockTransport::new();
        transport.respond("lights", json!({"1": {}, "2": {}}));
        transport.respond("lights/1", light_payload("Kitchen", true, true));
        transport.respond("lights/2", light_payload("Hallway", false, true));

        let mut bridge = bridge_over(&transport);
        bridge.discover().await.unwrap();
        assert_eq!(bridge.ids(), vec![1, 2]);

        transport.respond("lights", json!({"1": {}}));
        bridge.discover().await.unwrap();
        assert_eq!(bridge.ids(), vec![1]);
    }

    #[tokio::test]
    async fn scenes_are_decoded_and_resolved_against_the_registry() {
        let transport = MockTransport::new();
        transport.respond("lights", json!({"1": {}, "2": {}}));
        transport.respond("lights/1", light_payload("Kitchen", true, true));
        transport.respond("lights/2", light_payload("Hallway", false, true));
        transport.respond(
            "scenes",
            json!({
                "ab3f-1": {"name": "Movie night", "lights": ["1", "4"], "owner": "x"},
            }),
        );

        let mut bridge = bridge_over(&transport);
        bridge.discover().await.unwrap();

        let scenes = bridge.scenes().await.unwrap();
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].name(), "Movie night");

        // Light 4 was never discovered, so only light 1 resolves.
        let members = bridge.lights_for_scene(&scenes[0]);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id(), 1);
    }
}
