//! The narrow interface between device handles and the transport.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::{Value, json};

use crate::command::Command;
use crate::errors::Error;
use crate::state::LightId;
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// Issues transport calls at the bridge's fixed path templates and decodes
/// the responses.
///
/// `lights` lists ids, `lights/{id}` is the detail fetch and rename path,
/// and `lights/{id}/state` takes state commands. Gateways are cheap to
/// clone; every clone shares the underlying transport.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Gateway { transport }
    }

    /// The id set currently known to the bridge, ascending.
    pub(crate) async fn light_ids(&self) -> Result<Vec<LightId>> {
        let raw = self.get_json("lights").await?;
        let Some(map) = raw.as_object() else {
            return Err(Error::MalformedState("light listing is not an object".into()));
        };

        let mut ids = Vec::with_capacity(map.len());
        for key in map.keys() {
            let id = key
                .parse::<LightId>()
                .map_err(|_| Error::MalformedState(format!("light id {key:?} is not numeric")))?;
            ids.push(id);
        }
        ids.sort_unstable();
        Ok(ids)
    }

    pub(crate) async fn fetch_light(&self, id: LightId) -> Result<Value> {
        self.get_json(&format!("lights/{id}")).await
    }

    pub(crate) async fn put_state(&self, id: LightId, command: &Command) -> Result<()> {
        let body = serde_json::to_vec(command)
            .map_err(|e| Error::InvalidArgument(format!("unserializable command: {e}")))?;
        let response = self
            .transport
            .put(&format!("lights/{id}/state"), body)
            .await?;
        debug!(
            "state command response for light {id}: {}",
            String::from_utf8_lossy(&response)
        );
        Ok(())
    }

    /// Resource-level rename, deliberately not under the `state` path.
    pub(crate) async fn rename(&self, id: LightId, name: &str) -> Result<()> {
        let body = serde_json::to_vec(&json!({ "name": name }))
            .map_err(|e| Error::InvalidArgument(format!("unserializable name: {e}")))?;
        self.transport.put(&format!("lights/{id}"), body).await?;
        Ok(())
    }

    pub(crate) async fn fetch_scenes(&self) -> Result<Value> {
        self.get_json("scenes").await
    }

    pub(crate) async fn fetch_scene(&self, id: &str) -> Result<Value> {
        self.get_json(&format!("scenes/{id}")).await
    }

    /// The bridge's entire datastore, undecoded.
    pub(crate) async fn full_state(&self) -> Result<Value> {
        self.get_json("").await
    }

    /// The bridge's schedule listing, undecoded.
    pub(crate) async fn schedules(&self) -> Result<Value> {
        self.get_json("schedules").await
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let bytes = self.transport.get(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedState(format!("invalid json from {path:?}: {e}")))
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}
