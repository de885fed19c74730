//! Scene snapshots.

use serde_json::Value;

use crate::errors::Error;
use crate::state::{LightId, merge_flat};

type Result<T> = std::result::Result<T, Error>;

/// A scene stored on the bridge.
///
/// Scenes reference the lights they cover by id only; the handles stay
/// owned by the registry and are resolved on demand through
/// [`Bridge::lights_for_scene`](crate::Bridge::lights_for_scene), so a
/// scene can never hold a stale reference to a pruned light.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    id: String,
    name: String,
    owner: String,
    recycle: bool,
    locked: bool,
    last_updated: String,
    version: u32,
    light_ids: Vec<LightId>,
}

impl Scene {
    pub(crate) fn new(id: &str) -> Self {
        Scene {
            id: id.to_string(),
            name: String::new(),
            owner: String::new(),
            recycle: false,
            locked: false,
            last_updated: String::new(),
            version: 1,
            light_ids: Vec::new(),
        }
    }

    /// Merges a raw scene payload over this snapshot, returning the result.
    ///
    /// Scene payloads are flat, so this is the single-level variant of the
    /// light projection: a key absent from the payload leaves the field at
    /// its current value.
    pub(crate) fn project(&self, raw: &Value) -> Result<Scene> {
        let mut next = self.clone();

        merge_flat(raw, "name", &mut next.name)?;
        merge_flat(raw, "owner", &mut next.owner)?;
        merge_flat(raw, "recycle", &mut next.recycle)?;
        merge_flat(raw, "locked", &mut next.locked)?;
        merge_flat(raw, "lastupdated", &mut next.last_updated)?;
        merge_flat(raw, "version", &mut next.version)?;

        if let Some(lights) = raw.get("lights") {
            next.light_ids = decode_light_ids(lights)?;
        }

        Ok(next)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn recycle(&self) -> bool {
        self.recycle
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Bridge-reported modification timestamp, verbatim.
    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The member light ids, as stored on the bridge.
    pub fn light_ids(&self) -> &[LightId] {
        &self.light_ids
    }
}

/// The bridge reports scene members as an array of decimal strings.
fn decode_light_ids(lights: &Value) -> Result<Vec<LightId>> {
    let Some(entries) = lights.as_array() else {
        return Err(Error::malformed("lights", lights));
    };

    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry
            .as_str()
            .and_then(|s| s.parse::<LightId>().ok())
            .ok_or_else(|| Error::malformed("lights", entry))?;
        ids.push(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projects_flat_payload() {
        let scene = Scene::new("ab3f-1")
            .project(&json!({
                "name": "Movie night",
                "owner": "23ea9cba",
                "recycle": true,
                "locked": false,
                "lastupdated": "2016-07-10T14:12:32",
                "version": 2,
                "lights": ["1", "3"],
            }))
            .unwrap();

        assert_eq!(scene.id(), "ab3f-1");
        assert_eq!(scene.name(), "Movie night");
        assert_eq!(scene.owner(), "23ea9cba");
        assert!(scene.recycle());
        assert_eq!(scene.last_updated(), "2016-07-10T14:12:32");
        assert_eq!(scene.version(), 2);
        assert_eq!(scene.light_ids(), &[1, 3]);
    }

    #[test]
    fn absent_keys_leave_fields_unchanged() {
        let scene = Scene::new("ab3f-1")
            .project(&json!({"name": "Movie night", "lights": ["2"]}))
            .unwrap();
        let next = scene.project(&json!({"owner": "23ea9cba"})).unwrap();

        assert_eq!(next.name(), "Movie night");
        assert_eq!(next.owner(), "23ea9cba");
        assert_eq!(next.light_ids(), &[2]);
    }

    #[test]
    fn non_numeric_member_id_is_malformed() {
        let err = Scene::new("ab3f-1")
            .project(&json!({"lights": ["1", "lamp"]}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedState(_)));
    }
}
