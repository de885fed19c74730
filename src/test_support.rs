//! Scripted transport for exercising the crate without a real bridge.

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::errors::Error;
use crate::gateway::Gateway;
use crate::light::Light;
use crate::state::LightId;
use crate::transport::Transport;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Serves scripted JSON responses and records every call in order.
///
/// Paths listed via [`fail`](MockTransport::fail) return a transport error
/// instead; unscripted GETs fail too, so a test cannot silently read a
/// response it never set up.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<HashMap<String, Value>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), body);
    }

    pub fn fail(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The recorded PUTs, in call order.
    pub fn puts(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == "put")
            .collect()
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
    }

    fn scripted_failure(&self, action: &str) -> Error {
        Error::transport(
            action,
            io::Error::new(io::ErrorKind::ConnectionRefused, "scripted failure"),
        )
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, Error> {
        self.record("get", path, None);
        if self.failing.lock().unwrap().contains(path) {
            return Err(self.scripted_failure("get"));
        }

        let value = self
            .responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                Error::transport(
                    "get",
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no scripted response for {path:?}"),
                    ),
                )
            })?;
        Ok(serde_json::to_vec(&value).expect("scripted value serializes"))
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, Error> {
        let body = serde_json::from_slice(&body).ok();
        self.record("put", path, body);
        if self.failing.lock().unwrap().contains(path) {
            return Err(self.scripted_failure("put"));
        }
        Ok(b"[]".to_vec())
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, Error> {
        let body = serde_json::from_slice(&body).ok();
        self.record("post", path, body);
        if self.failing.lock().unwrap().contains(path) {
            return Err(self.scripted_failure("post"));
        }
        Ok(b"[]".to_vec())
    }
}

/// A typical light detail payload.
pub(crate) fn light_payload(name: &str, on: bool, reachable: bool) -> Value {
    json!({
        "name": name,
        "type": "Extended color light",
        "modelid": "LCT007",
        "swversion": "5.38.1.14919",
        "state": {
            "on": on,
            "reachable": reachable,
            "bri": 100,
            "hue": 1000,
            "sat": 100,
            "ct": 200,
            "alert": "none",
            "effect": "none",
            "colormode": "hs",
        },
    })
}

/// Builds a light whose snapshot was refreshed once from `payload`.
pub(crate) async fn light_from(
    transport: &Arc<MockTransport>,
    id: LightId,
    payload: Value,
) -> Arc<Light> {
    transport.respond(&format!("lights/{id}"), payload);
    let gateway = Gateway::new(Arc::clone(transport) as Arc<dyn Transport>);
    let light = Arc::new(Light::new(id, gateway));
    light.refresh().await.expect("scripted refresh succeeds");
    light
}
