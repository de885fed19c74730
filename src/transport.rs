//! The transport boundary between this crate and a bridge.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Raw byte transport to a bridge.
///
/// Paths are relative to the bridge's API root; bodies and responses are
/// opaque bytes. The core never interprets transport-level status beyond
/// succeeded versus failed, so implementations should surface any failure
/// (connection, timeout, HTTP error status) as [`Error::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Vec<u8>>;
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>>;
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// HTTP transport speaking the bridge's REST API.
///
/// Requests are rooted at `http://{address}/api/{credential}/`, where the
/// credential is the whitelisted username obtained when the application was
/// paired with the bridge.
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a transport for a paired bridge.
    pub fn new(address: &str, credential: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| Error::transport("client", e))?;

        Ok(HttpTransport {
            client,
            base: format!("http://{address}/api/{credential}/"),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn collect(action: &str, response: reqwest::Response) -> Result<Vec<u8>> {
        let response = response
            .error_for_status()
            .map_err(|e| Error::transport(action, e))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(action, e))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Error::transport("get", e))?;
        Self::collect("get", response).await
    }

    async fn put(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .put(self.url(path))
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport("put", e))?;
        Self::collect("put", response).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(self.url(path))
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport("post", e))?;
        Self::collect("post", response).await
    }
}
