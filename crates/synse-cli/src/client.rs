//! Synse Server client for CLI operations.
//!
//! Request/response operations go over HTTP; streamed readings come from
//! the server's WebSocket endpoint. Both share one normalized base
//! address, so `--host localhost` reaches `http://localhost:5000` and
//! `ws://localhost:5000/v3/connect`.
//!
//! # Example
//!
//! ```rust,no_run
//! use synse_cli::client::SynseClient;
//!
//! # async fn example() -> Result<(), synse_cli::CliError> {
//! let client = SynseClient::new("localhost:5000")?;
//! let status = client.status().await?;
//! println!("server is {}", status.status);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, trace, warn};
use url::Url;

use synse_proto::stream::{ReadStream, StreamEvent, StreamMessage, StreamRequest};
use synse_proto::{
    ApiError, Device, DeviceSummary, Plugin, PluginHealthSummary, Reading, Status, Transaction,
    TransactionStatus, Version, WritePayload, API_VERSION,
};

use crate::error::CliError;

/// Default TCP port for Synse Server.
const DEFAULT_PORT: u16 = 5000;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP/WebSocket client for one Synse Server instance.
#[derive(Debug, Clone)]
pub struct SynseClient {
    http: reqwest::Client,
    base: Url,
}

impl SynseClient {
    /// Create a client for the given server address.
    ///
    /// The address may be a bare host (`localhost`), host and port
    /// (`localhost:5000`), or a full URL (`http://synse.example.com`).
    /// A bare host gets the default scheme and port.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unparsable addresses or
    /// non-HTTP schemes.
    pub fn new(host: &str) -> Result<Self, CliError> {
        let base = Self::normalize(host)?;
        let http = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CliError::Connection(e.to_string()))?;

        Ok(Self { http, base })
    }

    /// The normalized base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn normalize(host: &str) -> Result<Url, CliError> {
        if host.is_empty() {
            return Err(CliError::Config("server address is empty".into()));
        }
        let addr = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };

        let mut url = Url::parse(&addr)
            .map_err(|e| CliError::Config(format!("invalid server address {host:?}: {e}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CliError::Config(format!(
                    "invalid server address {host:?}: unsupported scheme {other:?}"
                )));
            }
        }
        if url.scheme() == "http" && url.port().is_none() {
            url.set_port(Some(DEFAULT_PORT))
                .map_err(|()| CliError::Config(format!("invalid server address {host:?}")))?;
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CliError> {
        self.base
            .join(path)
            .map_err(|e| CliError::Config(format!("invalid endpoint {path:?}: {e}")))
    }

    /// The WebSocket URL for the streaming endpoint.
    fn ws_endpoint(&self) -> Result<Url, CliError> {
        let mut url = self.endpoint(&format!("{API_VERSION}/connect"))?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|()| CliError::Config("could not derive websocket address".into()))?;
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CliError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(map_transport_error)?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CliError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CliError> {
        let status = response.status();
        trace!(status = %status, "response received");

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| CliError::Protocol(format!("malformed response body: {e}")));
        }

        match response.json::<ApiError>().await {
            Ok(body) => Err(body.into()),
            Err(_) => Err(CliError::Api {
                code: status.as_u16(),
                description: status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            }),
        }
    }

    // ========================================================================
    // Server Operations
    // ========================================================================

    /// Get server liveness status (`GET /test`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn status(&self) -> Result<Status, CliError> {
        self.get("test", &[]).await
    }

    /// Get server version info (`GET /version`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn version(&self) -> Result<Version, CliError> {
        self.get("version", &[]).await
    }

    /// Get the server's unified configuration (`GET /v3/config`).
    ///
    /// The config shape is deployment-defined, so it stays an opaque
    /// document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn config(&self) -> Result<serde_json::Value, CliError> {
        self.get(&format!("{API_VERSION}/config"), &[]).await
    }

    // ========================================================================
    // Plugin Operations
    // ========================================================================

    /// List registered plugins (`GET /v3/plugin`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn plugins(&self) -> Result<Vec<Plugin>, CliError> {
        self.get(&format!("{API_VERSION}/plugin"), &[]).await
    }

    /// Get detail for one plugin (`GET /v3/plugin/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin is unknown or the request fails.
    pub async fn plugin(&self, id: &str) -> Result<Plugin, CliError> {
        self.get(&format!("{API_VERSION}/plugin/{id}"), &[]).await
    }

    /// Get the plugin health rollup (`GET /v3/plugin/health`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn plugin_health(&self) -> Result<PluginHealthSummary, CliError> {
        self.get(&format!("{API_VERSION}/plugin/health"), &[]).await
    }

    // ========================================================================
    // Device Operations
    // ========================================================================

    /// Enumerate devices (`GET /v3/scan`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn scan(
        &self,
        ns: Option<&str>,
        tags: &[String],
        force: bool,
    ) -> Result<Vec<DeviceSummary>, CliError> {
        let mut query = Vec::new();
        if let Some(ns) = ns {
            query.push(("ns", ns.to_string()));
        }
        if !tags.is_empty() {
            query.push(("tags", tags.join(",")));
        }
        if force {
            query.push(("force", "true".to_string()));
        }
        self.get(&format!("{API_VERSION}/scan"), &query).await
    }

    /// List known device tags (`GET /v3/tags`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn tags(&self, ns: Option<&str>) -> Result<Vec<String>, CliError> {
        let mut query = Vec::new();
        if let Some(ns) = ns {
            query.push(("ns", ns.to_string()));
        }
        self.get(&format!("{API_VERSION}/tags"), &query).await
    }

    /// Get full info for one device (`GET /v3/info/{device}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the device is unknown or the request fails.
    pub async fn info(&self, device: &str) -> Result<Device, CliError> {
        self.get(&format!("{API_VERSION}/info/{device}"), &[]).await
    }

    // ========================================================================
    // Read / Write Operations
    // ========================================================================

    /// Read from devices selected by namespace/tags (`GET /v3/read`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn read(&self, ns: Option<&str>, tags: &[String]) -> Result<Vec<Reading>, CliError> {
        let mut query = Vec::new();
        if let Some(ns) = ns {
            query.push(("ns", ns.to_string()));
        }
        if !tags.is_empty() {
            query.push(("tags", tags.join(",")));
        }
        self.get(&format!("{API_VERSION}/read"), &query).await
    }

    /// Read from a single device (`GET /v3/read/{device}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the device is unknown or the request fails.
    pub async fn read_device(&self, device: &str) -> Result<Vec<Reading>, CliError> {
        self.get(&format!("{API_VERSION}/read/{device}"), &[]).await
    }

    /// Write to a device asynchronously (`POST /v3/write/{device}`).
    ///
    /// Returns one transaction handle per submitted payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the write or the request
    /// fails.
    pub async fn write(
        &self,
        device: &str,
        payloads: &[WritePayload],
    ) -> Result<Vec<Transaction>, CliError> {
        self.post(&format!("{API_VERSION}/write/{device}"), &payloads)
            .await
    }

    /// Write to a device and wait for completion
    /// (`POST /v3/write/wait/{device}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the device rejects the write or the request
    /// fails.
    pub async fn write_wait(
        &self,
        device: &str,
        payloads: &[WritePayload],
    ) -> Result<Vec<TransactionStatus>, CliError> {
        self.post(&format!("{API_VERSION}/write/wait/{device}"), &payloads)
            .await
    }

    /// List cached transaction IDs (`GET /v3/transaction`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn transactions(&self) -> Result<Vec<String>, CliError> {
        self.get(&format!("{API_VERSION}/transaction"), &[]).await
    }

    /// Get the status of one transaction (`GET /v3/transaction/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is unknown or the request
    /// fails.
    pub async fn transaction(&self, id: &str) -> Result<TransactionStatus, CliError> {
        self.get(&format!("{API_VERSION}/transaction/{id}"), &[])
            .await
    }

    // ========================================================================
    // Streaming
    // ========================================================================

    /// Stream readings into `tx` until the server closes the stream, an
    /// error occurs, or `stop` fires.
    ///
    /// Readings and stream errors are forwarded through `tx`; when the
    /// receiving side goes away the forwarding send fails and the stream
    /// shuts down. Unknown event frames are skipped.
    ///
    /// # Errors
    ///
    /// Returns connection and subscription errors; errors that occur
    /// mid-stream are forwarded through `tx` instead.
    pub async fn stream_readings(
        &self,
        selector: ReadStream,
        tx: mpsc::Sender<Result<Reading, CliError>>,
        mut stop: watch::Receiver<bool>,
    ) -> Result<(), CliError> {
        let url = self.ws_endpoint()?;
        debug!(%url, "opening reading stream");

        let (mut ws, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        let request = StreamRequest::read_stream(1, selector);
        ws.send(Message::Text(request.to_json()?))
            .await
            .map_err(|e| CliError::Connection(e.to_string()))?;

        loop {
            tokio::select! {
                message = ws.next() => match message {
                    Some(Ok(Message::Text(text))) => {
                        if !forward_frame(&text, &tx).await {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        debug!("server closed the stream");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        let _ = tx.send(Err(CliError::Connection(e.to_string()))).await;
                        break;
                    }
                    None => break,
                },
                _ = stop.changed() => {
                    debug!("stopping reading stream");
                    let _ = ws.close(None).await;
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Forward one decoded frame into the channel. Returns `false` once the
/// stream should stop (receiver gone or error frame delivered).
async fn forward_frame(text: &str, tx: &mpsc::Sender<Result<Reading, CliError>>) -> bool {
    let frame = match StreamMessage::from_json(text) {
        Ok(frame) => frame,
        Err(e) => {
            let _ = tx.send(Err(e.into())).await;
            return false;
        }
    };
    match frame.decode() {
        Ok(StreamEvent::Reading(reading)) => tx.send(Ok(*reading)).await.is_ok(),
        Ok(StreamEvent::Error(error)) => {
            let _ = tx.send(Err(error.into())).await;
            false
        }
        Err(e) => {
            // Servers may emit events this client does not consume.
            warn!(error = %e, "skipping unhandled stream frame");
            true
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> CliError {
    if err.is_timeout() {
        CliError::Timeout(err.to_string())
    } else {
        CliError::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_scheme_and_port() {
        let client = SynseClient::new("localhost").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn host_with_port_is_kept() {
        let client = SynseClient::new("synse.example.com:8080").unwrap();
        assert_eq!(client.base_url().as_str(), "http://synse.example.com:8080/");
    }

    #[test]
    fn full_url_is_kept() {
        let client = SynseClient::new("https://synse.example.com").unwrap();
        assert_eq!(client.base_url().as_str(), "https://synse.example.com/");
    }

    #[test]
    fn empty_address_is_rejected() {
        let err = SynseClient::new("").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = SynseClient::new("ftp://synse.example.com").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn ws_endpoint_derives_from_base() {
        let client = SynseClient::new("localhost").unwrap();
        let ws = client.ws_endpoint().unwrap();
        assert_eq!(ws.as_str(), "ws://localhost:5000/v3/connect");
    }

    #[test]
    fn ws_endpoint_uses_wss_for_https() {
        let client = SynseClient::new("https://synse.example.com").unwrap();
        let ws = client.ws_endpoint().unwrap();
        assert_eq!(ws.as_str(), "wss://synse.example.com/v3/connect");
    }

    #[tokio::test]
    async fn forward_frame_skips_unknown_events() {
        let (tx, mut rx) = mpsc::channel(1);
        let keep_going =
            forward_frame(r#"{"id": 1, "event": "response/status", "data": {}}"#, &tx).await;
        assert!(keep_going);
        drop(tx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn forward_frame_delivers_readings() {
        let (tx, mut rx) = mpsc::channel(1);
        let frame = r#"{
            "id": 1,
            "event": "response/reading",
            "data": {
                "device": "a72cs6519ee675b",
                "timestamp": "2024-03-01T10:00:00Z",
                "type": "temperature",
                "value": 20.3
            }
        }"#;
        assert!(forward_frame(frame, &tx).await);
        let reading = rx.recv().await.unwrap().unwrap();
        assert_eq!(reading.device, "a72cs6519ee675b");
    }

    #[tokio::test]
    async fn forward_frame_stops_on_error_event() {
        let (tx, mut rx) = mpsc::channel(1);
        let frame = r#"{
            "id": 1,
            "event": "response/error",
            "data": {"http_code": 500, "description": "plugin died"}
        }"#;
        assert!(!forward_frame(frame, &tx).await);
        let err = rx.recv().await.unwrap().unwrap_err();
        assert!(matches!(err, CliError::Api { code: 500, .. }));
    }
}
