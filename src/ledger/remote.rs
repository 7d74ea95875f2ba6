//! Remote JSON document store
//!
//! A JSON bin reachable over HTTP: `GET {url}/latest` returns the document,
//! either bare or wrapped as `{"record": ...}`, and `PUT {url}` replaces it.

use serde_json::Value;
use std::time::Duration;

use super::store::{ReportStore, StoreError};

const MASTER_KEY_HEADER: &str = "X-Master-Key";

pub struct RemoteStore {
    url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            http_client,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(MASTER_KEY_HEADER, key),
            None => request,
        }
    }
}

/// Strip the `record` envelope when present. Anything unparseable is passed
/// through untouched so the ledger can classify it.
fn unwrap_record(body: Vec<u8>) -> Vec<u8> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(mut map)) if map.contains_key("record") => map
            .remove("record")
            .map(|record| record.to_string().into_bytes())
            .unwrap_or(body),
        _ => body,
    }
}

impl ReportStore for RemoteStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let url = format!("{}/latest", self.url);
        let response = self.authorize(self.http_client.get(&url)).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        Ok(Some(unwrap_record(body)))
    }

    async fn save(&self, content: Vec<u8>) -> Result<(), StoreError> {
        let response = self
            .authorize(self.http_client.put(&self.url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(content)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("remote:{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, put},
        Router,
    };
    use std::sync::Arc;
    use tokio::sync::Mutex;

    type Bin = Arc<Mutex<Option<Vec<u8>>>>;

    async fn spawn_bin(bin: Bin) -> String {
        async fn latest(State(bin): State<Bin>, headers: HeaderMap) -> impl IntoResponse {
            if headers.get(MASTER_KEY_HEADER).map(|v| v.as_bytes()) != Some(b"secret") {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            match bin.lock().await.clone() {
                Some(record) => {
                    let record = String::from_utf8(record).unwrap();
                    format!(r#"{{"record": {}, "metadata": {{"private": true}}}}"#, record).into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }

        async fn replace(State(bin): State<Bin>, body: Bytes) -> StatusCode {
            *bin.lock().await = Some(body.to_vec());
            StatusCode::OK
        }

        let app = Router::new()
            .route("/b/bin1/latest", get(latest))
            .route("/b/bin1", put(replace))
            .with_state(bin);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/b/bin1", addr)
    }

    #[test]
    fn test_unwrap_record() {
        assert_eq!(unwrap_record(br#"{"record": [1]}"#.to_vec()), b"[1]");
        assert_eq!(unwrap_record(b"[2]".to_vec()), b"[2]");
        assert_eq!(unwrap_record(b"{oops".to_vec()), b"{oops");
    }

    #[tokio::test]
    async fn test_remote_roundtrip() {
        let bin: Bin = Arc::new(Mutex::new(None));
        let url = spawn_bin(bin.clone()).await;
        let store = RemoteStore::new(&url, Some("secret".to_string()), Duration::from_secs(2)).unwrap();

        assert!(store.load().await.unwrap().is_none());

        store.save(br#"[{"id":1}]"#.to_vec()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        let value: Value = serde_json::from_slice(&loaded).unwrap();
        assert_eq!(value[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_remote_rejection_is_an_error() {
        let bin: Bin = Arc::new(Mutex::new(Some(b"[]".to_vec())));
        let url = spawn_bin(bin).await;
        let store = RemoteStore::new(&url, None, Duration::from_secs(2)).unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Status(401))));
    }
}
