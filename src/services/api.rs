//! Products API
//!
//! The HTTP collaborator the store talks to. [`ProductApi`] is the seam: the
//! store only ever asks for a relative, already-encoded path and gets a JSON
//! body back. [`HttpProductApi`] is the reqwest-backed implementation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::domain::ApiConfig;
use crate::error::{Error, Result};

/// Read access to the `products` resource
pub trait ProductApi: Send + Sync + 'static {
    /// `GET <path>` and decode the body as JSON
    ///
    /// Non-success statuses are errors.
    fn get(&self, path: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// reqwest implementation of [`ProductApi`]
#[derive(Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: Url,
}

impl HttpProductApi {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self::with_client(builder.build()?, &config.base_url)
    }

    /// Use an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| Error::Invalid {
            message: format!("invalid API base URL {base_url:?}: {e}"),
        })?;

        // Without a trailing slash `join` would replace the last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative request path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::Invalid {
            message: format!("invalid request path {path:?}: {e}"),
        })
    }
}

impl ProductApi for HttpProductApi {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

impl std::fmt::Debug for HttpProductApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProductApi")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Generate a request id for log correlation
pub fn generate_request_id() -> Arc<str> {
    uuid::Uuid::new_v4().to_string().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP response and report the request line
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.expect("read");
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let request_line = request.lines().next().unwrap_or_default().to_string();

            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
            let _ = tx.send(request_line);
        });

        (format!("http://{addr}/api"), rx)
    }

    fn api(base_url: &str) -> HttpProductApi {
        let client = Client::builder().no_proxy().build().expect("client");
        HttpProductApi::with_client(client, base_url).expect("api")
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = api("http://localhost:8080/api");
        assert_eq!(api.base_url().as_str(), "http://localhost:8080/api/");

        let url = api
            .endpoint("products/count?main=Books")
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8080/api/products/count?main=Books");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = Client::builder().no_proxy().build().expect("client");
        assert!(HttpProductApi::with_client(client, "not a url").is_err());
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }

    #[tokio::test]
    async fn test_get_decodes_json() {
        let (base, request) = serve_once("200 OK", r#"{"content":[{"id":1}]}"#).await;
        let body = api(&base)
            .get("products?main=Books&page=0&sortType=title&order=asc")
            .await
            .expect("get");

        assert_eq!(body, json!({ "content": [{ "id": 1 }] }));
        assert_eq!(
            request.await.expect("request line"),
            "GET /api/products?main=Books&page=0&sortType=title&order=asc HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_get_non_success_status() {
        let (base, _request) = serve_once("503 Service Unavailable", "{}").await;
        let err = api(&base)
            .get("products/count?main=Books")
            .await
            .expect_err("status error");

        assert!(matches!(err, Error::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_get_malformed_body() {
        let (base, _request) = serve_once("200 OK", "<html>").await;
        assert!(api(&base).get("products/count?main=Books").await.is_err());
    }
}
