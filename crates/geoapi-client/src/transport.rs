//! HTTP transport
//!
//! The client talks to the network through [`Transport`], which performs a GET
//! and hands back the raw body. [`HttpTransport`] is the `reqwest` implementation.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use std::future::Future;

/// Request correlation ID header
pub const X_REQUEST_ID: &str = "X-Request-ID";

/// Performs GET requests and returns the response body
pub trait Transport: Send + Sync {
    /// GET `url`, returning the body of a 2xx response
    ///
    /// Non-2xx responses must surface as [`ApiError::Status`].
    fn get(&self, url: &Url, request_id: &str) -> impl Future<Output = ApiResult<String>> + Send;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
}

impl HttpTransport {
    /// Build a transport honoring the configured timeout and user agent
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent is not a valid header value"))?;
        default_headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self { inner })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &Url, request_id: &str) -> ApiResult<String> {
        let response = self
            .inner
            .get(url.clone())
            .header(X_REQUEST_ID, request_id)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(ApiError::status(status.as_u16(), message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(&ClientConfig::default());
        assert!(transport.is_ok());
    }

    #[test]
    fn test_rejects_invalid_user_agent() {
        let config = ClientConfig::default().with_user_agent("bad\nagent");
        let err = HttpTransport::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();
        // Reserve a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = Url::parse(&format!("http://127.0.0.1:{port}/v1/search")).unwrap();
        let err = transport.get(&url, "test").await.unwrap_err();
        assert!(err.is_transport());
    }
}
