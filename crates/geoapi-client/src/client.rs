//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::Route;
use crate::error::{ApiError, ApiResult};
use crate::params::{Params, APIKEY_KEY};
use crate::transport::{HttpTransport, Transport};
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, Span};
use uuid::Uuid;

/// GeoAPI client
///
/// Holds its own [`ClientConfig`]; every request composed by this client
/// carries the configured API key. Cloning is cheap and clones share the
/// underlying transport.
pub struct GeoApiClient<T = HttpTransport> {
    config: Arc<ClientConfig>,
    base: Url,
    transport: Arc<T>,
}

impl<T> Clone for GeoApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            base: self.base.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl GeoApiClient<HttpTransport> {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GeoApiClient<T> {
    /// Create a client that sends its requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: T) -> ApiResult<Self> {
        config.validate()?;
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        Ok(Self {
            config: Arc::new(config),
            base,
            transport: Arc::new(transport),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the transport
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A client identical to this one but authenticating with `key`
    ///
    /// The transport is shared; `self` keeps its own key.
    #[must_use]
    pub fn with_api_key(&self, key: impl Into<String>) -> Self {
        let config = self.config.as_ref().clone().with_api_key(key);
        Self {
            config: Arc::new(config),
            base: self.base.clone(),
            transport: Arc::clone(&self.transport),
        }
    }

    /// A copy of `params` with the API key merged in, if one is configured
    #[must_use]
    pub fn authenticate(&self, params: &Params) -> Params {
        match self.config.api_key {
            Some(ref key) => params.clone().with(APIKEY_KEY, key.as_str()),
            None => params.clone(),
        }
    }

    /// Compose the full URL for `route` with `params` as its query string
    ///
    /// `params` are used as given; see [`GeoApiClient::authenticate`].
    pub fn url_for(&self, route: &Route, params: &Params) -> ApiResult<Url> {
        if route.has_dot_scope() {
            return Err(ApiError::InvalidUrl(format!(
                "entity id {:?} is not a usable path segment",
                route.scope().unwrap_or_default()
            )));
        }

        let path = route.path();
        let mut url = self
            .base
            .join(&path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))?;

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.query_pairs());
        }

        Ok(url)
    }

    /// Authenticate `params`, GET `route` and parse the JSON body
    #[instrument(skip(self, params), fields(request_id))]
    pub(crate) async fn get(&self, route: Route, params: &Params) -> ApiResult<Value> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let url = self.url_for(&route, &self.authenticate(params))?;
        debug!(path = %route.path(), params = params.len(), "Sending request");

        let start = Instant::now();
        let body = match self.transport.get(&url, &request_id).await {
            Ok(body) => body,
            Err(e) => {
                debug!(
                    elapsed_ms = start.elapsed().as_millis(),
                    error = %e,
                    "Request failed"
                );
                return Err(e);
            }
        };

        let value = serde_json::from_str(&body)?;
        debug!(
            elapsed_ms = start.elapsed().as_millis(),
            bytes = body.len(),
            "Request succeeded"
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use serde_json::json;

    fn client(key: Option<&str>) -> GeoApiClient<FakeTransport> {
        let mut config = ClientConfig::default();
        if let Some(key) = key {
            config = config.with_api_key(key);
        }
        GeoApiClient::with_transport(config, FakeTransport::new()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = GeoApiClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("ftp://example.com/");
        assert!(GeoApiClient::with_transport(config, FakeTransport::new()).is_err());
    }

    #[test]
    fn test_authenticate_merges_key_without_touching_input() {
        let client = client(Some("secret123"));
        let params = Params::new().lat(1.0);
        let authed = client.authenticate(&params);

        assert_eq!(authed.get("apikey"), Some(&json!("secret123")));
        assert!(!params.contains_key("apikey"));
    }

    #[test]
    fn test_authenticate_overrides_caller_apikey() {
        let client = client(Some("secret123"));
        let params = Params::new().with("apikey", "other");
        assert_eq!(
            client.authenticate(&params).get("apikey"),
            Some(&json!("secret123"))
        );
    }

    #[test]
    fn test_authenticate_without_key() {
        let client = client(None);
        let params = Params::new().lat(1.0);
        assert_eq!(client.authenticate(&params), params);
    }

    #[test]
    fn test_url_for_joins_under_version() {
        let client = client(None);
        let url = client.url_for(&Route::Search, &Params::new()).unwrap();
        assert_eq!(url.as_str(), "http://api.geoapi.com/v1/search");
    }

    #[test]
    fn test_url_for_encodes_query() {
        let client = client(None);
        let params = Params::new().keyword("coffee shop").limit(5);
        let url = client.url_for(&Route::Search, &params).unwrap();
        assert_eq!(url.query(), Some("limit=5&q=coffee+shop"));
    }

    #[test]
    fn test_url_for_rejects_dot_scope() {
        let client = client(None);
        let route = Route::Listing { guid: "..".into() };
        let err = client.url_for(&route, &Params::new()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_with_api_key_derives_new_client() {
        let original = client(Some("first"));
        let derived = original.with_api_key("second");

        assert_eq!(original.config().api_key.as_deref(), Some("first"));
        assert_eq!(derived.config().api_key.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_get_parses_json() {
        let client = client(Some("secret123"));
        client.transport().push_json(json!({"result": []}));

        let value = client.get(Route::Search, &Params::new()).await.unwrap();
        assert_eq!(value, json!({"result": []}));

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query(), Some("apikey=secret123"));
    }

    #[tokio::test]
    async fn test_get_surfaces_parse_error() {
        let client = client(None);
        client.transport().push_body("<html>oops</html>");

        let err = client.get(Route::Search, &Params::new()).await.unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_get_surfaces_transport_error() {
        let client = client(None);
        client.transport().push_error(ApiError::status(500, "boom"));

        let err = tokio_test::assert_err!(tokio_test::block_on(
            client.get(Route::Search, &Params::new())
        ));
        assert!(err.is_transport());
        assert!(err.is_server_error());
    }

    #[test]
    fn test_requests_without_key_have_no_apikey() {
        let client = client(None);
        client.transport().push_json(json!({}));

        tokio_test::assert_ok!(tokio_test::block_on(
            client.get(Route::Search, &Params::new())
        ));
        assert_eq!(client.transport().requests()[0].query(), None);
    }
}
