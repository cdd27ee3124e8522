//! Client for the GeoAPI geolocation and entity search service
//!
//! Each operation takes a [`Params`] mapping, picks the endpoint path from the
//! parameters present, appends the configured API key and issues a GET. The
//! JSON response is returned as a [`serde_json::Value`].
//!
//! # Features
//!
//! - **Explicit configuration**: API key, base URL and timeout live in a
//!   [`ClientConfig`] owned by each client
//! - **Guid-aware routing**: `parents` and `listing` scope their path by `guid`
//! - **Scoped keyword search**: resolves the coordinate's parent entity first
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use geoapi_client::{ClientConfig, GeoApiClient, Params};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default().with_api_key("secret123");
//!     let client = GeoApiClient::with_config(config)?;
//!
//!     let near = Params::new().lat(37.7749).lon(-122.4194);
//!     let parents = client.parent_guids(&near).await?;
//!     println!("Found {} parents", parents.len());
//!
//!     let hits = client.keyword(&near.clone().keyword("coffee")).await?;
//!     println!("{hits}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod params;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::GeoApiClient;
pub use config::{ClientConfig, API_VERSION, DEFAULT_API_URL};
pub use endpoints::Route;
pub use error::{ApiError, ApiResult};
pub use params::{EntityType, Params};
pub use transport::{HttpTransport, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::GeoApiClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::params::{EntityType, Params};
    pub use crate::transport::Transport;
}
