//! Search endpoints: simple, keyword and structured (MQL) search

use super::Route;
use crate::client::GeoApiClient;
use crate::error::ApiResult;
use crate::params::{encode_structured, Params};
use crate::transport::Transport;
use serde_json::Value;
use tracing::debug;

impl<T: Transport> GeoApiClient<T> {
    /// Simple search around a coordinate
    ///
    /// GET `search`. Expects `lat`, `lon` and `radius`; `limit` and `type`
    /// are optional.
    pub async fn search(&self, params: &Params) -> ApiResult<Value> {
        self.get(Route::Search, params).await
    }

    /// Keyword search scoped to the coordinate's first parent entity
    ///
    /// Looks up parents of `lat`/`lon` first, then GETs
    /// `e/{parent}/keyword-search`, or `keyword-search` when the coordinate
    /// has no parents. A failed parent lookup aborts before the search.
    pub async fn keyword(&self, params: &Params) -> ApiResult<Value> {
        let parent = self
            .parent_guids(&params.coordinates())
            .await?
            .into_iter()
            .next();
        debug!(parent = ?parent, "Resolved keyword search scope");

        self.get(Route::KeywordSearch { parent }, params).await
    }

    /// Structured (MQL) search
    ///
    /// The whole parameter mapping, `entity` included, is sent as
    /// percent-escaped JSON in the single `q` parameter.
    pub async fn q(&self, params: &Params) -> ApiResult<Value> {
        let query = Params::new().with("q", encode_structured(&params.to_value()));
        self.get(Route::Query, &query).await
    }
}
