//! Entity-scoped endpoints: parents and listing view

use super::Route;
use crate::client::GeoApiClient;
use crate::error::{ApiError, ApiResult};
use crate::params::{render_value, Params, GUID_KEY};
use crate::transport::Transport;
use serde_json::Value;

const PARENTS_POINTER: &str = "/result/parents";

impl<T: Transport> GeoApiClient<T> {
    /// Parent entities of a coordinate or of an entity
    ///
    /// GET `parents` with `lat`/`lon` when `guid` is absent or blank,
    /// otherwise GET `e/{guid}/parents` with `guid` dropped from the query.
    pub async fn parents(&self, params: &Params) -> ApiResult<Value> {
        match params.guid_value() {
            None => self.get(Route::Parents { guid: None }, params).await,
            Some(guid) => {
                let (_, rest) = params.without(GUID_KEY);
                self.get(Route::Parents { guid: Some(guid) }, &rest).await
            }
        }
    }

    /// Guids of the parent entities returned by [`GeoApiClient::parents`]
    pub async fn parent_guids(&self, params: &Params) -> ApiResult<Vec<String>> {
        let response = self.parents(params).await?;
        extract_parent_guids(&response)
    }

    /// Listing view of an entity
    ///
    /// GET `e/{guid}/view/listing`. `guid` is moved from the query into the
    /// path; there is no unscoped form of this endpoint.
    pub async fn listing(&self, params: &Params) -> ApiResult<Value> {
        let (guid, rest) = params.without(GUID_KEY);
        let guid = guid.as_ref().map(render_value).unwrap_or_default();
        self.get(Route::Listing { guid }, &rest).await
    }
}

/// Collect `result.parents[*].guid` from a parents response, in order
///
/// Scalar guids are rendered as text; parents with a null, missing or
/// structured guid are skipped. Only a missing `result.parents` array fails.
pub fn extract_parent_guids(response: &Value) -> ApiResult<Vec<String>> {
    let parents = response
        .pointer(PARENTS_POINTER)
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::unexpected_shape("result.parents"))?;

    Ok(parents
        .iter()
        .filter_map(|parent| parent.get(GUID_KEY))
        .filter(|guid| matches!(guid, Value::String(_) | Value::Number(_) | Value::Bool(_)))
        .map(render_value)
        .collect())
}
