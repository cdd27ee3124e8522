//! In-memory transport for unit tests

use crate::error::{ApiError, ApiResult};
use crate::transport::Transport;
use reqwest::Url;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Records every requested URL and replays queued responses in order
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<ApiResult<String>>>,
    requests: Mutex<Vec<Url>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_body(&self, body: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
    }

    pub(crate) fn push_json(&self, value: Value) {
        self.push_body(value.to_string());
    }

    pub(crate) fn push_error(&self, error: ApiError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &Url, _request_id: &str) -> ApiResult<String> {
        self.requests.lock().unwrap().push(url.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::status(404, "no canned response")))
    }
}

/// Query parameters of `url` as decoded `(key, value)` pairs
pub(crate) fn query_of(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
