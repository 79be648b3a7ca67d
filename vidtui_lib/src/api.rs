/// Client for the remote video-metadata API.

use reqwest::{self, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{RelatedResultSet, VideoSummary};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";

#[derive(Error, Debug, Clone)]
pub enum ApiError {

    /// Transport failure or a server-side error status. Worth retrying.
    #[error("request failed: {0}")]
    Network(String),
    /// The API has no record for the requested id.
    #[error("no video found with id {0}")]
    NotFound(String),
    /// The response body could not be decoded. Rendered like NotFound.
    #[error("failed to parse api response")]
    Malformed
}

/// A `reqwest::Client` wrapper for the video metadata API.
///
/// The two endpoints are independent: a failure fetching the details of a
/// video says nothing about its related contents, and callers are expected
/// to issue and settle both requests separately.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>
}

impl ApiClient {

    pub fn new(base_url: String, api_key: Option<String>) -> Self {

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key
        }
    }

    /// Fetches the full metadata record for a single video.
    pub async fn fetch_video_details(&self, video_id: &str) -> Result<VideoSummary, ApiError> {
        self.get_json(format!("video/details/?id={video_id}"), video_id).await
    }

    /// Fetches the mixed-type related contents for a video. Only entries of
    /// type "video" are renderable, see `RelatedResultSet::videos`.
    pub async fn fetch_related_contents(&self, video_id: &str) -> Result<RelatedResultSet, ApiError> {
        self.get_json(format!("video/related-contents/?id={video_id}"), video_id).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: String, video_id: &str) -> Result<T, ApiError> {

        let mut request = self.client.get(format!("{}/{}", self.base_url, path));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(String::from(video_id))),
            status if !status.is_success() => Err(ApiError::Network(status.to_string())),
            _ => parse_response(response).await
        }
    }
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {

    let body = response.text_with_charset("utf-8").await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    serde_json::from_str::<T>(&body).map_err(|e| {
        log::warn!("Malformed api response: {e}");
        ApiError::Malformed
    })
}
