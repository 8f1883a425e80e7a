//! Reqwest-backed OSM API node source.
//!
//! The adapter owns transport details only: URL construction, request
//! headers, timeout, status handling, and handing the body to the document
//! parser. Every failure collapses into [`OsmNodeSourceError::NotFound`]
//! after being logged with its real cause.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, info, warn};

use super::document::{NodeDocumentError, parse_node_document};
use crate::domain::ports::{OsmNodeSource, OsmNodeSourceError};
use crate::domain::{OsmNode, OsmNodeId};

/// Public node endpoint of the OpenStreetMap API.
pub const DEFAULT_OSM_API_BASE_URL: &str = "https://www.openstreetmap.org/api/0.6/node/";
/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "campus-coffee-importer/0.1";
/// Request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ACCEPT_XML: &str = "application/xml, text/xml, */*";

/// Node source adapter that issues one GET request per node.
pub struct OsmApiHttpSource {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl OsmApiHttpSource {
    /// Build an adapter with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(base_url, timeout, DEFAULT_USER_AGENT)
    }

    /// Build an adapter with an explicit user agent.
    ///
    /// A base URL whose path lacks a trailing slash gets one, so the node id
    /// is appended rather than replacing the last segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_user_agent(
        base_url: Url,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            user_agent: user_agent.into(),
        })
    }

    /// URL requested for `node_id`.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the joined URL is invalid.
    pub fn node_url(&self, node_id: OsmNodeId) -> Result<Url, url::ParseError> {
        self.base_url.join(&node_id.to_string())
    }

    async fn fetch_document(&self, node_id: OsmNodeId) -> Result<OsmNode, FetchFailure> {
        let url = self
            .node_url(node_id)
            .map_err(|error| FetchFailure::InvalidUrl {
                message: error.to_string(),
            })?;
        debug!(%url, "requesting OSM node");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_XML)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(FetchFailure::Status {
                status,
                preview: body_preview(body.as_ref()),
            });
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchFailure::EmptyBody);
        }

        let text = std::str::from_utf8(body.as_ref()).map_err(|error| FetchFailure::Encoding {
            message: error.to_string(),
        })?;
        Ok(parse_node_document(text)?)
    }
}

#[async_trait]
impl OsmNodeSource for OsmApiHttpSource {
    async fn fetch_node(&self, node_id: OsmNodeId) -> Result<OsmNode, OsmNodeSourceError> {
        info!(%node_id, "fetching OSM node");
        match self.fetch_document(node_id).await {
            Ok(node) => {
                if node.id != node_id {
                    warn!(
                        requested = %node_id,
                        received = %node.id,
                        "OSM API returned a different node id"
                    );
                }
                debug!(%node_id, tags = node.tags.len(), "fetched OSM node");
                Ok(node)
            }
            Err(failure) => {
                log_failure(node_id, &failure);
                Err(OsmNodeSourceError::not_found(node_id))
            }
        }
    }
}

/// Why a fetch failed before the node source collapsed it to "not found".
#[derive(Debug, thiserror::Error)]
enum FetchFailure {
    #[error("invalid node URL: {message}")]
    InvalidUrl { message: String },
    #[error("request timed out: {message}")]
    Timeout { message: String },
    #[error("transport error: {message}")]
    Transport { message: String },
    #[error("status {status}: {preview}")]
    Status { status: StatusCode, preview: String },
    #[error("response body is empty")]
    EmptyBody,
    #[error("response body is not UTF-8: {message}")]
    Encoding { message: String },
    #[error("invalid node document: {0}")]
    Document(#[from] NodeDocumentError),
}

impl FetchFailure {
    fn is_missing_node(&self) -> bool {
        matches!(
            self,
            Self::Status { status, .. } if *status == StatusCode::NOT_FOUND || *status == StatusCode::GONE
        )
    }
}

fn log_failure(node_id: OsmNodeId, failure: &FetchFailure) {
    if failure.is_missing_node() {
        warn!(%node_id, reason = %failure, "OSM node does not exist");
    } else {
        error!(%node_id, reason = %failure, "failed to fetch OSM node");
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout {
            message: error.to_string(),
        }
    } else {
        FetchFailure::Transport {
            message: error.to_string(),
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
