//! OpenStreetMap API outbound adapter.
//!
//! Provides the reqwest implementation of the `OsmNodeSource` port and the
//! parser for the XML node documents it receives.

mod document;
mod http_source;

pub use document::{NodeDocumentError, parse_node_document};
pub use http_source::{
    DEFAULT_OSM_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, OsmApiHttpSource,
};
