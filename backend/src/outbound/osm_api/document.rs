//! Parser for OSM API 0.6 node documents.
//!
//! Expected shape:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <osm version="0.6">
//!   <node id="5589879349" lat="49.4122362" lon="8.7077883">
//!     <tag k="amenity" v="cafe"/>
//!   </node>
//! </osm>
//! ```
//!
//! Only the first `node` element is read. Failures keep their detail here
//! for logging; the HTTP adapter collapses all of them into "not found".

use std::collections::BTreeMap;

use roxmltree::{Document, Node};
use tracing::warn;

use crate::domain::{OsmNode, OsmNodeId};

const XML_DECLARATION: &str = "<?xml";
const OSM_ROOT: &str = "<osm";
const PREVIEW_CHAR_LIMIT: usize = 80;

/// Reasons a node document could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeDocumentError {
    /// Nothing but whitespace or byte-order marks.
    #[error("node document is empty")]
    Empty,
    /// Neither an XML declaration nor an `<osm>` root was found.
    #[error("no XML declaration or <osm> root element found; document starts with: {preview}")]
    MissingDocumentStart {
        /// Leading characters of the rejected document.
        preview: String,
    },
    /// The XML itself is malformed.
    #[error("malformed XML: {message}")]
    Syntax {
        /// Parser diagnostic.
        message: String,
    },
    /// The document holds no `node` element.
    #[error("no <node> element found")]
    MissingNodeElement,
    /// The `node` element lacks an integer `id`.
    #[error("node id {value:?} is not an integer")]
    InvalidNodeId {
        /// Raw attribute value, if any.
        value: Option<String>,
    },
}

/// Parse a raw node document into an [`OsmNode`].
///
/// Leading byte-order marks and whitespace are skipped, and anything before
/// the XML declaration (or, without one, the `<osm>` root) is discarded.
///
/// # Errors
///
/// Returns a [`NodeDocumentError`] describing the first structural problem.
///
/// # Examples
/// ```
/// use campus_coffee::outbound::osm_api::parse_node_document;
///
/// let node = parse_node_document(
///     r#"<osm><node id="7" lat="49.4" lon="8.7"><tag k="amenity" v="cafe"/></node></osm>"#,
/// )?;
/// assert_eq!(node.id.get(), 7);
/// assert_eq!(node.tag("amenity"), Some("cafe"));
/// # Ok::<(), campus_coffee::outbound::osm_api::NodeDocumentError>(())
/// ```
pub fn parse_node_document(body: &str) -> Result<OsmNode, NodeDocumentError> {
    let content = locate_document_start(body)?;
    let document = Document::parse(content).map_err(|error| NodeDocumentError::Syntax {
        message: error.to_string(),
    })?;

    let element = document
        .descendants()
        .find(|node| node.has_tag_name("node"))
        .ok_or(NodeDocumentError::MissingNodeElement)?;

    let raw_id = element.attribute("id");
    let id = raw_id
        .and_then(|value| value.trim().parse::<i64>().ok())
        .map(OsmNodeId::new)
        .ok_or_else(|| NodeDocumentError::InvalidNodeId {
            value: raw_id.map(str::to_owned),
        })?;

    Ok(OsmNode {
        id,
        latitude: coordinate(element, "lat"),
        longitude: coordinate(element, "lon"),
        tags: collect_tags(element),
    })
}

fn locate_document_start(body: &str) -> Result<&str, NodeDocumentError> {
    let cleaned = body.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    if cleaned.trim_end().is_empty() {
        return Err(NodeDocumentError::Empty);
    }

    cleaned
        .find(XML_DECLARATION)
        .or_else(|| cleaned.find(OSM_ROOT))
        .and_then(|start| cleaned.get(start..))
        .ok_or_else(|| NodeDocumentError::MissingDocumentStart {
            preview: cleaned.chars().take(PREVIEW_CHAR_LIMIT).collect(),
        })
}

fn coordinate(element: Node<'_, '_>, name: &str) -> Option<f64> {
    let raw = element.attribute(name).filter(|value| !value.is_empty())?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(attribute = name, value = raw, "ignoring non-numeric coordinate");
            None
        }
    }
}

fn collect_tags(element: Node<'_, '_>) -> BTreeMap<String, String> {
    element
        .descendants()
        .filter(|child| child.has_tag_name("tag"))
        .filter_map(|tag| {
            let key = tag.attribute("k").filter(|key| !key.is_empty())?;
            let value = tag.attribute("v").filter(|value| !value.is_empty())?;
            Some((key.to_owned(), value.to_owned()))
        })
        .collect()
}
