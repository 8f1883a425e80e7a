//! Derivation of typed candidate fields from raw OSM tags.

use tracing::warn;

use super::OsmNode;

/// Tag keys consulted for the POS name, most preferred first.
pub const NAME_TAG_PREFERENCE: [&str; 3] = ["name:de", "name:en", "name"];

const DESCRIPTION_TAG: &str = "description";
const AMENITY_TAG: &str = "amenity";
const STREET_TAG: &str = "addr:street";
const HOUSE_NUMBER_TAG: &str = "addr:housenumber";
const POSTAL_CODE_TAG: &str = "addr:postcode";
const CITY_TAG: &str = "addr:city";

/// Candidate POS fields read from a node. Nothing is required yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedFields {
    /// Preferred name, entity-decoded.
    pub name: Option<String>,
    /// Description, entity-decoded.
    pub description: Option<String>,
    /// Raw amenity value.
    pub amenity: Option<String>,
    /// Street name.
    pub street: Option<String>,
    /// House number.
    pub house_number: Option<String>,
    /// Numeric postal code.
    pub postal_code: Option<i32>,
    /// City name.
    pub city: Option<String>,
}

/// Read the candidate POS fields from a node's tags.
///
/// # Examples
/// ```
/// use campus_coffee::domain::{OsmNode, OsmNodeId, normalize_fields};
///
/// let node = OsmNode::new(OsmNodeId::new(1))
///     .with_tag("name", "Plain")
///     .with_tag("name:de", "Kaffee &amp; Kuchen")
///     .with_tag("addr:postcode", "69117");
/// let fields = normalize_fields(&node);
/// assert_eq!(fields.name.as_deref(), Some("Kaffee & Kuchen"));
/// assert_eq!(fields.postal_code, Some(69117));
/// ```
pub fn normalize_fields(node: &OsmNode) -> NormalizedFields {
    NormalizedFields {
        name: resolve_name(node).map(decode_html_entities),
        description: non_empty_tag(node, DESCRIPTION_TAG).map(decode_html_entities),
        amenity: non_empty_tag(node, AMENITY_TAG).map(str::to_owned),
        street: non_empty_tag(node, STREET_TAG).map(str::to_owned),
        house_number: non_empty_tag(node, HOUSE_NUMBER_TAG).map(str::to_owned),
        postal_code: non_empty_tag(node, POSTAL_CODE_TAG)
            .and_then(|raw| parse_postal_code(node, raw)),
        city: non_empty_tag(node, CITY_TAG).map(str::to_owned),
    }
}

/// First non-empty value along [`NAME_TAG_PREFERENCE`].
pub fn resolve_name(node: &OsmNode) -> Option<&str> {
    NAME_TAG_PREFERENCE
        .iter()
        .find_map(|key| non_empty_tag(node, key))
}

/// Decode the five predefined XML entities in a single pass.
///
/// Unknown entities and stray ampersands are copied through unchanged, and
/// decoded output is never re-scanned, so `&amp;lt;` becomes `&lt;`.
///
/// # Examples
/// ```
/// use campus_coffee::domain::decode_html_entities;
///
/// assert_eq!(decode_html_entities("Rada Coffee &amp; Rösterei"), "Rada Coffee & Rösterei");
/// assert_eq!(decode_html_entities("Caf&eacute;"), "Caf&eacute;");
/// ```
pub fn decode_html_entities(text: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
    ];

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(position) = rest.find('&') {
        let (before, candidate) = rest.split_at(position);
        decoded.push_str(before);
        match ENTITIES
            .iter()
            .find(|(entity, _)| candidate.starts_with(entity))
        {
            Some((entity, replacement)) => {
                decoded.push(*replacement);
                rest = candidate.get(entity.len()..).unwrap_or_default();
            }
            None => {
                decoded.push('&');
                rest = candidate.get(1..).unwrap_or_default();
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

fn non_empty_tag<'a>(node: &'a OsmNode, key: &str) -> Option<&'a str> {
    node.tag(key).filter(|value| !value.is_empty())
}

/// Parse the tag value as a signed 32-bit integer, untrimmed.
fn parse_postal_code(node: &OsmNode, raw: &str) -> Option<i32> {
    match raw.parse::<i32>() {
        Ok(code) => Some(code),
        Err(error) => {
            warn!(
                node_id = %node.id,
                value = raw,
                %error,
                "ignoring non-numeric postal code"
            );
            None
        }
    }
}
