//! Conversion of a raw OSM node into an unsaved POS.
//!
//! The conversion runs normalisation, validation, classification and
//! assembly in that order. Each stage finishes before the next starts and the
//! first failure ends the conversion.

use tracing::debug;

use super::osm_import_classification::{classify_amenity, classify_postal_code};
use super::osm_import_fields::normalize_fields;
use super::osm_import_validation::{ValidatedFields, validate_required_fields};
use super::{CampusType, Error, OsmNode, Pos, PosType};

/// Convert a node into a POS that has not been persisted yet.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredField`] when the node lacks a required
/// tag, or [`Error::InvalidArgument`] if a validated field breaks a
/// classifier precondition.
///
/// # Examples
/// ```
/// use campus_coffee::domain::{CampusType, OsmNode, OsmNodeId, PosType, convert_osm_node};
///
/// let node = OsmNode::new(OsmNodeId::new(5_589_879_349))
///     .with_tag("name:de", "Rada Coffee &amp; Rösterei")
///     .with_tag("amenity", "cafe")
///     .with_tag("addr:street", "Untere Straße")
///     .with_tag("addr:housenumber", "21")
///     .with_tag("addr:postcode", "69117")
///     .with_tag("addr:city", "Heidelberg");
///
/// let pos = convert_osm_node(&node)?;
/// assert_eq!(pos.name, "Rada Coffee & Rösterei");
/// assert_eq!(pos.pos_type, PosType::Cafe);
/// assert_eq!(pos.campus, CampusType::Altstadt);
/// assert!(pos.id.is_none());
/// # Ok::<(), campus_coffee::domain::Error>(())
/// ```
pub fn convert_osm_node(node: &OsmNode) -> Result<Pos, Error> {
    let fields = validate_required_fields(node.id, normalize_fields(node))?;
    let pos_type = classify_amenity(&fields.amenity)?.value();
    let campus = classify_postal_code(fields.postal_code).value();
    debug!(node_id = %node.id, %pos_type, %campus, "classified OSM node");
    Ok(assemble_pos(fields, pos_type, campus))
}

/// Build an unsaved POS from validated fields and classifier output.
pub fn assemble_pos(fields: ValidatedFields, pos_type: PosType, campus: CampusType) -> Pos {
    let ValidatedFields {
        node_id: _,
        name,
        description,
        amenity: _,
        street,
        house_number,
        postal_code,
        city,
    } = fields;

    Pos {
        id: None,
        name,
        description: description.unwrap_or_default(),
        pos_type,
        campus,
        street,
        house_number,
        postal_code,
        city,
        created_at: None,
        updated_at: None,
    }
}
