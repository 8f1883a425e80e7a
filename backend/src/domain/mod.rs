//! Domain primitives, import pipeline, and services.
//!
//! Purpose: define the strongly typed POS aggregate, the stages that turn a
//! raw OSM node into one, and the service that reconciles it with storage.
//! Types here never depend on transport or storage crates.
//!
//! Public surface:
//! - [`Pos`], [`PosId`], [`PosType`], [`CampusType`]: the POS aggregate.
//! - [`OsmNode`], [`OsmNodeId`]: raw node input.
//! - [`convert_osm_node`] and its stages: normalise, validate, classify,
//!   assemble.
//! - [`PosCommandService`]: implements [`ports::PosService`].
//! - [`Error`], [`ErrorCode`]: domain failures.

pub mod error;
pub mod osm_import;
pub mod osm_import_classification;
pub mod osm_import_fields;
pub mod osm_import_validation;
pub mod osm_node;
pub mod pos;
pub mod pos_service;
pub mod ports;

pub use self::error::{Error, ErrorCode};
pub use self::osm_import::{assemble_pos, convert_osm_node};
pub use self::osm_import_classification::{
    Classification, DEFAULT_CAMPUS, DEFAULT_POS_TYPE, classify_amenity, classify_postal_code,
};
pub use self::osm_import_fields::{
    NAME_TAG_PREFERENCE, NormalizedFields, decode_html_entities, normalize_fields, resolve_name,
};
pub use self::osm_import_validation::{RequiredField, ValidatedFields, validate_required_fields};
pub use self::osm_node::{OsmNode, OsmNodeId};
pub use self::pos::{CampusType, Pos, PosId, PosType, UnknownLabelError};
pub use self::pos_service::PosCommandService;
