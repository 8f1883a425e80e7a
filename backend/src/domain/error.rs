//! Domain-level error types.
//!
//! These errors are transport agnostic. Each variant carries the context a
//! caller needs to act on it (node identifier, missing field, conflicting
//! name); adapters translate them into whatever envelope their protocol uses.

use serde::{Deserialize, Serialize};

use super::osm_import_validation::RequiredField;
use super::{OsmNodeId, PosId};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The OSM node could not be retrieved or interpreted.
    SourceNotFound,
    /// The OSM node lacks a field every POS needs.
    MissingRequiredField,
    /// Another POS already holds the requested name.
    DuplicateName,
    /// The requested POS does not exist.
    NotFound,
    /// A precondition the import pipeline guarantees was violated.
    InvalidArgument,
    /// Storage infrastructure failed.
    ServiceUnavailable,
}

/// Domain error.
///
/// # Examples
/// ```
/// use campus_coffee::domain::{Error, ErrorCode, OsmNodeId};
///
/// let err = Error::source_not_found(OsmNodeId::new(42));
/// assert_eq!(err.code(), ErrorCode::SourceNotFound);
/// assert_eq!(err.to_string(), "OSM node 42 could not be found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The node source could not deliver a usable document for the node.
    #[error("OSM node {node_id} could not be found")]
    SourceNotFound {
        /// Requested node.
        node_id: OsmNodeId,
    },
    /// A required field is absent after normalisation.
    #[error("OSM node {node_id} is missing required field {field}")]
    MissingRequiredField {
        /// Node the fields were derived from.
        node_id: OsmNodeId,
        /// First missing field.
        field: RequiredField,
    },
    /// Storage rejected the write because the name is taken.
    #[error("a POS named '{name}' already exists")]
    DuplicateName {
        /// Conflicting name.
        name: String,
    },
    /// Storage does not know the identifier.
    #[error("POS {id} does not exist")]
    NotFound {
        /// Unknown identifier.
        id: PosId,
    },
    /// Internal precondition violation; indicates a logic bug.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the violated precondition.
        message: String,
    },
    /// Storage connection or query failure.
    #[error("service unavailable: {message}")]
    ServiceUnavailable {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl Error {
    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            Self::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            Self::DuplicateName { .. } => ErrorCode::DuplicateName,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            Self::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
        }
    }

    /// Convenience constructor for [`Error::SourceNotFound`].
    pub const fn source_not_found(node_id: OsmNodeId) -> Self {
        Self::SourceNotFound { node_id }
    }

    /// Convenience constructor for [`Error::MissingRequiredField`].
    pub const fn missing_required_field(node_id: OsmNodeId, field: RequiredField) -> Self {
        Self::MissingRequiredField { node_id, field }
    }

    /// Convenience constructor for [`Error::DuplicateName`].
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub const fn not_found(id: PosId) -> Self {
        Self::NotFound { id }
    }

    /// Convenience constructor for [`Error::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }
}
