//! Driving port for POS management and OSM import.

use async_trait::async_trait;

use crate::domain::{Error, OsmNodeId, Pos, PosId};

/// Use-case surface consumed by inbound adapters such as the CLI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosService: Send + Sync {
    /// Remove every POS.
    async fn clear(&self) -> Result<(), Error>;

    /// List every POS.
    async fn get_all(&self) -> Result<Vec<Pos>, Error>;

    /// Fetch one POS.
    async fn get_by_id(&self, id: PosId) -> Result<Pos, Error>;

    /// Create or update a POS.
    ///
    /// Without an identifier the POS is created. With one, the identifier
    /// must already exist or [`Error::NotFound`] is returned before any
    /// write. Name collisions surface as [`Error::DuplicateName`].
    async fn upsert(&self, pos: Pos) -> Result<Pos, Error>;

    /// Fetch an OSM node, convert it into a POS, and store it.
    async fn import_from_osm_node(&self, node_id: OsmNodeId) -> Result<Pos, Error>;
}
