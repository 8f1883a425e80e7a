//! POS management and OSM import orchestration service.
//!
//! The service owns the create-or-update protocol:
//! - a POS without identifier is created directly;
//! - a POS with identifier must exist before it is overwritten;
//! - name conflicts from storage surface unchanged as duplicate-name errors.
//!
//! No lock spans the existence check and the write. Concurrent writers race
//! in storage, where the unique name constraint decides the winner.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::osm_import::convert_osm_node;
use super::ports::{
    OsmNodeSource, OsmNodeSourceError, PosRepository, PosRepositoryError, PosService,
};
use super::{Error, OsmNodeId, Pos, PosId};

/// Domain service implementing [`PosService`].
#[derive(Clone)]
pub struct PosCommandService<S, R> {
    node_source: Arc<S>,
    repository: Arc<R>,
}

impl<S, R> PosCommandService<S, R> {
    /// Create a new service over a node source and a POS repository.
    pub const fn new(node_source: Arc<S>, repository: Arc<R>) -> Self {
        Self {
            node_source,
            repository,
        }
    }
}

impl<S, R> PosCommandService<S, R>
where
    R: PosRepository,
{
    async fn perform_upsert(&self, pos: &Pos) -> Result<Pos, Error> {
        match self.repository.upsert(pos).await {
            Ok(stored) => {
                info!(
                    id = ?stored.id.map(PosId::get),
                    name = %stored.name,
                    "upserted POS"
                );
                Ok(stored)
            }
            Err(err) => {
                error!(name = %pos.name, error = %err, "failed to upsert POS");
                Err(map_repository_error(err))
            }
        }
    }
}

#[async_trait]
impl<S, R> PosService for PosCommandService<S, R>
where
    S: OsmNodeSource,
    R: PosRepository,
{
    async fn clear(&self) -> Result<(), Error> {
        warn!("clearing all POS data");
        self.repository.clear().await.map_err(map_repository_error)
    }

    async fn get_all(&self) -> Result<Vec<Pos>, Error> {
        debug!("retrieving all POS");
        self.repository.get_all().await.map_err(map_repository_error)
    }

    async fn get_by_id(&self, id: PosId) -> Result<Pos, Error> {
        debug!(%id, "retrieving POS");
        self.repository
            .get_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn upsert(&self, pos: Pos) -> Result<Pos, Error> {
        match pos.id {
            None => {
                info!(name = %pos.name, "creating new POS");
            }
            Some(id) => {
                info!(%id, "updating POS");
                self.repository
                    .get_by_id(id)
                    .await
                    .map_err(map_repository_error)?;
            }
        }
        self.perform_upsert(&pos).await
    }

    async fn import_from_osm_node(&self, node_id: OsmNodeId) -> Result<Pos, Error> {
        info!(%node_id, "importing POS from OSM node");

        let node = self
            .node_source
            .fetch_node(node_id)
            .await
            .map_err(map_source_error)?;
        let pos = convert_osm_node(&node)?;
        let stored = self.upsert(pos).await?;

        info!(%node_id, name = %stored.name, "imported POS from OSM node");
        Ok(stored)
    }
}

fn map_source_error(error: OsmNodeSourceError) -> Error {
    match error {
        OsmNodeSourceError::NotFound { node_id } => Error::source_not_found(node_id),
    }
}

fn map_repository_error(error: PosRepositoryError) -> Error {
    match error {
        PosRepositoryError::NotFound { id } => Error::not_found(id),
        PosRepositoryError::DuplicateName { name } => Error::duplicate_name(name),
        PosRepositoryError::Connection { message } | PosRepositoryError::Query { message } => {
            Error::service_unavailable(format!("POS storage failed: {message}"))
        }
    }
}

#[cfg(test)]
#[path = "pos_service_tests.rs"]
mod tests;
