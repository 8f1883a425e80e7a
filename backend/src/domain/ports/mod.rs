//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod osm_node_source;
mod pos_repository;
mod pos_service;

#[cfg(test)]
pub use osm_node_source::MockOsmNodeSource;
pub use osm_node_source::{FixtureOsmNodeSource, OsmNodeSource, OsmNodeSourceError};
#[cfg(test)]
pub use pos_repository::MockPosRepository;
pub use pos_repository::{PosRepository, PosRepositoryError};
#[cfg(test)]
pub use pos_service::MockPosService;
pub use pos_service::PosService;
