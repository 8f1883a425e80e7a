//! Driven port for retrieving single OSM nodes.
//!
//! Adapters hide transport and document-format failures behind one outcome:
//! the node could not be found. They log the underlying cause themselves.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{OsmNode, OsmNodeId};

define_port_error! {
    /// Errors raised while fetching an OSM node.
    pub enum OsmNodeSourceError {
        /// The node does not exist upstream or its document was unusable.
        NotFound { node_id: OsmNodeId } =>
            "osm node {node_id} not found",
    }
}

/// Port for fetching one OSM node by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OsmNodeSource: Send + Sync {
    /// Fetch and parse the node.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use campus_coffee::domain::{OsmNode, OsmNodeId};
    /// use campus_coffee::domain::ports::{FixtureOsmNodeSource, OsmNodeSource};
    ///
    /// let source = FixtureOsmNodeSource::default()
    ///     .with_node(OsmNode::new(OsmNodeId::new(7)).with_tag("amenity", "cafe"));
    /// let node = source.fetch_node(OsmNodeId::new(7)).await?;
    /// assert_eq!(node.tag("amenity"), Some("cafe"));
    /// # Ok::<(), campus_coffee::domain::ports::OsmNodeSourceError>(())
    /// ```
    async fn fetch_node(&self, node_id: OsmNodeId) -> Result<OsmNode, OsmNodeSourceError>;
}

/// Fixture source serving a fixed set of nodes.
#[derive(Debug, Clone, Default)]
pub struct FixtureOsmNodeSource {
    nodes: BTreeMap<OsmNodeId, OsmNode>,
}

impl FixtureOsmNodeSource {
    /// Serve `node` under its own identifier.
    #[must_use]
    pub fn with_node(mut self, node: OsmNode) -> Self {
        self.nodes.insert(node.id, node);
        self
    }
}

#[async_trait]
impl OsmNodeSource for FixtureOsmNodeSource {
    async fn fetch_node(&self, node_id: OsmNodeId) -> Result<OsmNode, OsmNodeSourceError> {
        self.nodes
            .get(&node_id)
            .cloned()
            .ok_or_else(|| OsmNodeSourceError::not_found(node_id))
    }
}
