//! Driven port for POS persistence.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Pos, PosId};

define_port_error! {
    /// Errors raised by POS repository adapters.
    pub enum PosRepositoryError {
        /// No POS is stored under the identifier.
        NotFound { id: PosId } =>
            "pos {id} not found",
        /// The unique name constraint rejected the write.
        DuplicateName { name: String } =>
            "pos name '{name}' already taken",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pos repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pos repository query failed: {message}",
    }
}

/// Port for reading and writing POS records.
///
/// Adapters own identifier and timestamp assignment and enforce name
/// uniqueness across all stored records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosRepository: Send + Sync {
    /// Fetch one POS.
    async fn get_by_id(&self, id: PosId) -> Result<Pos, PosRepositoryError>;

    /// Fetch every POS ordered by identifier.
    async fn get_all(&self) -> Result<Vec<Pos>, PosRepositoryError>;

    /// Create `pos` when it has no identifier, otherwise overwrite the stored
    /// record with the same identifier. Returns the stored state.
    async fn upsert(&self, pos: &Pos) -> Result<Pos, PosRepositoryError>;

    /// Remove every POS.
    async fn clear(&self) -> Result<(), PosRepositoryError>;
}
