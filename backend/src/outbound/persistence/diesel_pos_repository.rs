//! PostgreSQL-backed `PosRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `BIGSERIAL` column; timestamps come from the
//! injected clock so tests and the in-memory adapter agree on semantics. The
//! `pos_name_key` constraint is the only guard against concurrent writers
//! claiming the same name.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{PosRepository, PosRepositoryError};
use crate::domain::{Pos, PosId};

use super::models::{NewPosRow, PosRow, PosWrite};
use super::pool::{DbPool, PoolError};
use super::schema::pos;

/// Diesel-backed implementation of the [`PosRepository`] port.
#[derive(Clone)]
pub struct DieselPosRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPosRepository {
    /// Create a repository over `pool`, stamping writes with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> PosRepositoryError {
    PosRepositoryError::connection(error.into_message())
}

/// Map Diesel errors to POS repository errors.
///
/// `written_name` is the name of the record being written, if any; a unique
/// violation is only attributed to it.
fn map_diesel_error(
    error: diesel::result::Error,
    written_name: Option<&str>,
) -> PosRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => match written_name
        {
            Some(name) => PosRepositoryError::duplicate_name(name),
            None => PosRepositoryError::query(format!("unique violation: {}", info.message())),
        },
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PosRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) => {
            PosRepositoryError::query(format!("database error: {}", info.message()))
        }
        other => PosRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl PosRepository for DieselPosRepository {
    async fn get_by_id(&self, id: PosId) -> Result<Pos, PosRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PosRow> = pos::table
            .find(id.get())
            .select(PosRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.ok_or_else(|| PosRepositoryError::not_found(id))
            .and_then(Pos::try_from)
    }

    async fn get_all(&self) -> Result<Vec<Pos>, PosRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PosRow> = pos::table
            .order(pos::id.asc())
            .select(PosRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(Pos::try_from).collect()
    }

    async fn upsert(&self, record: &Pos) -> Result<Pos, PosRepositoryError> {
        let now = self.clock.utc();
        let columns = PosWrite::from_domain(record, now);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PosRow = match record.id {
            None => diesel::insert_into(pos::table)
                .values(NewPosRow {
                    columns,
                    created_at: now,
                })
                .returning(PosRow::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, Some(&record.name)))?,
            Some(id) => diesel::update(pos::table.find(id.get()))
                .set(&columns)
                .returning(PosRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_diesel_error(err, Some(&record.name)))?
                .ok_or_else(|| PosRepositoryError::not_found(id))?,
        };

        debug!(id = row.id, "stored POS row");
        Pos::try_from(row)
    }

    async fn clear(&self) -> Result<(), PosRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(pos::table)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        debug!(deleted, "cleared POS table");
        Ok(())
    }
}
