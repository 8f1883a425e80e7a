//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the Diesel implementation of the `PosRepository` port with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapter**: the repository only translates between rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to
//!   `PosRepositoryError` variants.
//!
//! # Example
//!
//! ```ignore
//! use campus_coffee::outbound::persistence::{DbPool, DieselPosRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/campus_coffee")).await?;
//! let repository = DieselPosRepository::new(pool, Arc::new(DefaultClock));
//! ```

mod diesel_pos_repository;
mod models;
mod pool;
mod schema;

pub use diesel_pos_repository::DieselPosRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError,
};
