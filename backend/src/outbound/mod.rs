//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **osm_api**: reqwest-backed node source for the OpenStreetMap API
//! - **persistence**: PostgreSQL-backed POS repository using Diesel ORM
//! - **memory**: process-local POS repository for tests and dry runs
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod osm_api;
pub mod persistence;
