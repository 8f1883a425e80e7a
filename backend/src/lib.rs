//! Campus coffee POS importer library.
//!
//! Turns OpenStreetMap nodes into campus points of sale and stores them.
//! Layout follows ports and adapters: [`domain`] holds types, the import
//! pipeline, and port traits; [`outbound`] implements the driven ports;
//! [`inbound`] drives the domain from the command line; [`config`] loads
//! settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
