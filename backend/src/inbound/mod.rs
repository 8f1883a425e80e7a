//! Inbound adapters that translate external requests into domain service
//! calls while keeping transport details at the edge.
//!
//! The command line is the only inbound transport; see [`cli`].

pub mod cli;
