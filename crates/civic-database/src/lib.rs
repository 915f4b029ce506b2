//! # civic-database
//!
//! Datastore handle and concrete repository implementations for all
//! CivicVoice entities, plus the first-run bootstrap that imports legacy
//! collections and seeds demo data.

pub mod bootstrap;
pub mod connection;
pub mod repositories;

pub use bootstrap::{BootstrapReport, run_bootstrap};
pub use connection::Datastore;
