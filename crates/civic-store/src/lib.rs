//! # civic-store
//!
//! Key-value store backends and the typed codec built on top of them.
//! Two backends are available:
//!
//! - **memory**: process-local map using [dashmap](https://crates.io/crates/dashmap)
//! - **file**: one file per key under a directory, replaced atomically on write
//!
//! The backend is selected at runtime based on configuration. Records are
//! read and written through [`SlotCodec`], which never surfaces corrupt
//! content as an error.

pub mod codec;
#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use codec::SlotCodec;
pub use provider::StoreManager;
