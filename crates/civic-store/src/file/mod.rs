//! File-backed store backend.

pub mod store;

pub use store::FileStore;
