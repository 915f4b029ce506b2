//! Core traits defined in `civic-core` and implemented by other crates.

pub mod credential;
pub mod store;

pub use credential::CredentialHasher;
pub use store::KvStore;
