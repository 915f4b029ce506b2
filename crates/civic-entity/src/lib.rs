//! # civic-entity
//!
//! Domain entity models for CivicVoice. Every struct in this crate is
//! either a record persisted in the key-value store (serialized as a
//! camelCase JSON object) or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod comment;
pub mod department;
pub mod notification;
pub mod report;
pub mod user;
