//! # civic-api
//!
//! In-process API facade for CivicVoice.
//!
//! [`CivicApi`] groups the operations a front end calls (`auth`, `reports`,
//! `comments`, `notifications`, `stats`). Every method is async and returns
//! [`ApiResult`]; domain errors are mapped into [`ApiError`] carrying the
//! error kind and a message fit for display.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod facade;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use facade::CivicApi;
pub use state::AppState;
