//! Identity normalization rules.

pub mod normalizer;

pub use normalizer::{DEMO_USER_ID, is_demo_username, normalize_identity};
