//! Core type definitions used across the CivicVoice workspace.

pub mod id;

pub use id::*;
