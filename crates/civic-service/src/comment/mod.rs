//! Comment threads on reports.

pub mod service;

pub use service::CommentService;
