//! # civic-service
//!
//! Business logic service layer for CivicVoice. Each service orchestrates
//! repositories and the identity shim to implement application-level use
//! cases: report lifecycle, comments, notifications and statistics.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod comment;
pub mod context;
pub mod notification;
pub mod report;
pub mod stats;

pub use comment::CommentService;
pub use context::RequestContext;
pub use notification::{NotificationRules, NotificationService};
pub use report::{ReportService, TransitionGuard};
pub use stats::{Stats, StatsService};
