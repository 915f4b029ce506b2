//! Repository implementations for all CivicVoice entities.

pub mod comment;
pub mod notification;
pub mod report;
pub mod user;

pub use comment::CommentRepository;
pub use notification::NotificationRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
