//! Session and query extraction shared by the facade groups.

pub mod auth;
pub mod filter;

pub use auth::AuthUser;
pub use filter::ReportQuery;
