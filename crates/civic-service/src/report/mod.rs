//! Report lifecycle service and status transition policy.

pub mod policy;
pub mod service;

pub use policy::TransitionGuard;
pub use service::ReportService;
