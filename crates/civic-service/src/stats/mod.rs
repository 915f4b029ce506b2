//! Dashboard statistics computed from the report collection.

pub mod aggregate;
pub mod service;

pub use aggregate::{
    CategoryCounts, CategoryTrend, MonthlyTrend, ProfileSummary, Stats, StatusByCategory,
    StatusCounts,
};
pub use service::StatsService;
