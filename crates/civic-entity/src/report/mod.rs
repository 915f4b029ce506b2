//! Report domain entities.

pub mod category;
pub mod location;
pub mod model;
pub mod status;
pub mod stored;

pub use category::ReportCategory;
pub use location::Location;
pub use model::{NewReport, Report, ReportFilter, ReportPatch};
pub use status::ReportStatus;
pub use stored::{StoredReport, canonical_location};
