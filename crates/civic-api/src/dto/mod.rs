//! Request and response shapes of the facade.

pub mod request;
pub mod response;
