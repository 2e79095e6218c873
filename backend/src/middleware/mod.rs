//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns,
//! currently request correlation.

pub mod correlation;

pub use correlation::{Correlation, REQUEST_ID_HEADER, RequestId};
