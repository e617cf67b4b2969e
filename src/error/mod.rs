//! Error handling for API requests
//!
//! This module classifies failed requests, normalizes them into a single
//! user-facing message, and attributes messages to form fields where the
//! wording allows it.

pub mod classification;
pub mod field_mapper;
pub mod normalize;

// Re-export main types for convenient access
pub use classification::{ApiError, ApiFailure, ApiResult, TransportFailure};
pub use field_mapper::{map_to_field, FieldRule};
pub use normalize::normalize;
