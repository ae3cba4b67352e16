//! Profile transform layer: mapping between the edit form's shapes and the
//! external profile API's wire shapes, in both directions.
//!
//! Every function here is total over its input. Missing or malformed optional
//! fields are defaulted, never reported as errors.

pub mod completeness;
pub mod handlers;
pub mod inbound;
pub mod outbound;
pub mod points;
pub mod submission;
pub mod validity;
