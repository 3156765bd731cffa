//! The conversion service boundary.
//!
//! The actual transcoding work happens behind the [`ConversionService`]
//! trait, an external collaborator consumed through a single async call.
//! This crate never reimplements transcoding; it validates requests, drives
//! the job lifecycle and manages the returned artifact.

mod error;
mod traits;
mod types;

pub use error::ServiceError;
pub use traits::ConversionService;
pub use types::{converted_file_name, ServiceResponse};
