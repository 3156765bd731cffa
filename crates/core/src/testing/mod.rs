//! Test doubles for the conversion pipeline.
//!
//! Exposed as a normal module (not `#[cfg(test)]`) so integration tests and
//! downstream crates can drive the controller without a real transcoder.

mod mock_service;

pub use mock_service::MockConversionService;
