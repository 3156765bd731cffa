//! Trait definition for the conversion service.

use async_trait::async_trait;

use crate::request::ConversionRequest;

use super::error::ServiceError;
use super::types::ServiceResponse;

/// An external service that converts media files.
///
/// Implementations receive a fully validated request: target format
/// membership and mode legality have already been checked, so a rejection
/// here is a [`ServiceError`], never a validation problem.
#[async_trait]
pub trait ConversionService: Send + Sync {
    /// Returns the name of this service implementation.
    fn name(&self) -> &str;

    /// Converts the request's source file, returning a handle to the
    /// converted artifact.
    async fn convert(&self, request: &ConversionRequest) -> Result<ServiceResponse, ServiceError>;
}
