//! Mock conversion service for testing.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::artifact::{ArtifactHandle, ArtifactId, ArtifactStore, ResourceError};
use crate::classifier::MediaKind;
use crate::request::ConversionRequest;
use crate::service::{converted_file_name, ConversionService, ServiceError, ServiceResponse};

/// Mock implementation of the [`ConversionService`] trait.
///
/// Provides controllable behavior for testing:
/// - records every request for assertions
/// - injectable one-shot errors
/// - configurable response delay
/// - mints `mock://` artifact handles and tracks their release, acting as
///   the [`ArtifactStore`] so leak and double-release properties are
///   observable
///
/// Clones share state, so a test can keep a handle while the controller
/// owns the service.
#[derive(Debug, Clone)]
pub struct MockConversionService {
    /// Requests received, in order.
    requests: Arc<RwLock<Vec<ConversionRequest>>>,
    /// If set, the next conversion fails with this error.
    next_error: Arc<RwLock<Option<ServiceError>>>,
    /// Simulated service latency in milliseconds.
    response_delay_ms: Arc<RwLock<u64>>,
    /// Artifacts minted and not yet released.
    live: Arc<Mutex<HashSet<ArtifactId>>>,
    /// Artifacts released at some point.
    released: Arc<Mutex<HashSet<ArtifactId>>>,
}

impl Default for MockConversionService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConversionService {
    /// Creates a mock with no delay and no pending error.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            response_delay_ms: Arc::new(RwLock::new(0)),
            live: Arc::new(Mutex::new(HashSet::new())),
            released: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// All requests received so far.
    pub async fn recorded_requests(&self) -> Vec<ConversionRequest> {
        self.requests.read().await.clone()
    }

    /// Number of requests received.
    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Configures the next conversion to fail with `error`.
    pub async fn set_next_error(&self, error: ServiceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Sets the simulated service latency.
    pub async fn set_response_delay(&self, delay: Duration) {
        *self.response_delay_ms.write().await = delay.as_millis() as u64;
    }

    /// Number of artifacts minted and still unreleased.
    pub fn live_artifact_count(&self) -> usize {
        self.live.lock().expect("artifact lock poisoned").len()
    }

    /// Returns true if `id` has been released.
    pub fn was_released(&self, id: ArtifactId) -> bool {
        self.released
            .lock()
            .expect("artifact lock poisoned")
            .contains(&id)
    }

    async fn take_error(&self) -> Option<ServiceError> {
        self.next_error.write().await.take()
    }

    fn mint_artifact(&self) -> ArtifactHandle {
        let id = ArtifactId::new();
        self.live.lock().expect("artifact lock poisoned").insert(id);
        ArtifactHandle {
            id,
            uri: format!("mock://artifacts/{id}"),
        }
    }
}

#[async_trait]
impl ConversionService for MockConversionService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, request: &ConversionRequest) -> Result<ServiceResponse, ServiceError> {
        self.requests.write().await.push(request.clone());

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        let delay_ms = *self.response_delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let extract = request.is_extract_audio();
        let media_kind = if extract {
            MediaKind::Audio
        } else {
            request.target_format.kind()
        };

        Ok(ServiceResponse {
            artifact: self.mint_artifact(),
            converted_file_name: converted_file_name(
                &request.source.name,
                request.target_format,
                extract,
            ),
            media_kind,
        })
    }
}

impl ArtifactStore for MockConversionService {
    fn release(&self, id: ArtifactId) -> Result<(), ResourceError> {
        let mut released = self.released.lock().expect("artifact lock poisoned");
        if released.contains(&id) {
            return Err(ResourceError::AlreadyReleased { id });
        }
        if !self.live.lock().expect("artifact lock poisoned").remove(&id) {
            return Err(ResourceError::UnknownHandle { id });
        }
        released.insert(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MediaFile;
    use crate::formats::TargetFormat;
    use crate::request::{AudioParameters, ConversionMode};
    use tokio_test::{assert_err, assert_ok};

    fn normal_request(name: &str, target: TargetFormat) -> ConversionRequest {
        ConversionRequest {
            source: MediaFile::classify(name),
            target_format: target,
            mode: ConversionMode::Normal,
            audio_parameters: None,
        }
    }

    #[tokio::test]
    async fn test_convert_names_artifact_by_convention() {
        let service = MockConversionService::new();
        let response = service
            .convert(&normal_request("clip.mp4", TargetFormat::Webm))
            .await
            .unwrap();
        assert_eq!(response.converted_file_name, "clip.webm");
        assert_eq!(response.media_kind, MediaKind::Video);
        assert!(response.artifact.uri.starts_with("mock://artifacts/"));
    }

    #[tokio::test]
    async fn test_extract_audio_response() {
        let service = MockConversionService::new();
        let request = ConversionRequest {
            source: MediaFile::classify("clip.mp4"),
            target_format: TargetFormat::Mp3,
            mode: ConversionMode::ExtractAudio,
            audio_parameters: Some(AudioParameters::default()),
        };
        let response = service.convert(&request).await.unwrap();
        assert_eq!(response.converted_file_name, "clip_audio.mp3");
        assert_eq!(response.media_kind, MediaKind::Audio);
    }

    #[tokio::test]
    async fn test_error_injection_is_one_shot() {
        let service = MockConversionService::new();
        service.set_next_error(ServiceError::rejected("nope")).await;

        let request = normal_request("clip.mp4", TargetFormat::Mkv);
        tokio_test::assert_err!(service.convert(&request).await);
        tokio_test::assert_ok!(service.convert(&request).await);
        assert_eq!(service.request_count().await, 2);
    }

    #[tokio::test]
    async fn test_release_lifecycle() {
        let service = MockConversionService::new();
        let response = service
            .convert(&normal_request("clip.mp4", TargetFormat::Mp4))
            .await
            .unwrap();
        let id = response.artifact.id;
        assert_eq!(service.live_artifact_count(), 1);

        service.release(id).unwrap();
        assert_eq!(service.live_artifact_count(), 0);
        assert!(service.was_released(id));

        assert_eq!(
            service.release(id),
            Err(ResourceError::AlreadyReleased { id })
        );

        let unknown = ArtifactId::new();
        assert_eq!(
            service.release(unknown),
            Err(ResourceError::UnknownHandle { id: unknown })
        );
    }
}
