//! The conversion controller implementation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::artifact::{ArtifactStore, ResultResourceManager};
use crate::classifier::MediaKind;
use crate::formats::TargetFormat;
use crate::request::{AudioParameters, ConversionMode, ConversionRequest, ValidationError};
use crate::service::{ConversionService, ServiceError};
use crate::session::ConversionSession;

use super::config::ControllerConfig;
use super::types::{ConversionOutcome, JobId, JobSnapshot, JobState};

/// Fixed prefix put in front of the service's verbatim error message when a
/// job fails at the service boundary.
pub const SERVICE_ERROR_PREFIX: &str = "media conversion failed: ";

/// Everything the controller mutates, behind a single lock.
///
/// The job slot and the result slot are touched only through this struct,
/// never concurrently. The lock is the shared-resource policy.
struct ControllerInner {
    session: ConversionSession,
    job_id: Option<JobId>,
    state: JobState,
    artifacts: ResultResourceManager,
}

/// Drives one conversion at a time against a [`ConversionService`].
///
/// All work runs as cooperative tokio tasks; there is never parallel
/// execution of two jobs. Submitting again or selecting a new file
/// supersedes the outstanding job: its eventual service resolution and any
/// pending ticks find a different job id and apply nothing.
pub struct ConversionController<S> {
    config: ControllerConfig,
    service: Arc<S>,
    inner: Arc<RwLock<ControllerInner>>,
}

impl<S: ConversionService + 'static> ConversionController<S> {
    /// Creates a controller using `store` to release artifact handles.
    pub fn new(config: ControllerConfig, service: S, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            config,
            service: Arc::new(service),
            inner: Arc::new(RwLock::new(ControllerInner {
                session: ConversionSession::new(),
                job_id: None,
                state: JobState::Idle,
                artifacts: ResultResourceManager::new(store),
            })),
        }
    }

    /// Selects a new input file.
    ///
    /// This is a hard session boundary: the session is replaced, any
    /// in-flight job is invalidated (its late resolution will be discarded)
    /// and any held result artifact is released. Returns the new file's
    /// classification.
    pub async fn select_file(&self, name: impl Into<String>) -> MediaKind {
        let mut inner = self.inner.write().await;
        inner.session = inner.session.with_file(name);

        if let Some(old) = inner.job_id.take() {
            debug!(job = %old, "invalidated in-flight job on new file selection");
        }
        inner.state = JobState::Idle;

        if let Err(e) = inner.artifacts.release_all() {
            error!("artifact release on file selection violated ownership contract: {e}");
        }

        inner.session.kind().unwrap_or(MediaKind::Unsupported)
    }

    /// Switches the conversion mode, re-resolving the target format.
    pub async fn set_mode(&self, mode: ConversionMode) -> Result<(), ValidationError> {
        let mut inner = self.inner.write().await;
        inner.session = inner.session.with_mode(mode)?;
        Ok(())
    }

    /// Selects a target format from the allowed set.
    pub async fn set_target(&self, target: TargetFormat) -> Result<(), ValidationError> {
        let mut inner = self.inner.write().await;
        inner.session = inner.session.with_target(target)?;
        Ok(())
    }

    /// Replaces the audio extraction parameters.
    pub async fn set_audio_parameters(&self, audio: AudioParameters) {
        let mut inner = self.inner.write().await;
        inner.session = inner.session.with_audio_parameters(audio);
    }

    /// A snapshot of the current session.
    pub async fn session(&self) -> ConversionSession {
        self.inner.read().await.session.clone()
    }

    /// A snapshot of the current job slot.
    pub async fn job(&self) -> JobSnapshot {
        let inner = self.inner.read().await;
        JobSnapshot {
            id: inner.job_id,
            state: inner.state.clone(),
        }
    }

    /// The live conversion result, if the current job succeeded.
    pub async fn result(&self) -> Option<ConversionOutcome> {
        self.inner.read().await.state.result().cloned()
    }

    /// Submits the current session as a conversion job.
    ///
    /// Any previous result is released and any in-flight job superseded
    /// before validation runs. A validation failure lands the job in
    /// `Failed` with the rule-specific message and never contacts the
    /// service. On success the job enters `Running` at progress 0 and the
    /// tick and service tasks are spawned.
    pub async fn submit(&self) -> Result<JobId, ValidationError> {
        let job_id = JobId::new();
        let request;

        {
            let mut inner = self.inner.write().await;

            if let Some(old) = inner.job_id.replace(job_id) {
                debug!(job = %old, "superseded in-flight job by new submission");
            }
            inner.state = JobState::Validating {
                started_at: Utc::now(),
            };

            if let Err(e) = inner.artifacts.release_all() {
                error!("artifact release on submission violated ownership contract: {e}");
            }

            match inner.session.build_request() {
                Ok(built) => {
                    request = built;
                    inner.state = JobState::Running {
                        progress: 0,
                        started_at: Utc::now(),
                    };
                }
                Err(e) => {
                    warn!(job = %job_id, "submission rejected: {e}");
                    inner.state = JobState::Failed {
                        error: e.to_string(),
                        progress: 0,
                        failed_at: Utc::now(),
                    };
                    return Err(e);
                }
            }
        }

        info!(
            job = %job_id,
            source = %request.source.name,
            target = %request.target_format,
            mode = %request.mode,
            "conversion job submitted"
        );

        self.spawn_progress_ticker(job_id);
        self.spawn_service_call(job_id, request);

        Ok(job_id)
    }

    /// Tears the controller down: invalidates the job slot and releases any
    /// held artifact. Explicit so that disposal is a well-defined session
    /// boundary rather than an incidental side effect.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.write().await;
        inner.job_id = None;
        inner.state = JobState::Idle;
        if let Err(e) = inner.artifacts.release_all() {
            error!("artifact release on shutdown violated ownership contract: {e}");
        }
        info!("conversion controller shut down");
    }

    /// Spawns the progress tick task for `job_id`.
    ///
    /// Each tick re-checks the job identity and state under the lock before
    /// applying anything, and the task exits as soon as either no longer
    /// matches, so a tick can never fire after a terminal transition has
    /// been observed.
    fn spawn_progress_ticker(&self, job_id: JobId) {
        let inner = Arc::clone(&self.inner);
        let interval = Duration::from_millis(self.config.tick_interval_ms);
        let step = self.config.progress_step;
        let cap = self.config.progress_cap;

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                let mut guard = inner.write().await;
                if guard.job_id != Some(job_id) {
                    break;
                }
                match &mut guard.state {
                    JobState::Running { progress, .. } => {
                        *progress = progress.saturating_add(step).min(cap);
                    }
                    _ => break,
                }
            }
        });
    }

    /// Spawns the single service call task for `job_id`.
    fn spawn_service_call(&self, job_id: JobId, request: ConversionRequest) {
        let inner = Arc::clone(&self.inner);
        let service = Arc::clone(&self.service);
        let timeout_secs = self.config.service_timeout_secs;

        tokio::spawn(async move {
            let result = match timeout_secs {
                Some(secs) => {
                    match tokio::time::timeout(Duration::from_secs(secs), service.convert(&request))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(ServiceError::Timeout { timeout_secs: secs }),
                    }
                }
                None => service.convert(&request).await,
            };

            let mut guard = inner.write().await;

            if guard.job_id != Some(job_id) {
                debug!(job = %job_id, "discarding stale conversion resolution");
                // A stale success still minted an artifact nobody owns;
                // send it straight back to the store.
                if let Ok(response) = result {
                    if let Err(e) = guard.artifacts.discard(response.artifact) {
                        error!("stale artifact release violated ownership contract: {e}");
                    }
                }
                return;
            }

            match result {
                Ok(response) => {
                    let media_kind = if request.is_extract_audio() {
                        MediaKind::Audio
                    } else {
                        request.target_format.kind()
                    };
                    let outcome = ConversionOutcome {
                        artifact: response.artifact.clone(),
                        display_name: response.converted_file_name,
                        media_kind,
                        audio_parameters: request.audio_parameters,
                    };

                    if let Err(e) = guard.artifacts.acquire(response.artifact) {
                        error!("artifact acquire violated ownership contract: {e}");
                    }

                    info!(job = %job_id, artifact = %outcome.artifact.id, "conversion job succeeded");
                    guard.state = JobState::Succeeded {
                        result: outcome,
                        completed_at: Utc::now(),
                    };
                }
                Err(e) => {
                    let progress = guard.state.progress();
                    warn!(job = %job_id, "conversion job failed: {e}");
                    guard.state = JobState::Failed {
                        error: format!("{SERVICE_ERROR_PREFIX}{e}"),
                        progress,
                        failed_at: Utc::now(),
                    };
                }
            }
        });
    }
}
