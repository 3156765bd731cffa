//! Types for the job execution controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::ArtifactHandle;
use crate::classifier::MediaKind;
use crate::request::AudioParameters;

/// Unique token distinguishing one submitted conversion attempt from the
/// next. Stale asynchronous results (ticks, service completions) are
/// matched against the controller's current id and discarded on mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a fresh job id.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful conversion, as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// Handle to the converted bytes. The live copy is owned by the result
    /// resource manager; this one is for display and download.
    pub artifact: ArtifactHandle,
    /// Display name following the artifact naming convention.
    pub display_name: String,
    /// Kind of the produced artifact: the target format's kind for normal
    /// conversions, always audio for extraction.
    pub media_kind: MediaKind,
    /// Echo of the extraction parameters, present iff audio was extracted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_parameters: Option<AudioParameters>,
}

/// Current state of the conversion job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobState {
    /// No job has been submitted yet (or the last one was invalidated).
    Idle,

    /// Submission received, request being validated.
    Validating { started_at: DateTime<Utc> },

    /// The conversion service is working; progress ticks upward.
    Running {
        /// Simulated progress, 0-100, monotonically non-decreasing.
        progress: u8,
        started_at: DateTime<Utc>,
    },

    /// The service resolved successfully (terminal). Progress is 100.
    Succeeded {
        result: ConversionOutcome,
        completed_at: DateTime<Utc>,
    },

    /// Validation or the service call failed (terminal). Progress stays
    /// frozen at its last value and the message is retained for display.
    Failed {
        error: String,
        progress: u8,
        failed_at: DateTime<Utc>,
    },
}

impl JobState {
    /// Progress percentage for display: exactly 100 iff succeeded, frozen
    /// at the last ticked value on failure.
    pub fn progress(&self) -> u8 {
        match self {
            JobState::Idle | JobState::Validating { .. } => 0,
            JobState::Running { progress, .. } => *progress,
            JobState::Succeeded { .. } => 100,
            JobState::Failed { progress, .. } => *progress,
        }
    }

    /// Returns true if no further transitions happen without a new
    /// submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded { .. } | JobState::Failed { .. })
    }

    /// Retained error message, when failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            JobState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The conversion result, when succeeded.
    pub fn result(&self) -> Option<&ConversionOutcome> {
        match self {
            JobState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// A point-in-time view of the controller's job slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Identity of the current job, `None` when idle or invalidated.
    pub id: Option<JobId>,
    /// State at snapshot time.
    pub state: JobState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_100_iff_succeeded() {
        let succeeded = JobState::Succeeded {
            result: ConversionOutcome {
                artifact: ArtifactHandle {
                    id: crate::artifact::ArtifactId::new(),
                    uri: "mock://artifacts/x".to_string(),
                },
                display_name: "clip.mp4".to_string(),
                media_kind: MediaKind::Video,
                audio_parameters: None,
            },
            completed_at: Utc::now(),
        };
        assert_eq!(succeeded.progress(), 100);

        let failed = JobState::Failed {
            error: "boom".to_string(),
            progress: 40,
            failed_at: Utc::now(),
        };
        assert_eq!(failed.progress(), 40);

        assert_eq!(JobState::Idle.progress(), 0);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobState::Idle.is_terminal());
        assert!(!JobState::Validating { started_at: Utc::now() }.is_terminal());
        assert!(!JobState::Running {
            progress: 10,
            started_at: Utc::now()
        }
        .is_terminal());
        assert!(JobState::Failed {
            error: String::new(),
            progress: 0,
            failed_at: Utc::now()
        }
        .is_terminal());
    }

    #[test]
    fn test_job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn test_state_serializes_with_type_tag() {
        let state = JobState::Failed {
            error: "boom".to_string(),
            progress: 40,
            failed_at: Utc::now(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"type\":\"failed\""));
        assert!(json.contains("\"progress\":40"));

        let parsed: JobState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
