//! Job execution controller.
//!
//! Drives one conversion at a time through the state machine:
//!
//! ```text
//! Idle -> Validating -> Running -> Succeeded
//!             |            |
//!             v            v
//!           Failed       Failed
//! ```
//!
//! `Succeeded` and `Failed` are terminal until a new submission resets to
//! `Validating`. While `Running`, a tick task advances progress by a fixed
//! step on a fixed interval (capped below 100) independent of the real
//! service call; when the service resolves, the completion handler
//! reconciles progress unconditionally. Every asynchronous response carries
//! the job identity it belongs to and is discarded if the controller has
//! moved on. That is what makes "new file selection cancels the old job"
//! correct without true cancellation primitives.

mod config;
mod runner;
mod types;

pub use config::ControllerConfig;
pub use runner::{ConversionController, SERVICE_ERROR_PREFIX};
pub use types::{ConversionOutcome, JobId, JobSnapshot, JobState};
