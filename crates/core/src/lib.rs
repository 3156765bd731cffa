//! Media conversion and audio-extraction job pipeline.
//!
//! The crate is organised around a single conversion flow:
//!
//! - [`classifier`] turns a file name into a [`classifier::MediaKind`]
//! - [`formats`] resolves which target formats are legal for a kind and mode
//! - [`request`] validates user selections into a [`request::ConversionRequest`]
//! - [`session`] keeps the selection state coherent across file and mode changes
//! - [`service`] is the boundary trait a real transcoder implements
//! - [`controller`] runs jobs, simulates progress and handles supersession
//! - [`artifact`] owns the lifecycle of produced result resources
//!
//! [`testing`] ships a mock service so integration tests and downstream
//! crates can exercise the full flow without a real transcoder.

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod formats;
pub mod request;
pub mod service;
pub mod session;
pub mod testing;

pub use artifact::{ArtifactHandle, ArtifactId, ArtifactStore, ResourceError, ResultResourceManager};
pub use classifier::{MediaFile, MediaKind};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use controller::{
    ControllerConfig, ConversionController, ConversionOutcome, JobId, JobSnapshot, JobState,
    SERVICE_ERROR_PREFIX,
};
pub use formats::{FormatOptions, ResolveError, TargetFormat};
pub use request::{
    build_request, AudioBitrate, AudioParameters, ChannelLayout, ConversionMode, ConversionRequest,
    SampleRate, ValidationError,
};
pub use service::{converted_file_name, ConversionService, ServiceError, ServiceResponse};
pub use session::ConversionSession;
