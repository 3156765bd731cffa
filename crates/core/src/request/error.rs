//! Validation errors for conversion requests.

use thiserror::Error;

use crate::classifier::MediaKind;
use crate::formats::TargetFormat;
use crate::request::ConversionMode;

/// A request was rejected before reaching the conversion service.
///
/// Messages are user-displayable and name the violated rule. Validation
/// errors block submission; they never corrupt prior job state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No input file has been selected.
    #[error("no input file selected")]
    NoFileSelected,

    /// The input extension is outside every accepted vocabulary.
    #[error("unsupported input file type: .{extension}")]
    UnsupportedInput { extension: String },

    /// Audio extraction was requested for a non-video input.
    #[error("audio can only be extracted from video files, not {kind} files")]
    UnsupportedOperation { kind: MediaKind },

    /// The target format is outside the allowed set for the current
    /// classification and mode.
    #[error("{target} is not a valid target format in {mode} mode")]
    InvalidTarget {
        target: TargetFormat,
        mode: ConversionMode,
    },

    /// Audio extraction was requested without quality parameters.
    #[error("audio parameters are required when extracting audio")]
    MissingAudioParameters,
}

impl ValidationError {
    /// Maps a resolver failure onto the user-facing error, filling in the
    /// file details the resolver does not know about.
    pub fn from_resolve(error: crate::formats::ResolveError, file: &crate::classifier::MediaFile) -> Self {
        match error {
            crate::formats::ResolveError::UnsupportedInput => Self::UnsupportedInput {
                extension: file.extension.clone(),
            },
            crate::formats::ResolveError::ExtractAudioFromNonVideo => Self::UnsupportedOperation {
                kind: file.kind,
            },
        }
    }
}
