//! Types for the conversion service boundary.

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactHandle;
use crate::classifier::MediaKind;
use crate::formats::TargetFormat;

/// A successful response from the conversion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    /// Opaque handle to the converted bytes. Ownership passes to the
    /// caller, which must hand it to the result resource manager.
    pub artifact: ArtifactHandle,
    /// Display name of the converted file, following the naming convention
    /// (see [`converted_file_name`]).
    pub converted_file_name: String,
    /// Media kind of the converted artifact.
    pub media_kind: MediaKind,
}

/// Computes the converted file's display name.
///
/// Convention: source name minus its extension, plus `_audio` when an audio
/// track was extracted, plus the target format's extension.
///
/// ```
/// use mediamorph_core::formats::TargetFormat;
/// use mediamorph_core::service::converted_file_name;
///
/// assert_eq!(converted_file_name("clip.mp4", TargetFormat::Webm, false), "clip.webm");
/// assert_eq!(converted_file_name("clip.mp4", TargetFormat::Mp3, true), "clip_audio.mp3");
/// ```
pub fn converted_file_name(source_name: &str, target: TargetFormat, extract_audio: bool) -> String {
    let stem = source_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(source_name);
    let suffix = if extract_audio { "_audio" } else { "" };
    format!("{}{}.{}", stem, suffix, target.extension())
}
