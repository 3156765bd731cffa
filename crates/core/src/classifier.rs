//! File classification by extension.
//!
//! Maps a file name to a coarse media kind (video, audio, image) by looking
//! up its extension in three disjoint vocabularies. Anything outside the
//! vocabularies classifies as [`MediaKind::Unsupported`]. That is a valid
//! classification, not an error; rejection happens later in validation.

use serde::{Deserialize, Serialize};

/// Video file extensions accepted as conversion input.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "wmv", "flv", "webm", "mkv"];

/// Audio file extensions accepted as conversion input.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "aac", "flac", "m4a"];

/// Image file extensions accepted as conversion input.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "gif", "bmp", "webp", "svg", "tiff"];

/// Coarse media category derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
    /// Extension not in any vocabulary (or no extension at all).
    Unsupported,
}

impl MediaKind {
    /// Classifies a bare extension (already lowercased, no leading dot).
    pub fn from_extension(extension: &str) -> Self {
        if VIDEO_EXTENSIONS.contains(&extension) {
            Self::Video
        } else if AUDIO_EXTENSIONS.contains(&extension) {
            Self::Audio
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            Self::Image
        } else {
            Self::Unsupported
        }
    }

    /// Returns true if files of this kind can be submitted for conversion.
    pub fn is_convertible(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Image => write!(f, "image"),
            MediaKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A selected input file with its derived classification.
///
/// Created on file selection; replacing it invalidates any running job and
/// any held result (see [`crate::controller::ConversionController::select_file`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// Full file name as selected (e.g. `clip.mp4`).
    pub name: String,
    /// Lowercased extension (empty when the name has no `.`).
    pub extension: String,
    /// Classification derived from the extension.
    pub kind: MediaKind,
}

impl MediaFile {
    /// Classifies a file name into a `MediaFile`.
    ///
    /// The extension is the substring after the last `.`, compared
    /// case-insensitively. A name without a dot classifies as unsupported.
    pub fn classify(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        let kind = if extension.is_empty() {
            MediaKind::Unsupported
        } else {
            MediaKind::from_extension(&extension)
        };

        Self {
            name,
            extension,
            kind,
        }
    }

    /// File name minus the final extension, used for artifact naming.
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }
}
