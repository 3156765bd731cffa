//! Format compatibility resolution.
//!
//! A static compatibility table mapping `(classification, mode)` to the set
//! of legal target formats and a canonical default. Pure data; nothing here
//! touches the job machinery, so the table is testable on its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::MediaKind;
use crate::request::ConversionMode;

/// A target output format the user can convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetFormat {
    // Video containers
    Mp4,
    Mov,
    Avi,
    Wmv,
    Flv,
    Webm,
    Mkv,
    // Audio formats
    Mp3,
    Wav,
    Ogg,
    Aac,
    Flac,
    M4a,
    // Image formats
    Jpg,
    Png,
    Gif,
    Bmp,
    Webp,
    Svg,
    Tiff,
}

impl TargetFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Avi => "avi",
            Self::Wmv => "wmv",
            Self::Flv => "flv",
            Self::Webm => "webm",
            Self::Mkv => "mkv",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::Svg => "svg",
            Self::Tiff => "tiff",
        }
    }

    /// The media kind produced by converting to this format.
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Mp4 | Self::Mov | Self::Avi | Self::Wmv | Self::Flv | Self::Webm | Self::Mkv => {
                MediaKind::Video
            }
            Self::Mp3 | Self::Wav | Self::Ogg | Self::Aac | Self::Flac | Self::M4a => {
                MediaKind::Audio
            }
            Self::Jpg | Self::Png | Self::Gif | Self::Bmp | Self::Webp | Self::Svg | Self::Tiff => {
                MediaKind::Image
            }
        }
    }

    /// Parses a bare extension (lowercase, no leading dot) into a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let format = match extension {
            "mp4" => Self::Mp4,
            "mov" => Self::Mov,
            "avi" => Self::Avi,
            "wmv" => Self::Wmv,
            "flv" => Self::Flv,
            "webm" => Self::Webm,
            "mkv" => Self::Mkv,
            "mp3" => Self::Mp3,
            "wav" => Self::Wav,
            "ogg" => Self::Ogg,
            "aac" => Self::Aac,
            "flac" => Self::Flac,
            "m4a" => Self::M4a,
            "jpg" => Self::Jpg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "bmp" => Self::Bmp,
            "webp" => Self::Webp,
            "svg" => Self::Svg,
            "tiff" => Self::Tiff,
            _ => return None,
        };
        Some(format)
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Legal targets for video input in normal mode.
pub const VIDEO_TARGETS: &[TargetFormat] = &[
    TargetFormat::Mp4,
    TargetFormat::Mov,
    TargetFormat::Avi,
    TargetFormat::Wmv,
    TargetFormat::Flv,
    TargetFormat::Webm,
    TargetFormat::Mkv,
];

/// Legal targets for audio input in normal mode, and for audio extraction.
pub const AUDIO_TARGETS: &[TargetFormat] = &[
    TargetFormat::Mp3,
    TargetFormat::Wav,
    TargetFormat::Ogg,
    TargetFormat::Aac,
    TargetFormat::Flac,
    TargetFormat::M4a,
];

/// Legal targets for image input in normal mode.
pub const IMAGE_TARGETS: &[TargetFormat] = &[
    TargetFormat::Jpg,
    TargetFormat::Png,
    TargetFormat::Gif,
    TargetFormat::Bmp,
    TargetFormat::Webp,
    TargetFormat::Svg,
    TargetFormat::Tiff,
];

/// The allowed target set and its canonical default for a
/// `(classification, mode)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Every format the user may legally select.
    pub allowed: &'static [TargetFormat],
    /// The format offered when nothing has been selected yet.
    pub default: TargetFormat,
}

impl FormatOptions {
    /// Returns true if `format` is a member of the allowed set.
    pub fn permits(&self, format: TargetFormat) -> bool {
        self.allowed.contains(&format)
    }
}

/// Why a `(classification, mode)` pair admits no target formats.
///
/// An empty allowed set is never silently accepted. Resolution fails
/// instead, and the option builder maps this onto a user-facing
/// [`crate::request::ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The input classification is `Unsupported`; no mode is legal.
    #[error("unsupported input file type")]
    UnsupportedInput,

    /// Audio extraction was requested for a non-video input.
    #[error("audio extraction requires a video input file")]
    ExtractAudioFromNonVideo,
}

/// Computes the allowed target set and default for `(kind, mode)`.
pub fn resolve(kind: MediaKind, mode: ConversionMode) -> Result<FormatOptions, ResolveError> {
    match (kind, mode) {
        (MediaKind::Unsupported, _) => Err(ResolveError::UnsupportedInput),
        (MediaKind::Video, ConversionMode::ExtractAudio) => Ok(FormatOptions {
            allowed: AUDIO_TARGETS,
            default: TargetFormat::Mp3,
        }),
        (_, ConversionMode::ExtractAudio) => Err(ResolveError::ExtractAudioFromNonVideo),
        (MediaKind::Video, ConversionMode::Normal) => Ok(FormatOptions {
            allowed: VIDEO_TARGETS,
            default: TargetFormat::Mp4,
        }),
        (MediaKind::Audio, ConversionMode::Normal) => Ok(FormatOptions {
            allowed: AUDIO_TARGETS,
            default: TargetFormat::Mp3,
        }),
        (MediaKind::Image, ConversionMode::Normal) => Ok(FormatOptions {
            allowed: IMAGE_TARGETS,
            default: TargetFormat::Png,
        }),
    }
}
