//! Types for conversion requests.

use serde::{Deserialize, Serialize};

use crate::classifier::MediaFile;
use crate::formats::TargetFormat;

/// How the input file should be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Format-to-format conversion within the input's media kind.
    #[default]
    Normal,
    /// Derive an audio track from a video input. Only legal for video files.
    ExtractAudio,
}

impl std::fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionMode::Normal => write!(f, "normal"),
            ConversionMode::ExtractAudio => write!(f, "extract_audio"),
        }
    }
}

/// Audio bitrate for extracted tracks, restricted to the offered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioBitrate {
    Kbps64,
    #[default]
    Kbps128,
    Kbps192,
    Kbps256,
    Kbps320,
}

impl AudioBitrate {
    /// Bitrate in kilobits per second.
    pub fn as_kbps(&self) -> u32 {
        match self {
            Self::Kbps64 => 64,
            Self::Kbps128 => 128,
            Self::Kbps192 => 192,
            Self::Kbps256 => 256,
            Self::Kbps320 => 320,
        }
    }
}

/// Channel layout for extracted audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    Mono,
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Number of channels.
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Sample rate for extracted audio, restricted to the offered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleRate {
    Hz22050,
    #[default]
    Hz44100,
    Hz48000,
    Hz96000,
}

impl SampleRate {
    /// Sample rate in Hertz.
    pub fn as_hz(&self) -> u32 {
        match self {
            Self::Hz22050 => 22050,
            Self::Hz44100 => 44100,
            Self::Hz48000 => 48000,
            Self::Hz96000 => 96000,
        }
    }
}

/// Quality parameters for audio extraction.
///
/// Present on a request if and only if its mode is
/// [`ConversionMode::ExtractAudio`]. Defaults match what the selector offers
/// before the user touches anything: 128 kbps, stereo, 44.1 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioParameters {
    pub bitrate: AudioBitrate,
    pub channel_layout: ChannelLayout,
    pub sample_rate: SampleRate,
}

/// A validated conversion request, immutable once submitted.
///
/// Only the option builder ([`super::build_request`]) constructs these, so a
/// request in hand always satisfies the compatibility invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// The classified input file.
    pub source: MediaFile,
    /// Target output format, a member of the resolved allowed set.
    pub target_format: TargetFormat,
    /// Conversion mode.
    pub mode: ConversionMode,
    /// Audio parameters, present iff `mode == ExtractAudio`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_parameters: Option<AudioParameters>,
}

impl ConversionRequest {
    /// Returns true if this request extracts an audio track.
    pub fn is_extract_audio(&self) -> bool {
        self.mode == ConversionMode::ExtractAudio
    }
}
