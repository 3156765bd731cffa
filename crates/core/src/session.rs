//! Immutable conversion session values.
//!
//! A [`ConversionSession`] captures everything the user has selected so far:
//! the input file, the conversion mode, the target format and the audio
//! parameters. Each transition returns a fresh value instead of mutating in
//! place, so the compatibility invariant (`target ∈ allowed set`) holds at
//! every step and there is no scattered mutable state to fall out of sync.

use serde::{Deserialize, Serialize};

use crate::classifier::{MediaFile, MediaKind};
use crate::formats::{self, FormatOptions, TargetFormat};
use crate::request::{
    build_request, AudioParameters, ConversionMode, ConversionRequest, ValidationError,
};

/// The current user selections, replaced wholesale on each transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionSession {
    file: Option<MediaFile>,
    mode: ConversionMode,
    target: Option<TargetFormat>,
    audio: AudioParameters,
}

impl ConversionSession {
    /// An empty session: no file, normal mode, default audio parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected file, if any.
    pub fn file(&self) -> Option<&MediaFile> {
        self.file.as_ref()
    }

    /// The classification of the selected file.
    pub fn kind(&self) -> Option<MediaKind> {
        self.file.as_ref().map(|f| f.kind)
    }

    /// The current conversion mode.
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// The currently selected target format. `None` when no file is
    /// selected or the file is unsupported.
    pub fn target(&self) -> Option<TargetFormat> {
        self.target
    }

    /// The current audio parameters (used only when extracting audio).
    pub fn audio_parameters(&self) -> AudioParameters {
        self.audio
    }

    /// The allowed targets and default for the current file and mode.
    pub fn format_options(&self) -> Result<FormatOptions, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::NoFileSelected)?;
        formats::resolve(file.kind, self.mode).map_err(|e| ValidationError::from_resolve(e, file))
    }

    /// Selects a new input file, replacing the whole session.
    ///
    /// The mode resets to `Normal` and the target to the classification's
    /// default (no target for unsupported files). Audio parameters carry
    /// over; they are a persistent preference, not tied to one file.
    pub fn with_file(&self, name: impl Into<String>) -> Self {
        let file = MediaFile::classify(name);
        let target = formats::resolve(file.kind, ConversionMode::Normal)
            .ok()
            .map(|options| options.default);

        Self {
            file: Some(file),
            mode: ConversionMode::Normal,
            target,
            audio: self.audio,
        }
    }

    /// Switches the conversion mode, re-resolving the target.
    ///
    /// The target is re-checked against the new allowed set: switching to
    /// `ExtractAudio` moves a video target to the audio default, and
    /// switching back to `Normal` never leaves a stale audio-only target
    /// selected for a video file.
    pub fn with_mode(&self, mode: ConversionMode) -> Result<Self, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::NoFileSelected)?;
        let options =
            formats::resolve(file.kind, mode).map_err(|e| ValidationError::from_resolve(e, file))?;

        let target = match self.target {
            Some(current) if options.permits(current) => current,
            _ => options.default,
        };

        Ok(Self {
            file: self.file.clone(),
            mode,
            target: Some(target),
            audio: self.audio,
        })
    }

    /// Selects a target format, which must be in the current allowed set.
    pub fn with_target(&self, target: TargetFormat) -> Result<Self, ValidationError> {
        let options = self.format_options()?;
        if !options.permits(target) {
            return Err(ValidationError::InvalidTarget {
                target,
                mode: self.mode,
            });
        }

        Ok(Self {
            file: self.file.clone(),
            mode: self.mode,
            target: Some(target),
            audio: self.audio,
        })
    }

    /// Replaces the audio parameters.
    pub fn with_audio_parameters(&self, audio: AudioParameters) -> Self {
        Self {
            file: self.file.clone(),
            mode: self.mode,
            target: self.target,
            audio,
        }
    }

    /// Builds an immutable request from the current selections.
    pub fn build_request(&self) -> Result<ConversionRequest, ValidationError> {
        let target = match self.target {
            Some(target) => target,
            // No resolved target: either no file or an unsupported one.
            // Run the builder anyway so the caller gets the precise error.
            None => {
                let file = self.file.as_ref().ok_or(ValidationError::NoFileSelected)?;
                return Err(ValidationError::UnsupportedInput {
                    extension: file.extension.clone(),
                });
            }
        };

        build_request(self.file.as_ref(), self.mode, target, Some(&self.audio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AudioBitrate, ChannelLayout, SampleRate};

    #[test]
    fn test_empty_session_has_no_target() {
        let session = ConversionSession::new();
        assert_eq!(session.file(), None);
        assert_eq!(session.target(), None);
        assert_eq!(session.mode(), ConversionMode::Normal);
    }

    #[test]
    fn test_file_selection_offers_classification_default() {
        let session = ConversionSession::new();
        assert_eq!(session.with_file("clip.mp4").target(), Some(TargetFormat::Mp4));
        assert_eq!(session.with_file("song.flac").target(), Some(TargetFormat::Mp3));
        assert_eq!(session.with_file("photo.bmp").target(), Some(TargetFormat::Png));
        assert_eq!(session.with_file("report.xyz").target(), None);
    }

    #[test]
    fn test_file_selection_resets_mode() {
        let session = ConversionSession::new()
            .with_file("clip.mp4")
            .with_mode(ConversionMode::ExtractAudio)
            .unwrap();

        let replaced = session.with_file("other.mkv");
        assert_eq!(replaced.mode(), ConversionMode::Normal);
        assert_eq!(replaced.target(), Some(TargetFormat::Mp4));
    }

    #[test]
    fn test_extract_audio_switch_moves_target_to_audio_default() {
        let session = ConversionSession::new().with_file("clip.mp4");
        let extracting = session.with_mode(ConversionMode::ExtractAudio).unwrap();
        assert_eq!(extracting.target(), Some(TargetFormat::Mp3));
    }

    #[test]
    fn test_switching_back_to_normal_drops_stale_audio_target() {
        let session = ConversionSession::new()
            .with_file("clip.mp4")
            .with_mode(ConversionMode::ExtractAudio)
            .unwrap()
            .with_target(TargetFormat::Flac)
            .unwrap();

        // flac is not a legal video target; going back must re-resolve.
        let normal = session.with_mode(ConversionMode::Normal).unwrap();
        assert_eq!(normal.target(), Some(TargetFormat::Mp4));
    }

    #[test]
    fn test_mode_switch_keeps_target_still_in_set() {
        // Audio input: mp3 -> extract is illegal, but normal-to-normal with a
        // target already in the set must keep it.
        let session = ConversionSession::new()
            .with_file("song.wav")
            .with_target(TargetFormat::Ogg)
            .unwrap();
        let same = session.with_mode(ConversionMode::Normal).unwrap();
        assert_eq!(same.target(), Some(TargetFormat::Ogg));
    }

    #[test]
    fn test_extract_audio_illegal_for_audio_input() {
        let session = ConversionSession::new().with_file("song.mp3");
        let result = session.with_mode(ConversionMode::ExtractAudio);
        assert_eq!(
            result,
            Err(ValidationError::UnsupportedOperation {
                kind: MediaKind::Audio
            })
        );
    }

    #[test]
    fn test_target_outside_set_rejected() {
        let session = ConversionSession::new().with_file("clip.mp4");
        let result = session.with_target(TargetFormat::Jpg);
        assert_eq!(
            result,
            Err(ValidationError::InvalidTarget {
                target: TargetFormat::Jpg,
                mode: ConversionMode::Normal,
            })
        );
    }

    #[test]
    fn test_audio_parameters_survive_file_changes() {
        let params = AudioParameters {
            bitrate: AudioBitrate::Kbps320,
            channel_layout: ChannelLayout::Mono,
            sample_rate: SampleRate::Hz96000,
        };
        let session = ConversionSession::new()
            .with_audio_parameters(params)
            .with_file("clip.mp4");
        assert_eq!(session.audio_parameters(), params);
    }

    #[test]
    fn test_build_request_for_unsupported_file() {
        let session = ConversionSession::new().with_file("report.xyz");
        assert_eq!(
            session.build_request(),
            Err(ValidationError::UnsupportedInput {
                extension: "xyz".to_string()
            })
        );
    }

    #[test]
    fn test_build_request_normal() {
        let session = ConversionSession::new().with_file("clip.mp4");
        let request = session.build_request().unwrap();
        assert_eq!(request.target_format, TargetFormat::Mp4);
        assert_eq!(request.mode, ConversionMode::Normal);
        assert_eq!(request.audio_parameters, None);
    }

    #[test]
    fn test_built_target_always_in_allowed_set() {
        for name in ["clip.mp4", "song.mp3", "photo.jpg"] {
            let session = ConversionSession::new().with_file(name);
            let request = session.build_request().unwrap();
            let options = session.format_options().unwrap();
            assert!(options.permits(request.target_format));
        }
    }
}
