//! Conversion request assembly and validation.
//!
//! The option builder turns user selections into an immutable
//! [`ConversionRequest`], or rejects them with a rule-specific
//! [`ValidationError`]. Validation always resolves locally: a request that
//! fails here never reaches the conversion service.

mod error;
mod types;

pub use error::ValidationError;
pub use types::{
    AudioBitrate, AudioParameters, ChannelLayout, ConversionMode, ConversionRequest, SampleRate,
};

use crate::classifier::MediaFile;
use crate::formats::{self, TargetFormat};

/// Builds a [`ConversionRequest`] from user selections.
///
/// Rules are applied in order:
/// 1. a file must be selected;
/// 2. the mode must be legal for the file's classification;
/// 3. the target must be in the resolved allowed set;
/// 4. audio parameters must be present when extracting audio.
///
/// A `Normal` request never carries audio parameters, so the built request
/// upholds the "present iff extracting" invariant regardless of what was
/// passed in.
pub fn build_request(
    file: Option<&MediaFile>,
    mode: ConversionMode,
    target: TargetFormat,
    audio: Option<&AudioParameters>,
) -> Result<ConversionRequest, ValidationError> {
    let file = file.ok_or(ValidationError::NoFileSelected)?;

    let options =
        formats::resolve(file.kind, mode).map_err(|e| ValidationError::from_resolve(e, file))?;

    if !options.permits(target) {
        return Err(ValidationError::InvalidTarget { target, mode });
    }

    let audio_parameters = match mode {
        ConversionMode::ExtractAudio => {
            Some(audio.copied().ok_or(ValidationError::MissingAudioParameters)?)
        }
        ConversionMode::Normal => None,
    };

    Ok(ConversionRequest {
        source: file.clone(),
        target_format: target,
        mode,
        audio_parameters,
    })
}
