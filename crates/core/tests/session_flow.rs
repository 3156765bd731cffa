//! Session and format-resolution integration tests.
//!
//! Exercises the classifier, the resolver and the request builder through
//! the public session API: the legality matrix of kind × mode, the
//! target-membership invariant and re-resolution on mode switches.

use mediamorph_core::{
    ConversionMode, ConversionSession, MediaFile, MediaKind, TargetFormat, ValidationError,
    formats::{self, AUDIO_TARGETS, IMAGE_TARGETS, VIDEO_TARGETS},
    request::build_request,
};

#[test]
fn test_resolver_legality_matrix() {
    let video = formats::resolve(MediaKind::Video, ConversionMode::Normal).unwrap();
    assert_eq!(video.allowed, VIDEO_TARGETS);
    assert_eq!(video.default, TargetFormat::Mp4);

    let audio = formats::resolve(MediaKind::Audio, ConversionMode::Normal).unwrap();
    assert_eq!(audio.allowed, AUDIO_TARGETS);
    assert_eq!(audio.default, TargetFormat::Mp3);

    let image = formats::resolve(MediaKind::Image, ConversionMode::Normal).unwrap();
    assert_eq!(image.allowed, IMAGE_TARGETS);
    assert_eq!(image.default, TargetFormat::Png);

    let extract = formats::resolve(MediaKind::Video, ConversionMode::ExtractAudio).unwrap();
    assert_eq!(extract.allowed, AUDIO_TARGETS);
    assert_eq!(extract.default, TargetFormat::Mp3);

    assert!(formats::resolve(MediaKind::Audio, ConversionMode::ExtractAudio).is_err());
    assert!(formats::resolve(MediaKind::Image, ConversionMode::ExtractAudio).is_err());
    assert!(formats::resolve(MediaKind::Unsupported, ConversionMode::Normal).is_err());
    assert!(formats::resolve(MediaKind::Unsupported, ConversionMode::ExtractAudio).is_err());
}

#[test]
fn test_every_allowed_target_builds_a_request() {
    let cases = [
        ("clip.mp4", VIDEO_TARGETS),
        ("song.wav", AUDIO_TARGETS),
        ("photo.jpg", IMAGE_TARGETS),
    ];

    for (name, targets) in cases {
        let file = MediaFile::classify(name);
        for &target in targets {
            let request =
                build_request(Some(&file), ConversionMode::Normal, target, None).unwrap();
            assert_eq!(request.target_format, target);
            assert_eq!(request.audio_parameters, None);
        }
    }
}

#[test]
fn test_target_outside_allowed_set_never_builds() {
    let file = MediaFile::classify("photo.jpg");
    for &target in VIDEO_TARGETS {
        let result = build_request(Some(&file), ConversionMode::Normal, target, None);
        assert_eq!(
            result,
            Err(ValidationError::InvalidTarget {
                target,
                mode: ConversionMode::Normal,
            })
        );
    }
}

#[test]
fn test_mode_round_trip_re_resolves_target() {
    let session = ConversionSession::new()
        .with_file("movie.avi")
        .with_target(TargetFormat::Webm)
        .unwrap();

    // Into extraction: the video target cannot survive, the audio default
    // takes its place.
    let extracting = session.with_mode(ConversionMode::ExtractAudio).unwrap();
    assert_eq!(extracting.target(), Some(TargetFormat::Mp3));

    // Back to normal: mp3 is not a video target, so the default returns.
    let normal = extracting.with_mode(ConversionMode::Normal).unwrap();
    assert_eq!(normal.target(), Some(TargetFormat::Mp4));
}

#[test]
fn test_classification_is_case_insensitive() {
    assert_eq!(MediaFile::classify("CLIP.MP4").kind, MediaKind::Video);
    assert_eq!(MediaFile::classify("Song.FLAC").kind, MediaKind::Audio);
    assert_eq!(MediaFile::classify("photo.JpG").kind, MediaKind::Image);
}

#[test]
fn test_names_without_extension_are_unsupported() {
    let file = MediaFile::classify("README");
    assert_eq!(file.kind, MediaKind::Unsupported);
    assert!(!file.kind.is_convertible());

    let result = build_request(
        Some(&file),
        ConversionMode::Normal,
        TargetFormat::Mp4,
        None,
    );
    assert!(matches!(
        result,
        Err(ValidationError::UnsupportedInput { .. })
    ));
}
