use super::{create_codec, SubtitleFormat};
use tracing::debug;

/// Formats in the order their signatures are checked; the first match wins.
///
/// ASS must be checked before SRT because dialogue text can contain SRT-shaped blocks.
const DETECTION_ORDER: [SubtitleFormat; 3] =
    [SubtitleFormat::Vtt, SubtitleFormat::Ass, SubtitleFormat::Srt];

/// Classify raw subtitle text, or `None` when no grammar's signature is present.
pub fn detect_format(content: &str) -> Option<SubtitleFormat> {
    let detected = DETECTION_ORDER
        .into_iter()
        .find(|format| create_codec(*format).detect(content));

    debug!("Detected subtitle format: {:?}", detected);
    detected
}
