pub mod ass;
pub mod detect;
pub mod edit;
pub mod json;
pub mod merge;
pub mod srt;
pub mod time;
pub mod vtt;

pub use detect::detect_format;
pub use edit::{
    add_blank_entry, lost_on_reload, reindex, remove_entry, shift, update_text, update_times,
};
pub use merge::merge;
pub use time::{format_duration, format_time, parse_duration, parse_range, parse_time};

use crate::error::SubkitError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// One timed cue. Times are canonical; the format only matters when reading or writing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: Duration,
    pub end: Duration,
    pub text: String,
    /// Named ASS style; `None` for SRT and VTT cues.
    pub style: Option<String>,
}

impl SubtitleEntry {
    pub fn new(index: usize, start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            index,
            start,
            end,
            text: text.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn start_ms(&self) -> u64 {
        self.start.as_millis() as u64
    }

    pub fn end_ms(&self) -> u64 {
        self.end.as_millis() as u64
    }
}

/// An ordered sequence of cues, in display order.
pub type SubtitleTrack = Vec<SubtitleEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    #[default]
    Srt,
    Vtt,
    Ass,
}

impl std::fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleFormat::Srt => write!(f, "srt"),
            SubtitleFormat::Vtt => write!(f, "vtt"),
            SubtitleFormat::Ass => write!(f, "ass"),
        }
    }
}

impl std::str::FromStr for SubtitleFormat {
    type Err = SubkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "srt" => Ok(SubtitleFormat::Srt),
            "vtt" | "webvtt" => Ok(SubtitleFormat::Vtt),
            "ass" => Ok(SubtitleFormat::Ass),
            _ => Err(SubkitError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl SubtitleFormat {
    pub const ALL: [SubtitleFormat; 3] =
        [SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Ass];

    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Ass => "ass",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Smallest time step the format can express.
    pub fn resolution_ms(&self) -> u64 {
        match self {
            SubtitleFormat::Srt | SubtitleFormat::Vtt => 1,
            SubtitleFormat::Ass => 10,
        }
    }

    /// Truncate a time to what survives a write in this format.
    pub fn quantize(&self, ms: u64) -> u64 {
        let step = self.resolution_ms();
        ms - ms % step
    }
}

/// Grammar for one subtitle format: how to recognise, read and write it.
pub trait SubtitleCodec {
    fn format(&self) -> SubtitleFormat;

    /// Whether `content` carries this format's signature.
    fn detect(&self, content: &str) -> bool;

    /// Extract cues in file order. Malformed blocks are skipped.
    fn parse(&self, content: &str) -> SubtitleTrack;

    /// Serialize cues in the given order.
    fn write(&self, entries: &[SubtitleEntry]) -> String;

    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

pub fn create_codec(format: SubtitleFormat) -> Box<dyn SubtitleCodec> {
    match format {
        SubtitleFormat::Srt => Box::new(srt::SrtCodec),
        SubtitleFormat::Vtt => Box::new(vtt::VttCodec),
        SubtitleFormat::Ass => Box::new(ass::AssCodec::default()),
    }
}

/// Normalise line endings and drop a leading byte-order mark.
pub(crate) fn normalize_newlines(content: &str) -> String {
    content
        .strip_prefix('\u{feff}')
        .unwrap_or(content)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}
