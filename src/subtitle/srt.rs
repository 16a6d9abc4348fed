// SRT subtitle format
use super::{
    format_duration, normalize_newlines, parse_range, SubtitleCodec, SubtitleEntry,
    SubtitleFormat, SubtitleTrack,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// An index line directly followed by a comma-decimal time range, at the start of any line.
static SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\d+\s*\n\d{2}:\d{2}:\d{2},\d{3}\s*-->\s*\d{2}:\d{2}:\d{2},\d{3}")
        .expect("Invalid regex")
});

static BLOCK_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Invalid regex"));

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2}[,.]\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2}[,.]\d{3})")
        .expect("Invalid regex")
});

pub struct SrtCodec;

impl SubtitleCodec for SrtCodec {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Srt
    }

    fn detect(&self, content: &str) -> bool {
        SIGNATURE_RE.is_match(normalize_newlines(content).trim())
    }

    fn parse(&self, content: &str) -> SubtitleTrack {
        let content = normalize_newlines(content);
        let mut entries = Vec::new();

        for block in BLOCK_SEPARATOR_RE.split(content.trim()) {
            let lines: Vec<&str> = block.trim().split('\n').collect();
            if lines.len() < 3 {
                debug!("Skipping SRT block with {} line(s)", lines.len());
                continue;
            }

            let Some(caps) = TIME_RANGE_RE.captures(lines[1]) else {
                debug!("Skipping SRT block without time range: {:?}", lines[1]);
                continue;
            };

            let (start, end) = match parse_range(&caps[1], &caps[2], SubtitleFormat::Srt) {
                Ok(times) => times,
                Err(e) => {
                    debug!("Skipping SRT block: {}", e);
                    continue;
                }
            };

            let index = lines[0]
                .trim()
                .parse()
                .unwrap_or_else(|_| entries.len() + 1);
            let text = lines[2..]
                .iter()
                .map(|line| line.trim_end())
                .collect::<Vec<_>>()
                .join("\n");

            entries.push(SubtitleEntry::new(index, start, end, text));
        }

        entries
    }

    fn write(&self, entries: &[SubtitleEntry]) -> String {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{}\n{} --> {}\n{}\n",
                    i + 1,
                    format_duration(entry.start, SubtitleFormat::Srt),
                    format_duration(entry.end, SubtitleFormat::Srt),
                    entry.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
