// WebVTT subtitle format
use super::{
    format_duration, normalize_newlines, parse_range, SubtitleCodec, SubtitleEntry,
    SubtitleFormat, SubtitleTrack,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}:\d{2}:\d{2}\.\d{3})\s*-->\s*(\d{2,}:\d{2}:\d{2}\.\d{3})")
        .expect("Invalid regex")
});

pub struct VttCodec;

impl SubtitleCodec for VttCodec {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Vtt
    }

    fn detect(&self, content: &str) -> bool {
        normalize_newlines(content).trim().starts_with("WEBVTT")
    }

    fn parse(&self, content: &str) -> SubtitleTrack {
        let content = normalize_newlines(content);
        let lines: Vec<&str> = content.split('\n').collect();
        let mut entries = Vec::new();

        // Skip the header and anything else before the first cue timing
        let mut i = lines
            .iter()
            .position(|line| line.contains("-->"))
            .unwrap_or(lines.len());

        while i < lines.len() {
            let line = lines[i].trim();
            i += 1;

            if !line.contains("-->") {
                continue;
            }

            let Some(caps) = TIME_RANGE_RE.captures(line) else {
                debug!("Skipping VTT timing line: {:?}", line);
                continue;
            };

            let mut text_lines = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() {
                text_lines.push(lines[i].trim_end());
                i += 1;
            }

            match parse_range(&caps[1], &caps[2], SubtitleFormat::Vtt) {
                Ok((start, end)) => {
                    entries.push(SubtitleEntry::new(
                        entries.len() + 1,
                        start,
                        end,
                        text_lines.join("\n"),
                    ));
                }
                Err(e) => debug!("Skipping VTT cue: {}", e),
            }
        }

        entries
    }

    fn write(&self, entries: &[SubtitleEntry]) -> String {
        let body = entries
            .iter()
            .map(|entry| {
                format!(
                    "{} --> {}\n{}\n",
                    format_duration(entry.start, SubtitleFormat::Vtt),
                    format_duration(entry.end, SubtitleFormat::Vtt),
                    entry.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!("WEBVTT\n\n{}", body)
    }
}
