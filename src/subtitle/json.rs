// JSON export of a parsed track
use super::{format_duration, SubtitleEntry, SubtitleFormat};
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: JsonMetadata,
    subtitles: Vec<JsonSubtitle<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata {
    format: SubtitleFormat,
    subtitle_count: usize,
}

#[derive(Serialize)]
struct JsonSubtitle<'a> {
    index: usize,
    start_ms: u64,
    end_ms: u64,
    start: String,
    end: String,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

/// Render entries as pretty JSON, with time codes formatted in `format`'s grammar.
pub fn to_json(entries: &[SubtitleEntry], format: SubtitleFormat) -> Result<String> {
    let output = JsonOutput {
        metadata: JsonMetadata {
            format,
            subtitle_count: entries.len(),
        },
        subtitles: entries
            .iter()
            .map(|e| JsonSubtitle {
                index: e.index,
                start_ms: e.start_ms(),
                end_ms: e.end_ms(),
                start: format_duration(e.start, format),
                end: format_duration(e.end, format),
                text: &e.text,
                style: e.style.as_deref(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}
