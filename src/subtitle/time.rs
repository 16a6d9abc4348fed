// Time codes: canonical milliseconds <-> per-format text
use super::SubtitleFormat;
use crate::error::{Result, SubkitError};
use std::time::Duration;

/// Parse a time code written in `format`'s grammar into milliseconds.
///
/// SRT and VTT share `H+:MM:SS{,|.}mmm`; either fractional separator is accepted.
/// ASS uses `H:MM:SS.cc`, where the fraction counts centiseconds.
pub fn parse_time(text: &str, format: SubtitleFormat) -> Result<u64> {
    let malformed = || SubkitError::MalformedTimeCode {
        format,
        input: text.to_string(),
    };

    let normalized = text.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }

    let (seconds, fraction) = match parts[2].split_once('.') {
        Some((_, "")) => return Err(malformed()),
        Some((s, f)) => (s, f),
        None => (parts[2], ""),
    };

    let max_fraction_digits = match format {
        SubtitleFormat::Srt | SubtitleFormat::Vtt => 3,
        SubtitleFormat::Ass => 2,
    };
    if fraction.len() > max_fraction_digits {
        return Err(malformed());
    }

    let hours = parse_field(parts[0]).ok_or_else(malformed)?;
    let minutes = parse_field(parts[1]).ok_or_else(malformed)?;
    let seconds = parse_field(seconds).ok_or_else(malformed)?;
    // The fraction is decimal: "5" after the point is 500 ms, "50" is 500 ms
    let fraction_ms = if fraction.is_empty() {
        0
    } else {
        let value = parse_field(fraction).ok_or_else(malformed)?;
        value * 10u64.pow(3 - fraction.len() as u32)
    };

    hours
        .checked_mul(3_600_000)
        .and_then(|h| h.checked_add(minutes * 60_000))
        .and_then(|t| t.checked_add(seconds * 1_000))
        .and_then(|t| t.checked_add(fraction_ms))
        .ok_or_else(malformed)
}

fn parse_field(field: &str) -> Option<u64> {
    // Reject signs and whitespace that `str::parse` would otherwise accept or mask
    if field.is_empty() || field.len() > 12 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Format milliseconds as a time code in `format`'s grammar.
pub fn format_time(ms: u64, format: SubtitleFormat) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    match format {
        SubtitleFormat::Srt => format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis),
        SubtitleFormat::Vtt => format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis),
        SubtitleFormat::Ass => {
            format!("{}:{:02}:{:02}.{:02}", hours, minutes, seconds, millis / 10)
        }
    }
}

pub fn parse_duration(text: &str, format: SubtitleFormat) -> Result<Duration> {
    parse_time(text, format).map(Duration::from_millis)
}

/// Parse a start/end pair, failing on the first malformed code.
pub fn parse_range(start: &str, end: &str, format: SubtitleFormat) -> Result<(Duration, Duration)> {
    Ok((parse_duration(start, format)?, parse_duration(end, format)?))
}

pub fn format_duration(d: Duration, format: SubtitleFormat) -> String {
    format_time(d.as_millis() as u64, format)
}
