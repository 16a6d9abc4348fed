use super::edit::{reindex, shift_time};
use super::{SubtitleEntry, SubtitleFormat, SubtitleTrack};
use std::time::Duration;
use tracing::debug;

/// Combine two tracks into one time-ordered track for `output`.
///
/// Each track is shifted by its own signed offset (results below zero clamp to zero),
/// truncated to the output format's resolution, then stable-sorted by start time so
/// that ties keep `first` ahead of `second`. Indices are reassigned 1..N.
pub fn merge(
    first: &[SubtitleEntry],
    offset_first_ms: i64,
    second: &[SubtitleEntry],
    offset_second_ms: i64,
    output: SubtitleFormat,
) -> SubtitleTrack {
    let mut merged: SubtitleTrack = first
        .iter()
        .map(|entry| shifted(entry, offset_first_ms, output))
        .chain(second.iter().map(|entry| shifted(entry, offset_second_ms, output)))
        .collect();

    // `sort_by_key` is stable
    merged.sort_by_key(|entry| entry.start);
    reindex(&mut merged);

    debug!(
        "Merged {} + {} entries for {} output",
        first.len(),
        second.len(),
        output
    );
    merged
}

fn shifted(entry: &SubtitleEntry, offset_ms: i64, output: SubtitleFormat) -> SubtitleEntry {
    let quantize = |time: Duration| {
        Duration::from_millis(output.quantize(shift_time(time, offset_ms).as_millis() as u64))
    };

    SubtitleEntry {
        index: entry.index,
        start: quantize(entry.start),
        end: quantize(entry.end),
        text: entry.text.clone(),
        style: entry.style.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start_ms: u64, text: &str) -> SubtitleEntry {
        SubtitleEntry::new(
            1,
            Duration::from_millis(start_ms),
            Duration::from_millis(start_ms + 1000),
            text,
        )
    }

    fn texts(entries: &[SubtitleEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_merge_orders_by_start_time() {
        let a = vec![entry(5000, "A")];
        let b = vec![entry(2000, "B")];

        let merged = merge(&a, 0, &b, 0, SubtitleFormat::Srt);
        assert_eq!(texts(&merged), ["B", "A"]);

        let merged = merge(&a, 0, &b, 10_000, SubtitleFormat::Srt);
        assert_eq!(texts(&merged), ["A", "B"]);
        assert_eq!(merged[1].start, Duration::from_millis(12_000));
        assert_eq!(merged[1].end, Duration::from_millis(13_000));
    }

    #[test]
    fn test_merge_reindexes() {
        let a = vec![entry(0, "a1"), entry(4000, "a2")];
        let b = vec![entry(2000, "b1"), entry(6000, "b2")];

        let merged = merge(&a, 0, &b, 0, SubtitleFormat::Vtt);
        let indices: Vec<usize> = merged.iter().map(|e| e.index).collect();

        assert_eq!(texts(&merged), ["a1", "b1", "a2", "b2"]);
        assert_eq!(indices, [1, 2, 3, 4]);
    }

    #[test]
    fn test_merge_ties_keep_first_track_ahead() {
        let a = vec![entry(1000, "A")];
        let b = vec![entry(1000, "B")];
        assert_eq!(texts(&merge(&a, 0, &b, 0, SubtitleFormat::Srt)), ["A", "B"]);
    }

    #[test]
    fn test_merge_sorts_on_output_resolution() {
        // 1005 and 1001 both become 0:00:01.00 in ASS, so they tie
        let a = vec![entry(1005, "A")];
        let b = vec![entry(1001, "B")];

        assert_eq!(texts(&merge(&a, 0, &b, 0, SubtitleFormat::Srt)), ["B", "A"]);

        let merged = merge(&a, 0, &b, 0, SubtitleFormat::Ass);
        assert_eq!(texts(&merged), ["A", "B"]);
        assert_eq!(merged[0].start, Duration::from_millis(1000));
    }

    #[test]
    fn test_merge_negative_offset() {
        let a = vec![entry(3000, "A")];
        let b = vec![entry(5000, "B"), entry(500, "B0")];

        let merged = merge(&a, 0, &b, -4000, SubtitleFormat::Srt);

        assert_eq!(texts(&merged), ["B0", "B", "A"]);
        assert_eq!(merged[0].start, Duration::ZERO);
        assert_eq!(merged[1].start, Duration::from_millis(1000));
    }

    #[test]
    fn test_merge_keeps_style() {
        let a = vec![entry(0, "styled").with_style("Top")];
        let merged = merge(&a, 0, &[], 0, SubtitleFormat::Ass);
        assert_eq!(merged[0].style.as_deref(), Some("Top"));
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge(&[], 100, &[], -100, SubtitleFormat::Srt).is_empty());
    }
}
