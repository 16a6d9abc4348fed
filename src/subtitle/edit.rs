use super::{SubtitleEntry, SubtitleFormat, SubtitleTrack};
use std::time::Duration;

/// Re-number entries 1..N in their current order.
pub fn reindex(entries: &mut [SubtitleEntry]) {
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.index = i + 1;
    }
}

/// Append an empty cue at time zero and return its position.
pub fn add_blank_entry(entries: &mut SubtitleTrack) -> usize {
    entries.push(SubtitleEntry::new(
        entries.len() + 1,
        Duration::ZERO,
        Duration::ZERO,
        "",
    ));
    entries.len() - 1
}

/// Remove the cue at `position`, then re-number what is left.
pub fn remove_entry(entries: &mut SubtitleTrack, position: usize) -> Option<SubtitleEntry> {
    if position >= entries.len() {
        return None;
    }
    let removed = entries.remove(position);
    reindex(entries);
    Some(removed)
}

/// Replace a cue's text. Returns `false` when `position` is out of range.
pub fn update_text(entries: &mut [SubtitleEntry], position: usize, text: impl Into<String>) -> bool {
    match entries.get_mut(position) {
        Some(entry) => {
            entry.text = text.into();
            true
        }
        None => false,
    }
}

/// Replace a cue's timing. No ordering checks are made.
pub fn update_times(
    entries: &mut [SubtitleEntry],
    position: usize,
    start: Duration,
    end: Duration,
) -> bool {
    match entries.get_mut(position) {
        Some(entry) => {
            entry.start = start;
            entry.end = end;
            true
        }
        None => false,
    }
}

/// Positions of cues that would not come back after writing in `format` and
/// reading the result again. An SRT block needs at least one text line.
pub fn lost_on_reload(entries: &[SubtitleEntry], format: SubtitleFormat) -> Vec<usize> {
    match format {
        SubtitleFormat::Srt => entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.text.trim().is_empty())
            .map(|(i, _)| i)
            .collect(),
        SubtitleFormat::Vtt | SubtitleFormat::Ass => Vec::new(),
    }
}

/// Move every cue by a signed number of milliseconds, clamping at zero.
pub fn shift(entries: &mut [SubtitleEntry], offset_ms: i64) {
    for entry in entries.iter_mut() {
        entry.start = shift_time(entry.start, offset_ms);
        entry.end = shift_time(entry.end, offset_ms);
    }
}

pub(crate) fn shift_time(time: Duration, offset_ms: i64) -> Duration {
    let ms = time.as_millis() as u64;
    let shifted = if offset_ms >= 0 {
        ms.saturating_add(offset_ms as u64)
    } else {
        ms.saturating_sub(offset_ms.unsigned_abs())
    };
    Duration::from_millis(shifted)
}
