// Advanced SubStation Alpha subtitle format
use super::{
    format_duration, normalize_newlines, parse_duration, SubtitleCodec, SubtitleEntry,
    SubtitleFormat, SubtitleTrack,
};
use crate::config::DEFAULT_ASS_TITLE;
use crate::error::Result;
use tracing::debug;

const DEFAULT_STYLE: &str = "Default";

/// Event fields assumed when `[Events]` has no `Format:` line.
const CANONICAL_EVENT_FIELDS: [&str; 10] = [
    "Layer", "Start", "End", "Style", "Name", "MarginL", "MarginR", "MarginV", "Effect", "Text",
];

const STYLES_SECTION: &str = "[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,2,2,10,10,10,1
";

const EVENTS_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

pub struct AssCodec {
    title: String,
}

impl Default for AssCodec {
    fn default() -> Self {
        Self::with_title(DEFAULT_ASS_TITLE)
    }
}

impl AssCodec {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Positions of the fields we read out of a `Dialogue:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EventLayout {
    field_count: usize,
    start: usize,
    end: usize,
    style: Option<usize>,
    text: usize,
}

impl EventLayout {
    fn from_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let names: Vec<String> = fields
            .into_iter()
            .map(|f| f.trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|n| n == name);

        let layout = Self {
            field_count: names.len(),
            start: find("start")?,
            end: find("end")?,
            style: find("style"),
            text: find("text")?,
        };

        // Text swallows every remaining comma, so it has to come last
        (layout.text + 1 == layout.field_count).then_some(layout)
    }

    fn canonical() -> Self {
        Self {
            field_count: CANONICAL_EVENT_FIELDS.len(),
            start: 1,
            end: 2,
            style: Some(3),
            text: 9,
        }
    }

    fn parse_dialogue(&self, payload: &str) -> Result<Option<SubtitleEntry>> {
        let parts: Vec<&str> = payload.split(',').collect();
        if parts.len() < self.field_count {
            return Ok(None);
        }

        let start = parse_duration(parts[self.start], SubtitleFormat::Ass)?;
        let end = parse_duration(parts[self.end], SubtitleFormat::Ass)?;
        let text = decode_text(parts[self.text..].join(",").trim());

        let mut entry = SubtitleEntry::new(0, start, end, text);
        entry.style = self.style.map(|i| parts[i].trim().to_string());
        Ok(Some(entry))
    }
}

/// `\N` is a hard line break inside a single dialogue line.
fn decode_text(text: &str) -> String {
    text.replace("\\N", "\n")
}

fn encode_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\\N")
}

impl SubtitleCodec for AssCodec {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Ass
    }

    fn detect(&self, content: &str) -> bool {
        content.contains("[Script Info]") || content.contains("[Events]")
    }

    fn parse(&self, content: &str) -> SubtitleTrack {
        let content = normalize_newlines(content);
        let mut entries = Vec::new();
        let mut in_events = false;
        let mut layout = EventLayout::canonical();

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with('[') {
                in_events = trimmed == "[Events]";
                continue;
            }

            if !in_events {
                continue;
            }

            if let Some(format_line) = trimmed.strip_prefix("Format:") {
                match EventLayout::from_fields(format_line.split(',')) {
                    Some(l) => layout = l,
                    None => {
                        debug!("Unusable event format line, keeping canonical order: {:?}", trimmed);
                        layout = EventLayout::canonical();
                    }
                }
                continue;
            }

            let Some(payload) = trimmed.strip_prefix("Dialogue:") else {
                continue;
            };

            match layout.parse_dialogue(payload.trim_start()) {
                Ok(Some(mut entry)) => {
                    entry.index = entries.len() + 1;
                    entries.push(entry);
                }
                Ok(None) => debug!("Skipping dialogue with too few fields: {:?}", trimmed),
                Err(e) => debug!("Skipping dialogue: {}", e),
            }
        }

        entries
    }

    fn write(&self, entries: &[SubtitleEntry]) -> String {
        let mut output = format!(
            "[Script Info]\nTitle: {}\nScriptType: v4.00+\n\n{}\n[Events]\n{}\n",
            self.title, STYLES_SECTION, EVENTS_FORMAT
        );

        for entry in entries {
            output.push_str(&format!(
                "Dialogue: 0,{},{},{},,0,0,0,,{}\n",
                format_duration(entry.start, SubtitleFormat::Ass),
                format_duration(entry.end, SubtitleFormat::Ass),
                entry.style.as_deref().unwrap_or(DEFAULT_STYLE),
                encode_text(&entry.text)
            ));
        }

        output
    }
}
