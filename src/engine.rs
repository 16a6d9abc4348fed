use crate::config::{Config, DEFAULT_ASS_TITLE};
use crate::error::{Result, SubkitError};
use crate::subtitle::ass::AssCodec;
use crate::subtitle::{
    create_codec, detect_format, merge, SubtitleCodec, SubtitleEntry, SubtitleFormat,
    SubtitleTrack,
};
use tracing::{debug, info};

/// Parse/write/convert front end over the per-format codecs.
///
/// Holds no state between calls; one engine can serve any number of threads.
#[derive(Debug, Clone)]
pub struct SubtitleEngine {
    ass_title: String,
}

impl Default for SubtitleEngine {
    fn default() -> Self {
        Self {
            ass_title: DEFAULT_ASS_TITLE.to_string(),
        }
    }
}

impl SubtitleEngine {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ass_title: config.ass_title.clone(),
        }
    }

    fn codec(&self, format: SubtitleFormat) -> Box<dyn SubtitleCodec> {
        match format {
            SubtitleFormat::Ass => Box::new(AssCodec::with_title(self.ass_title.clone())),
            other => create_codec(other),
        }
    }

    /// Parse `content`, detecting the format when none is given.
    ///
    /// Fails with `UnknownFormat` when detection fails and `EmptyResult` when
    /// the grammar matched no cue at all.
    pub fn parse(&self, content: &str, format: Option<SubtitleFormat>) -> Result<SubtitleTrack> {
        self.parse_detected(content, format).map(|(_, entries)| entries)
    }

    /// Like [`parse`](Self::parse), also reporting which format was used.
    pub fn parse_detected(
        &self,
        content: &str,
        format: Option<SubtitleFormat>,
    ) -> Result<(SubtitleFormat, SubtitleTrack)> {
        let format = match format {
            Some(f) => f,
            None => detect_format(content).ok_or(SubkitError::UnknownFormat)?,
        };

        let entries = self.codec(format).parse(content);
        if entries.is_empty() {
            return Err(SubkitError::EmptyResult(format));
        }

        debug!("Parsed {} {} entries", entries.len(), format);
        Ok((format, entries))
    }

    /// Parse by content first, falling back to `fallback` (usually the file
    /// extension) only when no signature matches.
    pub fn parse_with_fallback(
        &self,
        content: &str,
        fallback: Option<SubtitleFormat>,
    ) -> Result<(SubtitleFormat, SubtitleTrack)> {
        let format = detect_format(content)
            .or(fallback)
            .ok_or(SubkitError::UnknownFormat)?;
        self.parse_detected(content, Some(format))
    }

    pub fn write(&self, entries: &[SubtitleEntry], format: SubtitleFormat) -> String {
        self.codec(format).write(entries)
    }

    /// Re-encode `content` from one format into another.
    pub fn convert(
        &self,
        content: &str,
        from: SubtitleFormat,
        to: SubtitleFormat,
    ) -> Result<String> {
        let entries = self.parse(content, Some(from))?;
        info!("Converting {} entries from {} to {}", entries.len(), from, to);
        Ok(self.write(&entries, to))
    }

    /// Merge two subtitle documents (formats detected) into one document in `output`.
    pub fn merge_content(
        &self,
        first: &str,
        offset_first_ms: i64,
        second: &str,
        offset_second_ms: i64,
        output: SubtitleFormat,
    ) -> Result<String> {
        let first = self.parse(first, None)?;
        let second = self.parse(second, None)?;
        let merged = merge(&first, offset_first_ms, &second, offset_second_ms, output);
        Ok(self.write(&merged, output))
    }
}

/// Parse with the default engine.
pub fn parse(content: &str, format: Option<SubtitleFormat>) -> Result<SubtitleTrack> {
    SubtitleEngine::default().parse(content, format)
}

/// Write with the default engine.
pub fn write(entries: &[SubtitleEntry], format: SubtitleFormat) -> String {
    SubtitleEngine::default().write(entries, format)
}

/// Convert with the default engine.
pub fn convert(content: &str, from: SubtitleFormat, to: SubtitleFormat) -> Result<String> {
    SubtitleEngine::default().convert(content, from, to)
}
