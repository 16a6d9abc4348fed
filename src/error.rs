use crate::subtitle::SubtitleFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubkitError {
    #[error("Unable to detect subtitle format")]
    UnknownFormat,

    #[error("Unsupported format: {0}. Use 'srt', 'vtt', or 'ass'")]
    UnsupportedFormat(String),

    #[error("Malformed {format} time code: {input:?}")]
    MalformedTimeCode {
        format: SubtitleFormat,
        input: String,
    },

    #[error("No subtitle entries found in {0} content")]
    EmptyResult(SubtitleFormat),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SubkitError>;
