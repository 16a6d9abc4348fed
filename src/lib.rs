pub mod config;
pub mod engine;
pub mod error;
pub mod interactive;
pub mod subtitle;

pub use config::Config;
pub use engine::{convert, parse, write, SubtitleEngine};
pub use error::{Result, SubkitError};
pub use subtitle::{
    detect_format, format_time, merge, parse_time, SubtitleEntry, SubtitleFormat, SubtitleTrack,
};
