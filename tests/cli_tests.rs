//! Command-line tests for the subkit binary.
//!
//! Each test runs the built binary against files in a fresh temp directory,
//! with the user config directory pointed into that directory as well.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SRT_SAMPLE: &str =
    "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";

const VTT_SAMPLE: &str = "WEBVTT\n\n00:00:00.500 --> 00:00:01.500\nHallo\n";

fn subkit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_subkit"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("HOME", dir)
        .env_remove("SUBKIT_DEFAULT_FORMAT")
        .env_remove("SUBKIT_CLAMP_OFFSETS")
        .env_remove("SUBKIT_ASS_TITLE")
        .output()
        .expect("failed to run subkit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_detect_command() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();
    fs::write(dir.path().join("notes.txt"), "not subtitles").unwrap();

    let output = subkit(dir.path(), &["detect", "movie.srt"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "srt");

    let output = subkit(dir.path(), &["detect", "notes.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unable to detect subtitle format"));
}

#[test]
fn test_convert_command_derives_output_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();

    let output = subkit(dir.path(), &["convert", "movie.srt", "--to", "vtt"]);
    assert!(output.status.success());

    let converted = fs::read_to_string(dir.path().join("movie.vtt")).unwrap();
    assert_eq!(
        converted,
        "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:03.000 --> 00:00:04.000\nWorld\n"
    );
}

#[test]
fn test_convert_command_rejects_unsupported_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();

    let output = subkit(dir.path(), &["convert", "movie.srt", "--to", "sub"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported format"));
}

#[test]
fn test_merge_command_clamps_negative_offsets_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.srt"), SRT_SAMPLE).unwrap();
    fs::write(dir.path().join("de.vtt"), VTT_SAMPLE).unwrap();

    let output = subkit(
        dir.path(),
        &["merge", "en.srt", "de.vtt", "--offset-second", "-5", "--format", "srt"],
    );
    assert!(output.status.success());

    let merged = fs::read_to_string(dir.path().join("merged_subtitle.srt")).unwrap();
    assert!(merged.starts_with("1\n00:00:00,500 --> 00:00:01,500\nHallo\n\n2\n00:00:01,000"));
}

#[test]
fn test_merge_command_honours_config_without_clamping() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("config/subkit")).unwrap();
    fs::write(
        dir.path().join("config/subkit/config.toml"),
        "default_format = \"vtt\"\nclamp_negative_offsets = false\n",
    )
    .unwrap();
    fs::write(dir.path().join("en.srt"), SRT_SAMPLE).unwrap();
    fs::write(dir.path().join("de.vtt"), VTT_SAMPLE).unwrap();

    let output = subkit(
        dir.path(),
        &[
            "merge",
            "en.srt",
            "de.vtt",
            "--offset-first",
            "-1",
            "--offset-second",
            "1.5",
            "-o",
            "dual.vtt",
        ],
    );
    assert!(output.status.success());

    // Equal start times keep the first file's cue ahead
    let merged = fs::read_to_string(dir.path().join("dual.vtt")).unwrap();
    assert_eq!(
        merged,
        "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello\n\n00:00:02.000 --> 00:00:03.000\nWorld\n\n00:00:02.000 --> 00:00:03.000\nHallo\n"
    );
}

#[test]
fn test_shift_command() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();

    let output = subkit(
        dir.path(),
        &["shift", "movie.srt", "--offset", "2.25", "-o", "later.srt"],
    );
    assert!(output.status.success());

    let shifted = fs::read_to_string(dir.path().join("later.srt")).unwrap();
    assert_eq!(
        shifted,
        "1\n00:00:03,250 --> 00:00:04,250\nHello\n\n2\n00:00:05,250 --> 00:00:06,250\nWorld\n"
    );
}

#[test]
fn test_shift_command_moves_cues_earlier() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();

    // Offset clamping only applies to merge, so the default config still shifts back
    let output = subkit(
        dir.path(),
        &["shift", "movie.srt", "--offset", "-1.5", "-o", "earlier.srt"],
    );
    assert!(output.status.success());

    let shifted = fs::read_to_string(dir.path().join("earlier.srt")).unwrap();
    assert_eq!(
        shifted,
        "1\n00:00:00,000 --> 00:00:00,500\nHello\n\n2\n00:00:01,500 --> 00:00:02,500\nWorld\n"
    );
}

#[test]
fn test_shift_command_trusts_content_over_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("mislabelled.srt"), VTT_SAMPLE).unwrap();

    let output = subkit(dir.path(), &["shift", "mislabelled.srt", "--offset", "1"]);
    assert!(output.status.success());

    let shifted = fs::read_to_string(dir.path().join("mislabelled.srt")).unwrap();
    assert_eq!(shifted, "WEBVTT\n\n00:00:01.500 --> 00:00:02.500\nHallo\n");
}

#[test]
fn test_inspect_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("movie.srt"), SRT_SAMPLE).unwrap();

    let output = subkit(dir.path(), &["inspect", "movie.srt", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["metadata"]["subtitle_count"], 2);
    assert_eq!(value["subtitles"][1]["text"], "World");
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let output = subkit(dir.path(), &["convert", "missing.srt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input file not found"));
}
