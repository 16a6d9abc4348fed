use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use subkit::config::Config;
use subkit::subtitle::{json::to_json, merge, shift, SubtitleFormat};
use subkit::{detect_format, SubkitError, SubtitleEngine};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "subkit")]
#[command(version, about = "Convert, merge and edit subtitle files")]
#[command(long_about = "Detect, convert, merge, shift and edit SubRip (.srt), WebVTT (.vtt) and Advanced SubStation Alpha (.ass) subtitles.")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the detected format of a subtitle file
    Detect {
        /// Subtitle file
        input: PathBuf,
    },

    /// Convert a subtitle file to another format
    Convert {
        /// Input subtitle file
        input: PathBuf,

        /// Output file (defaults to input name with the target extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source format: srt, vtt, ass (detected when omitted)
        #[arg(long)]
        from: Option<String>,

        /// Target format: srt, vtt, ass (defaults to the configured format)
        #[arg(long)]
        to: Option<String>,
    },

    /// Merge two subtitle files into one time-ordered file
    Merge {
        /// First subtitle file
        first: PathBuf,

        /// Second subtitle file
        second: PathBuf,

        /// Offset applied to the first file, in seconds
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset_first: f64,

        /// Offset applied to the second file, in seconds
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset_second: f64,

        /// Output format: srt, vtt, ass (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Output file (defaults to merged_subtitle.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move every cue of a subtitle file by an offset
    Shift {
        /// Input subtitle file
        input: PathBuf,

        /// Offset in seconds; negative values move cues earlier
        #[arg(long, allow_hyphen_values = true)]
        offset: f64,

        /// Output file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the cues of a subtitle file
    Inspect {
        /// Subtitle file
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Edit a subtitle file interactively
    Edit {
        /// Subtitle file
        input: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn derive_output_path(input: &Path, format: &SubtitleFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let mut output = input.to_path_buf();
    output.set_file_name(format!("{}.{}", stem.to_string_lossy(), format.extension()));
    output
}

fn parse_format(value: Option<&str>) -> Result<Option<SubtitleFormat>> {
    value
        .map(|v| v.parse::<SubtitleFormat>())
        .transpose()
        .map_err(anyhow::Error::from)
}

/// Seconds to whole milliseconds, rounded.
fn seconds_to_ms(seconds: f64) -> Result<i64> {
    if !seconds.is_finite() {
        anyhow::bail!("Offset must be a finite number of seconds");
    }
    Ok((seconds * 1000.0).round() as i64)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Load and validate configuration
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let engine = SubtitleEngine::from_config(&config);

    match cli.command {
        Command::Detect { input } => {
            let content = read_input(&input)?;
            let format = detect_format(&content).ok_or(SubkitError::UnknownFormat)?;
            println!("{}", format);
        }

        Command::Convert {
            input,
            output,
            from,
            to,
        } => {
            let from = parse_format(from.as_deref())?;
            let to = parse_format(to.as_deref())?.unwrap_or(config.default_format);
            let content = read_input(&input)?;

            let (from, entries) = engine.parse_detected(&content, from)?;
            let output = output.unwrap_or_else(|| derive_output_path(&input, &to));

            info!("Input:  {} ({})", input.display(), from);
            info!("Output: {} ({})", output.display(), to);

            write_output(&output, &engine.write(&entries, to))?;
            info!("Converted {} entries", entries.len());
        }

        Command::Merge {
            first,
            second,
            offset_first,
            offset_second,
            format,
            output,
        } => {
            let format = parse_format(format.as_deref())?.unwrap_or(config.default_format);
            let offset_first = config.effective_offset(seconds_to_ms(offset_first)?);
            let offset_second = config.effective_offset(seconds_to_ms(offset_second)?);

            let first_entries = engine
                .parse(&read_input(&first)?, None)
                .with_context(|| format!("Failed to parse {}", first.display()))?;
            let second_entries = engine
                .parse(&read_input(&second)?, None)
                .with_context(|| format!("Failed to parse {}", second.display()))?;

            let merged = merge(
                &first_entries,
                offset_first,
                &second_entries,
                offset_second,
                format,
            );
            let output = output
                .unwrap_or_else(|| PathBuf::from(format!("merged_subtitle.{}", format.extension())));

            info!(
                "Offsets: {} ms / {} ms, output {} ({})",
                offset_first,
                offset_second,
                output.display(),
                format
            );
            write_output(&output, &engine.write(&merged, format))?;
            info!("Merged {} entries", merged.len());
        }

        Command::Shift {
            input,
            offset,
            output,
        } => {
            let offset = seconds_to_ms(offset)?;
            let content = read_input(&input)?;
            let (format, mut entries) =
                engine.parse_with_fallback(&content, SubtitleFormat::from_path(&input))?;

            shift(&mut entries, offset);

            let output = output.unwrap_or(input);
            write_output(&output, &engine.write(&entries, format))?;
            info!("Shifted {} entries by {} ms", entries.len(), offset);
        }

        Command::Inspect { input, json } => {
            let content = read_input(&input)?;
            let (format, entries) = engine.parse_detected(&content, None)?;

            if json {
                println!("{}", to_json(&entries, format)?);
            } else {
                println!(
                    "{} {} entries",
                    style(format.to_string().to_uppercase()).cyan().bold(),
                    entries.len()
                );
                for entry in &entries {
                    println!(
                        "{:>5}  {} --> {}  {}",
                        style(entry.index).dim(),
                        subkit::subtitle::format_duration(entry.start, format),
                        subkit::subtitle::format_duration(entry.end, format),
                        entry.text.replace('\n', " / ")
                    );
                }
            }
        }

        Command::Edit { input } => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            subkit::interactive::run_editor(&input, &engine)?;
        }
    }

    Ok(())
}
