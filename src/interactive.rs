use crate::engine::SubtitleEngine;
use crate::error::SubkitError;
use crate::subtitle::{
    add_blank_entry, format_duration, lost_on_reload, parse_duration, remove_entry, update_text,
    update_times, SubtitleFormat, SubtitleTrack,
};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::path::Path;
use std::time::Duration;

const ACTIONS: &[&str] = &[
    "Edit text",
    "Edit times",
    "Add entry",
    "Delete entry",
    "Save and quit",
    "Quit without saving",
];

/// Edit a subtitle file in place through terminal prompts.
pub fn run_editor(path: &Path, engine: &SubtitleEngine) -> anyhow::Result<()> {
    let content = fs::read_to_string(path)?;
    let (format, mut entries) =
        engine.parse_with_fallback(&content, SubtitleFormat::from_path(path))?;

    print_header(path, format, entries.len());

    let mut current = 0;
    let mut dirty = false;

    loop {
        current = select_entry(&entries, format, current)?;

        let action = Select::new()
            .with_prompt(format!("Entry #{}", entries[current].index))
            .items(ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => {
                let text: String = Input::new()
                    .with_prompt("Text (use \\n for a line break)")
                    .with_initial_text(entries[current].text.replace('\n', "\\n"))
                    .allow_empty(true)
                    .interact_text()?;
                dirty |= update_text(&mut entries, current, text.replace("\\n", "\n"));
            }
            1 => {
                let start = prompt_time("Start", entries[current].start, format)?;
                let end = prompt_time("End", entries[current].end, format)?;
                dirty |= update_times(&mut entries, current, start, end);
            }
            2 => {
                current = add_blank_entry(&mut entries);
                dirty = true;
            }
            3 => {
                if entries.len() <= 1 {
                    println!("{} Cannot delete the only entry", style("!").yellow());
                    continue;
                }
                remove_entry(&mut entries, current);
                current = current.min(entries.len() - 1);
                dirty = true;
            }
            4 => {
                if !confirm_lossy_save(&entries, format)? {
                    continue;
                }
                fs::write(path, engine.write(&entries, format))?;
                println!(
                    "{} Saved {} entries to {}",
                    style("✓").green(),
                    entries.len(),
                    path.display()
                );
                return Ok(());
            }
            _ => {
                if !dirty
                    || Confirm::new()
                        .with_prompt("Discard unsaved changes?")
                        .default(false)
                        .interact()?
                {
                    return Ok(());
                }
            }
        }
    }
}

/// Warn about cues the file format cannot keep and ask before saving them.
fn confirm_lossy_save(entries: &SubtitleTrack, format: SubtitleFormat) -> anyhow::Result<bool> {
    let lost = lost_on_reload(entries, format);
    if lost.is_empty() {
        return Ok(true);
    }

    let numbers: Vec<String> = lost
        .iter()
        .map(|&i| format!("#{}", entries[i].index))
        .collect();
    println!(
        "{} Entries without text are dropped when a {} file is read back: {}",
        style("!").yellow(),
        format,
        numbers.join(", ")
    );

    Ok(Confirm::new()
        .with_prompt("Save anyway?")
        .default(false)
        .interact()?)
}

fn print_header(path: &Path, format: SubtitleFormat, count: usize) {
    println!();
    println!(
        "{} {} ({}, {} entries)",
        style("Editing").cyan().bold(),
        path.display(),
        format,
        count
    );
    println!();
}

fn select_entry(
    entries: &SubtitleTrack,
    format: SubtitleFormat,
    current: usize,
) -> anyhow::Result<usize> {
    let items: Vec<String> = entries
        .iter()
        .map(|e| {
            let first_line = e.text.lines().next().unwrap_or("");
            format!(
                "#{:<4} {} --> {}  {}",
                e.index,
                format_duration(e.start, format),
                format_duration(e.end, format),
                first_line
            )
        })
        .collect();

    Ok(Select::new()
        .with_prompt("Select entry")
        .items(&items)
        .default(current.min(items.len().saturating_sub(1)))
        .max_length(15)
        .interact()?)
}

fn prompt_time(label: &str, initial: Duration, format: SubtitleFormat) -> anyhow::Result<Duration> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("{} ({})", label, format))
            .with_initial_text(format_duration(initial, format))
            .interact_text()?;

        match parse_duration(&input, format) {
            Ok(d) => return Ok(d),
            Err(e @ SubkitError::MalformedTimeCode { .. }) => {
                println!("{} {}", style("✗").red(), e);
            }
            Err(e) => return Err(e.into()),
        }
    }
}
