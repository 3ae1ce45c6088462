//! Entry loading from CSV or JSON files, and interactive prompts.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use gpa_core::Entry;

/// Load entries from `path`, picking the format from the extension.
///
/// CSV files need a `label,symbol,weight` header; JSON files hold an array
/// of `{ "label", "symbol", "weight" }` objects.
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<Entry>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => bail!(
            "unsupported entry file '{}': expected a .csv or .json extension",
            path.display()
        ),
    }
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<Entry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    parse_csv(&mut reader).with_context(|| format!("failed to read entries from {}", path.display()))
}

fn parse_csv<R: io::Read>(reader: &mut csv::Reader<R>) -> anyhow::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<Entry>().enumerate() {
        let entry = row.with_context(|| format!("invalid row {}", index + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

fn load_json(path: &Path) -> anyhow::Result<Vec<Entry>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse entries from {}", path.display()))
}

/// Print `prompt` and read one trimmed line; `None` on EOF or read failure.
pub fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Prompt for a number, falling back to `default` on blank input or EOF.
pub fn prompt_f64(prompt: &str, default: f64) -> f64 {
    parse_number(prompt_line(prompt).as_deref(), default)
}

/// Unparsable text becomes NaN so the calculation reports it as an invalid weight.
fn parse_number(line: Option<&str>, default: f64) -> f64 {
    match line.map(str::trim) {
        None | Some("") => default,
        Some(text) => text.parse().unwrap_or(f64::NAN),
    }
}

/// Collect entries interactively until a blank label is entered.
pub fn prompt_entries(symbols: &[&str]) -> Vec<Entry> {
    println!("Grades: {}", symbols.join(" "));
    println!("Leave the course name blank to finish.");
    println!();

    let mut entries = Vec::new();
    loop {
        let number = entries.len() + 1;
        let label = match prompt_line(&format!("Course {} name: ", number)) {
            Some(label) if !label.is_empty() => label,
            _ => break,
        };
        let symbol = prompt_line("  Grade: ").unwrap_or_default();
        let weight = prompt_f64("  Credits [3.0]: ", 3.0);
        entries.push(Entry::new(label, symbol, weight));
    }
    entries
}
