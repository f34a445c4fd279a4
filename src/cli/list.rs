// ABOUTME: CLI list command - every project config in the config directory
//
// Directory projects are followed by their configs as `|--name` lines.

use anyhow::Result;

use muxup::config::store::ConfigEntry;

use super::util::config_store;
use super::OutputFormat;

/// Execute the list command
pub fn execute(format: OutputFormat) -> Result<()> {
    let entries = config_store()?.list()?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

fn render_text(entries: &[ConfigEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.name);
        out.push('\n');
        for child in &entry.children {
            out.push_str("|--");
            out.push_str(child);
            out.push('\n');
        }
    }
    out
}
