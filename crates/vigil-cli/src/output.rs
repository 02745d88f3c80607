//! Output formatting helpers.

use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use vigil_core::Prayer;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print one prayer as a card.
pub fn prayer_card(prayer: &Prayer) {
    println!(
        "{}  {}",
        prayer.author_name().bold(),
        relative_time(prayer.created_at).dimmed()
    );
    println!("{}", prayer.content);
    println!("{}", format!("prayed {} times", prayer.prayer_count).dimmed());
    println!();
}

/// Coarse "how long ago" rendering for card timestamps.
pub fn relative_time(at: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(at);

    if delta.num_seconds() < 60 {
        "just now".to_string()
    } else if delta.num_minutes() < 60 {
        format!("{}m ago", delta.num_minutes())
    } else if delta.num_hours() < 24 {
        format!("{}h ago", delta.num_hours())
    } else {
        format!("{}d ago", delta.num_days())
    }
}
