// 📥 Conversion Report - Plain-text export of the recent history window
//
// The exported document carries only ASCII: emoji in the stored display
// lines are stripped, matching how the original export cleaned records
// before rendering.

use crate::history::{HistoryLedger, DISPLAY_WINDOW};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot of the recent history window, ready to render or save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub title: String,
    pub entries: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl ConversionReport {
    /// Build a report from the ledger's visible window (last 5 records)
    pub fn from_ledger(ledger: &HistoryLedger) -> Self {
        let entries = ledger
            .recent_entries(DISPLAY_WINDOW)
            .iter()
            .map(|line| strip_non_ascii(line))
            .collect();

        ConversionReport {
            title: "Unit Conversion Result".to_string(),
            entries,
            generated_at: Utc::now(),
        }
    }

    /// Render the report as plain text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&"=".repeat(self.title.len()));
        out.push('\n');
        out.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if self.entries.is_empty() {
            out.push_str("No conversions recorded.\n");
        } else {
            for entry in &self.entries {
                out.push_str(&format!("History: {}\n", entry));
            }
        }

        out
    }

    /// Render the report as pretty JSON, for API consumers that want the
    /// structured form instead of the plain-text export
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report to JSON")
    }

    /// Write the rendered report to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_text())
            .with_context(|| format!("failed to write report to {:?}", path))?;
        Ok(())
    }
}

/// Drop every non-ASCII character, collapsing the leftover double spaces
/// that emoji removal leaves behind.
pub fn strip_non_ascii(s: &str) -> String {
    let ascii: String = s.chars().filter(|c| c.is_ascii()).collect();
    let mut out = String::with_capacity(ascii.len());
    let mut last_was_space = false;
    for c in ascii.trim().chars() {
        if c == ' ' {
            if !last_was_space {
                out.push(c);
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
