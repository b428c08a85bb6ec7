// 📜 History Ledger - Session-scoped log of successful conversions
//
// Records are append-only and created only when a conversion succeeds. The
// display layer shows a 5-entry window; the backing store keeps everything up
// to a generous cap, dropping the oldest first. Each record carries a UUID
// identity and a formatted value that never changes after creation.

use crate::convert::{Category, Direction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of records the display layer shows
pub const DISPLAY_WINDOW: usize = 5;

/// Cap on the backing store; oldest records are dropped past this
pub const MAX_RECORDS: usize = 1000;

// ============================================================================
// HISTORY RECORD
// ============================================================================

/// One successful conversion, frozen at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Stable identity (UUID) - never changes
    pub id: String,

    pub category: Category,
    pub direction: Direction,
    pub input_value: f64,
    pub output_value: f64,

    /// Display line, output rounded to 2 decimals. Fixed contract:
    /// "{category label} - {direction label}: {input} ➡️ {output:.2}"
    /// where the input prints in shortest float form ("10.0", "12.5").
    pub formatted: String,

    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(
        category: Category,
        direction: Direction,
        input_value: f64,
        output_value: f64,
    ) -> Self {
        HistoryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            direction,
            input_value,
            output_value,
            formatted: format_entry(category, direction, input_value, output_value),
            recorded_at: Utc::now(),
        }
    }
}

/// Render the display line for a conversion. 2-decimal rounding of the
/// output is part of the contract; the input prints in shortest float form
/// (`{:?}`), so a whole number keeps its ".0" as entered in the form.
pub fn format_entry(
    category: Category,
    direction: Direction,
    input_value: f64,
    output_value: f64,
) -> String {
    format!(
        "{} - {}: {:?} ➡️ {:.2}",
        category.label(),
        direction.label(),
        input_value,
        output_value
    )
}

// ============================================================================
// HISTORY LEDGER
// ============================================================================

/// Append-only conversion log for one session.
///
/// No deduplication, no persistence. Owned by the session context and passed
/// explicitly; never global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLedger {
    records: VecDeque<HistoryRecord>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        HistoryLedger {
            records: VecDeque::new(),
        }
    }

    /// Append a record, dropping the oldest if the cap is reached
    pub fn append(&mut self, record: HistoryRecord) {
        if self.records.len() == MAX_RECORDS {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Last `n` records in chronological order (oldest first within the
    /// window). Fewer if the ledger holds fewer.
    pub fn recent(&self, n: usize) -> Vec<&HistoryRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).collect()
    }

    /// Display lines for the last `n` records
    pub fn recent_entries(&self, n: usize) -> Vec<String> {
        self.recent(n)
            .into_iter()
            .map(|r| r.formatted.clone())
            .collect()
    }

    /// Empty the ledger. Idempotent: clearing an empty ledger is a no-op.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConversionEngine;

    fn record(n: usize) -> HistoryRecord {
        HistoryRecord::new(
            Category::Time,
            Direction::HoursToMinutes,
            n as f64,
            (n as f64) * 60.0,
        )
    }

    #[test]
    fn test_recent_window_after_seven_appends() {
        let mut ledger = HistoryLedger::new();
        for n in 1..=7 {
            ledger.append(record(n));
        }

        let window = ledger.recent(DISPLAY_WINDOW);
        assert_eq!(window.len(), 5);
        // Records #3 through #7, oldest first
        let inputs: Vec<f64> = window.iter().map(|r| r.input_value).collect();
        assert_eq!(inputs, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_recent_with_fewer_records_than_window() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record(1));
        ledger.append(record(2));

        let window = ledger.recent(DISPLAY_WINDOW);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].input_value, 1.0);
        assert_eq!(window[1].input_value, 2.0);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut ledger = HistoryLedger::new();
        ledger.clear();
        assert!(ledger.is_empty());

        ledger.append(record(1));
        ledger.clear();
        assert!(ledger.recent(DISPLAY_WINDOW).is_empty());

        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_backing_store_cap_drops_oldest() {
        let mut ledger = HistoryLedger::new();
        for n in 1..=(MAX_RECORDS + 3) {
            ledger.append(record(n));
        }

        assert_eq!(ledger.len(), MAX_RECORDS);
        // Visible window is unaffected by the cap
        let window = ledger.recent(DISPLAY_WINDOW);
        assert_eq!(window[4].input_value, (MAX_RECORDS + 3) as f64);
        assert_eq!(window[0].input_value, (MAX_RECORDS - 1) as f64);
    }

    #[test]
    fn test_no_deduplication() {
        let mut ledger = HistoryLedger::new();
        ledger.append(record(4));
        ledger.append(record(4));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_formatting_rounds_output_to_two_decimals() {
        let engine = ConversionEngine::new();
        let output = engine
            .convert(Category::Weight, Direction::KilogramsToPounds, 1.0)
            .unwrap();
        let line = format_entry(
            Category::Weight,
            Direction::KilogramsToPounds,
            1.0,
            output,
        );
        assert!(line.ends_with("2.20"), "got: {}", line);
        assert!(line.contains("Kilograms ➡️ Pounds"));
    }

    #[test]
    fn test_whole_number_input_keeps_decimal_point() {
        let line = format_entry(
            Category::Length,
            Direction::KilometersToMiles,
            10.0,
            6.21371,
        );
        assert_eq!(line, "📏 Length - Kilometers ➡️ Miles: 10.0 ➡️ 6.21");

        let fractional = format_entry(
            Category::Length,
            Direction::KilometersToMiles,
            12.5,
            7.767,
        );
        assert!(fractional.contains(": 12.5 "));
    }

    #[test]
    fn test_record_carries_identity_and_timestamp() {
        let a = record(1);
        let b = record(1);
        assert_ne!(a.id, b.id);
        assert!(a.recorded_at <= Utc::now());
    }
}
