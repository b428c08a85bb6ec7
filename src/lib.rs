// Smart Unit Converter - Core Library
// Exposes conversion engine, history ledger, and report export for use in
// the TUI, the web server, and tests

pub mod convert;
pub mod history;
pub mod report;

// Re-export commonly used types
pub use convert::{
    Category, ConversionEngine, Direction, Unsupported,
    EUR_TO_USD_RATE, GALLONS_PER_LITER, MILES_PER_KILOMETER, POUNDS_PER_KILOGRAM,
    USD_TO_EUR_RATE,
};
pub use history::{format_entry, HistoryLedger, HistoryRecord, DISPLAY_WINDOW, MAX_RECORDS};
pub use report::{strip_non_ascii, ConversionReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
