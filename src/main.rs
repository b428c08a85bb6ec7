// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use smart_unit_converter::{format_entry, Category, ConversionEngine, Direction};
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "convert" {
        // One-shot mode
        run_convert(&args[2..])?;
    } else {
        // UI mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

/// One-shot conversion: smart-unit-converter convert <category> <direction> <value>
///
/// Accepts plain names ("Length", "Kilometers -> Miles") or the emoji form
/// labels. Prints the formatted result; keeps no history.
fn run_convert(args: &[String]) -> Result<()> {
    if args.len() != 3 {
        bail!("usage: smart-unit-converter convert <category> <direction> <value>");
    }

    let Some(category) = Category::parse_label(&args[0]) else {
        bail!(
            "unknown category '{}' (expected one of: {})",
            args[0],
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let Some(direction) = Direction::parse_label(&args[1]) else {
        bail!(
            "unknown conversion '{}' (for {}: {})",
            args[1],
            category,
            category
                .directions()
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let value: f64 = args[2]
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a number", args[2]))?;

    if value <= 0.0 {
        bail!("please enter a value greater than 0");
    }

    match ConversionEngine::new().convert(category, direction, value) {
        Ok(result) => {
            println!("{}", format_entry(category, direction, value, result));
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🔁 Loading Smart Unit Converter UI...\n");

    let mut app = ui::App::new();
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin converter-server --features server");
    std::process::exit(1);
}
