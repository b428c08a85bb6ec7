// 🔁 Conversion Engine - Fixed-table unit conversions
//
// The whole conversion surface is a closed table: 8 categories, 20 direction
// pairs, fixed constants. A Direction carries its owning Category, so the
// only way to reach the Unsupported sentinel is asking a category for a
// direction it does not own. The engine is a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Miles in one kilometer (also used for km/h -> mph)
pub const MILES_PER_KILOMETER: f64 = 0.621371;

/// Pounds in one kilogram
pub const POUNDS_PER_KILOGRAM: f64 = 2.20462;

/// Gallons in one liter
pub const GALLONS_PER_LITER: f64 = 0.264172;

/// Static USD -> EUR rate. Not a live feed, a fixed approximation.
pub const USD_TO_EUR_RATE: f64 = 0.85;

/// Static EUR -> USD rate. Deliberately not the inverse of USD_TO_EUR_RATE.
pub const EUR_TO_USD_RATE: f64 = 1.18;

// ============================================================================
// CATEGORY
// ============================================================================

/// Top-level conversion domain. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Length,
    Weight,
    Time,
    Energy,
    Currency,
    Temperature,
    Speed,
    Volume,
}

impl Category {
    /// All categories, in menu order
    pub const ALL: [Category; 8] = [
        Category::Length,
        Category::Weight,
        Category::Time,
        Category::Energy,
        Category::Currency,
        Category::Temperature,
        Category::Speed,
        Category::Volume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Time => "Time",
            Category::Energy => "Energy",
            Category::Currency => "Currency",
            Category::Temperature => "Temperature",
            Category::Speed => "Speed",
            Category::Volume => "Volume",
        }
    }

    /// Display label with emoji, as shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Length => "📏 Length",
            Category::Weight => "⚖️ Weight",
            Category::Time => "⏰ Time",
            Category::Energy => "💡 Energy",
            Category::Currency => "💰 Currency",
            Category::Temperature => "🌡️ Temperature",
            Category::Speed => "🏃 Speed",
            Category::Volume => "🧴 Volume",
        }
    }

    /// The category's closed set of direction pairs, in menu order
    pub fn directions(&self) -> &'static [Direction] {
        match self {
            Category::Length => &[
                Direction::KilometersToMiles,
                Direction::MilesToKilometers,
            ],
            Category::Weight => &[
                Direction::KilogramsToPounds,
                Direction::PoundsToKilograms,
            ],
            Category::Time => &[
                Direction::SecondsToMinutes,
                Direction::MinutesToSeconds,
                Direction::MinutesToHours,
                Direction::HoursToMinutes,
                Direction::HoursToDays,
                Direction::DaysToHours,
            ],
            Category::Energy => &[
                Direction::JoulesToKilojoules,
                Direction::KilojoulesToJoules,
            ],
            Category::Currency => &[Direction::UsdToEur, Direction::EurToUsd],
            Category::Temperature => &[
                Direction::CelsiusToFahrenheit,
                Direction::FahrenheitToCelsius,
            ],
            Category::Speed => &[Direction::KmhToMph, Direction::MphToKmh],
            Category::Volume => &[
                Direction::LitersToGallons,
                Direction::GallonsToLiters,
            ],
        }
    }

    /// Parse either the plain name ("Length") or the emoji label ("📏 Length")
    pub fn parse_label(s: &str) -> Option<Category> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s || c.label() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DIRECTION
// ============================================================================

/// Ordered source -> target unit pair within a Category. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    // Length
    KilometersToMiles,
    MilesToKilometers,
    // Weight
    KilogramsToPounds,
    PoundsToKilograms,
    // Time
    SecondsToMinutes,
    MinutesToSeconds,
    MinutesToHours,
    HoursToMinutes,
    HoursToDays,
    DaysToHours,
    // Energy
    JoulesToKilojoules,
    KilojoulesToJoules,
    // Currency
    UsdToEur,
    EurToUsd,
    // Temperature
    CelsiusToFahrenheit,
    FahrenheitToCelsius,
    // Speed
    KmhToMph,
    MphToKmh,
    // Volume
    LitersToGallons,
    GallonsToLiters,
}

impl Direction {
    /// All direction pairs across every category
    pub const ALL: [Direction; 20] = [
        Direction::KilometersToMiles,
        Direction::MilesToKilometers,
        Direction::KilogramsToPounds,
        Direction::PoundsToKilograms,
        Direction::SecondsToMinutes,
        Direction::MinutesToSeconds,
        Direction::MinutesToHours,
        Direction::HoursToMinutes,
        Direction::HoursToDays,
        Direction::DaysToHours,
        Direction::JoulesToKilojoules,
        Direction::KilojoulesToJoules,
        Direction::UsdToEur,
        Direction::EurToUsd,
        Direction::CelsiusToFahrenheit,
        Direction::FahrenheitToCelsius,
        Direction::KmhToMph,
        Direction::MphToKmh,
        Direction::LitersToGallons,
        Direction::GallonsToLiters,
    ];

    /// The category this direction belongs to
    pub fn category(&self) -> Category {
        match self {
            Direction::KilometersToMiles | Direction::MilesToKilometers => Category::Length,
            Direction::KilogramsToPounds | Direction::PoundsToKilograms => Category::Weight,
            Direction::SecondsToMinutes
            | Direction::MinutesToSeconds
            | Direction::MinutesToHours
            | Direction::HoursToMinutes
            | Direction::HoursToDays
            | Direction::DaysToHours => Category::Time,
            Direction::JoulesToKilojoules | Direction::KilojoulesToJoules => Category::Energy,
            Direction::UsdToEur | Direction::EurToUsd => Category::Currency,
            Direction::CelsiusToFahrenheit | Direction::FahrenheitToCelsius => {
                Category::Temperature
            }
            Direction::KmhToMph | Direction::MphToKmh => Category::Speed,
            Direction::LitersToGallons | Direction::GallonsToLiters => Category::Volume,
        }
    }

    /// Plain ASCII name, used in reports and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::KilometersToMiles => "Kilometers -> Miles",
            Direction::MilesToKilometers => "Miles -> Kilometers",
            Direction::KilogramsToPounds => "Kilograms -> Pounds",
            Direction::PoundsToKilograms => "Pounds -> Kilograms",
            Direction::SecondsToMinutes => "Seconds -> Minutes",
            Direction::MinutesToSeconds => "Minutes -> Seconds",
            Direction::MinutesToHours => "Minutes -> Hours",
            Direction::HoursToMinutes => "Hours -> Minutes",
            Direction::HoursToDays => "Hours -> Days",
            Direction::DaysToHours => "Days -> Hours",
            Direction::JoulesToKilojoules => "Joules -> Kilojoules",
            Direction::KilojoulesToJoules => "Kilojoules -> Joules",
            Direction::UsdToEur => "USD -> EUR",
            Direction::EurToUsd => "EUR -> USD",
            Direction::CelsiusToFahrenheit => "Celsius -> Fahrenheit",
            Direction::FahrenheitToCelsius => "Fahrenheit -> Celsius",
            Direction::KmhToMph => "Kilometers per hour -> Miles per hour",
            Direction::MphToKmh => "Miles per hour -> Kilometers per hour",
            Direction::LitersToGallons => "Liters -> Gallons",
            Direction::GallonsToLiters => "Gallons -> Liters",
        }
    }

    /// Display label as shown in the form ("Kilometers ➡️ Miles")
    pub fn label(&self) -> &'static str {
        match self {
            Direction::KilometersToMiles => "Kilometers ➡️ Miles",
            Direction::MilesToKilometers => "Miles ➡️ Kilometers",
            Direction::KilogramsToPounds => "Kilograms ➡️ Pounds",
            Direction::PoundsToKilograms => "Pounds ➡️ Kilograms",
            Direction::SecondsToMinutes => "Seconds ➡️ Minutes",
            Direction::MinutesToSeconds => "Minutes ➡️ Seconds",
            Direction::MinutesToHours => "Minutes ➡️ Hours",
            Direction::HoursToMinutes => "Hours ➡️ Minutes",
            Direction::HoursToDays => "Hours ➡️ Days",
            Direction::DaysToHours => "Days ➡️ Hours",
            Direction::JoulesToKilojoules => "Joules ➡️ Kilojoules",
            Direction::KilojoulesToJoules => "Kilojoules ➡️ Joules",
            Direction::UsdToEur => "USD ➡️ EUR",
            Direction::EurToUsd => "EUR ➡️ USD",
            Direction::CelsiusToFahrenheit => "Celsius ➡️ Fahrenheit",
            Direction::FahrenheitToCelsius => "Fahrenheit ➡️ Celsius",
            Direction::KmhToMph => "Kilometers per hour ➡️ Miles per hour",
            Direction::MphToKmh => "Miles per hour ➡️ Kilometers per hour",
            Direction::LitersToGallons => "Liters ➡️ Gallons",
            Direction::GallonsToLiters => "Gallons ➡️ Liters",
        }
    }

    /// Parse either the ASCII name or the emoji label
    pub fn parse_label(s: &str) -> Option<Direction> {
        let s = s.trim();
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s || d.label() == s)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// UNSUPPORTED SENTINEL
// ============================================================================

/// Sentinel for a (Category, Direction) pair absent from the fixed table.
///
/// Only reachable when the direction belongs to a different category. The
/// engine returns this instead of panicking, always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unsupported {
    pub category: Category,
    pub direction: Direction,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported conversion: '{}' is not a {} conversion",
            self.direction, self.category
        )
    }
}

impl std::error::Error for Unsupported {}

// ============================================================================
// CONVERSION ENGINE
// ============================================================================

/// Pure conversion over the fixed table.
///
/// Deterministic, no external state, no side effects. The engine performs no
/// range validation on the value; rejecting value <= 0 is the caller's job.
///
/// The Joules -> Kilojoules direction historically multiplies by 1000, the
/// inverse of the physical definition. That behavior is preserved as the
/// default; `with_corrected_energy` flips it to the physically correct one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionEngine {
    pub corrected_energy: bool,
}

impl ConversionEngine {
    /// Engine with the historical (inverted) Energy behavior
    pub fn new() -> Self {
        ConversionEngine {
            corrected_energy: false,
        }
    }

    /// Engine with physically correct Joules/Kilojoules scaling
    pub fn with_corrected_energy() -> Self {
        ConversionEngine {
            corrected_energy: true,
        }
    }

    /// Convert `value` along `direction`, checked against `category`.
    ///
    /// Returns `Unsupported` when the direction does not belong to the
    /// category. Output is finite for every finite input: all divisors in
    /// the table are fixed nonzero constants.
    pub fn convert(
        &self,
        category: Category,
        direction: Direction,
        value: f64,
    ) -> Result<f64, Unsupported> {
        if direction.category() != category {
            return Err(Unsupported {
                category,
                direction,
            });
        }

        let result = match direction {
            // Length
            Direction::KilometersToMiles => value * MILES_PER_KILOMETER,
            Direction::MilesToKilometers => value / MILES_PER_KILOMETER,

            // Weight
            Direction::KilogramsToPounds => value * POUNDS_PER_KILOGRAM,
            Direction::PoundsToKilograms => value / POUNDS_PER_KILOGRAM,

            // Time
            Direction::SecondsToMinutes => value / 60.0,
            Direction::MinutesToSeconds => value * 60.0,
            Direction::MinutesToHours => value / 60.0,
            Direction::HoursToMinutes => value * 60.0,
            Direction::HoursToDays => value / 24.0,
            Direction::DaysToHours => value * 24.0,

            // Energy (inverted by default, see struct docs)
            Direction::JoulesToKilojoules => {
                if self.corrected_energy {
                    value / 1000.0
                } else {
                    value * 1000.0
                }
            }
            Direction::KilojoulesToJoules => {
                if self.corrected_energy {
                    value * 1000.0
                } else {
                    value / 1000.0
                }
            }

            // Currency (static rates, asymmetric by design)
            Direction::UsdToEur => value * USD_TO_EUR_RATE,
            Direction::EurToUsd => value * EUR_TO_USD_RATE,

            // Temperature (affine, not linear-through-origin)
            Direction::CelsiusToFahrenheit => (value * 9.0 / 5.0) + 32.0,
            Direction::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,

            // Speed
            Direction::KmhToMph => value * MILES_PER_KILOMETER,
            Direction::MphToKmh => value / MILES_PER_KILOMETER,

            // Volume
            Direction::LitersToGallons => value * GALLONS_PER_LITER,
            Direction::GallonsToLiters => value / GALLONS_PER_LITER,
        };

        Ok(result)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_length_kilometers_to_miles() {
        let engine = ConversionEngine::new();
        let result = engine
            .convert(Category::Length, Direction::KilometersToMiles, 10.0)
            .unwrap();
        assert!((result - 6.21371).abs() < EPS);
    }

    #[test]
    fn test_time_hours_to_minutes() {
        let engine = ConversionEngine::new();
        let result = engine
            .convert(Category::Time, Direction::HoursToMinutes, 2.0)
            .unwrap();
        assert_eq!(result, 120.0);
    }

    #[test]
    fn test_temperature_fixed_points() {
        let engine = ConversionEngine::new();
        let f = engine
            .convert(Category::Temperature, Direction::CelsiusToFahrenheit, 0.0)
            .unwrap();
        assert_eq!(f, 32.0);

        let c = engine
            .convert(Category::Temperature, Direction::FahrenheitToCelsius, 32.0)
            .unwrap();
        assert_eq!(c, 0.0);
    }

    #[test]
    fn test_zero_is_fixed_point_for_linear_conversions() {
        let engine = ConversionEngine::new();
        let result = engine
            .convert(Category::Weight, Direction::PoundsToKilograms, 0.0)
            .unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_unsupported_pair_returns_sentinel() {
        let engine = ConversionEngine::new();
        let err = engine
            .convert(Category::Length, Direction::CelsiusToFahrenheit, 5.0)
            .unwrap_err();
        assert_eq!(err.category, Category::Length);
        assert_eq!(err.direction, Direction::CelsiusToFahrenheit);
    }

    #[test]
    fn test_round_trips_within_tolerance() {
        // Currency is asymmetric by design and Energy is inverted by the
        // preserved historical behavior, so neither round-trips.
        let pairs = [
            (Direction::KilometersToMiles, Direction::MilesToKilometers),
            (Direction::KilogramsToPounds, Direction::PoundsToKilograms),
            (Direction::SecondsToMinutes, Direction::MinutesToSeconds),
            (Direction::MinutesToHours, Direction::HoursToMinutes),
            (Direction::HoursToDays, Direction::DaysToHours),
            (Direction::CelsiusToFahrenheit, Direction::FahrenheitToCelsius),
            (Direction::KmhToMph, Direction::MphToKmh),
            (Direction::LitersToGallons, Direction::GallonsToLiters),
        ];

        let engine = ConversionEngine::new();
        for (forward, back) in pairs {
            let category = forward.category();
            let x = 37.5;
            let there = engine.convert(category, forward, x).unwrap();
            let and_back = engine.convert(category, back, there).unwrap();
            assert!(
                (and_back - x).abs() < EPS,
                "{} / {} did not round-trip: {} -> {} -> {}",
                forward,
                back,
                x,
                there,
                and_back
            );
        }
    }

    #[test]
    fn test_currency_does_not_round_trip() {
        let engine = ConversionEngine::new();
        let eur = engine
            .convert(Category::Currency, Direction::UsdToEur, 100.0)
            .unwrap();
        let usd = engine
            .convert(Category::Currency, Direction::EurToUsd, eur)
            .unwrap();
        // 100 * 0.85 * 1.18 = 100.3
        assert!((usd - 100.3).abs() < EPS);
        assert!((usd - 100.0).abs() > EPS);
    }

    #[test]
    fn test_energy_inverted_by_default() {
        let engine = ConversionEngine::new();
        let kj = engine
            .convert(Category::Energy, Direction::JoulesToKilojoules, 1.0)
            .unwrap();
        assert_eq!(kj, 1000.0);

        let j = engine
            .convert(Category::Energy, Direction::KilojoulesToJoules, 1000.0)
            .unwrap();
        assert_eq!(j, 1.0);
    }

    #[test]
    fn test_energy_corrected_variant() {
        let engine = ConversionEngine::with_corrected_energy();
        let kj = engine
            .convert(Category::Energy, Direction::JoulesToKilojoules, 1000.0)
            .unwrap();
        assert_eq!(kj, 1.0);

        let j = engine
            .convert(Category::Energy, Direction::KilojoulesToJoules, 1.0)
            .unwrap();
        assert_eq!(j, 1000.0);
    }

    #[test]
    fn test_engine_accepts_nonpositive_values() {
        // Range validation is the caller's job; the engine stays pure.
        let engine = ConversionEngine::new();
        let result = engine
            .convert(Category::Length, Direction::KilometersToMiles, -10.0)
            .unwrap();
        assert!((result + 6.21371).abs() < EPS);
    }

    #[test]
    fn test_directions_partition_by_category() {
        for category in Category::ALL {
            for direction in category.directions() {
                assert_eq!(direction.category(), category);
            }
        }
        let total: usize = Category::ALL.iter().map(|c| c.directions().len()).sum();
        assert_eq!(total, Direction::ALL.len());
    }

    #[test]
    fn test_label_parsing_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(Direction::parse_label(direction.label()), Some(direction));
            assert_eq!(Direction::parse_label(direction.as_str()), Some(direction));
        }
        for category in Category::ALL {
            assert_eq!(Category::parse_label(category.label()), Some(category));
            assert_eq!(Category::parse_label(category.as_str()), Some(category));
        }
        assert_eq!(Direction::parse_label("Furlongs ➡️ Fortnights"), None);
        assert_eq!(Category::parse_label("Pressure"), None);
    }
}
