//! Unit systems and biometric normalization
//!
//! Converts raw height/weight values into centimeters and kilograms.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Measurement system the raw height/weight values were entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Height in centimeters (or meters), weight in kilograms
    Metric,
    /// Height in inches (or feet), weight in pounds
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(ValidationError::UnitSystem(s.to_string())),
        }
    }
}

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound (exact)
pub const KG_PER_LB: f64 = 0.45359237;
/// Centimeters per inch (exact)
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per foot (exact)
pub const CM_PER_FOOT: f64 = 30.48;
/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

/// Metric heights below this are read as meters
const METRIC_METERS_THRESHOLD: f64 = 3.0;
/// Imperial heights below this are read as feet
const IMPERIAL_FEET_THRESHOLD: f64 = 10.0;

// ============================================================================
// Normalization
// ============================================================================

/// Normalize a raw height to centimeters
///
/// Metric values under 3 are taken as meters, imperial values under 10 as feet.
pub fn height_to_cm(raw: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric if raw < METRIC_METERS_THRESHOLD => raw * CM_PER_METER,
        UnitSystem::Metric => raw,
        UnitSystem::Imperial if raw < IMPERIAL_FEET_THRESHOLD => raw * CM_PER_FOOT,
        UnitSystem::Imperial => raw * CM_PER_INCH,
    }
}

/// Normalize a raw weight to kilograms
pub fn weight_to_kg(raw: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => raw,
        UnitSystem::Imperial => raw * KG_PER_LB,
    }
}

/// Convert centimeters to inches
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_height_in_meters() {
        assert!((height_to_cm(1.8, UnitSystem::Metric) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_metric_height_in_cm() {
        assert_eq!(height_to_cm(180.0, UnitSystem::Metric), 180.0);
        assert_eq!(height_to_cm(3.0, UnitSystem::Metric), 3.0);
    }

    #[test]
    fn test_imperial_height_in_feet() {
        assert!((height_to_cm(5.9, UnitSystem::Imperial) - 179.832).abs() < 1e-9);
    }

    #[test]
    fn test_imperial_height_in_inches() {
        assert!((height_to_cm(70.0, UnitSystem::Imperial) - 177.8).abs() < 1e-9);
        // 10 is the first value read as inches
        assert!((height_to_cm(10.0, UnitSystem::Imperial) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_weight_conversion() {
        assert_eq!(weight_to_kg(80.0, UnitSystem::Metric), 80.0);
        assert!((weight_to_kg(154.0, UnitSystem::Imperial) - 69.853225).abs() < 1e-6);
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!(UnitSystem::from_str("Metric").unwrap(), UnitSystem::Metric);
        assert_eq!(UnitSystem::from_str(" imperial ").unwrap(), UnitSystem::Imperial);
        assert!(matches!(
            UnitSystem::from_str("cubits"),
            Err(ValidationError::UnitSystem(_))
        ));
    }
}
