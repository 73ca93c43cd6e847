//! Geographic position model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position fix from a location provider.
///
/// # Example
///
/// ```
/// use attendance_engine::models::GeoPosition;
///
/// let position = GeoPosition::new(13.7563309, 100.5017651, 12.4);
/// assert_eq!(position.coordinates(), "13.756331, 100.501765");
/// assert_eq!(position.accuracy_meters(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters.
    pub accuracy: f64,
}

impl GeoPosition {
    /// Creates a position fix.
    pub fn new(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
        }
    }

    /// Coordinates as `"lat, lon"` with six decimals.
    pub fn coordinates(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }

    /// Accuracy rounded to whole meters.
    pub fn accuracy_meters(&self) -> i64 {
        self.accuracy.round() as i64
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (accuracy: {} m)",
            self.coordinates(),
            self.accuracy_meters()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_are_six_decimals() {
        let position = GeoPosition::new(13.0, -0.5, 3.0);
        assert_eq!(position.coordinates(), "13.000000, -0.500000");
    }

    #[test]
    fn test_display_includes_accuracy() {
        let position = GeoPosition::new(1.25, 2.5, 7.6);
        assert_eq!(position.to_string(), "1.250000, 2.500000 (accuracy: 8 m)");
    }
}
