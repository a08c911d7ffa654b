use nalgebra::Vector3;

use crate::terrain::Terrain;

// ---------------------------------------------------------------------------
// Downward-facing altitude sensor (simulated LiDAR)
// ---------------------------------------------------------------------------

/// Measures height above the effective ground directly below the drone.
/// Borrows the terrain; it never owns or mutates it.
#[derive(Debug, Clone)]
pub struct AltitudeSensor<'a> {
    terrain: &'a Terrain,
    last_reading: Option<f64>,
}

impl<'a> AltitudeSensor<'a> {
    pub fn new(terrain: &'a Terrain) -> Self {
        Self {
            terrain,
            last_reading: None,
        }
    }

    pub fn terrain(&self) -> &'a Terrain {
        self.terrain
    }

    /// Height above ground at the given position, floored at zero.
    /// Ground includes the top of any obstacle directly below.
    /// The reading is stored for later `status` queries.
    pub fn measure_altitude(&mut self, position: &Vector3<f64>) -> f64 {
        let ground = self.terrain.ground_height(position.x, position.z);
        let altitude = (position.y - ground).max(0.0);
        self.last_reading = Some(altitude);
        altitude
    }

    /// Whether an obstacle sits between the given position and the ground.
    pub fn detect_obstacle_below(&self, position: &Vector3<f64>) -> bool {
        self.terrain
            .has_obstacle_below(position.x, position.y, position.z)
    }

    /// Last recorded altitude, `None` before the first measurement.
    pub fn status(&self) -> Option<f64> {
        self.last_reading
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Obstacle;
    use approx::assert_relative_eq;

    #[test]
    fn no_reading_before_first_measurement() {
        let terrain = Terrain::flat();
        let sensor = AltitudeSensor::new(&terrain);
        assert_eq!(sensor.status(), None);
    }

    #[test]
    fn altitude_over_flat_ground() {
        let terrain = Terrain::flat();
        let mut sensor = AltitudeSensor::new(&terrain);
        let alt = sensor.measure_altitude(&Vector3::new(1.0, 3.0, 1.0));
        assert_relative_eq!(alt, 3.0);
        assert_eq!(sensor.status(), Some(3.0));
    }

    #[test]
    fn altitude_over_obstacle_top() {
        // Sphere top at y = 2.0
        let terrain = Terrain::new(vec![Obstacle::new(Vector3::new(5.0, 1.0, 5.0), 1.0)]);
        let mut sensor = AltitudeSensor::new(&terrain);
        let alt = sensor.measure_altitude(&Vector3::new(5.0, 3.0, 5.0));
        assert_relative_eq!(alt, 1.0);
    }

    #[test]
    fn altitude_never_negative() {
        let terrain = Terrain::new(vec![Obstacle::new(Vector3::new(5.0, 3.0, 5.0), 1.0)]);
        let mut sensor = AltitudeSensor::new(&terrain);
        // Drone below the obstacle top: reading floors at zero
        let alt = sensor.measure_altitude(&Vector3::new(5.0, 1.0, 5.0));
        assert_eq!(alt, 0.0);
        assert_eq!(sensor.status(), Some(0.0));
    }

    #[test]
    fn detects_obstacle_below() {
        let terrain = Terrain::new(vec![Obstacle::new(Vector3::new(5.0, 1.0, 5.0), 1.0)]);
        let sensor = AltitudeSensor::new(&terrain);
        assert!(sensor.detect_obstacle_below(&Vector3::new(5.0, 1.5, 5.0)));
        assert!(!sensor.detect_obstacle_below(&Vector3::new(1.0, 1.5, 1.0)));
    }
}
