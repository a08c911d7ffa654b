use log::warn;
use nalgebra::Vector3;

use crate::motor::{Motor, MotorError, MotorStatus, POWER_MAX, POWER_MIN};
use crate::sensor::AltitudeSensor;
use crate::terrain::{Obstacle, Terrain, WORLD_MAX, WORLD_MIN};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MOTOR_COUNT: usize = 4;

/// Extra clearance added to each obstacle radius during collision checks.
pub const SAFETY_MARGIN: f64 = 0.2;

// ---------------------------------------------------------------------------
// Orientation: the full per-tick command set
// ---------------------------------------------------------------------------

/// Pilot commands as last applied. `yaw` is the accumulated heading in
/// degrees, always normalized to `[0, 360)`; `yaw_offset` is the transient
/// directional nudge active only while the pilot is yawing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub throttle: f64,
    pub yaw_offset: f64,
}

// ---------------------------------------------------------------------------
// Drone: four motors, one sensor, kinematic state
// ---------------------------------------------------------------------------

/// Quadrotor state and behavior. Motor order is fixed:
/// 0 = front-left, 1 = front-right, 2 = back-left, 3 = back-right.
#[derive(Debug, Clone)]
pub struct Drone<'a> {
    position: Vector3<f64>,
    orientation: Orientation,
    motors: [Motor; MOTOR_COUNT],
    sensor: AltitudeSensor<'a>,
}

impl<'a> Drone<'a> {
    /// New drone at the world origin, motors off, over the given terrain.
    pub fn new(terrain: &'a Terrain) -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: Orientation::default(),
            motors: std::array::from_fn(Motor::new),
            sensor: AltitudeSensor::new(terrain),
        }
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn motors(&self) -> &[Motor; MOTOR_COUNT] {
        &self.motors
    }

    /// Per-motor telemetry snapshots, in motor-id order.
    pub fn motor_status(&self) -> [MotorStatus; MOTOR_COUNT] {
        std::array::from_fn(|i| self.motors[i].status())
    }

    pub fn sensor(&self) -> &AltitudeSensor<'a> {
        &self.sensor
    }

    pub fn terrain(&self) -> &'a Terrain {
        self.sensor.terrain()
    }

    /// Apply one tick's control commands: normalize yaw, store the
    /// orientation, mix motor powers, and spin up all four motors.
    ///
    /// The mixing baseline is the current vertical position coordinate,
    /// recomputed every tick. Throttle never enters the mix; it only
    /// drives the vertical direction component during integration.
    pub fn apply_commands(
        &mut self,
        pitch: f64,
        roll: f64,
        yaw: f64,
        throttle: f64,
        yaw_offset: f64,
    ) -> Result<(), MotorError> {
        self.orientation = Orientation {
            pitch,
            roll,
            yaw: yaw.rem_euclid(360.0),
            throttle,
            yaw_offset,
        };

        let baseline = self.position.y;
        let targets =
            mix_targets(baseline, pitch, roll, yaw_offset).map(|t| t.clamp(POWER_MIN, POWER_MAX));
        for (motor, target) in self.motors.iter_mut().zip(targets) {
            motor.turn_on();
            motor.set_power(target)?;
        }
        Ok(())
    }

    /// Integrate one fixed Euler step. The motion direction comes from the
    /// stored orientation; velocity exists only within this step, so no
    /// momentum carries across ticks. A candidate position that comes
    /// within `radius + SAFETY_MARGIN` of any obstacle center aborts the
    /// whole update — the drone holds its old position for the tick.
    /// Otherwise the new position is clamped to the world box.
    pub fn update_position(&mut self, delta_t: f64, obstacles: &[Obstacle]) {
        let yaw = self.orientation.yaw.to_radians();
        let direction = Vector3::new(
            self.orientation.pitch * yaw.sin() - self.orientation.roll * yaw.cos(),
            self.orientation.throttle,
            self.orientation.pitch * yaw.cos() + self.orientation.roll * yaw.sin(),
        );

        let velocity = direction;
        let candidate = self.position + velocity * delta_t;

        for obs in obstacles {
            let distance = (candidate - obs.center).norm();
            if distance < obs.radius + SAFETY_MARGIN {
                warn!(
                    "collision: candidate ({:.2}, {:.2}, {:.2}) within {:.2} of obstacle at ({:.2}, {:.2}, {:.2})",
                    candidate.x, candidate.y, candidate.z,
                    obs.radius + SAFETY_MARGIN,
                    obs.center.x, obs.center.y, obs.center.z,
                );
                return;
            }
        }

        self.position = candidate.map(|c| c.clamp(WORLD_MIN, WORLD_MAX));
    }

    /// Take a sensor reading at the current position.
    pub fn measure_altitude(&mut self) -> f64 {
        self.sensor.measure_altitude(&self.position)
    }
}

// ---------------------------------------------------------------------------
// Motor mixing
// ---------------------------------------------------------------------------

/// Raw (pre-clamp) mixed targets: [front_left, front_right, back_left,
/// back_right]. Yaw itself never appears here — only the yaw_offset nudge.
fn mix_targets(baseline: f64, pitch: f64, roll: f64, yaw_offset: f64) -> [f64; 4] {
    let front_left = baseline - pitch + roll - yaw_offset;
    let front_right = baseline - pitch - roll + yaw_offset;
    let back_left = baseline + pitch + roll + yaw_offset;
    let back_right = baseline + pitch - roll - yaw_offset;
    [front_left, front_right, back_left, back_right]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
