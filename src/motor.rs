use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Power limits
// ---------------------------------------------------------------------------

pub const POWER_MIN: f64 = 0.0;
pub const POWER_MAX: f64 = 10.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotorError {
    #[error("motor power {value} outside allowed range [{POWER_MIN}, {POWER_MAX}]")]
    PowerOutOfRange { value: f64 },
}

// ---------------------------------------------------------------------------
// Motor: on/off state plus a range-checked power setting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Off,
    On,
}

impl fmt::Display for MotorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorState::Off => write!(f, "off"),
            MotorState::On => write!(f, "on"),
        }
    }
}

/// A single rotor. Power is range-checked here, not clamped — clamping is
/// the mixing stage's job upstream.
#[derive(Debug, Clone)]
pub struct Motor {
    id: usize,
    power: f64,
    state: MotorState,
}

impl Motor {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            power: 0.0,
            state: MotorState::Off,
        }
    }

    pub fn turn_on(&mut self) {
        self.state = MotorState::On;
    }

    /// Shut the motor down. Power drops to zero with the state.
    pub fn turn_off(&mut self) {
        self.state = MotorState::Off;
        self.power = 0.0;
    }

    /// Set the power level. Values outside `[POWER_MIN, POWER_MAX]` are
    /// rejected, NaN included.
    pub fn set_power(&mut self, value: f64) -> Result<(), MotorError> {
        if !(POWER_MIN..=POWER_MAX).contains(&value) {
            return Err(MotorError::PowerOutOfRange { value });
        }
        self.power = value;
        Ok(())
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Read-only snapshot for telemetry/display.
    pub fn status(&self) -> MotorStatus {
        MotorStatus {
            id: self.id,
            state: self.state,
            power: self.power,
        }
    }
}

// ---------------------------------------------------------------------------
// Telemetry snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorStatus {
    pub id: usize,
    pub state: MotorState,
    pub power: f64,
}

impl fmt::Display for MotorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Motor {}: {} at power {:.2}", self.id, self.state, self.power)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off_with_zero_power() {
        let m = Motor::new(2);
        let s = m.status();
        assert_eq!(s.id, 2);
        assert_eq!(s.state, MotorState::Off);
        assert_eq!(s.power, 0.0);
    }

    #[test]
    fn set_power_accepts_bounds() {
        let mut m = Motor::new(0);
        assert!(m.set_power(0.0).is_ok());
        assert!(m.set_power(10.0).is_ok());
        assert_eq!(m.power(), 10.0);
    }

    #[test]
    fn set_power_rejects_out_of_range() {
        let mut m = Motor::new(0);
        assert_eq!(
            m.set_power(10.01),
            Err(MotorError::PowerOutOfRange { value: 10.01 })
        );
        assert!(m.set_power(-0.5).is_err());
        assert!(m.set_power(f64::NAN).is_err());
        // Rejected values leave the stored power untouched
        assert_eq!(m.power(), 0.0);
    }

    #[test]
    fn turn_on_preserves_power() {
        let mut m = Motor::new(1);
        m.set_power(4.0).unwrap();
        m.turn_on();
        assert_eq!(m.state(), MotorState::On);
        assert_eq!(m.power(), 4.0);
    }

    #[test]
    fn turn_off_zeroes_power() {
        let mut m = Motor::new(3);
        m.turn_on();
        m.set_power(7.5).unwrap();
        m.turn_off();
        assert_eq!(m.state(), MotorState::Off);
        assert_eq!(m.power(), 0.0);
    }

    #[test]
    fn status_formats_for_display() {
        let mut m = Motor::new(1);
        m.turn_on();
        m.set_power(3.0).unwrap();
        assert_eq!(m.status().to_string(), "Motor 1: on at power 3.00");
    }
}
