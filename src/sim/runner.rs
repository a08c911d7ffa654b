use log::trace;
use nalgebra::Vector3;

use crate::drone::Drone;
use crate::motor::MotorError;
use crate::terrain::Terrain;

// ---------------------------------------------------------------------------
// Pilot interface
// ---------------------------------------------------------------------------

/// One tick's worth of pilot input. `yaw` is the accumulated heading in
/// degrees (the input layer accumulates yaw-key presses); everything else
/// is a transient stick value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommandFrame {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    pub throttle: f64,
    pub yaw_offset: f64,
}

/// Trait for command sources.
///
/// Implement this to plug a keyboard mapper, an autopilot, or a test
/// script into the tick loop.
pub trait Pilot {
    /// Commands for the given tick, with read access to the drone state.
    fn command(&mut self, tick: usize, drone: &Drone) -> CommandFrame;

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Plays back a fixed schedule: each entry `(from_tick, frame)` takes
/// effect at its tick and holds until the next entry. Before the first
/// entry the frame is all zeros.
pub struct ScriptedPilot {
    script: Vec<(usize, CommandFrame)>,
}

impl ScriptedPilot {
    pub fn new(mut script: Vec<(usize, CommandFrame)>) -> Self {
        script.sort_by_key(|(tick, _)| *tick);
        Self { script }
    }
}

impl Pilot for ScriptedPilot {
    fn command(&mut self, tick: usize, _drone: &Drone) -> CommandFrame {
        self.script
            .iter()
            .rev()
            .find(|(from, _)| *from <= tick)
            .map(|(_, frame)| *frame)
            .unwrap_or_default()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Simulation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,      // fixed step, time units
    pub ticks: usize, // number of steps to run
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1, // reference cadence
            ticks: 600,
        }
    }
}

// ---------------------------------------------------------------------------
// Tick loop
// ---------------------------------------------------------------------------

/// Telemetry for one completed tick.
#[derive(Debug, Clone)]
pub struct TickRecord {
    pub time: f64,
    pub position: Vector3<f64>,
    pub altitude: f64,
    /// Motion was commanded but the position did not change — the move was
    /// rejected by the collision gate or pinned against the world bounds.
    pub blocked: bool,
}

/// Run the tick loop on a caller-supplied drone: apply commands, integrate,
/// read the sensor, once per tick. Returns one record per tick plus the
/// initial state. The drone is left at its final state for inspection.
pub fn simulate_with(
    drone: &mut Drone,
    config: &SimConfig,
    pilot: &mut dyn Pilot,
) -> Result<Vec<TickRecord>, MotorError> {
    let cap = (config.ticks + 1).min(200_000);
    let mut records = Vec::with_capacity(cap);

    records.push(TickRecord {
        time: 0.0,
        position: drone.position(),
        altitude: drone.measure_altitude(),
        blocked: false,
    });

    let obstacles = drone.terrain().obstacles();

    for tick in 0..config.ticks {
        let cmd = pilot.command(tick, drone);
        drone.apply_commands(cmd.pitch, cmd.roll, cmd.yaw, cmd.throttle, cmd.yaw_offset)?;

        let before = drone.position();
        drone.update_position(config.dt, obstacles);

        // Blocked ticks are only observable through an unchanged position
        let attempted = cmd.pitch != 0.0 || cmd.roll != 0.0 || cmd.throttle != 0.0;
        let blocked = attempted && drone.position() == before;

        let time = (tick + 1) as f64 * config.dt;
        let altitude = drone.measure_altitude();
        trace!(
            "tick {tick}: pos=({:.2}, {:.2}, {:.2}) alt={altitude:.2} blocked={blocked}",
            drone.position().x,
            drone.position().y,
            drone.position().z,
        );

        records.push(TickRecord {
            time,
            position: drone.position(),
            altitude,
            blocked,
        });
    }

    Ok(records)
}

/// Run a scripted flight over the given terrain (convenience wrapper).
pub fn simulate(
    terrain: &Terrain,
    config: &SimConfig,
    script: Vec<(usize, CommandFrame)>,
) -> Result<Vec<TickRecord>, MotorError> {
    let mut drone = Drone::new(terrain);
    let mut pilot = ScriptedPilot::new(script);
    simulate_with(&mut drone, config, &mut pilot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Obstacle;
    use approx::assert_relative_eq;

    fn climb_frame(throttle: f64) -> CommandFrame {
        CommandFrame {
            throttle,
            ..CommandFrame::default()
        }
    }

    #[test]
    fn scripted_pilot_holds_frames() {
        let terrain = Terrain::flat();
        let drone = Drone::new(&terrain);
        let mut pilot = ScriptedPilot::new(vec![(5, climb_frame(1.0)), (0, climb_frame(2.0))]);
        // Entries sort by tick; each holds until the next
        assert_eq!(pilot.command(0, &drone).throttle, 2.0);
        assert_eq!(pilot.command(4, &drone).throttle, 2.0);
        assert_eq!(pilot.command(5, &drone).throttle, 1.0);
        assert_eq!(pilot.command(100, &drone).throttle, 1.0);
    }

    #[test]
    fn records_cover_every_tick() {
        let terrain = Terrain::flat();
        let config = SimConfig { dt: 0.1, ticks: 10 };
        let records = simulate(&terrain, &config, vec![(0, climb_frame(1.0))]).unwrap();
        assert_eq!(records.len(), 11);
        assert_relative_eq!(records.last().unwrap().time, 1.0);
    }

    #[test]
    fn steady_climb_accumulates_altitude() {
        let terrain = Terrain::flat();
        let config = SimConfig { dt: 0.1, ticks: 10 };
        let records = simulate(&terrain, &config, vec![(0, climb_frame(1.0))]).unwrap();
        let last = records.last().unwrap();
        assert_relative_eq!(last.position.y, 1.0, epsilon = 1e-9);
        assert_relative_eq!(last.altitude, 1.0, epsilon = 1e-9);
        assert!(records.iter().all(|r| !r.blocked));
    }

    #[test]
    fn blocked_ticks_are_flagged() {
        // Obstacle dead ahead at z = 1
        let terrain = Terrain::new(vec![Obstacle::new(Vector3::new(0.0, 0.0, 1.0), 0.5)]);
        let config = SimConfig { dt: 0.1, ticks: 5 };
        let script = vec![(
            0,
            CommandFrame {
                pitch: 5.0,
                ..CommandFrame::default()
            },
        )];
        let records = simulate(&terrain, &config, script).unwrap();
        // First candidate step lands at z = 0.5, inside radius + margin
        assert!(records[1].blocked);
        assert_eq!(records.last().unwrap().position, Vector3::zeros());
    }

    #[test]
    fn idle_ticks_are_not_blocked() {
        let terrain = Terrain::flat();
        let config = SimConfig { dt: 0.1, ticks: 3 };
        let records = simulate(&terrain, &config, vec![]).unwrap();
        assert!(records.iter().all(|r| !r.blocked));
    }

    #[test]
    fn drone_state_survives_the_run() {
        let terrain = Terrain::flat();
        let mut drone = Drone::new(&terrain);
        let config = SimConfig { dt: 0.1, ticks: 10 };
        let mut pilot = ScriptedPilot::new(vec![(0, climb_frame(2.0))]);
        simulate_with(&mut drone, &config, &mut pilot).unwrap();
        assert_relative_eq!(drone.position().y, 2.0, epsilon = 1e-9);
        let alt = drone.measure_altitude();
        assert_eq!(drone.sensor().status(), Some(alt));
    }
}
