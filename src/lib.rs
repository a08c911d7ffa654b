pub mod drone;
pub mod io;
pub mod motor;
pub mod sensor;
pub mod sim;
pub mod terrain;

// Curated top-level surface
pub mod prelude {
    pub use crate::drone::{Drone, Orientation, MOTOR_COUNT, SAFETY_MARGIN};
    pub use crate::motor::{Motor, MotorError, MotorState, MotorStatus, POWER_MAX, POWER_MIN};
    pub use crate::sensor::AltitudeSensor;
    pub use crate::sim::{
        extract_events, simulate, simulate_with, CommandFrame, EventKind, Pilot, ScriptedPilot,
        SimConfig, SimEvent, TickRecord,
    };
    pub use crate::terrain::{Obstacle, Terrain, WORLD_MAX, WORLD_MIN};
}
