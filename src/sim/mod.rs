pub mod event;
pub mod runner;

pub use event::{extract_events, EventKind, SimEvent};
pub use runner::{simulate, simulate_with, CommandFrame, Pilot, ScriptedPilot, SimConfig, TickRecord};
