use nalgebra::Vector3;

use crate::sim::runner::TickRecord;
use crate::terrain::WORLD_MAX;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Takeoff,
    Collision,
    CeilingContact,
    GroundContact,
    Custom(String),
}

/// A discrete event that occurred during a flight.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub position: Vector3<f64>,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive tick records and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &TickRecord, current: &TickRecord) -> Option<EventKind>;
}

const GROUND_EPS: f64 = 1e-9;

/// Detects the first climb away from the ground.
pub struct TakeoffDetector {
    fired: bool,
}

impl TakeoffDetector {
    pub fn new() -> Self {
        Self { fired: false }
    }
}

impl Default for TakeoffDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDetector for TakeoffDetector {
    fn check(&mut self, prev: &TickRecord, current: &TickRecord) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        if prev.position.y <= GROUND_EPS && current.position.y > GROUND_EPS {
            self.fired = true;
            Some(EventKind::Takeoff)
        } else {
            None
        }
    }
}

/// Detects the leading edge of a blocked-tick streak.
pub struct CollisionDetector;

impl EventDetector for CollisionDetector {
    fn check(&mut self, prev: &TickRecord, current: &TickRecord) -> Option<EventKind> {
        if current.blocked && !prev.blocked {
            Some(EventKind::Collision)
        } else {
            None
        }
    }
}

/// Detects contact with the world ceiling (ascending) or the ground
/// after having been airborne (descending).
pub struct BoundsDetector;

impl EventDetector for BoundsDetector {
    fn check(&mut self, prev: &TickRecord, current: &TickRecord) -> Option<EventKind> {
        if prev.position.y < WORLD_MAX && current.position.y >= WORLD_MAX {
            Some(EventKind::CeilingContact)
        } else if prev.position.y > GROUND_EPS && current.position.y <= GROUND_EPS {
            Some(EventKind::GroundContact)
        } else {
            None
        }
    }
}

/// Run the standard detector set over a recorded flight.
pub fn extract_events(records: &[TickRecord]) -> Vec<SimEvent> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(TakeoffDetector::new()),
        Box::new(CollisionDetector),
        Box::new(BoundsDetector),
    ];

    let mut events = Vec::new();
    for pair in records.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&pair[0], &pair[1]) {
                events.push(SimEvent {
                    time: pair[1].time,
                    kind,
                    position: pair[1].position,
                });
            }
        }
    }
    events
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
