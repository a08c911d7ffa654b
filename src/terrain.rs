use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// World bounds
// ---------------------------------------------------------------------------

/// The world is a `[0,10]^3` box; y is the vertical axis.
pub const WORLD_MIN: f64 = 0.0;
pub const WORLD_MAX: f64 = 10.0;

// ---------------------------------------------------------------------------
// Spherical obstacle
// ---------------------------------------------------------------------------

/// A static spherical obstacle. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub center: Vector3<f64>,
    pub radius: f64,
}

impl Obstacle {
    pub fn new(center: Vector3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Height of the sphere's top point.
    pub fn top(&self) -> f64 {
        self.center.y + self.radius
    }

    /// Whether the horizontal projection of the sphere contains `(x, z)`.
    pub fn footprint_contains(&self, x: f64, z: f64) -> bool {
        let dx = x - self.center.x;
        let dz = z - self.center.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }
}

// ---------------------------------------------------------------------------
// Terrain: flat ground plane plus the canonical obstacle registry
// ---------------------------------------------------------------------------

/// Flat ground at height zero with a fixed set of spherical obstacles.
/// The registry is the single source of truth for both ground-height
/// queries and collision checks; it never changes after construction.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    base_height: f64,
    obstacles: Vec<Obstacle>,
}

impl Terrain {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self {
            base_height: 0.0,
            obstacles,
        }
    }

    /// Obstacle-free flat ground.
    pub fn flat() -> Self {
        Self::new(Vec::new())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Effective ground height at `(x, z)`: the base plane, raised to the
    /// top of any obstacle whose footprint contains the point. When
    /// footprints overlap, the highest top wins.
    pub fn ground_height(&self, x: f64, z: f64) -> f64 {
        let mut highest = self.base_height;
        for obs in &self.obstacles {
            if obs.footprint_contains(x, z) && obs.top() > highest {
                highest = obs.top();
            }
        }
        highest
    }

    /// Whether `(x, y, z)` lies inside or below an obstacle footprint,
    /// at or above ground level.
    pub fn has_obstacle_below(&self, x: f64, y: f64, z: f64) -> bool {
        self.obstacles
            .iter()
            .any(|obs| obs.footprint_contains(x, z) && y <= obs.top() && y >= self.base_height)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
