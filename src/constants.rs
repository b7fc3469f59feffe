/// Planning horizon for influence propagation: 72 hours expressed in minutes.
/// Influence from a detachment decays linearly to zero at this path cost.
pub const PLANNING_HORIZON_MINUTES: u32 = 72 * 60;

/// Edge-cost sentinel: any transition whose cost is at or above this value is
/// treated as forbidden by the path visitor.
pub const NO_PASSAGE: u32 = 1 << 24;

/// Minutes to enter a hex along a road, regardless of underlying terrain.
pub const ROAD_RATE_MINUTES: u32 = 30;

/// Additional minutes to enter a hex across a river without a road bridge.
pub const RIVER_CROSSING_MINUTES: u32 = 60;

/// Node-visit safety cap for influence and victory-value propagation.
/// Truncates pathological searches early; not an error.
pub const INFLUENCE_NODE_CAP: usize = 10_000;

/// Node-visit safety cap for the front-ownership search.
pub const OWNERSHIP_NODE_CAP: usize = 1_000;

/// Fraction of an occupying unit's defense value distributed to each empty
/// front-line neighbor as flanking support.
pub const FLANK_SUPPORT_FACTOR: f32 = 0.25;
