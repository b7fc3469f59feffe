pub mod analysis;
pub mod constants;
pub mod forces;
pub mod grid;
pub mod location;
pub mod map;
pub mod terrain;
pub mod visit;

pub use analysis::{Actor, AnalysisConfig, FrontInfo, FrontStats, ThreatCategory};
pub use forces::{Force, ForceId, Game, Theater, Unit, UnitId};
pub use location::HexCoord;
pub use map::HexMap;
