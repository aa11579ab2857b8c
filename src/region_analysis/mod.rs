
/// Holds top-level structs and queries for region analysis
pub mod structs;

/// Iterative scanline fill shared by the land and water passes
pub mod flood_fill;

/// Labels land and water regions over a classified grid
pub mod segmentation;

/// Land/water link graph between regions
pub mod graph;

pub use self::graph::RegionGraph;
pub use self::structs::{AnalysisConfig, Domain, Region, RegionId, RegionMap, Traject};
