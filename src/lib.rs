#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod error;
pub mod passability;
pub mod region_analysis;
mod tile_map;

pub use crate::error::AccessibilityError;
pub use crate::passability::{classify, classify_grid, PassabilityMasks, TerrainCode};
pub use crate::region_analysis::{AnalysisConfig, Domain, Region, RegionGraph, RegionId, RegionMap, Traject};
pub use crate::tile_map::{CellXY, TileMap};

pub fn build_region_map(
    obstructions: &TileMap<u16>,
    cell_size: f32,
    masks: PassabilityMasks,
) -> Result<RegionMap, AccessibilityError> {
    RegionMap::build(obstructions, cell_size, masks)
}
