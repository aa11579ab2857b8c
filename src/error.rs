use thiserror::Error;

use crate::region_analysis::structs::{Domain, RegionId};
use crate::tile_map::CellXY;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessibilityError {
    /// The id counter ran past the configured limit while labelling a region.
    #[error("{domain} region seeded at ({}, {}) needs an id above the limit of {limit}", .cell.x, .cell.y)]
    RegionOverflow {
        domain: Domain,
        cell: CellXY,
        limit: u32,
    },
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("grid of {width}x{height} cells cannot hold {len} values")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    /// The id is the sentinel or was never allocated by this map.
    #[error("unknown region {0}")]
    UnknownRegion(RegionId),
}
