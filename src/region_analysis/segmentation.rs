use crate::error::AccessibilityError;
use crate::passability::TerrainCode;
use crate::tile_map::{CellXY, TileMap};

use super::flood_fill::FloodFill;
use super::structs::{AnalysisConfig, Domain, Region, RegionId};

/// Per-domain region labels for every cell, plus the records of each region.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub land_regions: TileMap<RegionId>,
    pub water_regions: TileMap<RegionId>,
    /// Indexed by `id - RegionId::FIRST`.
    pub regions: Vec<Region>,
}

/// Hands out region ids in discovery order, shared by both domains.
struct IdAllocator {
    next: Option<u32>,
    limit: u32,
}

impl IdAllocator {
    fn new(limit: u32) -> Self {
        Self {
            next: Some(RegionId::FIRST.value()),
            limit,
        }
    }

    fn allocate(&mut self, domain: Domain, cell: CellXY) -> Result<RegionId, AccessibilityError> {
        match self.next {
            Some(next) if next <= self.limit => {
                self.next = next.checked_add(1);
                Ok(RegionId::from(next))
            }
            _ => {
                log::error!(
                    "ran out of region ids at {domain} cell ({}, {}), limit is {}",
                    cell.x,
                    cell.y,
                    self.limit
                );
                Err(AccessibilityError::RegionOverflow {
                    domain,
                    cell,
                    limit: self.limit,
                })
            }
        }
    }
}

/// Labels the land and water regions of a classified grid.
///
/// Cells are scanned in row-major order and a flood fill is started from the
/// first unlabelled cell of each region, land before water on shallow cells.
/// Ids therefore depend only on the terrain, never on allocation or hashing order.
pub fn segment(terrain: &TileMap<TerrainCode>, config: &AnalysisConfig) -> Result<Segmentation, AccessibilityError> {
    let width = terrain.width();
    let height = terrain.height();

    let mut land_regions = TileMap::new(width, height, RegionId::UNSET);
    let mut water_regions = TileMap::new(width, height, RegionId::UNSET);
    let mut regions: Vec<Region> = Vec::new();
    let mut ids = IdAllocator::new(config.max_region_id);

    let mut land_fill = FloodFill::new(|idx: usize| terrain[idx].is_land_passable());
    let mut water_fill = FloodFill::new(|idx: usize| terrain[idx].is_water_passable());

    for idx in 0..terrain.area() {
        let code = terrain[idx];

        if code == TerrainCode::Impassable {
            land_regions[idx] = RegionId::SENTINEL;
            water_regions[idx] = RegionId::SENTINEL;
            continue;
        }

        if land_regions[idx] == RegionId::UNSET && code.is_land_passable() {
            let seed = terrain.linear_index_to_xy(idx);
            let id = ids.allocate(Domain::Land, seed)?;
            let size = land_fill.fill(&mut land_regions, seed, id);
            regions.push(Region::new(id, Domain::Land, size, seed));
        }

        if water_regions[idx] == RegionId::UNSET && code.is_water_passable() {
            let seed = terrain.linear_index_to_xy(idx);
            let id = ids.allocate(Domain::Water, seed)?;
            let size = water_fill.fill(&mut water_regions, seed, id);
            regions.push(Region::new(id, Domain::Water, size, seed));
        }

        // Cells closed to one domain never get filled in it
        if land_regions[idx] == RegionId::UNSET {
            land_regions[idx] = RegionId::SENTINEL;
        }
        if water_regions[idx] == RegionId::UNSET {
            water_regions[idx] = RegionId::SENTINEL;
        }
    }

    log::debug!(
        "segmented {}x{} grid into {} land and {} water regions",
        width,
        height,
        regions.iter().filter(|r| r.get_domain() == Domain::Land).count(),
        regions.iter().filter(|r| r.get_domain() == Domain::Water).count(),
    );

    Ok(Segmentation {
        land_regions,
        water_regions,
        regions,
    })
}
