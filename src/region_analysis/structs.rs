use std::fmt;

use crate::error::AccessibilityError;
use crate::passability::{classify_grid, PassabilityMasks, TerrainCode};
use crate::tile_map::{CellXY, TileMap};

use super::graph::RegionGraph;
use super::segmentation::{segment, Segmentation};

/// Neighbour offsets tried, in order, when a point lands on a cell with no region.
const PROBE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Settings for building a [`RegionMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Highest region id segmentation may hand out before failing with
    /// [`AccessibilityError::RegionOverflow`].
    pub max_region_id: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_region_id: u32::MAX,
        }
    }
}

/// Traversal capability a region belongs to.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    Land,
    Water,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Land => write!(f, "land"),
            Domain::Water => write!(f, "water"),
        }
    }
}

/// Identifier of a region, unique across both domains.
///
/// `1` is the sentinel shared by every cell that has no region in a domain.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId {
    value: u32,
}

impl RegionId {
    /// Not yet visited by segmentation. Never visible in a built map.
    pub(crate) const UNSET: RegionId = RegionId { value: 0 };
    pub const SENTINEL: RegionId = RegionId { value: 1 };
    /// The first id handed to a real region.
    pub const FIRST: RegionId = RegionId { value: 2 };

    #[inline]
    pub fn value(self) -> u32 {
        self.value
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self == RegionId::SENTINEL
    }

    /// True for ids that can name an actual region.
    #[inline]
    pub fn is_region(self) -> bool {
        self >= RegionId::FIRST
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.value as usize
    }
}

impl From<u32> for RegionId {
    fn from(value: u32) -> Self {
        Self { value }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    id: RegionId,
    domain: Domain,
    size: usize,
    seed: CellXY,
}

impl Region {
    pub(crate) fn new(id: RegionId, domain: Domain, size: usize, seed: CellXY) -> Self {
        Self {
            id,
            domain,
            size,
            seed,
        }
    }

    pub fn get_id(&self) -> RegionId {
        self.id
    }

    pub fn get_domain(&self) -> Domain {
        self.domain
    }

    /// Number of cells in the region.
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// First cell of the region in row-major order.
    pub fn get_seed(&self) -> CellXY {
        self.seed
    }
}

/// Outcome of a route query between two valid regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Traject {
    /// Region ids from start to goal, both included.
    Path(Vec<RegionId>),
    Unreachable,
}

impl Traject {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Traject::Path(_))
    }

    pub fn path(&self) -> Option<&[RegionId]> {
        match self {
            Traject::Path(path) => Some(path.as_slice()),
            Traject::Unreachable => None,
        }
    }

    /// Number of regions on the route, or `None` when unreachable.
    pub fn region_count(&self) -> Option<usize> {
        self.path().map(|p| p.len())
    }
}

/// Land and water regions of one map and the links between them.
///
/// Built once from the obstruction grid and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RegionMap {
    cell_size: f32,
    terrain: TileMap<TerrainCode>,
    land_regions: TileMap<RegionId>,
    water_regions: TileMap<RegionId>,
    regions: Vec<Region>,
    graph: RegionGraph,
}

impl RegionMap {
    pub fn build(obstructions: &TileMap<u16>, cell_size: f32, masks: PassabilityMasks) -> Result<Self, AccessibilityError> {
        Self::build_with_config(obstructions, cell_size, masks, &AnalysisConfig::default())
    }

    pub fn build_with_config(
        obstructions: &TileMap<u16>,
        cell_size: f32,
        masks: PassabilityMasks,
        config: &AnalysisConfig,
    ) -> Result<Self, AccessibilityError> {
        let terrain = classify_grid(obstructions, masks);
        Self::from_terrain(terrain, cell_size, config)
    }

    /// Builds from an already classified grid.
    pub fn from_terrain(terrain: TileMap<TerrainCode>, cell_size: f32, config: &AnalysisConfig) -> Result<Self, AccessibilityError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(AccessibilityError::InvalidCellSize(cell_size));
        }
        if terrain.area() == 0 {
            return Err(AccessibilityError::EmptyGrid);
        }

        let segmentation = segment(&terrain, config)?;
        let graph = RegionGraph::build(&segmentation);
        let Segmentation {
            land_regions,
            water_regions,
            regions,
        } = segmentation;

        Ok(Self {
            cell_size,
            terrain,
            land_regions,
            water_regions,
            regions,
            graph,
        })
    }

    pub fn get_cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn get_terrain(&self) -> &TileMap<TerrainCode> {
        &self.terrain
    }

    pub fn get_region_grid(&self, domain: Domain) -> &TileMap<RegionId> {
        match domain {
            Domain::Land => &self.land_regions,
            Domain::Water => &self.water_regions,
        }
    }

    pub fn get_graph(&self) -> &RegionGraph {
        &self.graph
    }

    /// Converts world coordinates to the containing cell, if it is on the grid.
    pub fn world_to_cell(&self, x: f32, y: f32) -> Option<CellXY> {
        let cx = (x / self.cell_size).floor();
        let cy = (y / self.cell_size).floor();
        if !cx.is_finite() || !cy.is_finite() || cx < 0.0 || cy < 0.0 {
            return None;
        }
        let xy = CellXY::new(cx as usize, cy as usize);
        self.terrain.contains(xy).then_some(xy)
    }

    /// Region id stored for a cell, or the sentinel when the cell is off the grid.
    pub fn region_at_cell(&self, xy: CellXY, domain: Domain) -> RegionId {
        self.get_region_grid(domain)
            .get(xy)
            .copied()
            .unwrap_or(RegionId::SENTINEL)
    }

    /// Region containing the world point `(x, y)` for `domain`.
    ///
    /// A point on a cell without a region takes the first region found among
    /// its eight neighbours, which absorbs rounding onto obstruction edges.
    /// Points off the grid give the sentinel.
    pub fn region_at(&self, x: f32, y: f32, domain: Domain) -> RegionId {
        let Some(xy) = self.world_to_cell(x, y) else {
            return RegionId::SENTINEL;
        };

        let id = self.region_at_cell(xy, domain);
        if !id.is_sentinel() {
            return id;
        }

        PROBE_OFFSETS
            .iter()
            .filter_map(|(dx, dy)| xy.checked_offset(*dx, *dy))
            .map(|adj| self.region_at_cell(adj, domain))
            .find(|adj_id| adj_id.is_region())
            .unwrap_or(RegionId::SENTINEL)
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        if !id.is_region() {
            return None;
        }
        self.regions.get(id.index() - RegionId::FIRST.index())
    }

    /// All regions in id order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn region_count(&self, domain: Domain) -> usize {
        self.regions.iter().filter(|r| r.domain == domain).count()
    }

    /// Cell count of a region. The sentinel and unknown ids have size 0.
    pub fn region_size(&self, id: RegionId) -> usize {
        self.region(id).map_or(0, |r| r.size)
    }

    pub fn region_size_at(&self, x: f32, y: f32, domain: Domain) -> usize {
        self.region_size(self.region_at(x, y, domain))
    }

    pub fn cell_region_size(&self, xy: CellXY, domain: Domain) -> usize {
        self.region_size(self.region_at_cell(xy, domain))
    }

    pub fn neighbors(&self, id: RegionId) -> &[RegionId] {
        self.graph.neighbors(id)
    }

    /// Shortest chain of linked regions from `from` to `to`, counted in hops.
    ///
    /// Fails with [`AccessibilityError::UnknownRegion`] when either id is the
    /// sentinel or not a region of this map; a missing route is
    /// [`Traject::Unreachable`].
    pub fn path_between_regions(&self, from: RegionId, to: RegionId) -> Result<Traject, AccessibilityError> {
        for id in [from, to] {
            if self.region(id).is_none() {
                return Err(AccessibilityError::UnknownRegion(id));
            }
        }

        Ok(match self.graph.shortest_path(from, to) {
            Some(path) => Traject::Path(path),
            None => Traject::Unreachable,
        })
    }

    /// Whether a route exists. Invalid ids are never reachable.
    pub fn is_reachable(&self, from: RegionId, to: RegionId) -> bool {
        self.path_between_regions(from, to)
            .map(|t| t.is_reachable())
            .unwrap_or(false)
    }
}
