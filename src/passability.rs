use std::fmt;

use crate::region_analysis::structs::Domain;
use crate::tile_map::TileMap;

/// Obstruction bits that block each traversal domain.
///
/// A cell is open for a domain when none of that domain's blocking bits are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassabilityMasks {
    pub land_blocked: u16,
    pub water_blocked: u16,
}

impl PassabilityMasks {
    pub fn new(land_blocked: u16, water_blocked: u16) -> Self {
        Self {
            land_blocked,
            water_blocked,
        }
    }
}

/// Per-cell terrain class derived from the obstruction bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainCode {
    Impassable,
    /// Navigable, not walkable.
    DeepWater,
    /// Walkable, not navigable.
    Land,
    /// Walkable and navigable.
    Shallow,
}

impl TerrainCode {
    #[inline]
    pub fn from_open(land_open: bool, water_open: bool) -> Self {
        match (land_open, water_open) {
            (false, false) => TerrainCode::Impassable,
            (false, true) => TerrainCode::DeepWater,
            (true, false) => TerrainCode::Land,
            (true, true) => TerrainCode::Shallow,
        }
    }

    #[inline]
    pub fn is_land_passable(self) -> bool {
        matches!(self, TerrainCode::Land | TerrainCode::Shallow)
    }

    #[inline]
    pub fn is_water_passable(self) -> bool {
        matches!(self, TerrainCode::DeepWater | TerrainCode::Shallow)
    }

    #[inline]
    pub fn is_passable(self, domain: Domain) -> bool {
        match domain {
            Domain::Land => self.is_land_passable(),
            Domain::Water => self.is_water_passable(),
        }
    }

    fn symbol(self) -> char {
        match self {
            TerrainCode::Impassable => '#',
            TerrainCode::DeepWater => '~',
            TerrainCode::Land => '.',
            TerrainCode::Shallow => ',',
        }
    }
}

impl fmt::Display for TerrainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Classifies a single cell.
#[inline]
pub fn classify(bits: u16, masks: PassabilityMasks) -> TerrainCode {
    let land_open = bits & masks.land_blocked == 0;
    let water_open = bits & masks.water_blocked == 0;
    TerrainCode::from_open(land_open, water_open)
}

/// Classifies every cell of a raw obstruction grid.
pub fn classify_grid(obstructions: &TileMap<u16>, masks: PassabilityMasks) -> TileMap<TerrainCode> {
    let terrain = obstructions.map(|bits| classify(*bits, masks));

    if log::log_enabled!(log::Level::Debug) {
        let shallow = terrain.as_slice().iter().filter(|code| **code == TerrainCode::Shallow).count();
        log::debug!(
            "classified {}x{} grid, {} shallow cells",
            terrain.width(),
            terrain.height(),
            shallow
        );
    }

    terrain
}

impl fmt::Display for TileMap<TerrainCode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                write!(f, "{}", self[y * self.width() + x])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
