#![allow(dead_code)]

use terrain_accessibility::{PassabilityMasks, RegionMap, TileMap};

pub const BLOCK_LAND: u16 = 0b0001;
pub const BLOCK_WATER: u16 = 0b0010;

pub fn masks() -> PassabilityMasks {
    PassabilityMasks::new(BLOCK_LAND, BLOCK_WATER)
}

/// `#` impassable, `~` deep water, `,` shallow, anything else land.
pub fn obstruction_grid(rows: &[&str]) -> TileMap<u16> {
    let width = rows[0].len();
    let cells = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|c| match c {
            '#' => BLOCK_LAND | BLOCK_WATER,
            '~' => BLOCK_LAND,
            ',' => 0,
            _ => BLOCK_WATER,
        })
        .collect();
    TileMap::from_vec(width, rows.len(), cells).expect("rows must all be the same length")
}

pub fn region_map(rows: &[&str]) -> RegionMap {
    RegionMap::build(&obstruction_grid(rows), 1.0, masks()).expect("map should build")
}

/// Random obstruction grid where each cell gets one of the four terrain kinds.
pub fn random_grid(rng: &mut fastrand::Rng, width: usize, height: usize) -> TileMap<u16> {
    let kinds = [BLOCK_LAND | BLOCK_WATER, BLOCK_LAND, BLOCK_WATER, 0];
    let cells = (0..width * height).map(|_| kinds[rng.usize(..kinds.len())]).collect();
    TileMap::from_vec(width, height, cells).expect("dimensions match")
}

/// A `size`×`size` sea with a one-cell island on every even row and column.
pub fn archipelago_grid(size: usize) -> TileMap<u16> {
    let cells = (0..size * size)
        .map(|idx| {
            let (x, y) = (idx % size, idx / size);
            if x % 2 == 0 && y % 2 == 0 { BLOCK_WATER } else { BLOCK_LAND }
        })
        .collect();
    TileMap::from_vec(size, size, cells).expect("dimensions match")
}
