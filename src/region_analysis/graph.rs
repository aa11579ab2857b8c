use std::collections::{BTreeSet, VecDeque};

use super::segmentation::Segmentation;
use super::structs::RegionId;

/// Undirected links between land and water regions that touch or overlap.
///
/// Neighbour lists keep the order in which links were first found while
/// scanning the grid, so two builds from the same terrain compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionGraph {
  // indexed by raw region id; slots 0 and 1 stay empty
  adjacency: Vec<Vec<RegionId>>,
  edge_count: usize,
}

impl RegionGraph {
  /// Links regions in a single pass over the cells.
  ///
  /// Each cell is compared with itself (a shallow cell belongs to one land and
  /// one water region), its right neighbour and its bottom neighbour, which
  /// visits every 4-adjacent pair exactly once. Same-domain neighbours already
  /// share a region, so only land/water pairs are ever linked.
  pub fn build(segmentation: &Segmentation) -> RegionGraph {
    let land = &segmentation.land_regions;
    let water = &segmentation.water_regions;
    let width = land.width();
    let height = land.height();

    let mut graph = RegionGraph {
      adjacency: vec![Vec::new(); segmentation.regions.len() + RegionId::FIRST.index()],
      edge_count: 0,
    };

    // pairs already linked, (land, water); only consulted for membership
    let mut linked: BTreeSet<(RegionId, RegionId)> = BTreeSet::new();

    for xy in land.all_xy() {
      let idx = land.xy_to_linear_index(xy);

      graph.link(&mut linked, land[idx], water[idx]);

      if xy.x + 1 < width {
        graph.link(&mut linked, land[idx], water[idx + 1]);
        graph.link(&mut linked, land[idx + 1], water[idx]);
      }
      if xy.y + 1 < height {
        graph.link(&mut linked, land[idx], water[idx + width]);
        graph.link(&mut linked, land[idx + width], water[idx]);
      }
    }

    log::debug!(
      "linked {} regions with {} land/water edges",
      segmentation.regions.len(),
      graph.edge_count
    );

    graph
  }

  fn link(&mut self, linked: &mut BTreeSet<(RegionId, RegionId)>, land: RegionId, water: RegionId) {
    if !land.is_region() || !water.is_region() {
      return;
    }
    if !linked.insert((land, water)) {
      return;
    }
    self.adjacency[land.index()].push(water);
    self.adjacency[water.index()].push(land);
    self.edge_count += 1;
  }

  #[inline]
  fn contains(&self, id: RegionId) -> bool {
    id.is_region() && id.index() < self.adjacency.len()
  }

  /// Regions directly linked to `id`, in discovery order. Empty for the
  /// sentinel and for ids this graph doesn't know.
  #[inline]
  pub fn neighbors(&self, id: RegionId) -> &[RegionId] {
    self.adjacency
      .get(id.index())
      .map(|n| n.as_slice())
      .unwrap_or(&[])
  }

  #[inline]
  pub fn edge_count(&self) -> usize {
    self.edge_count
  }

  /// Iterates every edge once as `(lower id, higher id)`, ordered by the lower id.
  pub fn edges(&self) -> impl Iterator<Item = (RegionId, RegionId)> + '_ {
    self.adjacency
      .iter()
      .enumerate()
      .flat_map(|(idx, neighbors)| {
        let a = RegionId::from(idx as u32);
        neighbors.iter().filter(move |b| a < **b).map(move |b| (a, *b))
      })
  }

  /// Breadth-first hop path from `from` to `to`, both ends included.
  ///
  /// Neighbours are expanded in adjacency order, so ties between equally
  /// short routes always resolve the same way. Ids this graph doesn't know
  /// have no path, not even to themselves.
  pub fn shortest_path(&self, from: RegionId, to: RegionId) -> Option<Vec<RegionId>> {
    if !self.contains(from) || !self.contains(to) {
      return None;
    }
    if from == to {
      return Some(vec![from]);
    }

    let mut came_from: Vec<Option<RegionId>> = vec![None; self.adjacency.len()];
    let mut queue = VecDeque::new();
    came_from[from.index()] = Some(from);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
      for next in self.neighbors(current) {
        if came_from[next.index()].is_some() {
          continue;
        }
        came_from[next.index()] = Some(current);

        if *next == to {
          let mut path = vec![to];
          let mut step = current;
          while step != from {
            path.push(step);
            step = came_from[step.index()]?;
          }
          path.push(from);
          path.reverse();
          return Some(path);
        }

        queue.push_back(*next);
      }
    }

    None
  }

  /// Copies the graph into a `petgraph` map, one node per region id.
  #[cfg(feature = "petgraph")]
  pub fn to_petgraph(&self) -> petgraph::graphmap::UnGraphMap<RegionId, ()> {
    let mut graph = petgraph::graphmap::UnGraphMap::new();
    for idx in RegionId::FIRST.index()..self.adjacency.len() {
      graph.add_node(RegionId::from(idx as u32));
    }
    for (a, b) in self.edges() {
      graph.add_edge(a, b, ());
    }
    graph
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::passability::TerrainCode;
  use crate::region_analysis::segmentation::segment;
  use crate::region_analysis::structs::AnalysisConfig;
  use crate::tile_map::TileMap;

  fn graph_for(rows: &[&str]) -> (Segmentation, RegionGraph) {
    let width = rows[0].len();
    let cells = rows
      .iter()
      .flat_map(|row| row.chars())
      .map(|c| match c {
        '#' => TerrainCode::Impassable,
        '~' => TerrainCode::DeepWater,
        ',' => TerrainCode::Shallow,
        _ => TerrainCode::Land,
      })
      .collect();
    let terrain = TileMap::from_vec(width, rows.len(), cells).unwrap();
    let seg = segment(&terrain, &AnalysisConfig::default()).unwrap();
    let graph = RegionGraph::build(&seg);
    (seg, graph)
  }

  fn id(value: u32) -> RegionId {
    RegionId::from(value)
  }

  #[test]
  fn beach_links_land_and_water() {
    let (_, graph) = graph_for(&["..~~", "..~~"]);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.neighbors(id(2)), &[id(3)]);
    assert_eq!(graph.neighbors(id(3)), &[id(2)]);
  }

  #[test]
  fn wall_between_domains_blocks_link() {
    let (_, graph) = graph_for(&[".#~"]);
    assert_eq!(graph.edge_count(), 0);
  }

  #[test]
  fn diagonal_contact_is_not_a_link() {
    let (_, graph) = graph_for(&[".#", "#~"]);
    assert_eq!(graph.edge_count(), 0);
  }

  #[test]
  fn isolated_shallow_cell_links_to_itself_across_domains() {
    let (seg, graph) = graph_for(&["#,#"]);
    let land = seg.land_regions[1];
    let water = seg.water_regions[1];
    assert_eq!(graph.neighbors(land), &[water]);
  }

  #[test]
  fn edges_are_not_duplicated() {
    let (_, graph) = graph_for(&["....", "~~~~", "...."]);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(id(2), id(3)), (id(3), id(4))]);
  }

  #[test]
  fn path_goes_through_water() {
    let (_, graph) = graph_for(&[".~."]);
    assert_eq!(graph.shortest_path(id(2), id(4)), Some(vec![id(2), id(3), id(4)]));
    assert_eq!(graph.shortest_path(id(4), id(2)), Some(vec![id(4), id(3), id(2)]));
  }

  #[test]
  fn disconnected_regions_have_no_path() {
    let (_, graph) = graph_for(&[".#~"]);
    assert_eq!(graph.shortest_path(id(2), id(3)), None);
  }

  #[test]
  fn unknown_ids_have_no_neighbors() {
    let (_, graph) = graph_for(&["."]);
    assert!(graph.neighbors(RegionId::SENTINEL).is_empty());
    assert!(graph.neighbors(id(99)).is_empty());
  }

  #[test]
  fn unknown_ids_have_no_path() {
    let (_, graph) = graph_for(&[".~."]);
    assert_eq!(graph.shortest_path(id(99), id(2)), None);
    assert_eq!(graph.shortest_path(id(2), id(99)), None);
    assert_eq!(graph.shortest_path(id(99), id(99)), None);
    assert_eq!(graph.shortest_path(RegionId::SENTINEL, RegionId::SENTINEL), None);
    assert_eq!(graph.shortest_path(id(3), id(3)), Some(vec![id(3)]));
  }

  #[test]
  fn sea_links_each_island_once() {
    // one-cell islands on every even row and column of a sea
    let rows: Vec<String> = (0..9)
      .map(|y| (0..9).map(|x| if x % 2 == 0 && y % 2 == 0 { '.' } else { '~' }).collect())
      .collect();
    let rows: Vec<&str> = rows.iter().map(|r| r.as_str()).collect();
    let (seg, graph) = graph_for(&rows);

    let sea = seg.water_regions[1];
    assert_eq!(graph.edge_count(), 25);
    assert_eq!(graph.neighbors(sea).len(), 25);
    // island ids in discovery order
    let islands: Vec<RegionId> = seg.regions.iter().map(|r| r.get_id()).filter(|i| *i != sea).collect();
    assert_eq!(graph.neighbors(sea), islands.as_slice());
  }

  #[cfg(feature = "petgraph")]
  #[test]
  fn petgraph_export_keeps_every_region() {
    let (_, graph) = graph_for(&[".~.#."]);
    let exported = graph.to_petgraph();
    assert_eq!(exported.node_count(), 4);
    assert_eq!(exported.edge_count(), 2);
    assert!(exported.contains_edge(id(3), id(2)));
  }
}
