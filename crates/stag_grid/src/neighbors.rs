//! Neighbor rank table.

use crate::quadrant::{quadrant_offset, QUADRANT_COUNT};
use crate::rank_grid::rank_index;
use crate::types::{BoundaryType, GridInt};

/// Rank at offset `off` from `r` along one axis, or `None` past a
/// non-periodic boundary.
fn axis_neighbor(off: i8, r: GridInt, ranks: GridInt, periodic: bool) -> Option<GridInt> {
  match off {
    -1 => {
      if r > 0 {
        Some(r - 1)
      } else if periodic {
        Some(ranks - 1)
      } else {
        None
      }
    }
    0 => Some(r),
    1 => {
      if r < ranks - 1 {
        Some(r + 1)
      } else if periodic {
        Some(0)
      } else {
        None
      }
    }
    _ => unreachable!("axis offset out of range"),
  }
}

/// The 27 neighbor ranks of the rank at `coords`, indexed by quadrant,
/// with -1 where no neighbor exists. Index 13 is the rank itself.
pub fn build_neighbor_table(
  coords: [GridInt; 3],
  n_ranks: [GridInt; 3],
  boundary: [BoundaryType; 3],
) -> [GridInt; QUADRANT_COUNT] {
  let periodic = [
    boundary[0] == BoundaryType::Periodic,
    boundary[1] == BoundaryType::Periodic,
    boundary[2] == BoundaryType::Periodic,
  ];
  let mut table = [-1; QUADRANT_COUNT];
  for (q, entry) in table.iter_mut().enumerate() {
    let off = quadrant_offset(q);
    let x = axis_neighbor(off[0], coords[0], n_ranks[0], periodic[0]);
    let y = axis_neighbor(off[1], coords[1], n_ranks[1], periodic[1]);
    let z = axis_neighbor(off[2], coords[2], n_ranks[2], periodic[2]);
    if let (Some(x), Some(y), Some(z)) = (x, y, z) {
      *entry = rank_index([x, y, z], n_ranks);
    }
  }
  table
}

#[cfg(test)]
#[path = "neighbors_test.rs"]
mod neighbors_test;
