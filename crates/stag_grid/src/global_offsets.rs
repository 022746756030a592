//! Per-rank offsets into the flat global numbering.
//!
//! The global numbering is dense and block-contiguous per rank. A rank's
//! interval covers its owned elements at full width, plus the reduced
//! face, edge and corner blocks it gains on non-periodic far boundaries.
//! Every rank computes the whole table from shared knowledge, trading O(P)
//! memory for zero communication.

use crate::dof::{DofLayout, AXIS_X, AXIS_Y, AXIS_Z};
use crate::rank_grid::rank_coords;
use crate::types::{BoundaryType, GridInt};

/// Size of the global interval owned by the rank at `coords`.
pub fn interval_entries(
  dof: &DofLayout,
  coords: [GridInt; 3],
  n_ranks: [GridInt; 3],
  ownership: &[Vec<GridInt>; 3],
  boundary: [BoundaryType; 3],
) -> GridInt {
  let n = [
    ownership[0][coords[0] as usize],
    ownership[1][coords[1] as usize],
    ownership[2][coords[2] as usize],
  ];
  let far = |a: usize| coords[a] == n_ranks[a] - 1 && boundary[a] != BoundaryType::Periodic;
  let (fx, fy, fz) = (far(0), far(1), far(2));
  let epe = dof.entries_per_element();
  let epf = dof.entries_per_face();
  let epedge = dof.entries_per_edge();
  let epcorner = dof.entries_per_corner();
  let mut entries = n[0] * n[1] * n[2] * epe;
  if fx {
    entries += n[1] * n[2] * epf;
  }
  if fy {
    entries += n[0] * n[2] * epf;
  }
  if fz {
    entries += n[0] * n[1] * epf;
  }
  if fx && fy {
    entries += n[2] * epedge;
  }
  if fx && fz {
    entries += n[1] * epedge;
  }
  if fy && fz {
    entries += n[0] * epedge;
  }
  if fx && fy && fz {
    entries += epcorner;
  }
  entries
}

/// Global offsets for all ranks, in rank order.
pub fn build_global_offsets(
  dof: &DofLayout,
  n_ranks: [GridInt; 3],
  ownership: &[Vec<GridInt>; 3],
  boundary: [BoundaryType; 3],
) -> Vec<GridInt> {
  let size = (n_ranks[0] * n_ranks[1] * n_ranks[2]) as usize;
  let mut offsets = vec![0; size];
  for rank in 1..size {
    let prev = rank_coords(rank - 1, n_ranks);
    offsets[rank] =
      offsets[rank - 1] + interval_entries(dof, prev, n_ranks, ownership, boundary);
  }
  offsets
}

/// Total entry count of the global numbering.
pub fn total_entries(
  dof: &DofLayout,
  n_ranks: [GridInt; 3],
  ownership: &[Vec<GridInt>; 3],
  boundary: [BoundaryType; 3],
  offsets: &[GridInt],
) -> GridInt {
  let last = offsets.len() - 1;
  offsets[last] + interval_entries(dof, rank_coords(last, n_ranks), n_ranks, ownership, boundary)
}

/// Extra-axis mask for a rank sitting on non-periodic far boundaries.
pub fn far_boundary_mask(
  coords: [GridInt; 3],
  n_ranks: [GridInt; 3],
  boundary: [BoundaryType; 3],
) -> u8 {
  let mut mask = 0;
  for (a, bit) in [AXIS_X, AXIS_Y, AXIS_Z].into_iter().enumerate() {
    if coords[a] == n_ranks[a] - 1 && boundary[a] != BoundaryType::Periodic {
      mask |= bit;
    }
  }
  mask
}

#[cfg(test)]
#[path = "global_offsets_test.rs"]
mod global_offsets_test;
