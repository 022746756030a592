//! The full-length local->global map.
//!
//! Unlike the scatter plan this map is indexed directly by local entry and
//! covers every slot of the ghost box, writing -1 for dummy entries. Cells
//! are visited in local order: ghost layers, then ghost rows, then ghost
//! cells, then the per-cell slots in canonical order.
//!
//! Each ghost coordinate classifies independently per axis: it lands on
//! the lower neighbor, inside the owned box, on the upper neighbor, on the
//! partial extra layer of a non-periodic far boundary, or past any real
//! data. The cell's quadrant and surviving dof follow from the three axis
//! classes; everything else is the same pitch arithmetic the scatter plan
//! uses.

use super::Geometry;
use crate::dof::{AXIS_X, AXIS_Y, AXIS_Z, SLOT_COUNT};
use crate::error::{Result, StagError};
use crate::quadrant::{in_star, quadrant_index};
use crate::types::{BoundaryType, GridInt};

/// Where one ghost coordinate lands along its axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AxisCell {
  /// On a real cell: the neighbor one step along `off`, at `coord` in that
  /// neighbor's owned numbering.
  Neighbor { off: i8, coord: GridInt },
  /// On the partial extra layer at a non-periodic far boundary.
  Extra,
  /// Past any real data.
  Dummy,
}

/// Classify every ghost coordinate of one axis.
fn classify_axis(geo: &Geometry, a: usize) -> Vec<AxisCell> {
  let gos = geo.ghost_offset_start[a];
  let goe = geo.ghost_offset_end[a];
  let n_ghost = geo.n_ghost[a];
  // Extent of the rank one step down, for translating low-side ghosts.
  let low_extent = if gos > 0 && !geo.dummy_start[a] {
    let below = if geo.rank_coords[a] > 0 {
      geo.rank_coords[a] - 1
    } else {
      debug_assert!(geo.boundary[a] == BoundaryType::Periodic);
      geo.n_ranks[a] - 1
    };
    geo.ownership[a][below as usize]
  } else {
    0
  };
  (0..n_ghost)
    .map(|g| {
      if g < gos {
        if geo.dummy_start[a] {
          AxisCell::Dummy
        } else {
          AxisCell::Neighbor {
            off: -1,
            coord: low_extent - gos + g,
          }
        }
      } else if g < n_ghost - goe {
        AxisCell::Neighbor {
          off: 0,
          coord: g - gos,
        }
      } else if !geo.dummy_end[a] {
        AxisCell::Neighbor {
          off: 1,
          coord: g - (n_ghost - goe),
        }
      } else if g == n_ghost - goe {
        AxisCell::Extra
      } else {
        AxisCell::Dummy
      }
    })
    .collect()
}

/// Build the local->global map, length `entries_ghost`.
pub(crate) fn build_local_to_global(geo: &Geometry) -> Result<Vec<GridInt>> {
  let epe = geo.dof.entries_per_element();
  let axis_bits = [AXIS_X, AXIS_Y, AXIS_Z];
  let classes: [Vec<AxisCell>; 3] = std::array::from_fn(|a| classify_axis(geo, a));

  let mut map = Vec::with_capacity(geo.entries_ghost as usize);
  for cz in &classes[2] {
    for cy in &classes[1] {
      'cell: for cx in &classes[0] {
        let cell = [*cx, *cy, *cz];
        let mut off = [0i8; 3];
        let mut coord = [0; 3];
        let mut mask = 0u8;
        for a in 0..3 {
          match cell[a] {
            AxisCell::Dummy => {
              map.extend(std::iter::repeat(-1).take(epe as usize));
              continue 'cell;
            }
            AxisCell::Neighbor { off: o, coord: c } => {
              off[a] = o;
              coord[a] = c;
            }
            AxisCell::Extra => {
              // The extra layer's data lives on the same-offset neighbor,
              // one cell past its owned extent.
              off[a] = 0;
              coord[a] = geo.n[a];
              mask |= axis_bits[a];
            }
          }
        }
        if geo.star_like && !in_star(off) {
          map.extend(std::iter::repeat(-1).take(epe as usize));
          continue;
        }
        let q = quadrant_index(off);
        debug_assert!(geo.neighbors[q] >= 0, "live cell mapped to missing neighbor");
        let row_pitch = if mask & AXIS_Z != 0 {
          geo.face_row_neighbor[q]
        } else {
          geo.epr_neighbor[q]
        };
        let x_stride = geo.dof.entries_surviving(mask & !AXIS_X);
        let base = geo.global_offsets[geo.neighbors[q] as usize]
          + coord[2] * geo.epl_neighbor[q]
          + coord[1] * row_pitch
          + coord[0] * x_stride;
        let mut d = 0;
        for slot in 0..SLOT_COUNT {
          let count = geo.dof.slot_dof(slot);
          if (slot as u8) & mask == 0 {
            for _ in 0..count {
              map.push(base + d);
              d += 1;
            }
          } else {
            map.extend(std::iter::repeat(-1).take(count as usize));
          }
        }
      }
    }
  }
  if map.len() as GridInt != geo.entries_ghost {
    return Err(StagError::Internal(format!(
      "local->global map has {} entries, expected {}",
      map.len(),
      geo.entries_ghost
    )));
  }
  Ok(map)
}

#[cfg(test)]
#[path = "local_to_global_test.rs"]
mod local_to_global_test;
