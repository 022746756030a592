//! Index plans connecting the ghosted local numbering to the global
//! numbering.
//!
//! Everything here is closed-form arithmetic over shared knowledge: both
//! ends of every exchange derive identical index sequences independently,
//! so no metadata ever crosses ranks.
//!
//! The global->local plan visits the 27 neighbor quadrants in index order.
//! Each quadrant maps a sub-region of the local ghost box onto a rectangle
//! of the neighbor's owned box. Two complications drive all the arithmetic:
//!
//! - A neighbor sitting on a non-periodic far boundary packs reduced
//!   face/edge/corner blocks after its full elements, so its row and layer
//!   pitches are wider than `n * epe`. This applies both when the neighbor
//!   shares our boundary column (same offset, we are the boundary) and
//!   when the neighbor is one step closer to the boundary than us.
//! - When this rank itself is a non-periodic far boundary, the ghost
//!   region past the owned box holds one partial layer of real dof (the
//!   sub-locations with no extent along the boundary axes) before turning
//!   into dummies.

pub mod injective;
pub mod local_remap;
pub mod local_to_global;

use smallvec::SmallVec;

use crate::dof::{DofLayout, SlotRun, AXIS_X, AXIS_Y, AXIS_Z, SLOT_COUNT};
use crate::error::{Result, StagError};
use crate::quadrant::{in_star, quadrant_offset, QUADRANT_COUNT, SELF_QUADRANT};
use crate::types::{BoundaryType, GridInt, StencilType};

/// Parallel index arrays of a scatter plan: slot `i` of both arrays forms
/// one (local, global) pair. Locals never repeat; globals repeat only when
/// a periodic axis has a single rank and the halo wraps onto its owner.
#[derive(Clone, Debug, Default)]
pub struct ScatterIndices {
  pub local: Vec<GridInt>,
  pub global: Vec<GridInt>,
}

impl ScatterIndices {
  pub fn len(&self) -> usize {
    self.local.len()
  }

  pub fn is_empty(&self) -> bool {
    self.local.is_empty()
  }
}

/// Geometry shared by the index builders, assembled once during set-up.
pub(crate) struct Geometry<'a> {
  pub dof: DofLayout,
  pub boundary: [BoundaryType; 3],
  pub stencil_type: StencilType,
  pub stencil_width: GridInt,
  pub n_ranks: [GridInt; 3],
  pub rank_coords: [GridInt; 3],
  pub ownership: &'a [Vec<GridInt>; 3],
  pub neighbors: &'a [GridInt; QUADRANT_COUNT],
  pub global_offsets: &'a [GridInt],
  pub start: [GridInt; 3],
  pub n: [GridInt; 3],
  pub start_ghost: [GridInt; 3],
  pub n_ghost: [GridInt; 3],
  pub entries: GridInt,
  pub entries_ghost: GridInt,

  // Derived below.
  pub epr_ghost: GridInt,
  pub epl_ghost: GridInt,
  pub ghost_offset_start: [GridInt; 3],
  pub ghost_offset_end: [GridInt; 3],
  pub dummy_start: [bool; 3],
  pub dummy_end: [bool; 3],
  pub next_to_dummy_end: [bool; 3],
  /// Star and stencil-free halos share the axis-only reach.
  pub star_like: bool,
  /// Owned extents of each neighbor, valid where `neighbors[q] >= 0`.
  pub neighbor_n: [[GridInt; 3]; QUADRANT_COUNT],
  /// Entry pitches on each neighbor, valid where `neighbors[q] >= 0`.
  pub epr_neighbor: [GridInt; QUADRANT_COUNT],
  pub epl_neighbor: [GridInt; QUADRANT_COUNT],
  pub face_row_neighbor: [GridInt; QUADRANT_COUNT],
  /// Surviving dof runs per extra-axis mask.
  pub runs: [SmallVec<[SlotRun; SLOT_COUNT]>; SLOT_COUNT],
}

impl<'a> Geometry<'a> {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    dof: DofLayout,
    boundary: [BoundaryType; 3],
    stencil_type: StencilType,
    stencil_width: GridInt,
    n_ranks: [GridInt; 3],
    rank_coords: [GridInt; 3],
    ownership: &'a [Vec<GridInt>; 3],
    neighbors: &'a [GridInt; QUADRANT_COUNT],
    global_offsets: &'a [GridInt],
    start: [GridInt; 3],
    n: [GridInt; 3],
    start_ghost: [GridInt; 3],
    n_ghost: [GridInt; 3],
    entries: GridInt,
    entries_ghost: GridInt,
  ) -> Self {
    let epe = dof.entries_per_element();
    let epf = dof.entries_per_face();
    let epedge = dof.entries_per_edge();
    let epr_ghost = n_ghost[0] * epe;
    let epl_ghost = n_ghost[1] * epr_ghost;
    let mut ghost_offset_start = [0; 3];
    let mut ghost_offset_end = [0; 3];
    let mut dummy_start = [false; 3];
    let mut dummy_end = [false; 3];
    let mut next_to_dummy_end = [false; 3];
    for a in 0..3 {
      ghost_offset_start[a] = start[a] - start_ghost[a];
      ghost_offset_end[a] = start_ghost[a] + n_ghost[a] - (start[a] + n[a]);
      let non_periodic = boundary[a] != BoundaryType::Periodic;
      dummy_start[a] = rank_coords[a] == 0 && non_periodic;
      dummy_end[a] = rank_coords[a] == n_ranks[a] - 1 && non_periodic;
      next_to_dummy_end[a] = non_periodic && rank_coords[a] == n_ranks[a] - 2;
    }
    let star_like = stencil_type != StencilType::Box;

    let mut neighbor_n = [[0; 3]; QUADRANT_COUNT];
    let mut epr_neighbor = [0; QUADRANT_COUNT];
    let mut epl_neighbor = [0; QUADRANT_COUNT];
    let mut face_row_neighbor = [0; QUADRANT_COUNT];
    for q in 0..QUADRANT_COUNT {
      if neighbors[q] < 0 {
        continue;
      }
      let coords = crate::rank_grid::rank_coords(neighbors[q] as usize, n_ranks);
      for a in 0..3 {
        neighbor_n[q][a] = ownership[a][coords[a] as usize];
      }
      let off = quadrant_offset(q);
      // Whether the neighbor itself sits on the non-periodic far boundary
      // of each axis. One step towards the boundary means the neighbor is
      // the boundary rank exactly when we are next to it.
      let nbr_far_x = match off[0] {
        0 => dummy_end[0],
        1 => next_to_dummy_end[0],
        _ => false,
      };
      let nbr_far_y = match off[1] {
        0 => dummy_end[1],
        1 => next_to_dummy_end[1],
        _ => false,
      };
      epr_neighbor[q] = epe * neighbor_n[q][0] + if nbr_far_x { epf } else { 0 };
      epl_neighbor[q] = epr_neighbor[q] * neighbor_n[q][1]
        + if nbr_far_y {
          neighbor_n[q][0] * epf + if nbr_far_x { epedge } else { 0 }
        } else {
          0
        };
      face_row_neighbor[q] = epf * neighbor_n[q][0] + if nbr_far_x { epedge } else { 0 };
    }

    let runs = std::array::from_fn(|mask| dof.surviving_runs(mask as u8));

    Self {
      dof,
      boundary,
      stencil_type,
      stencil_width,
      n_ranks,
      rank_coords,
      ownership,
      neighbors,
      global_offsets,
      start,
      n,
      start_ghost,
      n_ghost,
      entries,
      entries_ghost,
      epr_ghost,
      epl_ghost,
      ghost_offset_start,
      ghost_offset_end,
      dummy_start,
      dummy_end,
      next_to_dummy_end,
      star_like,
      neighbor_n,
      epr_neighbor,
      epl_neighbor,
      face_row_neighbor,
      runs,
    }
  }
}

/// One quadrant's contribution to a scatter plan: the ghost sub-region it
/// fills, the matching origin in the neighbor's owned numbering, the
/// neighbor's pitches, and which axes gain a partial extra slab.
pub(crate) struct QuadrantSweep {
  pub global_offset: GridInt,
  pub epr_neighbor: GridInt,
  pub epl_neighbor: GridInt,
  pub face_row: GridInt,
  pub start: [GridInt; 3],
  pub start_ghost: [GridInt; 3],
  pub end_ghost: [GridInt; 3],
  pub extra: [bool; 3],
}

/// The sweep for quadrant `q`, or `None` when the quadrant contributes
/// nothing: past a non-periodic boundary, or diagonal under a star halo.
pub(crate) fn quadrant_sweep(geo: &Geometry, q: usize) -> Option<QuadrantSweep> {
  let off = quadrant_offset(q);
  if q != SELF_QUADRANT && geo.star_like && !in_star(off) {
    return None;
  }
  for a in 0..3 {
    match off[a] {
      -1 if geo.dummy_start[a] => return None,
      1 if geo.dummy_end[a] => return None,
      _ => {}
    }
  }
  let mut start = [0; 3];
  let mut start_ghost = [0; 3];
  let mut end_ghost = [0; 3];
  let mut extra = [false; 3];
  for a in 0..3 {
    let gos = geo.ghost_offset_start[a];
    let goe = geo.ghost_offset_end[a];
    match off[a] {
      -1 => {
        start[a] = geo.neighbor_n[q][a] - gos;
        start_ghost[a] = 0;
        end_ghost[a] = gos;
      }
      0 => {
        start[a] = 0;
        start_ghost[a] = gos;
        end_ghost[a] = geo.n_ghost[a] - goe;
        extra[a] = geo.dummy_end[a];
      }
      _ => {
        start[a] = 0;
        start_ghost[a] = geo.n_ghost[a] - goe;
        end_ghost[a] = geo.n_ghost[a];
      }
    }
  }
  Some(QuadrantSweep {
    global_offset: geo.global_offsets[geo.neighbors[q] as usize],
    epr_neighbor: geo.epr_neighbor[q],
    epl_neighbor: geo.epl_neighbor[q],
    face_row: geo.face_row_neighbor[q],
    start,
    start_ghost,
    end_ghost,
    extra,
  })
}

/// Emit the (local, global) pairs of one quadrant sweep, in the canonical
/// order: cells row by row, the extra-x cell closing each row, the extra-y
/// row closing each layer, the extra-z layer closing the sweep. Both ends
/// of an exchange run this same order.
pub(crate) fn populate_pairs(geo: &Geometry, sweep: &QuadrantSweep, out: &mut ScatterIndices) {
  let epe = geo.dof.entries_per_element();
  let [sx, sy, sz] = sweep.start;
  let [gx0, gy0, gz0] = sweep.start_ghost;
  let [gx1, gy1, gz1] = sweep.end_ghost;
  let x_extra = gx1 - gx0 + sx;
  let y_extra = gy1 - gy0 + sy;
  let z_extra = gz1 - gz0 + sz;

  let mut emit_cell = |mask: u8, ig: GridInt, jg: GridInt, kg: GridInt, cell_global: GridInt| {
    let cell_local = kg * geo.epl_ghost + jg * geo.epr_ghost + ig * epe;
    let mut d = 0;
    for (offset, count) in &geo.runs[mask as usize] {
      for c in 0..*count {
        out.local.push(cell_local + offset + c);
        out.global.push(cell_global + d);
        d += 1;
      }
    }
  };

  // Rows of full elements, with the partial extras appended in order.
  for kg in gz0..gz1 {
    let k = kg - gz0 + sz;
    let layer = sweep.global_offset + k * sweep.epl_neighbor;
    for jg in gy0..gy1 {
      let j = jg - gy0 + sy;
      let row = layer + j * sweep.epr_neighbor;
      for ig in gx0..gx1 {
        let i = ig - gx0 + sx;
        emit_cell(0, ig, jg, kg, row + i * epe);
      }
      if sweep.extra[0] {
        emit_cell(AXIS_X, gx1, jg, kg, row + x_extra * epe);
      }
    }
    if sweep.extra[1] {
      let row = layer + y_extra * sweep.epr_neighbor;
      let stride = geo.dof.entries_per_face();
      for ig in gx0..gx1 {
        let i = ig - gx0 + sx;
        emit_cell(AXIS_Y, ig, gy1, kg, row + i * stride);
      }
      if sweep.extra[0] {
        emit_cell(AXIS_X | AXIS_Y, gx1, gy1, kg, row + x_extra * stride);
      }
    }
  }
  if sweep.extra[2] {
    let layer = sweep.global_offset + z_extra * sweep.epl_neighbor;
    for jg in gy0..gy1 {
      let j = jg - gy0 + sy;
      let row = layer + j * sweep.face_row;
      let stride = geo.dof.entries_per_face();
      for ig in gx0..gx1 {
        let i = ig - gx0 + sx;
        emit_cell(AXIS_Z, ig, jg, gz1, row + i * stride);
      }
      if sweep.extra[0] {
        emit_cell(AXIS_X | AXIS_Z, gx1, jg, gz1, row + x_extra * stride);
      }
    }
    if sweep.extra[1] {
      let row = layer + y_extra * sweep.face_row;
      let stride = geo.dof.entries_per_edge();
      for ig in gx0..gx1 {
        let i = ig - gx0 + sx;
        emit_cell(AXIS_Y | AXIS_Z, ig, gy1, gz1, row + i * stride);
      }
      if sweep.extra[0] {
        emit_cell(AXIS_X | AXIS_Y | AXIS_Z, gx1, gy1, gz1, row + x_extra * stride);
      }
    }
  }
}

/// Number of local entries with a global counterpart, the expected length
/// of the global->local plan.
fn expected_transfer_entries(geo: &Geometry) -> GridInt {
  let epe = geo.dof.entries_per_element();
  let epf = geo.dof.entries_per_face();
  let epedge = geo.dof.entries_per_edge();
  let epcorner = geo.dof.entries_per_corner();
  let n = geo.n;
  let de = geo.dummy_end;
  // Ghost extents minus the dummy regions on each side.
  let mut nng = [0; 3];
  for a in 0..3 {
    nng[a] = geo.n_ghost[a]
      - if geo.dummy_start[a] { geo.ghost_offset_start[a] } else { 0 }
      - if geo.dummy_end[a] { geo.ghost_offset_end[a] } else { 0 };
  }
  if geo.star_like {
    // The halo is a plus-shape: three overlapping slabs counted once.
    (nng[0] * n[1] * n[2] + n[0] * nng[1] * n[2] + n[0] * n[1] * nng[2] - 2 * n[0] * n[1] * n[2])
      * epe
      + if de[0] { (nng[1] * n[2] + n[1] * nng[2] - n[1] * n[2]) * epf } else { 0 }
      + if de[1] { (nng[0] * n[2] + n[0] * nng[2] - n[0] * n[2]) * epf } else { 0 }
      + if de[2] { (nng[0] * n[1] + n[0] * nng[1] - n[0] * n[1]) * epf } else { 0 }
      + if de[0] && de[1] { nng[2] * epedge } else { 0 }
      + if de[2] && de[0] { nng[1] * epedge } else { 0 }
      + if de[1] && de[2] { nng[0] * epedge } else { 0 }
      + if de[0] && de[1] && de[2] { epcorner } else { 0 }
  } else {
    nng[0] * nng[1] * nng[2] * epe
      + if de[0] { nng[1] * nng[2] * epf } else { 0 }
      + if de[1] { nng[2] * nng[0] * epf } else { 0 }
      + if de[2] { nng[0] * nng[1] * epf } else { 0 }
      + if de[0] && de[1] { nng[2] * epedge } else { 0 }
      + if de[2] && de[0] { nng[1] * epedge } else { 0 }
      + if de[1] && de[2] { nng[0] * epedge } else { 0 }
      + if de[0] && de[1] && de[2] { epcorner } else { 0 }
  }
}

/// Build the global->local plan: one (local, global) pair per local entry
/// that has a global counterpart. Dummy entries are excluded.
pub(crate) fn build_global_to_local(geo: &Geometry) -> Result<ScatterIndices> {
  if geo.stencil_type != StencilType::None
    && (geo.n[0] < geo.stencil_width
      || geo.n[1] < geo.stencil_width
      || geo.n[2] < geo.stencil_width)
  {
    return Err(StagError::Unsupported(format!(
      "local sizes {} x {} x {} are smaller than the stencil width {}",
      geo.n[0], geo.n[1], geo.n[2], geo.stencil_width
    )));
  }

  let expected = expected_transfer_entries(geo);
  let mut out = ScatterIndices {
    local: Vec::with_capacity(expected as usize),
    global: Vec::with_capacity(expected as usize),
  };
  for q in 0..QUADRANT_COUNT {
    if let Some(sweep) = quadrant_sweep(geo, q) {
      populate_pairs(geo, &sweep, &mut out);
    }
  }
  if out.len() as GridInt != expected {
    return Err(StagError::Internal(format!(
      "global->local plan has {} entries, expected {}",
      out.len(),
      expected
    )));
  }
  Ok(out)
}
