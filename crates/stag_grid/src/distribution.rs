//! The distribution object: set-up orchestration and queries.
//!
//! Set-up runs collectively in the SPMD sense: every rank executes the
//! same closed-form arithmetic on the same parameters, differing only in
//! its rank number, so all ranks agree on every table without exchanging
//! metadata. The resulting object is immutable; vectors, matrices and
//! operators share it read-only.

use crate::comm::Communicator;
use crate::dof::DofLayout;
use crate::error::{Result, StagError};
use crate::ghost::ghost_axis;
use crate::global_offsets::{build_global_offsets, interval_entries, total_entries};
use crate::location::{Location, LocationOffsets};
use crate::neighbors::build_neighbor_table;
use crate::partition::{default_ownership, validate_ownership, OwnedBox};
use crate::quadrant::QUADRANT_COUNT;
use crate::rank_grid::{choose_rank_grid, rank_coords};
use crate::scatter::injective::{build_injective, needs_injective};
use crate::scatter::local_remap::build_local_remap;
use crate::scatter::local_to_global::build_local_to_global;
use crate::scatter::{build_global_to_local, Geometry, ScatterIndices};
use crate::types::{BoundaryType, GridInt, StagParams, StencilType};

/// Index limit of the transport layer.
const TRANSPORT_INDEX_MAX: i128 = i32::MAX as i128;

/// A fully set-up 3-D staggered-grid distribution for one rank.
#[derive(Clone, Debug)]
pub struct StagDistribution {
  // Construction parameters, resolved.
  global_sizes: [GridInt; 3],
  dof: DofLayout,
  boundary: [BoundaryType; 3],
  stencil_type: StencilType,
  stencil_width: GridInt,

  // Rank placement.
  comm_size: usize,
  rank: usize,
  n_ranks: [GridInt; 3],
  rank_coords: [GridInt; 3],
  ownership: [Vec<GridInt>; 3],

  // Owned and ghosted boxes.
  start: [GridInt; 3],
  n: [GridInt; 3],
  n_extra: [GridInt; 3],
  first_rank: [bool; 3],
  last_rank: [bool; 3],
  start_ghost: [GridInt; 3],
  n_ghost: [GridInt; 3],

  // Entry counts.
  entries: GridInt,
  entries_ghost: GridInt,
  global_entries: GridInt,

  // Index tables.
  neighbors: [GridInt; QUADRANT_COUNT],
  global_offsets: Vec<GridInt>,
  global_to_local: ScatterIndices,
  local_to_global: Vec<GridInt>,
  injective: Option<ScatterIndices>,
  local_remap: Vec<GridInt>,
  location_offsets: LocationOffsets,
}

impl StagDistribution {
  /// Collective set-up over a communicator.
  pub fn set_up(params: &StagParams, comm: &dyn Communicator) -> Result<Self> {
    Self::set_up_rank(params, comm.size(), comm.rank())
  }

  /// Set-up for every rank of a simulated universe, in rank order.
  pub fn set_up_universe(params: &StagParams, comm_size: usize) -> Result<Vec<Self>> {
    (0..comm_size)
      .map(|rank| Self::set_up_rank(params, comm_size, rank))
      .collect()
  }

  /// Set-up for one rank. The full decomposition is derived from the
  /// shared parameters plus the rank number alone.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "stag_grid::set_up", fields(rank = rank))
  )]
  pub fn set_up_rank(params: &StagParams, comm_size: usize, rank: usize) -> Result<Self> {
    params.validate()?;
    if comm_size == 0 || rank >= comm_size {
      return Err(StagError::ArgOutOfRange(format!(
        "rank {} outside communicator of size {}",
        rank, comm_size
      )));
    }
    let dof = DofLayout::new(params.dof);

    let n_ranks = choose_rank_grid(comm_size, params.global_sizes, params.ranks)?;
    let coords = rank_coords(rank, n_ranks);

    let mut ownership: [Vec<GridInt>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for a in 0..3 {
      match &params.ownership[a] {
        Some(l) => {
          validate_ownership(a, l, params.global_sizes[a], n_ranks[a])?;
          ownership[a] = l.clone();
        }
        None => ownership[a] = default_ownership(params.global_sizes[a], n_ranks[a]),
      }
    }

    let owned = OwnedBox::new(coords, n_ranks, &ownership);
    let neighbors = build_neighbor_table(coords, n_ranks, params.boundary);

    let entries = interval_entries(&dof, coords, n_ranks, &ownership, params.boundary);
    let local_product = owned.size[0] as i128
      * owned.size[1] as i128
      * owned.size[2] as i128
      * dof.entries_per_element() as i128;
    if local_product > TRANSPORT_INDEX_MAX {
      return Err(StagError::IntOverflow(format!(
        "mesh of {} x {} x {} with {} entries per element exceeds the 32-bit index range",
        owned.size[0],
        owned.size[1],
        owned.size[2],
        dof.entries_per_element()
      )));
    }

    let global_offsets = build_global_offsets(&dof, n_ranks, &ownership, params.boundary);
    let global_entries =
      total_entries(&dof, n_ranks, &ownership, params.boundary, &global_offsets);

    let mut start_ghost = [0; 3];
    let mut n_ghost = [0; 3];
    for a in 0..3 {
      let (sg, ng) = ghost_axis(
        params.boundary[a],
        params.stencil_type,
        params.stencil_width,
        owned.start[a],
        owned.size[a],
        owned.first_rank[a],
        owned.last_rank[a],
      );
      start_ghost[a] = sg;
      n_ghost[a] = ng;
    }
    let entries_ghost = n_ghost[0] * n_ghost[1] * n_ghost[2] * dof.entries_per_element();

    let geo = Geometry::new(
      dof,
      params.boundary,
      params.stencil_type,
      params.stencil_width,
      n_ranks,
      coords,
      &ownership,
      &neighbors,
      &global_offsets,
      owned.start,
      owned.size,
      start_ghost,
      n_ghost,
      entries,
      entries_ghost,
    );

    let global_to_local = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("build_global_to_local").entered();
      build_global_to_local(&geo)?
    };
    let local_to_global = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("build_local_to_global").entered();
      build_local_to_global(&geo)?
    };
    let injective = if needs_injective(&geo) {
      Some(build_injective(&geo)?)
    } else {
      None
    };
    let local_remap = build_local_remap(&geo, global_offsets[rank])?;

    let epe = dof.entries_per_element();
    let epr = n_ghost[0] * epe;
    let epl = n_ghost[1] * epr;
    let location_offsets = LocationOffsets::new(&dof, epr, epl);

    let mut n_extra = [0; 3];
    for a in 0..3 {
      n_extra[a] = if owned.last_rank[a] && params.boundary[a] != BoundaryType::Periodic {
        1
      } else {
        0
      };
    }

    Ok(Self {
      global_sizes: params.global_sizes,
      dof,
      boundary: params.boundary,
      stencil_type: params.stencil_type,
      stencil_width: params.stencil_width,
      comm_size,
      rank,
      n_ranks,
      rank_coords: coords,
      ownership,
      start: owned.start,
      n: owned.size,
      n_extra,
      first_rank: owned.first_rank,
      last_rank: owned.last_rank,
      start_ghost,
      n_ghost,
      entries,
      entries_ghost,
      global_entries,
      neighbors,
      global_offsets,
      global_to_local,
      local_to_global,
      injective,
      local_remap,
      location_offsets,
    })
  }

  // ===========================================================================
  // Queries
  // ===========================================================================

  pub fn global_sizes(&self) -> [GridInt; 3] {
    self.global_sizes
  }

  pub fn dof(&self) -> [GridInt; 4] {
    self.dof.dof()
  }

  pub fn dof_layout(&self) -> &DofLayout {
    &self.dof
  }

  pub fn boundary(&self) -> [BoundaryType; 3] {
    self.boundary
  }

  pub fn stencil_type(&self) -> StencilType {
    self.stencil_type
  }

  pub fn stencil_width(&self) -> GridInt {
    self.stencil_width
  }

  pub fn comm_size(&self) -> usize {
    self.comm_size
  }

  pub fn rank(&self) -> usize {
    self.rank
  }

  pub fn n_ranks(&self) -> [GridInt; 3] {
    self.n_ranks
  }

  pub fn rank_grid_coords(&self) -> [GridInt; 3] {
    self.rank_coords
  }

  /// Elements owned by each rank along each axis.
  pub fn ownership_ranges(&self) -> &[Vec<GridInt>; 3] {
    &self.ownership
  }

  /// Owned box: start, extent, and the number of extra partial elements at
  /// non-periodic far boundaries.
  pub fn corners(&self) -> ([GridInt; 3], [GridInt; 3], [GridInt; 3]) {
    (self.start, self.n, self.n_extra)
  }

  /// Ghost box: start (may be negative on periodic axes) and extent.
  pub fn ghost_corners(&self) -> ([GridInt; 3], [GridInt; 3]) {
    (self.start_ghost, self.n_ghost)
  }

  pub fn first_rank(&self) -> [bool; 3] {
    self.first_rank
  }

  pub fn last_rank(&self) -> [bool; 3] {
    self.last_rank
  }

  /// Entries in this rank's global interval.
  pub fn entries(&self) -> GridInt {
    self.entries
  }

  /// Entries in the ghosted local vector, dummies included.
  pub fn entries_ghost(&self) -> GridInt {
    self.entries_ghost
  }

  pub fn entries_per_element(&self) -> GridInt {
    self.dof.entries_per_element()
  }

  /// Total entries of the global numbering.
  pub fn global_entries(&self) -> GridInt {
    self.global_entries
  }

  /// Neighbor ranks by quadrant, -1 where no neighbor exists.
  pub fn neighbors(&self) -> &[GridInt; QUADRANT_COUNT] {
    &self.neighbors
  }

  /// Global offset of each rank's interval.
  pub fn global_offsets(&self) -> &[GridInt] {
    &self.global_offsets
  }

  /// The global->local plan.
  pub fn global_to_local(&self) -> &ScatterIndices {
    &self.global_to_local
  }

  /// The local->global map: a global index or -1 per local entry.
  pub fn local_to_global(&self) -> &[GridInt] {
    &self.local_to_global
  }

  /// The injective owned plan, present when a periodic axis has one rank.
  pub fn injective(&self) -> Option<&ScatterIndices> {
    self.injective.as_ref()
  }

  /// Owned-interval position to ghosted local slot.
  pub fn local_remap(&self) -> &[GridInt] {
    &self.local_remap
  }

  pub fn location_offsets(&self) -> &LocationOffsets {
    &self.location_offsets
  }

  /// Entry offset of `(location, component)` within a cell's block of the
  /// ghosted local numbering.
  pub fn location_slot(&self, loc: Location, component: GridInt) -> Result<GridInt> {
    let d = self.dof.dof()[loc.stratum().index()];
    if component < 0 || component >= d {
      return Err(StagError::ArgOutOfRange(format!(
        "component {} out of range for a stratum with {} dof",
        component, d
      )));
    }
    Ok(self.location_offsets.offset(loc) + component)
  }

  /// Local index of `slot` on the cell at global element coordinates
  /// `(i, j, k)`, which must lie inside the ghost box.
  #[inline]
  pub fn ghost_entry(&self, i: GridInt, j: GridInt, k: GridInt, slot: GridInt) -> usize {
    let epe = self.dof.entries_per_element();
    let epr = self.n_ghost[0] * epe;
    let epl = self.n_ghost[1] * epr;
    debug_assert!(i >= self.start_ghost[0] && i < self.start_ghost[0] + self.n_ghost[0]);
    debug_assert!(j >= self.start_ghost[1] && j < self.start_ghost[1] + self.n_ghost[1]);
    debug_assert!(k >= self.start_ghost[2] && k < self.start_ghost[2] + self.n_ghost[2]);
    ((k - self.start_ghost[2]) * epl
      + (j - self.start_ghost[1]) * epr
      + (i - self.start_ghost[0]) * epe
      + slot) as usize
  }

  /// Rank owning a global entry.
  pub fn owner_of_global(&self, g: GridInt) -> usize {
    debug_assert!(g >= 0 && g < self.global_entries);
    self.global_offsets.partition_point(|off| *off <= g) - 1
  }
}

#[cfg(test)]
#[path = "distribution_test.rs"]
mod distribution_test;
