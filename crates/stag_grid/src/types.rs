//! Core parameter types for staggered-grid distributions.

use crate::error::{Result, StagError};

/// Index type used throughout. Entry counts are additionally validated
/// against the 32-bit transport index limit at set-up.
pub type GridInt = i64;

/// Boundary treatment per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryType {
  /// Physical boundary with no ghost padding beyond the single extra
  /// point layer completing the staggered blocking.
  None,

  /// Physical boundary padded with ghost (dummy) cells on the outside.
  Ghosted,

  /// Wrap-around boundary. Ghost cells refer to cells on the far side.
  Periodic,
}

/// Ghost stencil shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilType {
  /// No interior halo. Only the extra boundary layer is held locally.
  None,

  /// Axis neighbors only. Corner and edge diagonal regions are allocated
  /// but never filled.
  Star,

  /// Full 27-neighbor halo.
  Box,
}

/// Cell stratum, by dimensionality of its sub-locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stratum {
  Vertex,
  Edge,
  Face,
  Element,
}

impl Stratum {
  /// Index into a dof vector `(d0, d1, d2, d3)`.
  #[inline]
  pub fn index(self) -> usize {
    match self {
      Stratum::Vertex => 0,
      Stratum::Edge => 1,
      Stratum::Face => 2,
      Stratum::Element => 3,
    }
  }
}

/// Construction parameters for a 3-D staggered-grid distribution.
///
/// `ranks` entries of `None` are chosen automatically from the
/// communicator size. `ownership` entries of `None` use the default
/// near-equal split with extra elements on low ranks.
#[derive(Clone, Debug)]
pub struct StagParams {
  /// Global element counts per axis.
  pub global_sizes: [GridInt; 3],

  /// Requested rank grid; `None` means decide automatically.
  pub ranks: [Option<GridInt>; 3],

  /// Dof per vertex, edge, face, element.
  pub dof: [GridInt; 4],

  /// Boundary treatment per axis.
  pub boundary: [BoundaryType; 3],

  /// Ghost stencil shape.
  pub stencil_type: StencilType,

  /// Elementwise ghost stencil width.
  pub stencil_width: GridInt,

  /// Optional prescribed per-axis ownership vectors (elements per rank).
  pub ownership: [Option<Vec<GridInt>>; 3],
}

impl StagParams {
  /// Parameters with automatic rank grid and default ownership.
  pub fn new(
    global_sizes: [GridInt; 3],
    dof: [GridInt; 4],
    boundary: [BoundaryType; 3],
    stencil_type: StencilType,
    stencil_width: GridInt,
  ) -> Self {
    Self {
      global_sizes,
      ranks: [None; 3],
      dof,
      boundary,
      stencil_type,
      stencil_width,
      ownership: [None, None, None],
    }
  }

  pub fn with_ranks(mut self, ranks: [Option<GridInt>; 3]) -> Self {
    self.ranks = ranks;
    self
  }

  pub fn with_ownership(
    mut self,
    lx: Option<Vec<GridInt>>,
    ly: Option<Vec<GridInt>>,
    lz: Option<Vec<GridInt>>,
  ) -> Self {
    self.ownership = [lx, ly, lz];
    self
  }

  /// Layout for a coordinate field on the same grid: three components on
  /// every stratum the parent carries dof on, zero elsewhere.
  pub fn coordinate_layout(&self) -> Self {
    let mut coord = self.clone();
    for s in 0..4 {
      coord.dof[s] = if self.dof[s] > 0 { 3 } else { 0 };
    }
    coord
  }

  /// Validate the user-facing quantities. Geometry checks that depend on
  /// the communicator happen during set-up.
  pub fn validate(&self) -> Result<()> {
    for a in 0..3 {
      if self.global_sizes[a] < 1 {
        return Err(StagError::ArgOutOfRange(format!(
          "global size in dimension {} must be positive, got {}",
          a, self.global_sizes[a]
        )));
      }
      if let Some(r) = self.ranks[a] {
        if r < 1 {
          return Err(StagError::ArgOutOfRange(format!(
            "non-positive number of ranks in dimension {}: {}",
            a, r
          )));
        }
      }
    }
    for (s, d) in self.dof.iter().enumerate() {
      if *d < 0 {
        return Err(StagError::ArgOutOfRange(format!(
          "negative dof count on stratum {}: {}",
          s, d
        )));
      }
    }
    if self.stencil_width < 0 {
      return Err(StagError::ArgOutOfRange(format!(
        "negative stencil width {}",
        self.stencil_width
      )));
    }
    if self.stencil_type == StencilType::None && self.stencil_width != 0 {
      return Err(StagError::ArgOutOfRange(format!(
        "stencil width {} requested with stencil type none",
        self.stencil_width
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
