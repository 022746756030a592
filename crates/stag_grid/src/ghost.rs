//! Ghost box extents.

use crate::types::{BoundaryType, GridInt, StencilType};

/// Ghosted start and extent along one axis.
///
/// Non-periodic boundaries gain one extra element at the far end to
/// complete the staggered blocking; periodic axes may start at a negative
/// index. With no stencil there is no interior halo at all.
pub fn ghost_axis(
  boundary: BoundaryType,
  stencil: StencilType,
  width: GridInt,
  start: GridInt,
  n: GridInt,
  first_rank: bool,
  last_rank: bool,
) -> (GridInt, GridInt) {
  match (boundary, stencil) {
    (BoundaryType::None, StencilType::None) => {
      let extra = if last_rank { 1 } else { 0 };
      (start, n + extra)
    }
    (BoundaryType::None, _) => {
      // Star halos allocate the corner regions too; only the fill differs.
      let lo = if first_rank { 0 } else { width };
      let hi = if last_rank { 1 } else { width };
      (start - lo, n + lo + hi)
    }
    (BoundaryType::Ghosted, StencilType::None) => {
      let extra = if last_rank { 1 } else { 0 };
      (start, n + extra)
    }
    (BoundaryType::Ghosted, _) => {
      let extra = if last_rank && width == 0 { 1 } else { 0 };
      (start - width, n + 2 * width + extra)
    }
    (BoundaryType::Periodic, StencilType::None) => (start, n),
    (BoundaryType::Periodic, _) => (start - width, n + 2 * width),
  }
}

#[cfg(test)]
#[path = "ghost_test.rs"]
mod ghost_test;
