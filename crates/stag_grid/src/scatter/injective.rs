//! The injective local->global plan.
//!
//! When a periodic axis is owned by a single rank, the forward halo wraps
//! onto its own owner and the global->local plan aliases one owned dof to
//! several local slots, so it cannot be driven in reverse. This plan walks
//! only the owned box (the self quadrant) and pairs every owned dof with
//! exactly one local slot.

use super::{populate_pairs, quadrant_sweep, Geometry, ScatterIndices};
use crate::error::{Result, StagError};
use crate::quadrant::SELF_QUADRANT;
use crate::types::{BoundaryType, GridInt};

/// Whether the distribution needs the injective plan.
pub(crate) fn needs_injective(geo: &Geometry) -> bool {
  (0..3).any(|a| geo.boundary[a] == BoundaryType::Periodic && geo.n_ranks[a] == 1)
}

/// Build the injective plan: one (local, global) pair per owned dof.
pub(crate) fn build_injective(geo: &Geometry) -> Result<ScatterIndices> {
  let mut out = ScatterIndices {
    local: Vec::with_capacity(geo.entries as usize),
    global: Vec::with_capacity(geo.entries as usize),
  };
  let sweep = quadrant_sweep(geo, SELF_QUADRANT)
    .ok_or_else(|| StagError::Internal("self quadrant has no sweep".into()))?;
  populate_pairs(geo, &sweep, &mut out);
  if out.len() as GridInt != geo.entries {
    return Err(StagError::Internal(format!(
      "injective plan has {} entries, expected {}",
      out.len(),
      geo.entries
    )));
  }
  Ok(out)
}

#[cfg(test)]
#[path = "injective_test.rs"]
mod injective_test;
