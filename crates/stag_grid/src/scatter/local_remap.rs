//! Owned-entry remap into the ghosted local numbering.
//!
//! Maps each owned entry, in the order it appears in this rank's global
//! interval (full elements first within each row, then the reduced far
//! face/edge/corner blocks), to its slot in the ghosted local vector. The
//! forward scatter can then be re-driven with a local vector as the
//! source, refreshing ghost regions from owned data without forming a
//! global vector.

use super::{populate_pairs, quadrant_sweep, Geometry, ScatterIndices};
use crate::error::{Result, StagError};
use crate::quadrant::SELF_QUADRANT;
use crate::types::GridInt;

/// Build the remap, length `entries`, indexed by owned-interval position.
pub(crate) fn build_local_remap(geo: &Geometry, my_offset: GridInt) -> Result<Vec<GridInt>> {
  let mut pairs = ScatterIndices {
    local: Vec::with_capacity(geo.entries as usize),
    global: Vec::with_capacity(geo.entries as usize),
  };
  let sweep = quadrant_sweep(geo, SELF_QUADRANT)
    .ok_or_else(|| StagError::Internal("self quadrant has no sweep".into()))?;
  populate_pairs(geo, &sweep, &mut pairs);
  if pairs.len() as GridInt != geo.entries {
    return Err(StagError::Internal(format!(
      "owned-entry remap has {} entries, expected {}",
      pairs.len(),
      geo.entries
    )));
  }
  let mut remap = vec![-1; geo.entries as usize];
  for (l, g) in pairs.local.iter().zip(&pairs.global) {
    remap[(g - my_offset) as usize] = *l;
  }
  if remap.iter().any(|r| *r < 0) {
    return Err(StagError::Internal(
      "owned-entry remap does not cover the owned interval".into(),
    ));
  }
  Ok(remap)
}

#[cfg(test)]
#[path = "local_remap_test.rs"]
mod local_remap_test;
