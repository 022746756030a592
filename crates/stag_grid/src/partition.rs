//! Element ownership along each axis.

use crate::error::{Result, StagError};
use crate::types::GridInt;

/// Default near-equal split: `n / ranks` each, with the remainder spread
/// one element at a time over the low ranks.
pub fn default_ownership(n: GridInt, ranks: GridInt) -> Vec<GridInt> {
  (0..ranks)
    .map(|j| n / ranks + if n % ranks > j { 1 } else { 0 })
    .collect()
}

/// Validate a prescribed ownership vector for one axis.
pub fn validate_ownership(axis: usize, l: &[GridInt], n: GridInt, ranks: GridInt) -> Result<()> {
  if l.len() as GridInt != ranks {
    return Err(StagError::ArgOutOfRange(format!(
      "ownership vector in dimension {} has {} entries for {} ranks",
      axis,
      l.len(),
      ranks
    )));
  }
  if let Some(bad) = l.iter().find(|c| **c < 1) {
    return Err(StagError::ArgOutOfRange(format!(
      "ownership vector in dimension {} contains non-positive count {}",
      axis, bad
    )));
  }
  let total: GridInt = l.iter().sum();
  if total != n {
    return Err(StagError::ArgOutOfRange(format!(
      "ownership vector in dimension {} sums to {}, expected {}",
      axis, total, n
    )));
  }
  Ok(())
}

/// The element sub-box a rank owns, with its position in the rank grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OwnedBox {
  pub start: [GridInt; 3],
  pub size: [GridInt; 3],
  pub first_rank: [bool; 3],
  pub last_rank: [bool; 3],
}

impl OwnedBox {
  /// Owned box of the rank at `coords`, from per-axis ownership vectors.
  pub fn new(coords: [GridInt; 3], n_ranks: [GridInt; 3], ownership: &[Vec<GridInt>; 3]) -> Self {
    let mut start = [0; 3];
    let mut size = [0; 3];
    let mut first_rank = [false; 3];
    let mut last_rank = [false; 3];
    for a in 0..3 {
      let l = &ownership[a];
      start[a] = l[..coords[a] as usize].iter().sum();
      size[a] = l[coords[a] as usize];
      first_rank[a] = coords[a] == 0;
      last_rank[a] = coords[a] == n_ranks[a] - 1;
    }
    Self {
      start,
      size,
      first_rank,
      last_rank,
    }
  }
}

#[cfg(test)]
#[path = "partition_test.rs"]
mod partition_test;
