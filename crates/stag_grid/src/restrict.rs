//! Geometric two-grid restriction.
//!
//! Transfers a fine local vector onto a coarse local vector on the same
//! rank grid. Each coarse sub-location reads the fine sub-locations that
//! tile it: along every axis the sub-location has extent along, an even
//! refinement factor averages the two straddling fine values and an odd
//! factor injects the centered one; axes without extent inject directly.
//! Vertices therefore copy, edges average up to 2 fine dof, faces up to
//! 4, and elements up to 8.
//!
//! Only owned coarse cells (plus the partial extras at non-periodic far
//! boundaries) are written, from fine data this rank already holds
//! locally; no communication happens here.

use rayon::prelude::*;

use crate::distribution::StagDistribution;
use crate::dof::{AXIS_X, AXIS_Y, AXIS_Z, SLOT_COUNT};
use crate::error::{Result, StagError};
use crate::types::GridInt;
use crate::vector::LocalVector;

/// Restrict `xf` on `fine` into `xc` on `coarse`. The coarse vector is
/// zeroed first; cells outside the owned box stay zero.
pub fn restrict_simple(
  fine: &StagDistribution,
  xf: &LocalVector,
  coarse: &StagDistribution,
  xc: &mut LocalVector,
) -> Result<()> {
  if fine.dof() != coarse.dof() {
    return Err(StagError::ArgOutOfRange(format!(
      "fine dof {:?} and coarse dof {:?} differ",
      fine.dof(),
      coarse.dof()
    )));
  }
  if xf.values.len() != fine.entries_ghost() as usize
    || xc.values.len() != coarse.entries_ghost() as usize
  {
    return Err(StagError::ArgOutOfRange(
      "vector lengths do not match their distributions".into(),
    ));
  }
  let nf = fine.global_sizes();
  let nc = coarse.global_sizes();
  let mut factor = [0; 3];
  for a in 0..3 {
    if nc[a] < 1 || nf[a] % nc[a] != 0 {
      return Err(StagError::ArgOutOfRange(format!(
        "fine size {} is not a multiple of coarse size {} in dimension {}",
        nf[a], nc[a], a
      )));
    }
    factor[a] = nf[a] / nc[a];
  }
  let (cstart, cn, cextra) = coarse.corners();
  let (fstart, fsize, _) = fine.corners();
  for a in 0..3 {
    if fstart[a] != cstart[a] * factor[a] || fsize[a] != cn[a] * factor[a] {
      return Err(StagError::ArgOutOfRange(format!(
        "fine and coarse partitions are not aligned in dimension {}",
        a
      )));
    }
  }

  let layout = *coarse.dof_layout();
  let epe = layout.entries_per_element();
  let (cg_start, cg_n) = coarse.ghost_corners();
  let epr = cg_n[0] * epe;
  let epl = cg_n[1] * epr;
  let axis_bits = [AXIS_X, AXIS_Y, AXIS_Z];

  xc.values.fill(0.0);
  xc.values
    .par_chunks_mut(epl as usize)
    .enumerate()
    .for_each(|(layer, chunk)| {
      let k = cg_start[2] + layer as GridInt;
      if k < cstart[2] || k >= cstart[2] + cn[2] + cextra[2] {
        return;
      }
      for slot in 0..SLOT_COUNT {
        let count = layout.slot_dof(slot);
        if count == 0 {
          continue;
        }
        let mask = slot as u8;
        // Extent along an axis forbids the extra partial cell there.
        let k_end = cstart[2] + cn[2] + if mask & AXIS_Z == 0 { cextra[2] } else { 0 };
        if k >= k_end {
          continue;
        }
        let j_end = cstart[1] + cn[1] + if mask & AXIS_Y == 0 { cextra[1] } else { 0 };
        let i_end = cstart[0] + cn[0] + if mask & AXIS_X == 0 { cextra[0] } else { 0 };
        let slot_base = layout.slot_offset(slot);
        for j in cstart[1]..j_end {
          for i in cstart[0]..i_end {
            let (samples, weight) = fine_samples([i, j, k], mask, factor, axis_bits);
            for d in 0..count {
              let mut sum = 0.0;
              for s in samples.iter().flatten() {
                sum += xf.values[fine.ghost_entry(s[0], s[1], s[2], slot_base + d)];
              }
              let dst = ((j - cg_start[1]) * epr + (i - cg_start[0]) * epe + slot_base + d)
                as usize;
              chunk[dst] = weight * sum;
            }
          }
        }
      }
    });
  Ok(())
}

/// Fine coordinates read for one coarse sub-location, with the averaging
/// weight. At most eight samples: two per averaged axis.
fn fine_samples(
  coarse: [GridInt; 3],
  mask: u8,
  factor: [GridInt; 3],
  axis_bits: [u8; 3],
) -> ([Option<[GridInt; 3]>; 8], f64) {
  let mut base = [0; 3];
  let mut paired = [false; 3];
  let mut n_samples = 1;
  for a in 0..3 {
    if mask & axis_bits[a] != 0 {
      base[a] = coarse[a] * factor[a] + factor[a] / 2;
      if factor[a] % 2 == 0 {
        paired[a] = true;
        n_samples *= 2;
      }
    } else {
      base[a] = coarse[a] * factor[a];
    }
  }
  let ends: [GridInt; 3] = std::array::from_fn(|a| if paired[a] { 2 } else { 1 });
  let mut samples = [None; 8];
  let mut idx = 0;
  for dz in 0..ends[2] {
    for dy in 0..ends[1] {
      for dx in 0..ends[0] {
        samples[idx] = Some([
          base[0] - if paired[0] { 1 - dx } else { 0 },
          base[1] - if paired[1] { 1 - dy } else { 0 },
          base[2] - if paired[2] { 1 - dz } else { 0 },
        ]);
        idx += 1;
      }
    }
  }
  (samples, 1.0 / n_samples as f64)
}

#[cfg(test)]
#[path = "restrict_test.rs"]
mod restrict_test;
