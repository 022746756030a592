//! Uniform coordinate fields.
//!
//! A coordinate field is an ordinary staggered field with three components
//! on each stratum it covers. Each sub-location sits at the cell corner
//! plus half a spacing along every axis the sub-location has extent
//! along, so the slot's extent mask doubles as its offset pattern.

use glam::DVec3;

use crate::distribution::StagDistribution;
use crate::dof::{AXIS_X, AXIS_Y, AXIS_Z, SLOT_COUNT};
use crate::error::{Result, StagError};
use crate::vector::LocalVector;

/// Fill `out` with uniform coordinates over `[min, max]` for every ghost
/// cell of the coordinate distribution `dist`. Every stratum of `dist`
/// must carry zero or three dof.
pub fn set_uniform_coordinates(
  dist: &StagDistribution,
  min: DVec3,
  max: DVec3,
  out: &mut LocalVector,
) -> Result<()> {
  let dof = dist.dof();
  for (s, d) in dof.iter().enumerate() {
    if *d != 0 && *d != 3 {
      return Err(StagError::ArgOutOfRange(format!(
        "coordinate distribution must have 0 or 3 dof per stratum, stratum {} has {}",
        s, d
      )));
    }
  }
  if out.values.len() != dist.entries_ghost() as usize {
    return Err(StagError::ArgOutOfRange(format!(
      "coordinate vector length {} does not match the distribution ({})",
      out.values.len(),
      dist.entries_ghost()
    )));
  }
  let sizes = dist.global_sizes();
  let h = DVec3::new(
    (max.x - min.x) / sizes[0] as f64,
    (max.y - min.y) / sizes[1] as f64,
    (max.z - min.z) / sizes[2] as f64,
  );
  let layout = dist.dof_layout();
  let (start_ghost, n_ghost) = dist.ghost_corners();

  for k in start_ghost[2]..start_ghost[2] + n_ghost[2] {
    for j in start_ghost[1]..start_ghost[1] + n_ghost[1] {
      for i in start_ghost[0]..start_ghost[0] + n_ghost[0] {
        let ind = DVec3::new(i as f64, j as f64, k as f64);
        for slot in 0..SLOT_COUNT {
          if layout.slot_dof(slot) == 0 {
            continue;
          }
          let mask = slot as u8;
          let offs = DVec3::new(
            if mask & AXIS_X != 0 { 0.5 } else { 0.0 },
            if mask & AXIS_Y != 0 { 0.5 } else { 0.0 },
            if mask & AXIS_Z != 0 { 0.5 } else { 0.0 },
          );
          let pos = min + (ind + offs) * h;
          let base = dist.ghost_entry(i, j, k, layout.slot_offset(slot));
          out.values[base] = pos.x;
          out.values[base + 1] = pos.y;
          out.values[base + 2] = pos.z;
        }
      }
    }
  }
  Ok(())
}

/// Spacing of the uniform grid over `[min, max]`.
pub fn uniform_spacing(dist: &StagDistribution, min: DVec3, max: DVec3) -> DVec3 {
  let sizes = dist.global_sizes();
  DVec3::new(
    (max.x - min.x) / sizes[0] as f64,
    (max.y - min.y) / sizes[1] as f64,
    (max.z - min.z) / sizes[2] as f64,
  )
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;
