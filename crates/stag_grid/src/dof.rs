//! Per-cell dof layout.
//!
//! Each cell canonically owns eight sub-locations, stored in a fixed order
//! inside the cell's block of entries:
//!
//! ```text
//! slot  mask   sub-location        extent   dof
//!  0    000    back-down-left      point    d0
//!  1    001    back-down edge      x        d1
//!  2    010    back-left edge      y        d1
//!  3    011    back face           x,y      d2
//!  4    100    down-left edge      z        d1
//!  5    101    down face           x,z      d2
//!  6    110    left face           y,z      d2
//!  7    111    element             x,y,z    d3
//! ```
//!
//! The slot index doubles as a bitmask of the axes the sub-location has
//! extent along (x = 1, y = 2, z = 4). At a non-periodic far boundary the
//! domain gains a partial layer of cells that only provide the
//! sub-locations with no extent along the boundary axes; a slot survives
//! such a layer exactly when `mask & boundary_axes == 0`, and the
//! surviving dof pack contiguously in slot order. This is what makes the
//! reduced face, edge and corner blocks of the global numbering
//! contiguous.

use smallvec::SmallVec;

use crate::types::GridInt;

/// Number of canonically owned sub-locations per cell.
pub const SLOT_COUNT: usize = 8;

/// Axis bits used in slot masks and extra-layer masks.
pub const AXIS_X: u8 = 1;
pub const AXIS_Y: u8 = 2;
pub const AXIS_Z: u8 = 4;

/// One contiguous run of dof inside a cell block: offset of the slot's
/// first entry in the full per-cell layout, and its dof count.
pub type SlotRun = (GridInt, GridInt);

/// Dof counts per stratum and the per-cell entry arithmetic derived from
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DofLayout {
  dof: [GridInt; 4],
}

impl DofLayout {
  pub fn new(dof: [GridInt; 4]) -> Self {
    Self { dof }
  }

  #[inline]
  pub fn dof(&self) -> [GridInt; 4] {
    self.dof
  }

  /// Dof carried by a slot: the stratum is the number of axes the slot has
  /// extent along.
  #[inline]
  pub fn slot_dof(&self, slot: usize) -> GridInt {
    self.dof[(slot as u32).count_ones() as usize]
  }

  /// Offset of a slot's first entry within the full cell block.
  #[inline]
  pub fn slot_offset(&self, slot: usize) -> GridInt {
    (0..slot).map(|s| self.slot_dof(s)).sum()
  }

  /// Entries per full (interior) element.
  #[inline]
  pub fn entries_per_element(&self) -> GridInt {
    self.dof[0] + 3 * self.dof[1] + 3 * self.dof[2] + self.dof[3]
  }

  /// Entries on a boundary face cell: dof with no extent along the
  /// boundary axis.
  #[inline]
  pub fn entries_per_face(&self) -> GridInt {
    self.dof[0] + 2 * self.dof[1] + self.dof[2]
  }

  /// Entries on a boundary edge cell.
  #[inline]
  pub fn entries_per_edge(&self) -> GridInt {
    self.dof[0] + self.dof[1]
  }

  /// Entries on a boundary corner cell.
  #[inline]
  pub fn entries_per_corner(&self) -> GridInt {
    self.dof[0]
  }

  /// Entries a cell provides when the axes in `extra` are maxed out at a
  /// non-periodic far boundary.
  pub fn entries_surviving(&self, extra: u8) -> GridInt {
    (0..SLOT_COUNT)
      .filter(|s| (*s as u8) & extra == 0)
      .map(|s| self.slot_dof(s))
      .sum()
  }

  /// The runs of dof surviving an extra layer over `extra`, in slot order.
  /// Each run is (offset in the full cell block, dof count); the surviving
  /// runs pack back to back in the reduced global block.
  pub fn surviving_runs(&self, extra: u8) -> SmallVec<[SlotRun; SLOT_COUNT]> {
    let mut runs = SmallVec::new();
    for slot in 0..SLOT_COUNT {
      if (slot as u8) & extra == 0 && self.slot_dof(slot) > 0 {
        runs.push((self.slot_offset(slot), self.slot_dof(slot)));
      }
    }
    runs
  }
}

#[cfg(test)]
#[path = "dof_test.rs"]
mod dof_test;
