//! The 27 named sub-locations of a cell and their entry offsets.
//!
//! Eight locations are canonically owned by the cell whose back-down-left
//! corner they touch. The other nineteen names (anything involving right,
//! up or front) are addressing conveniences that resolve to a canonical
//! location of an adjacent cell, one step along x, y or z in the ghosted
//! local numbering.

use crate::dof::DofLayout;
use crate::types::{GridInt, Stratum};

/// A named sub-location of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
  BackDownLeft,
  BackDown,
  BackDownRight,
  BackLeft,
  Back,
  BackRight,
  BackUpLeft,
  BackUp,
  BackUpRight,
  DownLeft,
  Down,
  DownRight,
  Left,
  Element,
  Right,
  UpLeft,
  Up,
  UpRight,
  FrontDownLeft,
  FrontDown,
  FrontDownRight,
  FrontLeft,
  Front,
  FrontRight,
  FrontUpLeft,
  FrontUp,
  FrontUpRight,
}

/// All locations, in table order.
pub const LOCATIONS: [Location; 27] = [
  Location::BackDownLeft,
  Location::BackDown,
  Location::BackDownRight,
  Location::BackLeft,
  Location::Back,
  Location::BackRight,
  Location::BackUpLeft,
  Location::BackUp,
  Location::BackUpRight,
  Location::DownLeft,
  Location::Down,
  Location::DownRight,
  Location::Left,
  Location::Element,
  Location::Right,
  Location::UpLeft,
  Location::Up,
  Location::UpRight,
  Location::FrontDownLeft,
  Location::FrontDown,
  Location::FrontDownRight,
  Location::FrontLeft,
  Location::Front,
  Location::FrontRight,
  Location::FrontUpLeft,
  Location::FrontUp,
  Location::FrontUpRight,
];

impl Location {
  /// Index into the offset table.
  #[inline]
  pub fn index(self) -> usize {
    self as usize
  }

  /// The stratum this location belongs to.
  pub fn stratum(self) -> Stratum {
    use Location::*;
    match self {
      BackDownLeft | BackDownRight | BackUpLeft | BackUpRight | FrontDownLeft | FrontDownRight
      | FrontUpLeft | FrontUpRight => Stratum::Vertex,
      BackDown | BackLeft | BackRight | BackUp | DownLeft | DownRight | UpLeft | UpRight
      | FrontDown | FrontLeft | FrontRight | FrontUp => Stratum::Edge,
      Back | Down | Left | Right | Up | Front => Stratum::Face,
      Element => Stratum::Element,
    }
  }
}

/// Entry offsets for all 27 locations, relative to a cell's first entry in
/// the ghosted local numbering. Computed once per distribution from the
/// dof layout and the ghost row/layer pitches.
#[derive(Clone, Debug)]
pub struct LocationOffsets {
  table: [GridInt; 27],
}

impl LocationOffsets {
  /// `epr` and `epl` are the ghosted entries per element row and layer.
  pub fn new(dof: &DofLayout, epr: GridInt, epl: GridInt) -> Self {
    let epe = dof.entries_per_element();
    let mut t = [0; 27];
    use Location::*;
    // Canonical slots are dof prefixes within the cell block.
    t[BackDownLeft.index()] = 0;
    t[BackDown.index()] = dof.slot_offset(1);
    t[BackLeft.index()] = dof.slot_offset(2);
    t[Back.index()] = dof.slot_offset(3);
    t[DownLeft.index()] = dof.slot_offset(4);
    t[Down.index()] = dof.slot_offset(5);
    t[Left.index()] = dof.slot_offset(6);
    t[Element.index()] = dof.slot_offset(7);
    // Right/up/front aliases live one cell over.
    t[BackDownRight.index()] = t[BackDownLeft.index()] + epe;
    t[BackRight.index()] = t[BackLeft.index()] + epe;
    t[BackUpLeft.index()] = t[BackDownLeft.index()] + epr;
    t[BackUp.index()] = t[BackDown.index()] + epr;
    t[BackUpRight.index()] = t[BackUpLeft.index()] + epe;
    t[DownRight.index()] = t[DownLeft.index()] + epe;
    t[Right.index()] = t[Left.index()] + epe;
    t[UpLeft.index()] = t[DownLeft.index()] + epr;
    t[Up.index()] = t[Down.index()] + epr;
    t[UpRight.index()] = t[UpLeft.index()] + epe;
    t[FrontDownLeft.index()] = t[BackDownLeft.index()] + epl;
    t[FrontDown.index()] = t[BackDown.index()] + epl;
    t[FrontDownRight.index()] = t[FrontDownLeft.index()] + epe;
    t[FrontLeft.index()] = t[BackLeft.index()] + epl;
    t[Front.index()] = t[Back.index()] + epl;
    t[FrontRight.index()] = t[FrontLeft.index()] + epe;
    t[FrontUpLeft.index()] = t[FrontDownLeft.index()] + epr;
    t[FrontUp.index()] = t[FrontDown.index()] + epr;
    t[FrontUpRight.index()] = t[FrontUpLeft.index()] + epe;
    Self { table: t }
  }

  #[inline]
  pub fn offset(&self, loc: Location) -> GridInt {
    self.table[loc.index()]
  }

  #[inline]
  pub fn as_array(&self) -> &[GridInt; 27] {
    &self.table
  }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;
