//! The 27 neighbor quadrants of a rank in the 3-D rank grid.
//!
//! Quadrants are indexed by a 3-D offset in {-1, 0, +1} per axis,
//! flattened lexicographically with x fastest:
//!
//! ```text
//!     24 25 26
//!     21 22 23
//!     18 19 20   (front, larger z)
//!
//!     15 16 17
//!     12 13 14   ^ y
//!      9 10 11   |
//!               +--> x
//!      6  7  8
//!      3  4  5
//!      0  1  2   (back, smaller z)
//! ```
//!
//! Index 13 is the rank itself.

/// Number of neighbor quadrants, including self.
pub const QUADRANT_COUNT: usize = 27;

/// The quadrant of the rank itself.
pub const SELF_QUADRANT: usize = 13;

/// Per-axis offsets of a quadrant.
#[inline]
pub fn quadrant_offset(q: usize) -> [i8; 3] {
  debug_assert!(q < QUADRANT_COUNT);
  [
    (q % 3) as i8 - 1,
    (q / 3 % 3) as i8 - 1,
    (q / 9) as i8 - 1,
  ]
}

/// Quadrant index from per-axis offsets in {-1, 0, +1}.
#[inline]
pub fn quadrant_index(off: [i8; 3]) -> usize {
  ((off[0] + 1) + 3 * (off[1] + 1) + 9 * (off[2] + 1)) as usize
}

/// Whether a quadrant is reachable with a star (or stencil-free) halo:
/// at most one axis offset may be nonzero.
#[inline]
pub fn in_star(off: [i8; 3]) -> bool {
  off.iter().filter(|o| **o != 0).count() <= 1
}

#[cfg(test)]
#[path = "quadrant_test.rs"]
mod quadrant_test;
