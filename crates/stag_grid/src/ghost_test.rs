use super::*;

const W: GridInt = 2;

#[test]
fn no_boundary_no_stencil_keeps_the_box_plus_far_layer() {
  let (s, n) = ghost_axis(BoundaryType::None, StencilType::None, 0, 4, 3, false, false);
  assert_eq!((s, n), (4, 3));
  let (s, n) = ghost_axis(BoundaryType::None, StencilType::None, 0, 4, 3, false, true);
  assert_eq!((s, n), (4, 4));
}

#[test]
fn no_boundary_with_stencil_stays_inside_the_domain() {
  // Interior rank: halo on both sides.
  let (s, n) = ghost_axis(BoundaryType::None, StencilType::Box, W, 4, 3, false, false);
  assert_eq!((s, n), (2, 7));
  // First rank: nothing below zero.
  let (s, n) = ghost_axis(BoundaryType::None, StencilType::Box, W, 0, 3, true, false);
  assert_eq!((s, n), (0, 5));
  // Last rank: the far layer replaces the upper halo.
  let (s, n) = ghost_axis(BoundaryType::None, StencilType::Box, W, 4, 3, false, true);
  assert_eq!((s, n), (2, 6));
}

#[test]
fn ghosted_boundary_pads_past_the_domain() {
  let (s, n) = ghost_axis(BoundaryType::Ghosted, StencilType::Star, W, 0, 3, true, false);
  assert_eq!((s, n), (-2, 7));
  let (s, n) = ghost_axis(BoundaryType::Ghosted, StencilType::Star, W, 4, 3, false, true);
  assert_eq!((s, n), (2, 7));
  // Width zero still completes the blocking on the last rank.
  let (s, n) = ghost_axis(BoundaryType::Ghosted, StencilType::Star, 0, 4, 3, false, true);
  assert_eq!((s, n), (4, 4));
  let (s, n) = ghost_axis(BoundaryType::Ghosted, StencilType::None, 0, 4, 3, false, true);
  assert_eq!((s, n), (4, 4));
}

#[test]
fn periodic_boundary_has_no_far_layer() {
  let (s, n) = ghost_axis(BoundaryType::Periodic, StencilType::None, 0, 4, 3, false, true);
  assert_eq!((s, n), (4, 3));
  let (s, n) = ghost_axis(BoundaryType::Periodic, StencilType::Box, W, 0, 3, true, true);
  assert_eq!((s, n), (-2, 7));
}
