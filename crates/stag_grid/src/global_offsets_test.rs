use super::*;
use crate::dof::DofLayout;

#[test]
fn interval_sizes_cover_the_staggered_grid_exactly() {
  // 5 x 3 x 2 elements, closed boundaries, one dof everywhere. The flat
  // count is checkable against the raw staggered entities:
  //   vertices 6*4*3 = 72, edges 5*4*3 + 6*3*3 + 6*4*2 = 162,
  //   faces 6*3*2 + 5*4*2 + 5*3*3 = 121, elements 30.
  let dof = DofLayout::new([1, 1, 1, 1]);
  let n_ranks = [2, 1, 1];
  let ownership = [vec![3, 2], vec![3], vec![2]];
  let boundary = [BoundaryType::None; 3];
  let offsets = build_global_offsets(&dof, n_ranks, &ownership, boundary);
  assert_eq!(offsets, vec![0, 210]);
  let total = total_entries(&dof, n_ranks, &ownership, boundary, &offsets);
  assert_eq!(total, 72 + 162 + 121 + 30);
}

#[test]
fn periodic_axes_drop_the_far_blocks() {
  let dof = DofLayout::new([1, 1, 1, 1]);
  let n_ranks = [1, 1, 1];
  let ownership = [vec![4], vec![4], vec![4]];
  let boundary = [BoundaryType::Periodic; 3];
  let offsets = build_global_offsets(&dof, n_ranks, &ownership, boundary);
  let total = total_entries(&dof, n_ranks, &ownership, boundary, &offsets);
  // Fully periodic: every entity count equals the element count.
  assert_eq!(total, 64 * (1 + 3 + 3 + 1));
}

#[test]
fn offsets_are_prefix_sums_of_interval_sizes() {
  let dof = DofLayout::new([1, 0, 0, 2]);
  let n_ranks = [2, 2, 2];
  let ownership = [vec![2, 2], vec![3, 1], vec![2, 2]];
  let boundary = [
    BoundaryType::None,
    BoundaryType::Periodic,
    BoundaryType::Ghosted,
  ];
  let offsets = build_global_offsets(&dof, n_ranks, &ownership, boundary);
  let mut running = 0;
  for rank in 0..8 {
    assert_eq!(offsets[rank], running);
    running += interval_entries(
      &dof,
      crate::rank_grid::rank_coords(rank, n_ranks),
      n_ranks,
      &ownership,
      boundary,
    );
  }
  assert_eq!(
    running,
    total_entries(&dof, n_ranks, &ownership, boundary, &offsets)
  );
}

#[test]
fn far_boundary_mask_marks_non_periodic_far_ranks() {
  use crate::dof::{AXIS_X, AXIS_Y, AXIS_Z};
  let n_ranks = [2, 2, 1];
  let boundary = [
    BoundaryType::None,
    BoundaryType::Periodic,
    BoundaryType::Ghosted,
  ];
  assert_eq!(far_boundary_mask([0, 0, 0], n_ranks, boundary), AXIS_Z);
  assert_eq!(
    far_boundary_mask([1, 1, 0], n_ranks, boundary),
    AXIS_X | AXIS_Z
  );
  assert_eq!(far_boundary_mask([1, 0, 0], n_ranks, boundary) & AXIS_Y, 0);
}
