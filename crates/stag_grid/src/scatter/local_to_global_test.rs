use crate::distribution::StagDistribution;
use crate::types::{BoundaryType, GridInt, StagParams, StencilType};

#[test]
fn fully_periodic_single_rank_is_the_identity() {
  let params = StagParams::new(
    [2, 2, 2],
    [0, 0, 0, 1],
    [BoundaryType::Periodic; 3],
    StencilType::None,
    0,
  );
  let dist = StagDistribution::set_up_rank(&params, 1, 0).unwrap();
  assert_eq!(dist.entries_per_element(), 1);
  assert_eq!(dist.global_entries(), 8);
  let (start_ghost, n_ghost) = dist.ghost_corners();
  assert_eq!(start_ghost, [0, 0, 0]);
  assert_eq!(n_ghost, [2, 2, 2]);
  assert_eq!(dist.local_to_global(), &[0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn far_wall_keeps_face_dof_and_dummies_the_rest() {
  // Closed in x, ghosted walls in y and z, a vertex and an element dof.
  let params = StagParams::new(
    [4, 1, 1],
    [1, 0, 0, 1],
    [
      BoundaryType::None,
      BoundaryType::Ghosted,
      BoundaryType::Ghosted,
    ],
    StencilType::Box,
    1,
  );
  let dist = StagDistribution::set_up_rank(&params, 2, 1).unwrap();
  let (start_ghost, n_ghost) = dist.ghost_corners();
  assert_eq!(start_ghost, [1, -1, -1]);
  assert_eq!(n_ghost, [4, 3, 3]);
  assert_eq!(dist.global_offsets(), &[0, 10]);
  let total = dist.global_entries();
  assert_eq!(total, 24);

  let map = dist.local_to_global();
  // The wall cell at x = 4 provides its vertex but no element.
  let wall_vertex = dist.ghost_entry(4, 0, 0, 0);
  let wall_element = dist.ghost_entry(4, 0, 0, 1);
  assert_eq!(map[wall_vertex], 14);
  assert_eq!(map[wall_element], -1);
  // The far corner of the domain is the last global entry.
  let corner_vertex = dist.ghost_entry(4, 1, 1, 0);
  let corner_element = dist.ghost_entry(4, 1, 1, 1);
  assert_eq!(map[corner_vertex], total - 1);
  assert_eq!(map[corner_element], -1);
  // One cell into the left neighbor.
  let nbr_vertex = dist.ghost_entry(1, 0, 0, 0);
  assert_eq!(map[nbr_vertex], 2);
  assert_eq!(map[nbr_vertex + 1], 3);
  // The ghosted apron is entirely dummy.
  for i in 1..5 {
    assert_eq!(map[dist.ghost_entry(i, -1, -1, 0)], -1);
    assert_eq!(map[dist.ghost_entry(i, -1, -1, 1)], -1);
  }
}

#[test]
fn closed_cube_corner_rank_has_no_dummies() {
  let params = StagParams::new(
    [4, 4, 4],
    [0, 0, 0, 1],
    [BoundaryType::None; 3],
    StencilType::Box,
    1,
  );
  let dist = StagDistribution::set_up_rank(&params, 8, 0).unwrap();
  let (start_ghost, n_ghost) = dist.ghost_corners();
  assert_eq!(start_ghost, [0, 0, 0]);
  assert_eq!(n_ghost, [3, 3, 3]);
  let map = dist.local_to_global();
  // Every ghost cell of the first rank belongs to somebody; the dummy
  // element slot only appears on ranks that sit on a far boundary.
  assert!(map.iter().all(|g| *g >= 0));
  // Each rank owns a plain 2 x 2 x 2 block of elements.
  assert_eq!(dist.global_offsets(), &[0, 8, 16, 24, 32, 40, 48, 56]);
  // Far face, edge and corner ghosts read the right neighbors' origins.
  assert_eq!(map[dist.ghost_entry(2, 0, 0, 0)], 8);
  assert_eq!(map[dist.ghost_entry(0, 2, 0, 0)], 16);
  assert_eq!(map[dist.ghost_entry(2, 2, 0, 0)], 24);
  assert_eq!(map[dist.ghost_entry(0, 0, 2, 0)], 32);
  assert_eq!(map[dist.ghost_entry(2, 2, 2, 0)], 56);
  // In-row neighbors advance by single elements.
  assert_eq!(map[dist.ghost_entry(2, 1, 0, 0)], 8 + 2);
  assert_eq!(map[dist.ghost_entry(2, 0, 1, 0)], 8 + 4);
}

#[test]
fn far_rank_of_the_closed_cube_dummies_its_outer_shell() {
  let params = StagParams::new(
    [4, 4, 4],
    [0, 0, 0, 1],
    [BoundaryType::None; 3],
    StencilType::Box,
    1,
  );
  let dist = StagDistribution::set_up_rank(&params, 8, 7).unwrap();
  let (start_ghost, n_ghost) = dist.ghost_corners();
  assert_eq!(start_ghost, [1, 1, 1]);
  assert_eq!(n_ghost, [4, 4, 4]);
  let map = dist.local_to_global();
  // Element-only dof: the whole outer shell at 4 is dummy.
  let dummies = map.iter().filter(|g| **g < 0).count();
  assert_eq!(dummies, 4 * 4 * 4 - 3 * 3 * 3);
  assert!(map[dist.ghost_entry(4, 2, 2, 0)] < 0);
  // Its own first element and a face neighbor's cell are live.
  assert_eq!(map[dist.ghost_entry(2, 2, 2, 0)], 56);
  assert_eq!(map[dist.ghost_entry(1, 2, 2, 0)], 48 + 1);
}

#[test]
fn star_halo_dummies_diagonal_ghosts_but_keeps_slabs() {
  let params = StagParams::new(
    [4, 4, 4],
    [0, 0, 0, 1],
    [BoundaryType::None; 3],
    StencilType::Star,
    1,
  );
  let dist = StagDistribution::set_up_rank(&params, 8, 0).unwrap();
  let map = dist.local_to_global();
  // Slabs are live, diagonals are not.
  assert_eq!(map[dist.ghost_entry(2, 0, 0, 0)], 8);
  assert_eq!(map[dist.ghost_entry(2, 1, 1, 0)], 8 + 2 + 4);
  assert!(map[dist.ghost_entry(2, 2, 0, 0)] < 0);
  assert!(map[dist.ghost_entry(2, 2, 2, 0)] < 0);
  assert_eq!(map.iter().filter(|g| **g >= 0).count(), 20);
}

#[test]
fn map_values_stay_in_range() {
  let params = StagParams::new(
    [6, 5, 4],
    [2, 1, 1, 3],
    [
      BoundaryType::Ghosted,
      BoundaryType::None,
      BoundaryType::Periodic,
    ],
    StencilType::Box,
    2,
  );
  let dists = StagDistribution::set_up_universe(&params, 2).unwrap();
  for dist in &dists {
    let total = dist.global_entries();
    for g in dist.local_to_global() {
      assert!(*g == -1 || (*g >= 0 && *g < total));
    }
    assert_eq!(
      dist.local_to_global().len() as GridInt,
      dist.entries_ghost()
    );
  }
}
