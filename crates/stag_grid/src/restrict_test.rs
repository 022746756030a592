use super::*;
use crate::distribution::StagDistribution;
use crate::types::{BoundaryType, StagParams, StencilType};
use crate::vector::create_local_vector;

fn setup(n: GridInt, dof: [GridInt; 4]) -> StagDistribution {
  let params = StagParams::new(
    [n, n, n],
    dof,
    [BoundaryType::None; 3],
    StencilType::None,
    0,
  );
  StagDistribution::set_up_rank(&params, 1, 0).unwrap()
}

/// Fill one slot over the whole ghost box with a coordinate tag.
fn fill_slot(dist: &StagDistribution, v: &mut LocalVector, slot: GridInt) {
  let (s, n) = dist.ghost_corners();
  for k in s[2]..s[2] + n[2] {
    for j in s[1]..s[1] + n[1] {
      for i in s[0]..s[0] + n[0] {
        v.values[dist.ghost_entry(i, j, k, slot)] = (100 * i + 10 * j + k) as f64;
      }
    }
  }
}

#[test]
fn edges_average_two_fine_values_along_their_axis() {
  // One dof per edge: slots are back-down (x), back-left (y), down-left (z).
  let fine = setup(4, [0, 1, 0, 0]);
  let coarse = setup(2, [0, 1, 0, 0]);
  let mut xf = create_local_vector(&fine);
  for slot in 0..3 {
    fill_slot(&fine, &mut xf, slot);
  }
  let mut xc = create_local_vector(&coarse);
  restrict_simple(&fine, &xf, &coarse, &mut xc).unwrap();

  // Back-down edges pair along x: fine 2i and 2i+1 at (2j, 2k).
  let bd = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 0)];
  assert_eq!(bd(0, 0, 0), 50.0);
  assert_eq!(bd(1, 1, 1), 0.5 * (222.0 + 322.0));
  // The extra rows at the far walls are filled too.
  assert_eq!(bd(0, 2, 2), 0.5 * (44.0 + 144.0));
  // Back-left edges pair along y.
  let bl = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 1)];
  assert_eq!(bl(1, 0, 1), 0.5 * (202.0 + 212.0));
  assert_eq!(bl(2, 0, 0), 0.5 * (400.0 + 410.0));
  // Down-left edges pair along z.
  let dl = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 2)];
  assert_eq!(dl(0, 1, 0), 0.5 * (20.0 + 21.0));
}

#[test]
fn vertices_inject_and_elements_average_eight() {
  let fine = setup(4, [1, 0, 0, 1]);
  let coarse = setup(2, [1, 0, 0, 1]);
  let mut xf = create_local_vector(&fine);
  fill_slot(&fine, &mut xf, 0);
  fill_slot(&fine, &mut xf, 1);
  let mut xc = create_local_vector(&coarse);
  restrict_simple(&fine, &xf, &coarse, &mut xc).unwrap();

  // Vertices copy the coincident fine vertex, including the far wall.
  let vx = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 0)];
  assert_eq!(vx(0, 0, 0), 0.0);
  assert_eq!(vx(1, 1, 0), 220.0);
  assert_eq!(vx(2, 2, 2), 444.0);
  // Elements average their eight children.
  let el = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 1)];
  let avg = |i: GridInt, j: GridInt, k: GridInt| {
    let mut sum = 0.0;
    for dk in 0..2 {
      for dj in 0..2 {
        for di in 0..2 {
          sum += (100 * (2 * i + di) + 10 * (2 * j + dj) + (2 * k + dk)) as f64;
        }
      }
    }
    0.125 * sum
  };
  assert_eq!(el(0, 0, 0), avg(0, 0, 0));
  assert_eq!(el(1, 0, 1), avg(1, 0, 1));
}

#[test]
fn faces_average_four_across_their_plane() {
  let fine = setup(4, [0, 0, 1, 0]);
  let coarse = setup(2, [0, 0, 1, 0]);
  let mut xf = create_local_vector(&fine);
  // Face slots are back (offset 0), down (1), left (2).
  for slot in 0..3 {
    fill_slot(&fine, &mut xf, slot);
  }
  let mut xc = create_local_vector(&coarse);
  restrict_simple(&fine, &xf, &coarse, &mut xc).unwrap();
  // A back face pairs along x and y at the coincident z plane.
  let back = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 0)];
  let expect = 0.25 * (200.0 + 300.0 + 210.0 + 310.0);
  assert_eq!(back(1, 0, 0), expect);
  // A left face pairs along y and z at the coincident x plane.
  let left = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 2)];
  assert_eq!(left(1, 0, 0), 0.25 * (200.0 + 210.0 + 201.0 + 211.0));
}

#[test]
fn odd_factors_inject_the_centered_fine_value() {
  let fine = setup(6, [0, 0, 0, 1]);
  let coarse = setup(2, [0, 0, 0, 1]);
  let mut xf = create_local_vector(&fine);
  fill_slot(&fine, &mut xf, 0);
  let mut xc = create_local_vector(&coarse);
  restrict_simple(&fine, &xf, &coarse, &mut xc).unwrap();
  let el = |i, j, k| xc.values[coarse.ghost_entry(i, j, k, 0)];
  // Factor 3: the centered fine element is taken as is.
  assert_eq!(el(0, 0, 0), 111.0);
  assert_eq!(el(1, 1, 0), (100 * 4 + 10 * 4 + 1) as f64);
}

#[test]
fn mismatched_layouts_are_rejected() {
  let fine = setup(4, [0, 1, 0, 0]);
  let coarse = setup(2, [1, 0, 0, 0]);
  let xf = create_local_vector(&fine);
  let mut xc = create_local_vector(&coarse);
  assert!(restrict_simple(&fine, &xf, &coarse, &mut xc).is_err());
}

#[test]
fn non_divisible_sizes_are_rejected() {
  let fine = setup(4, [0, 0, 0, 1]);
  let coarse = setup(3, [0, 0, 0, 1]);
  let xf = create_local_vector(&fine);
  let mut xc = create_local_vector(&coarse);
  assert!(restrict_simple(&fine, &xf, &coarse, &mut xc).is_err());
}
