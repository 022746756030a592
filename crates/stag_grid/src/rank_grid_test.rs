use super::*;
use crate::error::StagError;

#[test]
fn cube_splits_evenly() {
  let r = choose_rank_grid(8, [8, 8, 8], [None; 3]).unwrap();
  assert_eq!(r, [2, 2, 2]);
}

#[test]
fn long_x_line_goes_to_x() {
  let r = choose_rank_grid(4, [4, 1, 1], [None; 3]).unwrap();
  assert_eq!(r, [4, 1, 1]);
}

#[test]
fn long_y_line_goes_to_y() {
  let r = choose_rank_grid(6, [1, 6, 1], [None; 3]).unwrap();
  assert_eq!(r, [1, 6, 1]);
}

#[test]
fn prescribed_axes_are_kept() {
  let r = choose_rank_grid(4, [4, 4, 4], [Some(2), None, None]).unwrap();
  assert_eq!(r[0], 2);
  assert_eq!(r[0] * r[1] * r[2], 4);
  let r = choose_rank_grid(12, [8, 8, 8], [None, Some(3), None]).unwrap();
  assert_eq!(r[1], 3);
  assert_eq!(r[0] * r[1] * r[2], 12);
}

#[test]
fn product_always_matches_size() {
  for size in 1..=16 {
    let r = choose_rank_grid(size, [16, 16, 16], [None; 3]).unwrap();
    assert_eq!(r[0] * r[1] * r[2], size as GridInt, "size {}", size);
  }
}

#[test]
fn fixed_grid_must_match_size() {
  let err = choose_rank_grid(4, [8, 8, 8], [Some(2), Some(2), Some(2)]);
  assert!(matches!(err, Err(StagError::ArgOutOfRange(_))));
}

#[test]
fn non_positive_request_rejected() {
  let err = choose_rank_grid(4, [8, 8, 8], [Some(0), None, None]);
  assert!(matches!(err, Err(StagError::ArgOutOfRange(_))));
}

#[test]
fn too_fine_partition_rejected() {
  let err = choose_rank_grid(8, [2, 1, 1], [Some(8), Some(1), Some(1)]);
  assert!(matches!(err, Err(StagError::ArgOutOfRange(_))));
}

#[test]
fn rank_coordinate_roundtrip() {
  let n_ranks = [3, 2, 4];
  for rank in 0..24 {
    let c = rank_coords(rank, n_ranks);
    assert_eq!(rank_index(c, n_ranks), rank as GridInt);
  }
  assert_eq!(rank_coords(0, n_ranks), [0, 0, 0]);
  assert_eq!(rank_coords(1, n_ranks), [1, 0, 0]);
  assert_eq!(rank_coords(3, n_ranks), [0, 1, 0]);
  assert_eq!(rank_coords(6, n_ranks), [0, 0, 1]);
}
