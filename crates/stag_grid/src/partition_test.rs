use super::*;

#[test]
fn default_split_puts_extras_on_low_ranks() {
  assert_eq!(default_ownership(10, 4), vec![3, 3, 2, 2]);
  assert_eq!(default_ownership(4, 2), vec![2, 2]);
  assert_eq!(default_ownership(5, 3), vec![2, 2, 1]);
}

#[test]
fn default_split_sums_to_global_size() {
  for n in 1..40 {
    for ranks in 1..=n.min(9) {
      let l = default_ownership(n, ranks);
      assert_eq!(l.iter().sum::<GridInt>(), n);
    }
  }
}

#[test]
fn prescribed_vector_must_sum() {
  assert!(validate_ownership(0, &[2, 1], 4, 2).is_err());
  assert!(validate_ownership(0, &[2, 2], 4, 2).is_ok());
}

#[test]
fn prescribed_vector_must_match_rank_count() {
  assert!(validate_ownership(1, &[4], 4, 2).is_err());
}

#[test]
fn prescribed_vector_must_be_positive() {
  assert!(validate_ownership(2, &[4, 0], 4, 2).is_err());
}

#[test]
fn owned_box_accumulates_starts() {
  let ownership = [vec![3, 2], vec![4], vec![1, 1, 1]];
  let b = OwnedBox::new([1, 0, 2], [2, 1, 3], &ownership);
  assert_eq!(b.start, [3, 0, 2]);
  assert_eq!(b.size, [2, 4, 1]);
  assert_eq!(b.first_rank, [false, true, false]);
  assert_eq!(b.last_rank, [true, true, true]);
}
