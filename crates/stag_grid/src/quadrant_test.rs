use super::*;

#[test]
fn index_offset_roundtrip() {
  for q in 0..QUADRANT_COUNT {
    assert_eq!(quadrant_index(quadrant_offset(q)), q);
  }
}

#[test]
fn self_quadrant_is_centered() {
  assert_eq!(quadrant_offset(SELF_QUADRANT), [0, 0, 0]);
}

#[test]
fn star_keeps_self_and_the_six_axis_neighbors() {
  let members: Vec<_> = (0..QUADRANT_COUNT)
    .filter(|q| in_star(quadrant_offset(*q)))
    .collect();
  assert_eq!(members, vec![4, 10, 12, 13, 14, 16, 22]);
}
