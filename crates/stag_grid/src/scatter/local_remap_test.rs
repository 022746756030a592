use crate::distribution::StagDistribution;
use crate::types::{BoundaryType, GridInt, StagParams, StencilType};

#[test]
fn remap_points_every_owned_entry_at_its_ghosted_slot() {
  let params = StagParams::new(
    [4, 4, 2],
    [1, 0, 0, 1],
    [
      BoundaryType::None,
      BoundaryType::Periodic,
      BoundaryType::Ghosted,
    ],
    StencilType::Box,
    1,
  );
  let dists = StagDistribution::set_up_universe(&params, 4).unwrap();
  for dist in &dists {
    let remap = dist.local_remap();
    assert_eq!(remap.len() as GridInt, dist.entries());
    let off = dist.global_offsets()[dist.rank()];
    let map = dist.local_to_global();
    let mut seen = vec![false; map.len()];
    for (pos, l) in remap.iter().enumerate() {
      let l = *l as usize;
      assert!(!seen[l], "ghosted slot reused");
      seen[l] = true;
      // The slot the remap picks must map back to the same global entry.
      assert_eq!(map[l], off + pos as GridInt);
    }
  }
}

#[test]
fn single_rank_remap_matches_direct_indexing() {
  let params = StagParams::new(
    [3, 3, 3],
    [0, 0, 0, 1],
    [BoundaryType::Periodic; 3],
    StencilType::None,
    0,
  );
  let dist = StagDistribution::set_up_rank(&params, 1, 0).unwrap();
  // Fully periodic single rank with no halo: local and global layouts
  // coincide.
  let identity: Vec<GridInt> = (0..dist.entries()).collect();
  assert_eq!(dist.local_remap(), identity.as_slice());
}
