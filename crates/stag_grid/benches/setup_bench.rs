//! Set-up benchmarks: index plan construction dominates, so this measures
//! one rank of a multi-rank decomposition at a few halo widths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stag_grid::{BoundaryType, StagDistribution, StagParams, StencilType};

fn params(width: i64) -> StagParams {
  StagParams::new(
    [64, 64, 64],
    [0, 0, 1, 1],
    [
      BoundaryType::None,
      BoundaryType::Periodic,
      BoundaryType::Ghosted,
    ],
    StencilType::Box,
    width,
  )
}

fn bench_set_up(c: &mut Criterion) {
  let mut group = c.benchmark_group("set_up");
  for width in [1i64, 2, 4] {
    group.bench_with_input(BenchmarkId::new("width", width), &width, |b, w| {
      let p = params(*w);
      b.iter(|| {
        let dist = StagDistribution::set_up_rank(black_box(&p), 8, 0).unwrap();
        black_box(dist.entries_ghost())
      });
    });
  }
  group.finish();
}

fn bench_star_vs_box(c: &mut Criterion) {
  let mut group = c.benchmark_group("stencil_shape");
  for (name, stencil) in [("star", StencilType::Star), ("box", StencilType::Box)] {
    group.bench_function(name, |b| {
      let mut p = params(2);
      p.stencil_type = stencil;
      b.iter(|| StagDistribution::set_up_rank(black_box(&p), 8, 7).unwrap().entries())
    });
  }
  group.finish();
}

criterion_group!(benches, bench_set_up, bench_star_vs_box);
criterion_main!(benches);
