//! Demo driver: decompose a staggered grid over a simulated universe of
//! ranks and print what each rank ends up holding.

use clap::Parser;
use tracing::info;

use stag_grid::{
  create_global_vector, create_local_vector, BoundaryType, GridInt, ScatterPlan,
  StagDistribution, StagParams, StencilType, ThreadComm,
};

#[derive(Parser, Debug)]
#[command(name = "stag_demo", about = "Staggered-grid decomposition demo")]
struct Args {
  /// Number of simulated ranks.
  #[arg(long, default_value_t = 8)]
  ranks: usize,

  /// Global element counts.
  #[arg(long, default_value_t = 8)]
  grid_x: GridInt,
  #[arg(long, default_value_t = 8)]
  grid_y: GridInt,
  #[arg(long, default_value_t = 8)]
  grid_z: GridInt,

  /// Dof per vertex, edge, face, element.
  #[arg(long, default_value_t = 0)]
  dof0: GridInt,
  #[arg(long, default_value_t = 0)]
  dof1: GridInt,
  #[arg(long, default_value_t = 1)]
  dof2: GridInt,
  #[arg(long, default_value_t = 1)]
  dof3: GridInt,

  /// Boundary treatment, applied to all axes.
  #[arg(long, default_value = "none")]
  boundary: String,

  /// Ghost stencil shape.
  #[arg(long, default_value = "box")]
  stencil: String,

  /// Ghost stencil width.
  #[arg(long, default_value_t = 1)]
  stencil_width: GridInt,
}

fn parse_boundary(name: &str) -> Result<BoundaryType, String> {
  match name {
    "none" => Ok(BoundaryType::None),
    "ghosted" => Ok(BoundaryType::Ghosted),
    "periodic" => Ok(BoundaryType::Periodic),
    other => Err(format!("unsupported boundary type {other}")),
  }
}

fn parse_stencil(name: &str) -> Result<StencilType, String> {
  match name {
    "none" => Ok(StencilType::None),
    "star" => Ok(StencilType::Star),
    "box" => Ok(StencilType::Box),
    other => Err(format!("unsupported stencil type {other}")),
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .init();

  let args = Args::parse();
  let boundary = parse_boundary(&args.boundary)?;
  let stencil = parse_stencil(&args.stencil)?;
  let params = StagParams::new(
    [args.grid_x, args.grid_y, args.grid_z],
    [args.dof0, args.dof1, args.dof2, args.dof3],
    [boundary; 3],
    stencil,
    args.stencil_width,
  );

  let dists = StagDistribution::set_up_universe(&params, args.ranks)?;
  let first = &dists[0];
  info!(
    rank_grid = ?first.n_ranks(),
    global_entries = first.global_entries(),
    entries_per_element = first.entries_per_element(),
    "decomposed {} x {} x {} elements over {} ranks",
    args.grid_x,
    args.grid_y,
    args.grid_z,
    args.ranks
  );

  println!(
    "{:>4}  {:>12}  {:>12}  {:>14}  {:>14}  {:>8}  {:>8}",
    "rank", "start", "size", "ghost start", "ghost size", "owned", "ghosted"
  );
  for dist in &dists {
    let (start, n, _) = dist.corners();
    let (gs, gn) = dist.ghost_corners();
    println!(
      "{:>4}  {:>12}  {:>12}  {:>14}  {:>14}  {:>8}  {:>8}",
      dist.rank(),
      format!("{},{},{}", start[0], start[1], start[2]),
      format!("{},{},{}", n[0], n[1], n[2]),
      format!("{},{},{}", gs[0], gs[1], gs[2]),
      format!("{},{},{}", gn[0], gn[1], gn[2]),
      dist.entries(),
      dist.entries_ghost(),
    );
  }

  // Drive one forward scatter across threaded ranks as a smoke test.
  let comms = ThreadComm::universe(args.ranks);
  std::thread::scope(|s| {
    let handles: Vec<_> = comms
      .into_iter()
      .map(|comm| {
        let params = &params;
        s.spawn(move || -> Result<usize, stag_grid::StagError> {
          let dist = StagDistribution::set_up(params, &comm)?;
          let plan = ScatterPlan::new(&dist, &comm)?;
          let mut global = create_global_vector(&dist);
          let off = dist.global_offsets()[dist.rank()];
          for (i, v) in global.values.iter_mut().enumerate() {
            *v = (off + i as GridInt) as f64;
          }
          let mut local = create_local_vector(&dist);
          plan.forward(&dist, &comm, &global, &mut local)?;
          let received = dist
            .local_to_global()
            .iter()
            .filter(|g| **g >= 0)
            .count();
          Ok(received)
        })
      })
      .collect();
    for (rank, handle) in handles.into_iter().enumerate() {
      match handle.join() {
        Ok(Ok(received)) => info!(rank, received, "forward scatter delivered the halo"),
        Ok(Err(err)) => eprintln!("rank {rank}: {err}"),
        Err(_) => eprintln!("rank {rank}: worker panicked"),
      }
    }
  });

  Ok(())
}
