//! Rank grid selection.
//!
//! Fixes any automatic dimensions of the requested rank grid so that the
//! product matches the communicator size, aiming for a decomposition whose
//! aspect ratio roughly follows the global element counts.

use crate::error::{Result, StagError};
use crate::types::GridInt;

/// Choose the rank grid.
///
/// `requested` entries of `None` are decided here. Prescribed entries are
/// kept and validated. Fails when no valid grid exists, when the product
/// of prescribed entries does not divide the communicator size, or when
/// the resulting partition is finer than the mesh.
pub fn choose_rank_grid(
  comm_size: usize,
  global_sizes: [GridInt; 3],
  requested: [Option<GridInt>; 3],
) -> Result<[GridInt; 3]> {
  let size = comm_size as GridInt;
  let [gx, gy, gz] = global_sizes;
  for (a, r) in requested.iter().enumerate() {
    if let Some(r) = r {
      if *r < 1 {
        return Err(StagError::ArgOutOfRange(format!(
          "non-positive number of ranks in dimension {}: {}",
          a, r
        )));
      }
      if *r > size {
        return Err(StagError::ArgOutOfRange(format!(
          "too many ranks in dimension {}: {} > {}",
          a, r, size
        )));
      }
    }
  }
  if let [Some(m), Some(n), Some(p)] = requested {
    if m * n * p != size {
      return Err(StagError::ArgOutOfRange(format!(
        "rank grid {} x {} x {} does not match communicator size {}",
        m, n, p, size
      )));
    }
  }

  let (mut m, mut n, mut p);
  match requested {
    [None, Some(rn), Some(rp)] => {
      n = rn;
      p = rp;
      m = size / (n * p);
    }
    [Some(rm), None, Some(rp)] => {
      m = rm;
      p = rp;
      n = size / (m * p);
    }
    [Some(rm), Some(rn), None] => {
      m = rm;
      n = rn;
      p = size / (m * n);
    }
    [None, None, Some(rp)] => {
      // Squarish split of the x-y plane.
      p = rp;
      m = estimate(gx as f64 * size as f64 / (gy as f64 * p as f64), Root::Square);
      n = 0;
      while m > 0 {
        n = size / (m * p);
        if m * n * p == size {
          break;
        }
        m -= 1;
      }
      if m == 0 {
        return Err(StagError::ArgOutOfRange(format!("bad rank count in z: {}", p)));
      }
      if gx > gy && m < n {
        std::mem::swap(&mut m, &mut n);
      }
    }
    [None, Some(rn), None] => {
      n = rn;
      m = estimate(gx as f64 * size as f64 / (gz as f64 * n as f64), Root::Square);
      p = 0;
      while m > 0 {
        p = size / (m * n);
        if m * n * p == size {
          break;
        }
        m -= 1;
      }
      if m == 0 {
        return Err(StagError::ArgOutOfRange(format!("bad rank count in y: {}", n)));
      }
      if gx > gz && m < p {
        std::mem::swap(&mut m, &mut p);
      }
    }
    [Some(rm), None, None] => {
      m = rm;
      n = estimate(gy as f64 * size as f64 / (gz as f64 * m as f64), Root::Square);
      p = 0;
      while n > 0 {
        p = size / (m * n);
        if m * n * p == size {
          break;
        }
        n -= 1;
      }
      if n == 0 {
        return Err(StagError::ArgOutOfRange(format!("bad rank count in x: {}", m)));
      }
      if gy > gz && n < p {
        std::mem::swap(&mut n, &mut p);
      }
    }
    [None, None, None] => {
      // Fully automatic: pick y first from the cube root of the aspect
      // ratio, then split the rest squarishly between x and z.
      n = estimate(
        gy as f64 * gy as f64 * size as f64 / (gz as f64 * gx as f64),
        Root::Cube,
      );
      while n > 0 {
        if size % n == 0 {
          break;
        }
        n -= 1;
      }
      if n == 0 {
        n = 1;
      }
      m = estimate(gx as f64 * size as f64 / (gz as f64 * n as f64), Root::Square);
      p = 0;
      while m > 0 {
        p = size / (m * n);
        if m * n * p == size {
          break;
        }
        m -= 1;
      }
      if gx > gz && m < p {
        std::mem::swap(&mut m, &mut p);
      }
    }
    [Some(rm), Some(rn), Some(rp)] => {
      m = rm;
      n = rn;
      p = rp;
    }
  }

  if m * n * p != size {
    return Err(StagError::ArgOutOfRange(format!(
      "could not find a rank grid matching communicator size {} (got {} x {} x {})",
      size, m, n, p
    )));
  }
  if gx < m {
    return Err(StagError::ArgOutOfRange(format!(
      "partition in x is too fine: {} elements over {} ranks",
      gx, m
    )));
  }
  if gy < n {
    return Err(StagError::ArgOutOfRange(format!(
      "partition in y is too fine: {} elements over {} ranks",
      gy, n
    )));
  }
  if gz < p {
    return Err(StagError::ArgOutOfRange(format!(
      "partition in z is too fine: {} elements over {} ranks",
      gz, p
    )));
  }
  Ok([m, n, p])
}

enum Root {
  Square,
  Cube,
}

/// Rounded root estimate, clamped to at least one rank.
fn estimate(ratio: f64, root: Root) -> GridInt {
  let r = match root {
    Root::Square => ratio.sqrt(),
    Root::Cube => ratio.cbrt(),
  };
  let est = (0.5 + r) as GridInt;
  est.max(1)
}

/// Coordinates of a rank in the rank grid, x fastest.
#[inline]
pub fn rank_coords(rank: usize, n_ranks: [GridInt; 3]) -> [GridInt; 3] {
  let r = rank as GridInt;
  [
    r % n_ranks[0],
    r % (n_ranks[0] * n_ranks[1]) / n_ranks[0],
    r / (n_ranks[0] * n_ranks[1]),
  ]
}

/// Linear rank from coordinates in the rank grid.
#[inline]
pub fn rank_index(coords: [GridInt; 3], n_ranks: [GridInt; 3]) -> GridInt {
  coords[0] + n_ranks[0] * coords[1] + n_ranks[0] * n_ranks[1] * coords[2]
}

#[cfg(test)]
#[path = "rank_grid_test.rs"]
mod rank_grid_test;
