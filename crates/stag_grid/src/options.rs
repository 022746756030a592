//! Construction-time options.
//!
//! A distribution accepts a flat list of `key value` tokens overriding its
//! construction parameters, the way a solver driver would pass them down
//! from its command line:
//!
//! ```text
//! grid_x 32 grid_y 32 grid_z 16 ranks_x 2 stencil_width 2
//! boundary_type_x periodic stencil_type box
//! ```

use crate::error::{Result, StagError};
use crate::types::{BoundaryType, GridInt, StagParams, StencilType};

/// Parsed option overrides.
#[derive(Clone, Debug, Default)]
pub struct StagOptions {
  pub grid: [Option<GridInt>; 3],
  pub ranks: [Option<GridInt>; 3],
  pub stencil_width: Option<GridInt>,
  pub stencil_type: Option<StencilType>,
  pub boundary: [Option<BoundaryType>; 3],
}

impl StagOptions {
  /// Parse `key value` token pairs. Unknown keys and malformed values are
  /// rejected; unknown boundary or stencil names are unsupported rather
  /// than malformed.
  pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
    let mut opts = StagOptions::default();
    let mut it = tokens.iter();
    while let Some(key) = it.next() {
      let key = key.as_ref();
      let value = it
        .next()
        .ok_or_else(|| StagError::ArgOutOfRange(format!("option {} is missing a value", key)))?
        .as_ref();
      match key {
        "grid_x" => opts.grid[0] = Some(parse_int(key, value)?),
        "grid_y" => opts.grid[1] = Some(parse_int(key, value)?),
        "grid_z" => opts.grid[2] = Some(parse_int(key, value)?),
        "ranks_x" => opts.ranks[0] = Some(parse_int(key, value)?),
        "ranks_y" => opts.ranks[1] = Some(parse_int(key, value)?),
        "ranks_z" => opts.ranks[2] = Some(parse_int(key, value)?),
        "stencil_width" => opts.stencil_width = Some(parse_int(key, value)?),
        "stencil_type" => opts.stencil_type = Some(parse_stencil(value)?),
        "boundary_type_x" => opts.boundary[0] = Some(parse_boundary(value)?),
        "boundary_type_y" => opts.boundary[1] = Some(parse_boundary(value)?),
        "boundary_type_z" => opts.boundary[2] = Some(parse_boundary(value)?),
        _ => {
          return Err(StagError::ArgOutOfRange(format!("unrecognized option {}", key)));
        }
      }
    }
    Ok(opts)
  }

  /// Apply the overrides to construction parameters.
  pub fn apply(&self, params: &mut StagParams) {
    for a in 0..3 {
      if let Some(n) = self.grid[a] {
        params.global_sizes[a] = n;
      }
      if self.ranks[a].is_some() {
        params.ranks[a] = self.ranks[a];
      }
      if let Some(b) = self.boundary[a] {
        params.boundary[a] = b;
      }
    }
    if let Some(w) = self.stencil_width {
      params.stencil_width = w;
    }
    if let Some(s) = self.stencil_type {
      params.stencil_type = s;
    }
  }
}

fn parse_int(key: &str, value: &str) -> Result<GridInt> {
  value
    .parse()
    .map_err(|_| StagError::ArgOutOfRange(format!("option {} has non-integer value {}", key, value)))
}

fn parse_boundary(value: &str) -> Result<BoundaryType> {
  match value {
    "none" => Ok(BoundaryType::None),
    "ghosted" => Ok(BoundaryType::Ghosted),
    "periodic" => Ok(BoundaryType::Periodic),
    other => Err(StagError::Unsupported(format!("boundary type {}", other))),
  }
}

fn parse_stencil(value: &str) -> Result<StencilType> {
  match value {
    "none" => Ok(StencilType::None),
    "star" => Ok(StencilType::Star),
    "box" => Ok(StencilType::Box),
    other => Err(StagError::Unsupported(format!("stencil type {}", other))),
  }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
