//! stag_grid - parallel data distribution for 3-D staggered grids
//!
//! This crate builds the index machinery behind finite-difference and
//! finite-volume discretizations on regular 3-D grids with degrees of
//! freedom on four cell strata: vertices, edges, faces and elements. Given
//! global sizes, a rank grid, a dof vector, boundary types and a ghost
//! stencil, every rank derives, without communication:
//!
//! - its owned element box and ghosted box;
//! - a dense global numbering, block-contiguous per rank;
//! - a global->local scatter plan for its ghost halo;
//! - a local->global map with -1 sentinels at dummy boundary slots;
//! - the per-cell offset table for all 27 named sub-locations.
//!
//! # Example
//!
//! ```
//! use stag_grid::{
//!   create_global_vector, create_local_vector, BoundaryType, SeqComm, StagDistribution,
//!   StagParams, StencilType,
//! };
//!
//! let params = StagParams::new(
//!   [8, 8, 8],
//!   [0, 0, 0, 1],
//!   [BoundaryType::Periodic; 3],
//!   StencilType::Box,
//!   1,
//! );
//! let dist = StagDistribution::set_up(&params, &SeqComm).unwrap();
//! assert_eq!(dist.global_entries(), 8 * 8 * 8);
//! let global = create_global_vector(&dist);
//! let local = create_local_vector(&dist);
//! assert_eq!(global.values.len(), 512);
//! assert_eq!(local.values.len(), 10 * 10 * 10);
//! ```

pub mod comm;
pub mod coords;
pub mod distribution;
pub mod dof;
pub mod error;
pub mod ghost;
pub mod global_offsets;
pub mod location;
pub mod neighbors;
pub mod options;
pub mod partition;
pub mod quadrant;
pub mod rank_grid;
pub mod restrict;
pub mod scatter;
pub mod types;
pub mod vector;

// Re-export the everyday surface.
pub use comm::{Communicator, SeqComm, ThreadComm};
pub use distribution::StagDistribution;
pub use dof::DofLayout;
pub use error::{Result, StagError};
pub use location::{Location, LocationOffsets};
pub use options::StagOptions;
pub use restrict::restrict_simple;
pub use scatter::ScatterIndices;
pub use types::{BoundaryType, GridInt, StagParams, StencilType, Stratum};
pub use vector::{create_global_vector, create_local_vector, GlobalVector, LocalVector, ScatterPlan};
