//! Error kinds for distribution set-up and queries.

use thiserror::Error;

/// Errors reported by set-up and by the operators built on top of it.
#[derive(Debug, Error)]
pub enum StagError {
  /// A user-provided quantity is out of range: negative counts, rank grid
  /// product not matching the communicator size, ownership vectors that do
  /// not sum to the global size, a partition finer than the mesh.
  #[error("argument out of range: {0}")]
  ArgOutOfRange(String),

  /// A request outside the supported closed sets, or a mesh too small for
  /// the requested stencil width.
  #[error("unsupported: {0}")]
  Unsupported(String),

  /// A local entry count that does not fit the 32-bit index range used by
  /// the transport layer.
  #[error("index overflow: {0}")]
  IntOverflow(String),

  /// An internal invariant was violated. This is a bug in the library, not
  /// a user error.
  #[error("internal error: {0}")]
  Internal(String),
}

pub type Result<T> = std::result::Result<T, StagError>;
