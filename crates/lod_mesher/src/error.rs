//! Error type for mesher construction and configuration.

use thiserror::Error;

/// Errors reported while setting up a mesher.
///
/// Meshing itself cannot fail; invariant violations there are assertions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LodError {
    #[error("unknown leaves style {0:?} (expected \"fancy\", \"simple\" or \"opaque\")")]
    UnknownLeavesStyle(String),

    #[error("node size must be finite and > 0 (got {0})")]
    InvalidNodeSize(f32),

    #[error("mesh side length must be >= 1 node (got {0})")]
    InvalidSideLength(i32),

    #[error("voxel grid dimensions must be >= 1 (got {0:?})")]
    InvalidGridSize([i32; 3]),

    #[error("no free content ids left")]
    ContentIdsExhausted,
}
