//! Hand-rolled linear algebra for the engine.
//!
//! Everything the camera and the mesh generators need lives here: fixed-size
//! vectors, 3×3/4×4 matrices, and the view/projection constructors. The types
//! are plain `#[repr(C)]` values that can be handed to the GPU without
//! conversion.
//!
//! Degenerate inputs (zero-length normalization, singular inversion) are
//! reported as [`MathError`] values rather than silently producing NaNs.

pub mod matrix;
pub mod vector;

pub use matrix::{Matrix3, Matrix4};
pub use vector::{Vector3, Vector4};

/// Failures of operations that are undefined for degenerate inputs.
///
/// Retrying never helps: the operations are pure, so the same input fails the
/// same way. Callers are expected to surface these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a vector with zero magnitude")]
    ZeroMagnitude,
    #[error("matrix with zero determinant has no inverse")]
    SingularMatrix,
}
