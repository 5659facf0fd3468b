//! Camera model and transform pipeline.
//!
//! # Invariants
//! - Yaw always lies in `(-PI, PI]`; pitch always lies in `[-PI/2, PI/2]`.
//! - The stored translation is the inverse camera transform: moving the
//!   camera forward subtracts the rotated displacement.
//! - The projection matrix is recomputed only when its parameters change;
//!   the view-projection matrix is recomputed every active frame.

pub mod camera;
pub mod projection;

pub use camera::Camera;
pub use projection::Projection;
