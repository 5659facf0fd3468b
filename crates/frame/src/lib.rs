//! Frame scheduling: the single-threaded loop tying input to rendering.
//!
//! # Invariants
//! - Within one tick, input aggregation completes before camera
//!   integration, which completes before matrix recomputation.
//! - Elapsed time fed into integration is clamped to `Tuning::max_frame_dt`.
//! - Leaving the active state resets all transient input trackers.

pub mod scheduler;
pub mod session;

pub use scheduler::{Frame, FrameLoop};
pub use session::Session;
