//! Shared configuration for the gridwalk workspace.
//!
//! # Invariants
//! - Configuration is immutable after startup; only the projection aspect
//!   ratio changes post-init (on viewport resize), and that lives in the
//!   camera crate.
//! - A validated [`GridConfig`] always has at least 2 cells per axis.

pub mod config;

pub use config::{ConfigError, GridConfig, Tuning};
