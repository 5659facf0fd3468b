//! Procedural terrain mesh generation.
//!
//! # Invariants
//! - Buffers are built once and never mutated; the render path only reads.
//! - Every triangle index addresses an emitted vertex.
//! - The wireframe index buffer is a strict subset of the triangle index
//!   buffer, so the overlay always aligns with the shaded surface.

pub mod terrain;

pub use terrain::{TerrainMesh, TerrainVertex};
