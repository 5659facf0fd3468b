//! wgpu render backend for gridwalk.
//!
//! Uploads the immutable terrain buffers once at startup and a fresh
//! view-projection matrix each active frame.
//!
//! # Invariants
//! - The renderer never mutates session state.
//! - The shaded surface draws with depth testing; the wireframe overlay
//!   draws with depth testing disabled so it stays visible.

mod gpu;
mod shaders;

pub use gpu::TerrainRenderer;
