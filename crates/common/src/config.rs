use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors surfaced to callers that need a non-empty terrain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The mesh builder degrades to empty buffers below 2 cells per axis;
    /// callers that cannot accept an empty terrain reject the config here.
    #[error("grid axis '{axis}' has {cells} cells, need at least 2")]
    GridTooSmall { axis: &'static str, cells: u32 },

    /// Index buffers are u16, so the vertex count must fit in one.
    #[error("grid of {width}x{length} cells needs {vertices} vertices, exceeding u16 indexing")]
    GridTooLarge {
        width: u32,
        length: u32,
        vertices: u64,
    },
}

/// Immutable terrain grid dimensions, in unit cells per horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width_cells: u32,
    pub length_cells: u32,
}

impl GridConfig {
    pub fn new(width_cells: u32, length_cells: u32) -> Self {
        Self {
            width_cells,
            length_cells,
        }
    }

    /// Total vertex count the mesh builder will emit: 4 per cell, unshared.
    pub fn vertex_count(&self) -> u64 {
        4 * self.width_cells as u64 * self.length_cells as u64
    }

    /// Reject configurations the mesh builder would degrade on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width_cells < 2 {
            return Err(ConfigError::GridTooSmall {
                axis: "width",
                cells: self.width_cells,
            });
        }
        if self.length_cells < 2 {
            return Err(ConfigError::GridTooSmall {
                axis: "length",
                cells: self.length_cells,
            });
        }
        if self.vertex_count() > u16::MAX as u64 + 1 {
            return Err(ConfigError::GridTooLarge {
                width: self.width_cells,
                length: self.length_cells,
                vertices: self.vertex_count(),
            });
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(66, 66)
    }
}

/// Motion and look tuning constants.
///
/// Speeds are per second; sensitivities are radians per pixel of pointer
/// or touch travel. `max_frame_dt` bounds the elapsed time fed into
/// integration so a suspended session cannot produce a camera jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Walk speed in world units per second at full move intent.
    pub max_speed: f32,
    /// Pointer look sensitivity, radians per pixel.
    pub mouse_sensitivity: f32,
    /// Arrow-key look rate, radians per second.
    pub key_look_rate: f32,
    /// Touch look sensitivity, radians per pixel.
    pub touch_sensitivity: f32,
    /// Virtual joystick radius in pixels; the move touch offset is
    /// normalized by this before clamping to the unit circle.
    pub joystick_radius: f32,
    /// Upper bound on per-frame elapsed time, seconds.
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: 20.0,
            mouse_sensitivity: 0.002,
            key_look_rate: 1.0,
            touch_sensitivity: 0.004,
            joystick_radius: 64.0,
            max_frame_dt: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_valid() {
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn tiny_axis_rejected() {
        let cfg = GridConfig::new(1, 10);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { axis: "width", .. })
        ));
        let cfg = GridConfig::new(10, 0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { axis: "length", .. })
        ));
    }

    #[test]
    fn oversized_grid_rejected() {
        // 200 * 200 * 4 = 160_000 vertices, past u16 indexing.
        let cfg = GridConfig::new(200, 200);
        assert!(matches!(cfg.validate(), Err(ConfigError::GridTooLarge { .. })));
    }

    #[test]
    fn vertex_count_counts_unshared_corners() {
        assert_eq!(GridConfig::new(2, 3).vertex_count(), 24);
    }
}
