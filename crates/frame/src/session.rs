use glam::Mat4;
use gridwalk_camera::{Camera, Projection};
use gridwalk_common::{GridConfig, Tuning};
use gridwalk_input::{Aggregator, InputEvent, Intent};

/// Everything the frame loop mutates: camera, projection, and the input
/// aggregator. Owned by the scheduler and passed explicitly; there is no
/// ambient global state.
#[derive(Debug)]
pub struct Session {
    camera: Camera,
    projection: Projection,
    input: Aggregator,
    tuning: Tuning,
    projection_matrix: Mat4,
}

impl Session {
    pub fn new(grid: &GridConfig, tuning: Tuning) -> Self {
        let projection = Projection::default();
        Self {
            camera: Camera::above_grid_center(grid.width_cells, grid.length_cells),
            projection_matrix: projection.matrix(),
            projection,
            input: Aggregator::new(tuning),
            tuning,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Forward a device event to the aggregator. Bookkeeping only; the
    /// effect lands on the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle(event);
    }

    /// Update projection parameters for a new viewport. The projection
    /// matrix is recomputed here, not per frame.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.projection.set_viewport(width, height);
        self.projection_matrix = self.projection.matrix();
        self.input.set_surface_width(width as f32);
    }

    /// One integration step: poll intent, rotate, then translate.
    pub(crate) fn integrate(&mut self, dt: f32) {
        let Intent { look, movement } = self.input.poll(dt);
        self.camera.rotate(look.x, look.y);
        if movement != glam::Vec2::ZERO {
            self.camera.translate(movement, self.tuning.max_speed * dt);
        }
    }

    /// The per-frame matrix every render submission depends on.
    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection(self.projection_matrix)
    }

    pub(crate) fn reset_transient_input(&mut self) {
        self.input.reset_transient();
    }
}
