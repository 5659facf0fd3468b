use crate::{Action, InputEvent};
use glam::Vec2;
use gridwalk_common::Tuning;
use std::collections::HashSet;

/// Per-frame aggregate of every input source.
///
/// `look` is the summed look delta in radians (yaw, pitch), already
/// sensitivity- and time-scaled. `movement` is the horizontal move intent
/// in local camera space (x = strafe, y = local z; forward is negative),
/// with magnitude in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intent {
    pub look: Vec2,
    pub movement: Vec2,
}

/// The touch driving the virtual joystick: offset from its start point.
#[derive(Debug, Clone, Copy)]
struct MoveTouch {
    id: u64,
    start: Vec2,
    current: Vec2,
}

/// The touch driving the view: frame-to-frame deltas, like a pointer.
#[derive(Debug, Clone, Copy)]
struct LookTouch {
    id: u64,
    last: Vec2,
}

/// Collapses held key actions, pointer deltas, and split-screen dual
/// touch into a single [`Intent`] once per frame.
///
/// Touches starting on the left half of the surface own movement; those
/// starting on the right half own the view. Each is tracked by its stable
/// identifier until lifted or canceled, at which point its contribution
/// drops to zero with no decay.
#[derive(Debug)]
pub struct Aggregator {
    tuning: Tuning,
    held: HashSet<Action>,
    pending_look: Vec2,
    /// Horizontal midpoint of the touch surface, pixels.
    split_x: f32,
    move_touch: Option<MoveTouch>,
    look_touch: Option<LookTouch>,
}

impl Aggregator {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            held: HashSet::new(),
            pending_look: Vec2::ZERO,
            split_x: 0.0,
            move_touch: None,
            look_touch: None,
        }
    }

    /// Record where the movement/look halves of the touch surface meet.
    pub fn set_surface_width(&mut self, width: f32) {
        self.split_x = width / 2.0;
    }

    /// Bookkeeping only; nothing is integrated until [`Self::poll`].
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::ActionPressed(action) => {
                self.held.insert(action);
            }
            InputEvent::ActionReleased(action) => {
                self.held.remove(&action);
            }
            InputEvent::PointerDelta { dx, dy } => {
                // Inverted on both axes: the camera stores the inverse
                // world rotation, so looking right subtracts yaw.
                self.pending_look += Vec2::new(-dx, -dy) * self.tuning.mouse_sensitivity;
            }
            InputEvent::TouchStart { id, x, y } => self.touch_start(id, Vec2::new(x, y)),
            InputEvent::TouchMove { id, x, y } => self.touch_move(id, Vec2::new(x, y)),
            InputEvent::TouchEnd { id } | InputEvent::TouchCancel { id } => self.touch_end(id),
        }
    }

    fn touch_start(&mut self, id: u64, position: Vec2) {
        if position.x < self.split_x {
            if self.move_touch.is_none() {
                self.move_touch = Some(MoveTouch {
                    id,
                    start: position,
                    current: position,
                });
            }
        } else if self.look_touch.is_none() {
            self.look_touch = Some(LookTouch { id, last: position });
        }
    }

    fn touch_move(&mut self, id: u64, position: Vec2) {
        if let Some(touch) = &mut self.move_touch
            && touch.id == id
        {
            touch.current = position;
            return;
        }
        if let Some(touch) = &mut self.look_touch
            && touch.id == id
        {
            self.pending_look += (touch.last - position) * self.tuning.touch_sensitivity;
            touch.last = position;
        }
    }

    fn touch_end(&mut self, id: u64) {
        if self.move_touch.is_some_and(|t| t.id == id) {
            self.move_touch = None;
        }
        if self.look_touch.is_some_and(|t| t.id == id) {
            self.look_touch = None;
        }
    }

    /// Drain accumulated state into this frame's intent. `dt` is the
    /// bounded elapsed time in seconds, scaling only the discrete look
    /// contribution (pointer and touch deltas are already per-event).
    pub fn poll(&mut self, dt: f32) -> Intent {
        let mut look = std::mem::replace(&mut self.pending_look, Vec2::ZERO);

        let mut look_raw = Vec2::ZERO;
        let mut move_raw = Vec2::ZERO;
        for action in &self.held {
            match action {
                Action::MoveForward => move_raw.y -= 1.0,
                Action::MoveBack => move_raw.y += 1.0,
                Action::StrafeLeft => move_raw.x -= 1.0,
                Action::StrafeRight => move_raw.x += 1.0,
                Action::LookUp => look_raw.y += 1.0,
                Action::LookDown => look_raw.y -= 1.0,
                Action::LookLeft => look_raw.x += 1.0,
                Action::LookRight => look_raw.x -= 1.0,
            }
        }

        if look_raw != Vec2::ZERO {
            look += unit_toward(look_raw) * self.tuning.key_look_rate * dt;
        }

        let mut movement = if move_raw != Vec2::ZERO {
            unit_toward(move_raw)
        } else {
            Vec2::ZERO
        };

        if let Some(touch) = &self.move_touch {
            let offset = (touch.current - touch.start) / self.tuning.joystick_radius;
            movement += clamp_to_unit(offset);
        }

        Intent {
            look,
            movement: clamp_to_unit(movement),
        }
    }

    /// Forget every in-flight gesture and held action. Called when the
    /// capture mode is lost so a touch that was never lifted cannot keep
    /// steering when the loop resumes.
    pub fn reset_transient(&mut self) {
        if self.move_touch.is_some() || self.look_touch.is_some() || !self.held.is_empty() {
            tracing::debug!("dropping in-flight input trackers");
        }
        self.held.clear();
        self.pending_look = Vec2::ZERO;
        self.move_touch = None;
        self.look_touch = None;
    }
}

/// Reconstruct a unit vector from a raw accumulator via its angle, the
/// tie-break that keeps diagonal key combinations at single-key speed.
fn unit_toward(raw: Vec2) -> Vec2 {
    let angle = raw.y.atan2(raw.x);
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp to the unit circle, preserving direction.
fn clamp_to_unit(v: Vec2) -> Vec2 {
    if v.length_squared() > 1.0 {
        unit_toward(v)
    } else {
        v
    }
}
