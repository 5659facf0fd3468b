use crate::Session;
use glam::Mat4;

/// Output of one scheduler pass: what the render submission consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub view_projection: Mat4,
}

/// Two-state cooperative frame loop: Idle (no frame pending) or Active
/// (ticking once per display refresh).
///
/// The loop is independent of any platform scheduling primitive; it is
/// driven by monotonic timestamps in seconds, so a display-refresh
/// callback, a fixed-timestep loop, or a test harness can all drive it.
#[derive(Debug)]
pub struct FrameLoop {
    session: Session,
    active: bool,
    last_time: Option<f64>,
}

impl FrameLoop {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            active: false,
            last_time: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Idle → Active, on gaining the input-capture mode. Re-baselines the
    /// timestamp so time spent idle never enters integration. Starting an
    /// already-active loop only refreshes the baseline.
    pub fn start(&mut self, now: f64) {
        if !self.active {
            tracing::debug!("frame loop active");
        }
        self.active = true;
        self.last_time = Some(now);
    }

    /// Active → Idle, on losing the input-capture mode. Drops every
    /// transient input tracker so a gesture that was never lifted cannot
    /// keep steering when the loop resumes. Idempotent.
    pub fn stop(&mut self) {
        if self.active {
            tracing::debug!("frame loop idle");
        }
        self.active = false;
        self.last_time = None;
        self.session.reset_transient_input();
    }

    /// One active frame: compute bounded elapsed time, run aggregation →
    /// integration → matrix recomputation in that fixed order, and hand
    /// the result to the render submission. Returns `None` while idle.
    pub fn tick(&mut self, now: f64) -> Option<Frame> {
        if !self.active {
            return None;
        }

        let elapsed = now - self.last_time.unwrap_or(now);
        self.last_time = Some(now);

        // A suspended session can report an arbitrarily large gap; an
        // unbounded dt would teleport the camera.
        let max_dt = self.session.tuning().max_frame_dt;
        let dt = elapsed.clamp(0.0, max_dt as f64) as f32;

        self.session.integrate(dt);
        Some(Frame {
            view_projection: self.session.view_projection(),
        })
    }

    /// Viewport change. While idle this yields exactly one frame so the
    /// static scene reflects the new aspect ratio without going active;
    /// while active the next tick picks the change up.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<Frame> {
        self.session.set_viewport(width, height);
        if self.active {
            None
        } else {
            Some(Frame {
                view_projection: self.session.view_projection(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_common::{GridConfig, Tuning};
    use gridwalk_input::{Action, InputEvent};

    fn frame_loop() -> FrameLoop {
        let session = Session::new(&GridConfig::default(), Tuning::default());
        FrameLoop::new(session)
    }

    #[test]
    fn tick_while_idle_produces_nothing() {
        let mut fl = frame_loop();
        assert!(fl.tick(1.0).is_none());
        assert!(!fl.is_active());
    }

    #[test]
    fn first_tick_after_start_integrates_zero_elapsed() {
        let mut fl = frame_loop();
        fl.session_mut()
            .handle_input(InputEvent::ActionPressed(Action::MoveForward));
        fl.start(5.0);
        let before = *fl.session().camera();
        fl.tick(5.0);
        assert_eq!(fl.session().camera().translation(), before.translation());
    }

    #[test]
    fn held_key_moves_camera_at_tuned_speed() {
        let mut fl = frame_loop();
        fl.session_mut()
            .handle_input(InputEvent::ActionPressed(Action::MoveForward));
        fl.start(0.0);
        let before = fl.session().camera().translation();
        fl.tick(0.016);
        let moved = (fl.session().camera().translation() - before).length();
        let expected = Tuning::default().max_speed * 0.016;
        assert!((moved - expected).abs() < 1e-4);
    }

    #[test]
    fn elapsed_time_is_bounded() {
        let mut fl = frame_loop();
        fl.session_mut()
            .handle_input(InputEvent::ActionPressed(Action::MoveForward));
        fl.start(0.0);
        let before = fl.session().camera().translation();
        // A long tab suspend: the next timestamp is 20 minutes later.
        fl.tick(1200.0);
        let tuning = Tuning::default();
        let moved = (fl.session().camera().translation() - before).length();
        assert!(moved <= tuning.max_speed * tuning.max_frame_dt + 1e-4);
    }

    #[test]
    fn backwards_clock_integrates_nothing() {
        let mut fl = frame_loop();
        fl.session_mut()
            .handle_input(InputEvent::ActionPressed(Action::MoveForward));
        fl.start(10.0);
        let before = fl.session().camera().translation();
        fl.tick(9.5);
        assert_eq!(fl.session().camera().translation(), before);
    }

    #[test]
    fn stop_is_idempotent_and_ends_ticking() {
        let mut fl = frame_loop();
        fl.start(0.0);
        fl.stop();
        fl.stop();
        assert!(fl.tick(1.0).is_none());
    }

    #[test]
    fn stop_drops_mid_gesture_touch() {
        // Capture lost with a touch still down: resuming must not drift.
        let mut fl = frame_loop();
        fl.session_mut().set_viewport(400, 300);
        fl.start(0.0);
        fl.session_mut()
            .handle_input(InputEvent::TouchStart { id: 1, x: 40.0, y: 40.0 });
        fl.session_mut()
            .handle_input(InputEvent::TouchMove { id: 1, x: 160.0, y: 40.0 });
        fl.stop();

        fl.start(1.0);
        let before = fl.session().camera().translation();
        fl.tick(1.1);
        assert_eq!(fl.session().camera().translation(), before);
    }

    #[test]
    fn resize_while_idle_emits_one_frame() {
        let mut fl = frame_loop();
        let frame = fl.resize(1920, 1080).expect("idle resize renders once");
        assert_eq!(frame.view_projection, fl.session().view_projection());
        assert!(!fl.is_active());
    }

    #[test]
    fn resize_while_active_defers_to_next_tick() {
        let mut fl = frame_loop();
        fl.start(0.0);
        assert!(fl.resize(1920, 1080).is_none());
        let frame = fl.tick(0.016).expect("active tick");
        assert_eq!(frame.view_projection, fl.session().view_projection());
    }

    #[test]
    fn look_then_walk_heads_where_the_camera_points() {
        let mut fl = frame_loop();
        fl.start(0.0);
        // Turn left ~90 degrees via arrow look over one long frame-bounded
        // sequence, then walk forward.
        for i in 0..158 {
            fl.session_mut()
                .handle_input(InputEvent::ActionPressed(Action::LookLeft));
            fl.tick(0.01 * (i + 1) as f64);
        }
        let yaw = fl.session().camera().yaw();
        assert!(yaw > 1.4 && yaw < 1.75, "yaw was {yaw}");

        fl.session_mut()
            .handle_input(InputEvent::ActionReleased(Action::LookLeft));
        let before = fl.session().camera().translation();
        fl.session_mut()
            .handle_input(InputEvent::ActionPressed(Action::MoveForward));
        fl.tick(1.60);
        let delta = fl.session().camera().translation() - before;
        // Facing +x region after a left turn; forward subtracts, so the
        // stored translation moves toward -x dominantly.
        assert!(delta.x.abs() > delta.z.abs());
        assert_eq!(delta.y, 0.0);
    }
}
