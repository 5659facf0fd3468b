use crate::Action;

/// A normalized input message fed into the aggregator.
///
/// The platform layer translates its native events (key codes, pointer
/// motion under capture, touch phases) into these; the aggregator never
/// sees windowing types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ActionPressed(Action),
    ActionReleased(Action),
    /// Relative pointer motion in pixels, only delivered under capture.
    PointerDelta { dx: f32, dy: f32 },
    /// A touch began at absolute screen coordinates.
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    TouchCancel { id: u64 },
}
