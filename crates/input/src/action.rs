/// A discrete directional action, held for as long as its key is down.
///
/// The aggregator consumes actions, never raw key codes; the platform
/// layer owns the key-to-action mapping. Each held action contributes a
/// unit step to the move or look accumulator every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
}

impl Action {
    /// Whether this action steers the view rather than the body.
    pub fn is_look(&self) -> bool {
        matches!(
            self,
            Action::LookUp | Action::LookDown | Action::LookLeft | Action::LookRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_actions_are_classified() {
        assert!(Action::LookLeft.is_look());
        assert!(!Action::MoveForward.is_look());
    }
}
