/// A camera control action that a key can be bound to.
///
/// Controls consume actions, never raw key codes, so the binding table lives
/// with the windowing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    /// Held: move at a tenth of the normal speed.
    Slow,
    /// Pressed: switch between pointer free-look and drag-to-look.
    ToggleLook,
}

impl Action {
    /// True for actions that hold a movement or rotation while pressed.
    pub fn is_held(self) -> bool {
        !matches!(self, Action::ToggleLook)
    }
}

/// Pointer buttons the fly controls react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}
