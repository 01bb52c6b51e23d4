//! Pointer/keyboard action vocabulary and the canvas callback contracts.
//!
//! The windowing layer owns the event loop; it translates native events into
//! [`Action`] values and feeds them through [`Drawable::dispatch_action`].
//! The rendering core never sees raw toolkit events.
//!
//! [`Drawable::dispatch_action`]: crate::canvas::Drawable::dispatch_action

use std::fmt;

use crate::canvas::Drawable;

/// Non-character keys forwarded to the action callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelKey {
    Del,
    Ins,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Right,
    Left,
    LineFeed,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// The closed vocabulary of pointer/keyboard events a drawing canvas
/// receives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Move,
    LDown,
    LDownDouble,
    LDrag,
    LUp,
    RDown,
    RDrag,
    RUp,
    /// A plain character keypress.
    Text(char),
    /// A non-character key (cursor movement, function keys, ...).
    ExtKey(AccelKey),
    WheelUp,
    WheelDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Move => "Move",
            Action::LDown => "LDown",
            Action::LDownDouble => "LDownDouble",
            Action::LDrag => "LDrag",
            Action::LUp => "LUp",
            Action::RDown => "RDown",
            Action::RDrag => "RDrag",
            Action::RUp => "RUp",
            Action::Text(_) => "Text",
            Action::ExtKey(_) => "ExtKey",
            Action::WheelUp => "WheelUp",
            Action::WheelDown => "WheelDown",
        };
        f.write_str(name)
    }
}

/// Callbacks a drawing canvas invokes on its owner.
///
/// The widget layer implements this once per canvas; the canvas calls back
/// into it when the surface must be fully repainted (after a resize) and for
/// every pointer/keyboard action. All calls happen synchronously on the UI
/// thread.
pub trait CanvasHandler {
    /// The surface was resized or otherwise invalidated and must be fully
    /// repainted through normal draw calls.
    fn redraw(&mut self, canvas: &mut Drawable, width: i32, height: i32);

    /// A pointer or keyboard action occurred at the given model-space
    /// position.
    fn action(&mut self, canvas: &mut Drawable, action: Action, x: i32, y: i32) {
        let _ = (canvas, action, x, y);
    }
}
