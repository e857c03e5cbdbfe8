//! Raw input to game command mapping
//!
//! Hosts translate their native events into `RawInput`; everything below
//! that point only ever sees the two abstract commands.

use serde::{Deserialize, Serialize};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    ArrowUp,
    KeyP,
    Escape,
    Other,
}

impl KeyCode {
    /// Map a DOM-style `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => KeyCode::Space,
            "ArrowUp" => KeyCode::ArrowUp,
            "KeyP" => KeyCode::KeyP,
            "Escape" => KeyCode::Escape,
            _ => KeyCode::Other,
        }
    }
}

/// Host input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawInput {
    KeyDown(KeyCode),
    /// Mouse click / pointer press on the play field
    PointerDown,
    TouchStart,
    /// On-screen pause/resume button
    PauseButton,
}

/// Abstract game command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Flap, resume from pause, or restart after game over
    PrimaryAction,
    TogglePause,
}

/// Translate a raw event into a command (None if the game ignores it)
pub fn dispatch(input: RawInput) -> Option<Command> {
    match input {
        RawInput::KeyDown(KeyCode::Space | KeyCode::ArrowUp) => Some(Command::PrimaryAction),
        RawInput::KeyDown(KeyCode::KeyP | KeyCode::Escape) => Some(Command::TogglePause),
        RawInput::KeyDown(KeyCode::Other) => None,
        RawInput::PointerDown | RawInput::TouchStart => Some(Command::PrimaryAction),
        RawInput::PauseButton => Some(Command::TogglePause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_inputs() {
        for input in [
            RawInput::KeyDown(KeyCode::Space),
            RawInput::KeyDown(KeyCode::ArrowUp),
            RawInput::PointerDown,
            RawInput::TouchStart,
        ] {
            assert_eq!(dispatch(input), Some(Command::PrimaryAction));
        }
    }

    #[test]
    fn test_pause_inputs() {
        assert_eq!(
            dispatch(RawInput::KeyDown(KeyCode::from_code("KeyP"))),
            Some(Command::TogglePause)
        );
        assert_eq!(
            dispatch(RawInput::KeyDown(KeyCode::Escape)),
            Some(Command::TogglePause)
        );
        assert_eq!(dispatch(RawInput::PauseButton), Some(Command::TogglePause));
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(KeyCode::from_code("KeyZ"), KeyCode::Other);
        assert_eq!(dispatch(RawInput::KeyDown(KeyCode::Other)), None);
    }
}
