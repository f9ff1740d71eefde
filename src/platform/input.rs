//! Keyboard mapping
//!
//! Translates `KeyboardEvent.key` values into game actions. Unknown keys map
//! to nothing and keep their default browser behavior.

use crate::sim::Command;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A command for the current piece
    Piece(Command),
    /// Toggle pause
    Pause,
    /// Start a new game (only honored after game over)
    Restart,
    /// Show or hide the FPS counter
    ToggleFps,
}

impl KeyAction {
    pub fn from_key(key: &str) -> Option<Self> {
        let action = match key {
            "ArrowLeft" => KeyAction::Piece(Command::RotateRingLeft),
            "ArrowRight" => KeyAction::Piece(Command::RotateRingRight),
            "ArrowDown" => KeyAction::Piece(Command::SpeedUp),
            " " => KeyAction::Piece(Command::RotatePiece),
            "Escape" | "p" | "P" => KeyAction::Pause,
            "Enter" | "r" | "R" => KeyAction::Restart,
            "f" | "F" => KeyAction::ToggleFps,
            _ => return None,
        };
        Some(action)
    }

    /// Whether the browser's default handling (scrolling) should be suppressed
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeyAction::Piece(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_space_map_to_piece_commands() {
        assert_eq!(
            KeyAction::from_key("ArrowLeft"),
            Some(KeyAction::Piece(Command::RotateRingLeft))
        );
        assert_eq!(
            KeyAction::from_key("ArrowRight"),
            Some(KeyAction::Piece(Command::RotateRingRight))
        );
        assert_eq!(
            KeyAction::from_key("ArrowDown"),
            Some(KeyAction::Piece(Command::SpeedUp))
        );
        assert_eq!(
            KeyAction::from_key(" "),
            Some(KeyAction::Piece(Command::RotatePiece))
        );
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        assert_eq!(KeyAction::from_key("p"), KeyAction::from_key("P"));
        assert_eq!(KeyAction::from_key("r"), Some(KeyAction::Restart));
        assert_eq!(KeyAction::from_key("F"), Some(KeyAction::ToggleFps));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert_eq!(KeyAction::from_key("ArrowUp"), None);
        assert_eq!(KeyAction::from_key("a"), None);
        assert_eq!(KeyAction::from_key(""), None);
    }

    #[test]
    fn test_only_piece_keys_prevent_default() {
        assert!(KeyAction::Piece(Command::SpeedUp).prevents_default());
        assert!(!KeyAction::Pause.prevents_default());
        assert!(!KeyAction::Restart.prevents_default());
        assert!(!KeyAction::ToggleFps.prevents_default());
    }
}
