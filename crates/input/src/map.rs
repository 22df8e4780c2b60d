//! Key and mouse mapping from terminal events to commands.

use crate::types::GameAction;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// What a terminal event asks the front-end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    /// Forward to the session
    Action(GameAction),
    /// Toggle the pause overlay (front-end state, not a session state)
    Pause,
    /// Start a fresh game
    Reset,
    Quit,
}

/// Map keyboard input to a command.
///
/// Key releases are ignored so terminals that report them do not act twice.
pub fn map_key(key: KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputCommand::Quit);
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameAction::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameAction::MoveRight,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => GameAction::SoftDrop,

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => GameAction::Rotate,

        // Actions
        KeyCode::Char(' ') => GameAction::HardDrop,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('c') | KeyCode::Char('C') => {
            GameAction::Hold
        }

        KeyCode::Char('p') | KeyCode::Char('P') => return Some(InputCommand::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => return Some(InputCommand::Reset),

        _ => return None,
    };
    Some(InputCommand::Action(action))
}

/// Map a mouse press: primary button rotates, secondary hard drops.
pub fn map_mouse(event: MouseEvent) -> Option<GameAction> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(GameAction::Rotate),
        MouseEventKind::Down(MouseButton::Right) => Some(GameAction::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
