//! Module trait implemented by every screen

use crossterm::event::KeyEvent;

use super::Action;

/// A screen owning its own view state.
pub trait Module {
    /// Issue the requests a screen makes when it is first shown.
    fn mount(&mut self) -> Action {
        Action::None
    }

    /// Whether the screen has a text input the user can edit
    fn has_input(&self) -> bool {
        false
    }

    /// Handle keyboard input in normal mode
    fn handle_key(&mut self, key: KeyEvent) -> Action;

    /// Handle keyboard input while the screen's input is being edited.
    /// Enter and Esc also end editing; the app takes care of that.
    fn handle_input(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }
}
