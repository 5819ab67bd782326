//! Vim-style keybindings for the control surface.
//!
//! Maps key events to actions. Supports single keys and the two-key `gg`
//! sequence for jumping to the top.

use crossterm::event::KeyCode;

/// An action the control surface can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPanel,
    PrevPanel,
    GoToPanel(usize),
    /// Move the selection (or scroll) down.
    Down,
    /// Move the selection (or scroll) up.
    Up,
    HalfPageDown,
    HalfPageUp,
    ToTop,
    ToBottom,
    /// Nudge the selected slider down by a fine step.
    Decrease,
    /// Nudge the selected slider up by a fine step.
    Increase,
    DecreaseCoarse,
    IncreaseCoarse,
    /// Flip the selected switch.
    Toggle,
    /// Show or hide the controls.
    ToggleControls,
    /// Write the current document to the export directory.
    Export,
    /// Limit the Logs panel to tuning events.
    ToggleLogFilter,
    None,
}

/// Key mapper with support for the `gg` sequence.
pub struct KeyMapper {
    pending: Option<KeyCode>,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Feed a key code and return the resolved action.
    pub fn resolve(&mut self, key: KeyCode) -> Action {
        if let Some(prev) = self.pending.take() {
            return self.resolve_sequence(prev, key);
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

            KeyCode::Tab => Action::NextPanel,
            KeyCode::BackTab => Action::PrevPanel,
            KeyCode::Char(c @ '1'..='3') => Action::GoToPanel(c as usize - '1' as usize),

            KeyCode::Char('j') | KeyCode::Down => Action::Down,
            KeyCode::Char('k') | KeyCode::Up => Action::Up,
            KeyCode::Char('d') => Action::HalfPageDown,
            KeyCode::Char('u') => Action::HalfPageUp,
            KeyCode::Char('G') => Action::ToBottom,

            KeyCode::Char('h') | KeyCode::Left => Action::Decrease,
            KeyCode::Char('l') | KeyCode::Right => Action::Increase,
            KeyCode::Char('H') => Action::DecreaseCoarse,
            KeyCode::Char('L') => Action::IncreaseCoarse,
            KeyCode::Char(' ') | KeyCode::Enter => Action::Toggle,

            KeyCode::Char('t') => Action::ToggleControls,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('f') => Action::ToggleLogFilter,

            KeyCode::Char('g') => {
                self.pending = Some(key);
                Action::None
            }

            _ => Action::None,
        }
    }

    fn resolve_sequence(&mut self, first: KeyCode, second: KeyCode) -> Action {
        match (first, second) {
            (KeyCode::Char('g'), KeyCode::Char('g')) => Action::ToTop,
            _ => self.resolve(second),
        }
    }
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        let mut km = KeyMapper::new();
        assert_eq!(km.resolve(KeyCode::Char('q')), Action::Quit);
        assert_eq!(km.resolve(KeyCode::Char('j')), Action::Down);
        assert_eq!(km.resolve(KeyCode::Up), Action::Up);
        assert_eq!(km.resolve(KeyCode::Char('G')), Action::ToBottom);
        assert_eq!(km.resolve(KeyCode::Tab), Action::NextPanel);
        assert_eq!(km.resolve(KeyCode::BackTab), Action::PrevPanel);
    }

    #[test]
    fn test_tuning_keys() {
        let mut km = KeyMapper::new();
        assert_eq!(km.resolve(KeyCode::Char('h')), Action::Decrease);
        assert_eq!(km.resolve(KeyCode::Right), Action::Increase);
        assert_eq!(km.resolve(KeyCode::Char('H')), Action::DecreaseCoarse);
        assert_eq!(km.resolve(KeyCode::Char('L')), Action::IncreaseCoarse);
        assert_eq!(km.resolve(KeyCode::Char(' ')), Action::Toggle);
        assert_eq!(km.resolve(KeyCode::Enter), Action::Toggle);
        assert_eq!(km.resolve(KeyCode::Char('t')), Action::ToggleControls);
        assert_eq!(km.resolve(KeyCode::Char('e')), Action::Export);
        assert_eq!(km.resolve(KeyCode::Char('f')), Action::ToggleLogFilter);
    }

    #[test]
    fn test_gg_sequence() {
        let mut km = KeyMapper::new();
        assert_eq!(km.resolve(KeyCode::Char('g')), Action::None);
        assert_eq!(km.resolve(KeyCode::Char('g')), Action::ToTop);
    }

    #[test]
    fn test_invalid_sequence_falls_through() {
        let mut km = KeyMapper::new();
        assert_eq!(km.resolve(KeyCode::Char('g')), Action::None);
        assert_eq!(km.resolve(KeyCode::Char('l')), Action::Increase);
    }

    #[test]
    fn test_number_panels() {
        let mut km = KeyMapper::new();
        assert_eq!(km.resolve(KeyCode::Char('1')), Action::GoToPanel(0));
        assert_eq!(km.resolve(KeyCode::Char('3')), Action::GoToPanel(2));
        assert_eq!(km.resolve(KeyCode::Char('4')), Action::None);
    }
}
