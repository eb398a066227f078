//! Key bindings: maps key events to application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application-level actions triggered by key events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start a recommendation spin.
    Recommend,
    /// Toggle like on the current result.
    LikeResult,
    /// Toggle dislike on the current result.
    DislikeResult,
    /// Toggle a category by index (0-indexed, in `Category::all()` order).
    ToggleCategory(usize),
    /// Toggle the "no spicy" filter.
    ToggleNoSpicy,
    /// Toggle the "soup only" filter.
    ToggleSoupOnly,
    /// Show the share text for the current result.
    ShowShareText,
    /// Show the map search link for the current result.
    ShowMapLink,
    /// Toggle help overlay.
    ToggleHelp,
    /// Escape key (close overlays, clear notices).
    Escape,
}

/// Map a key event to an action.
///
/// While the help overlay is open only closing keys and quit are mapped.
pub fn map_key(key: KeyEvent, help_visible: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    if help_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => Some(Action::Recommend),
        KeyCode::Char('l') => Some(Action::LikeResult),
        KeyCode::Char('d') => Some(Action::DislikeResult),
        KeyCode::Char(c @ '1'..='5') => Some(Action::ToggleCategory(c as usize - '1' as usize)),
        KeyCode::Char('n') => Some(Action::ToggleNoSpicy),
        KeyCode::Char('s') => Some(Action::ToggleSoupOnly),
        KeyCode::Char('c') => Some(Action::ShowShareText),
        KeyCode::Char('m') => Some(Action::ShowMapLink),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn digits_map_to_categories() {
        assert_eq!(map_key(key(KeyCode::Char('1')), false), Some(Action::ToggleCategory(0)));
        assert_eq!(map_key(key(KeyCode::Char('5')), false), Some(Action::ToggleCategory(4)));
        assert_eq!(map_key(key(KeyCode::Char('6')), false), None);
    }

    #[test]
    fn help_swallows_other_keys() {
        assert_eq!(map_key(key(KeyCode::Enter), true), None);
        assert_eq!(map_key(key(KeyCode::Esc), true), Some(Action::ToggleHelp));
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(ev, false), Some(Action::Quit));
        assert_eq!(map_key(ev, true), Some(Action::Quit));
    }
}
