// ABOUTME: Event handling system mapping keyboard input to app events
// Screens interpret events themselves; this layer only normalises keys

use crate::app::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Esc: retreat, dismiss or leave the screen
    Back,
    /// Enter: advance or activate
    Submit,
    Char(char),
    Backspace,
    Up,
    Down,
    Left,
    Right,
    NextField,
    PrevField,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(AppEvent::Quit),
                _ => None,
            };
        }

        let event = match key_event.code {
            KeyCode::Esc => AppEvent::Back,
            KeyCode::Enter => AppEvent::Submit,
            KeyCode::Backspace | KeyCode::Delete => AppEvent::Backspace,
            KeyCode::Up => AppEvent::Up,
            KeyCode::Down => AppEvent::Down,
            KeyCode::Left => AppEvent::Left,
            KeyCode::Right => AppEvent::Right,
            KeyCode::Tab => AppEvent::NextField,
            KeyCode::BackTab => AppEvent::PrevField,
            // Screens without text entry get vim-style movement and `q`
            KeyCode::Char(c) if !state.accepts_text() => match c {
                'q' => AppEvent::Quit,
                'k' => AppEvent::Up,
                'j' => AppEvent::Down,
                'h' => AppEvent::Left,
                'l' => AppEvent::Right,
                other => AppEvent::Char(other),
            },
            KeyCode::Char(c) => AppEvent::Char(c),
            _ => return None,
        };
        Some(event)
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!(?event, "processing event");
        match event {
            AppEvent::Quit => state.quit(),
            other => state.dispatch(other),
        }
    }
}
