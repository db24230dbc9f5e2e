use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    TogglePause,
    Reseed,
}

/// Drain pending key presses without blocking the frame.
pub(crate) fn poll_actions(max_frame_time: Duration) -> Result<Vec<Action>> {
    let mut out = Vec::new();
    let timeout = Duration::from_millis(1).min(max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                if let Some(action) = map_key(k.code) {
                    out.push(action);
                    if out.len() >= 32 {
                        break;
                    }
                }
            }
        }
    }
    Ok(out)
}

fn map_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reseed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_map_to_quit() {
        assert_eq!(map_key(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(map_key(KeyCode::Char('Q')), Some(Action::Quit));
        assert_eq!(map_key(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Action::TogglePause));
        assert_eq!(map_key(KeyCode::Char('r')), Some(Action::Reseed));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }
}
