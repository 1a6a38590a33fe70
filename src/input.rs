use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::point::Direction;

/// High-level input events consumed by the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Steer(Direction),
    Pause,
    Quit,
}

/// Polls for one input event, waiting at most `timeout`.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key.code)),
        _ => Ok(None),
    }
}

/// Blocks until any key is pressed. Used on the end screen.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn map_key(code: KeyCode) -> Option<GameInput> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Steer(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::Steer(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(GameInput::Steer(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(GameInput::Steer(Direction::Right)),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(GameInput::Pause),
        KeyCode::Char('q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::point::Direction;

    use super::{map_key, GameInput};

    #[test]
    fn arrows_and_wasd_both_steer() {
        assert_eq!(
            map_key(KeyCode::Up),
            Some(GameInput::Steer(Direction::Up))
        );
        assert_eq!(
            map_key(KeyCode::Char('w')),
            Some(GameInput::Steer(Direction::Up))
        );
        assert_eq!(
            map_key(KeyCode::Char('a')),
            Some(GameInput::Steer(Direction::Left))
        );
        assert_eq!(
            map_key(KeyCode::Right),
            Some(GameInput::Steer(Direction::Right))
        );
    }

    #[test]
    fn control_keys_map_to_pause_and_quit() {
        assert_eq!(map_key(KeyCode::Char('p')), Some(GameInput::Pause));
        assert_eq!(map_key(KeyCode::Char('q')), Some(GameInput::Quit));
        assert_eq!(map_key(KeyCode::Esc), Some(GameInput::Quit));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Tab), None);
    }
}
