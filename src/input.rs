use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, error};

use crate::game::SharedGame;
use crate::snake::Direction::{self, *};
use crate::term;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') => Some(Command::Turn(Up)),
        KeyCode::Char('a') => Some(Command::Turn(Left)),
        KeyCode::Char('s') => Some(Command::Turn(Down)),
        KeyCode::Char('d') => Some(Command::Turn(Right)),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Reads keys until the game is over. Each cycle waits at most
/// `poll_interval` for a key, so ending the game from the main loop is
/// noticed without having to interrupt a blocked read.
pub fn spawn_reader(game: SharedGame, poll_interval: Duration) -> anyhow::Result<JoinHandle<anyhow::Result<()>>> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            let res = read_loop(&game, || term::poll_key(poll_interval));
            if let Err(e) = &res {
                error!("input reader failed: {:#}", e);
                // Stop the main loop too, it has nothing left to steer it
                game.end();
            }
            res
        })
        .context("Error spawning input thread")
}

/// `next_key` must return within a bounded time, with `None` when no key
/// arrived, so the over flag is rechecked every cycle.
fn read_loop<F>(game: &SharedGame, mut next_key: F) -> anyhow::Result<()>
where
    F: FnMut() -> crossterm::Result<Option<KeyEvent>>,
{
    while !game.is_over() {
        let key = next_key().context("Error reading key")?;

        if let Some(cmd) = key.as_ref().and_then(command_for) {
            debug!("key command {:?}", cmd);
            game.apply_input(cmd);
        }
    }

    debug!("input reader stopped");
    Ok(())
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use crate::config::GameConfig;
    use crate::game::GameState;

    fn game() -> SharedGame {
        SharedGame::new(GameState::new(GameConfig::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn wasd_turns() {
        assert_eq!(command_for(&key(KeyCode::Char('w'))), Some(Command::Turn(Up)));
        assert_eq!(command_for(&key(KeyCode::Char('a'))), Some(Command::Turn(Left)));
        assert_eq!(command_for(&key(KeyCode::Char('s'))), Some(Command::Turn(Down)));
        assert_eq!(command_for(&key(KeyCode::Char('d'))), Some(Command::Turn(Right)));
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn everything_else_is_ignored() {
        for code in [KeyCode::Up, KeyCode::Esc, KeyCode::Enter, KeyCode::Char('c'), KeyCode::Char('W'), KeyCode::Char(' ')].iter() {
            assert_eq!(command_for(&key(*code)), None, "{:?}", code);
        }
    }

    #[test]
    fn reader_returns_once_game_is_over() {
        let game = game();
        game.end();

        let mut polls = 0;
        read_loop(&game, || {
            polls += 1;
            Ok(None)
        }).unwrap();
        assert_eq!(polls, 0);
    }

    #[test]
    fn reader_stops_when_ended_between_polls() {
        let game = game();
        let other = game.clone();

        let mut polls = 0;
        read_loop(&game, || {
            polls += 1;
            if polls == 3 {
                other.end();
            }
            Ok(None)
        }).unwrap();
        assert_eq!(polls, 3);
    }

    #[test]
    fn reader_applies_keys_until_quit() {
        let game = game();
        let mut keys: VecDeque<Option<KeyEvent>> = vec![
            Some(key(KeyCode::Char('s'))),
            None,
            Some(key(KeyCode::Char('x'))),
            Some(key(KeyCode::Char('q'))),
        ].into();

        read_loop(&game, || Ok(keys.pop_front().unwrap_or(None))).unwrap();

        assert!(game.is_over());
        assert!(keys.is_empty());
    }
}
