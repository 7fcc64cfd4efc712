use std::time::Duration;

use crate::Coords;
use crate::snake::Direction;

const BOARD_SIZE: i16 = 16;
const MAX_LENGTH: usize = 256;
const TICK_INTERVAL_MS: u64 = 200;
const INPUT_POLL_INTERVAL_MS: u64 = 50;
const START_POSITION: Coords = (4, 8);

/// Every gameplay constant in one place. The binary always runs with the
/// default; tests build smaller boards.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board_size: i16,
    pub max_length: usize,
    pub tick_interval: Duration,
    pub input_poll_interval: Duration,
    pub start: Coords,
    pub start_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: BOARD_SIZE,
            max_length: MAX_LENGTH,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            input_poll_interval: Duration::from_millis(INPUT_POLL_INTERVAL_MS),
            start: START_POSITION,
            start_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    pub fn cells(&self) -> usize {
        self.board_size as usize * self.board_size as usize
    }

    /// Playable cells run from 1 to `board_size` on both axes.
    pub fn contains(&self, pos: Coords) -> bool {
        (1..=self.board_size).contains(&pos.0) && (1..=self.board_size).contains(&pos.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 16);
        assert_eq!(config.max_length, 256);
        assert_eq!(config.cells(), 256);
        assert_eq!(config.start, (4, 8));
        assert_eq!(config.tick_interval, Duration::from_millis(200));
    }

    #[test]
    fn bounds_are_one_based_and_inclusive() {
        let config = GameConfig::default();
        assert!(config.contains((1, 1)));
        assert!(config.contains((16, 16)));
        assert!(!config.contains((0, 5)));
        assert!(!config.contains((5, 0)));
        assert!(!config.contains((17, 5)));
        assert!(!config.contains((5, 17)));
    }
}
