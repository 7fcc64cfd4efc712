use std::{sync::Arc, thread::sleep};

use anyhow::anyhow;
use log::{debug, info};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::Coords;
use crate::config::GameConfig;
use crate::input::{self, Command};
use crate::render::{self, GAME_OVER_LINE};
use crate::snake::Snake;
use crate::term::TermManager;

/// What a tick did. `Crashed` wins when the same tick also ate the apple,
/// so a crash does not mean the length stayed the same.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed,
}

pub struct GameState {
    config: GameConfig,
    snake: Snake,
    apple: Coords,
    over: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let snake = Snake::new(config.start, config.start_direction, config.max_length);
        let mut state = GameState { config, snake, apple: (0, 0), over: false, rng };
        state.place_apple();
        state
    }

    #[cfg(test)]
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Coords {
        self.apple
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn end(&mut self) {
        self.over = true;
    }

    /// One game step. Wall and self checks run first and only raise the
    /// over flag; the apple check runs after them on the same head cell
    /// regardless of their result.
    pub fn tick(&mut self) -> TickOutcome {
        let old_tail = self.snake.advance();
        let head = self.snake.head();
        let mut outcome = TickOutcome::Moved;

        if !self.config.contains(head) || self.snake.hits_itself() {
            self.over = true;
            outcome = TickOutcome::Crashed;
        }

        if head == self.apple && self.snake.grow(old_tail) {
            if !self.place_apple() {
                debug!("board full, apple stays at {:?}", self.apple);
            }
            if outcome == TickOutcome::Moved {
                outcome = TickOutcome::Ate;
            }
        }

        debug!("tick {:?}: head {:?}, length {}", outcome, head, self.snake.len());
        outcome
    }

    /// Samples cells until one is free of the snake. With no free cell left
    /// the apple is not moved and `false` is returned.
    pub fn place_apple(&mut self) -> bool {
        if self.snake.len() >= self.config.cells() {
            return false;
        }

        let size = self.config.board_size;
        loop {
            let pos = (self.rng.gen_range(1..=size), self.rng.gen_range(1..=size));
            if !self.snake.occupies(pos) {
                self.apple = pos;
                break;
            }
        }
        debug!("apple placed at {:?}", self.apple);
        true
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Turn(dir) => {
                if !self.snake.set_direction(dir) {
                    debug!("ignored reversal to {:?}", dir);
                }
            },
            Command::Quit => self.over = true,
        }
    }

    #[cfg(test)]
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[cfg(test)]
    pub fn set_apple(&mut self, apple: Coords) {
        self.apple = apple;
    }
}

/// Handle shared by the tick loop and the input thread. Every operation
/// takes the one lock, so neither side sees a half-applied tick.
#[derive(Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    pub fn new(state: GameState) -> Self {
        SharedGame { inner: Arc::new(Mutex::new(state)) }
    }

    pub fn tick(&self) -> TickOutcome {
        self.inner.lock().tick()
    }

    pub fn apply_input(&self, cmd: Command) {
        self.inner.lock().apply(cmd)
    }

    pub fn is_over(&self) -> bool {
        self.inner.lock().is_over()
    }

    pub fn end(&self) {
        self.inner.lock().end()
    }

    pub fn frame(&self) -> String {
        render::render_frame(&self.inner.lock())
    }

    pub fn length(&self) -> usize {
        self.inner.lock().snake().len()
    }
}

/// Runs one game from terminal setup to teardown.
pub fn play(config: GameConfig) -> anyhow::Result<()> {
    let tick_interval = config.tick_interval;
    let poll_interval = config.input_poll_interval;
    let game = SharedGame::new(GameState::new(config));

    let mut term = TermManager::new();
    term.setup()?;
    info!("game started");

    let reader = input::spawn_reader(game.clone(), poll_interval)?;

    // Draw errors stop the game but still wait for the reader below
    let mut result = Ok(());
    while !game.is_over() {
        if let Err(e) = term.draw(&game.frame()) {
            game.end();
            result = Err(e);
            break;
        }
        game.tick();
        sleep(tick_interval);
    }

    if result.is_ok() {
        result = term.draw(&game.frame()).and_then(|_| term.print_line(GAME_OVER_LINE));
    }
    info!("game over, length {}", game.length());

    let reader_result = reader.join().map_err(|_| anyhow!("input thread panicked"))?;
    result?;
    reader_result?;

    term.restore()
}
