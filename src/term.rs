use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::Context;
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::ClearType;
use crossterm::event::{Event, KeyEvent, read, poll};
use log::warn;

use crate::render::LINE_END;

/// Owns the terminal for the length of a game. Dropping it puts the
/// terminal back the way it was, so every way out of `play` restores it.
pub struct TermManager {
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        // Flag first: a half-finished setup still needs undoing
        self.active = true;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide).context("Error setting cursor visibility")?;
        Ok(())
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = terminal::disable_raw_mode().context("Error restoring terminal mode");
        let cursor = execute!(self.stdout, cursor::Show).context("Error setting cursor visibility");
        raw.and(cursor)
    }

    /// Clears the screen from the top-left corner and prints `frame` there.
    pub fn draw(&mut self, frame: &str) -> anyhow::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::FromCursorDown),
            style::Print(frame)
        ).context("Error drawing frame")?;
        self.flush()
    }

    pub fn print_line(&mut self, line: &str) -> anyhow::Result<()> {
        queue!(self.stdout, style::Print(line), style::Print(LINE_END)).context("Error printing")?;
        self.flush()
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("{:#}", e);
        }
    }
}

/// Waits up to `timeout` for a key press. Other terminal events (resize,
/// mouse) are consumed and reported as no key.
pub fn poll_key(timeout: Duration) -> crossterm::Result<Option<KeyEvent>> {
    if !poll(timeout)? {
        return Ok(None);
    }

    match read()? {
        Event::Key(ev) => Ok(Some(ev)),
        _ => Ok(None),
    }
}
