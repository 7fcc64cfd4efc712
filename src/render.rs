use crate::game::GameState;

pub const HEAD_CHAR: char = 'O';
pub const BODY_CHAR: char = 'o';
pub const APPLE_CHAR: char = '@';
pub const EMPTY_CHAR: char = '.';

pub const HELP_LINE: &str = "WASD to move, q to quit!";
pub const GAME_OVER_LINE: &str = "GAME OVER!";

// Raw mode turns off output post-processing, so a bare '\n' would not
// return the cursor to column 0.
pub const LINE_END: &str = "\r\n";

/// Builds one full frame: the board rows followed by the help line.
pub fn render_frame(state: &GameState) -> String {
    let size = state.config().board_size;
    let mut out = String::with_capacity((size as usize + LINE_END.len()) * (size as usize + 1));

    for y in 1..=size {
        for x in 1..=size {
            out.push(glyph_at(state, (x, y)));
        }
        out.push_str(LINE_END);
    }

    out.push_str(HELP_LINE);
    out.push_str(LINE_END);
    out
}

fn glyph_at(state: &GameState, pos: crate::Coords) -> char {
    match state.snake().body().iter().position(|seg| *seg == pos) {
        Some(0) => HEAD_CHAR,
        Some(_) => BODY_CHAR,
        None if state.apple() == pos => APPLE_CHAR,
        None => EMPTY_CHAR,
    }
}
