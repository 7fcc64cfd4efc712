use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit velocity, with y growing downwards like terminal rows.
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Body segments ordered head first. The body never shrinks and never
/// exceeds `capacity`.
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    capacity: usize,
}

impl Snake {
    pub fn new(pos: Coords, direction: Direction, capacity: usize) -> Self {
        let mut body = Vec::with_capacity(capacity);
        body.push(pos);
        Snake { body, direction, capacity }
    }

    #[cfg(test)]
    pub fn from_body(body: &[Coords], direction: Direction, capacity: usize) -> Self {
        assert!(!body.is_empty() && body.len() <= capacity);
        let mut snake = Snake::new(body[0], direction, capacity);
        snake.body.extend_from_slice(&body[1..]);
        snake
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Turning straight back into the neck is ignored. Returns whether the
    /// direction was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Moves every segment onto its predecessor's cell and the head one step
    /// along the current direction. Returns the cell the tail left behind.
    pub fn advance(&mut self) -> Coords {
        let old_tail = self.body[self.body.len() - 1];

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.direction.delta();
        let head = &mut self.body[0];
        head.0 += dx;
        head.1 += dy;

        old_tail
    }

    pub fn hits_itself(&self) -> bool {
        self.body[1..].contains(&self.head())
    }

    /// Appends a tail segment unless the body is already full.
    pub fn grow(&mut self, tail: Coords) -> bool {
        if self.body.len() >= self.capacity {
            return false;
        }

        self.body.push(tail);
        true
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }
}
