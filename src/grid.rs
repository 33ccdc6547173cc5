use crate::config::{CHUNK_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};

pub const MAX_X: i32 = WINDOW_WIDTH - CHUNK_SIZE;
pub const MAX_Y: i32 = WINDOW_HEIGHT - CHUNK_SIZE;

/// A pixel coordinate on the playfield. Entities only ever sit on cell origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn moved_by(self, dx: i32, dy: i32) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Wraps a coordinate that stepped off one edge back onto the opposite edge.
    pub fn wrapped(self) -> Self {
        Point::new(wrap_axis(self.x, MAX_X), wrap_axis(self.y, MAX_Y))
    }

    #[cfg(test)]
    pub fn is_cell_aligned(&self) -> bool {
        self.x % CHUNK_SIZE == 0 && self.y % CHUNK_SIZE == 0
    }

    #[cfg(test)]
    pub fn in_bounds(&self) -> bool {
        (0..=MAX_X).contains(&self.x) && (0..=MAX_Y).contains(&self.y)
    }

    /// Cell in the middle of the playfield, where a fresh snake starts.
    pub fn center() -> Self {
        Point::new(
            (WINDOW_WIDTH / 2 - CHUNK_SIZE / 2) / CHUNK_SIZE * CHUNK_SIZE,
            (WINDOW_HEIGHT / 2 - CHUNK_SIZE / 2) / CHUNK_SIZE * CHUNK_SIZE,
        )
    }
}

fn wrap_axis(value: i32, max: i32) -> i32 {
    if value < 0 {
        max
    } else if value > max {
        0
    } else {
        value
    }
}
