use rand::Rng;

use crate::config::{CHUNK_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::grid::Point;

// Food never lands on the last column or row.
const FOOD_COLUMNS: i32 = (WINDOW_WIDTH - 1) / CHUNK_SIZE;
const FOOD_ROWS: i32 = (WINDOW_HEIGHT - 1) / CHUNK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pos: Point,
}

impl Food {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut food = Food { pos: Point::default() };
        food.relocate(rng);
        food
    }

    #[cfg(test)]
    pub fn at(pos: Point) -> Self {
        Food { pos }
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Moves to a uniformly drawn cell; may land under the snake.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = Point::new(
            rng.gen_range(0..FOOD_COLUMNS) * CHUNK_SIZE,
            rng.gen_range(0..FOOD_ROWS) * CHUNK_SIZE,
        );
    }

    /// True when `p` is within one cell (exclusive) of the food on both axes.
    pub fn is_reached_by(&self, p: Point) -> bool {
        let reach = CHUNK_SIZE - 1;
        (self.pos.x - reach..=self.pos.x + reach).contains(&p.x)
            && (self.pos.y - reach..=self.pos.y + reach).contains(&p.y)
    }
}
