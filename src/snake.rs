use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use crate::config::{SNAKE_SPEED, SNAKE_TAIL_INCREMENT};
use crate::error::{Error, Result};
use crate::food::Food;
use crate::grid::Point;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn velocity(self) -> (i32, i32) {
        match self {
            Up => (0, -SNAKE_SPEED),
            Down => (0, SNAKE_SPEED),
            Left => (-SNAKE_SPEED, 0),
            Right => (SNAKE_SPEED, 0),
        }
    }
}

/// What happened during one call to [`Snake::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// The head ran into the tail and the snake started over.
    pub collided: bool,
    /// The head reached the food, which has since moved.
    pub ate: bool,
}

#[derive(Debug)]
pub struct Snake {
    head: Point,
    velocity: (i32, i32),
    // Index 0 is the cell right behind the head.
    tail: VecDeque<Point>,
    pending_growth: usize,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            head: Point::center(),
            velocity: Down.velocity(),
            tail: VecDeque::with_capacity(SNAKE_TAIL_INCREMENT),
            pending_growth: SNAKE_TAIL_INCREMENT - 1,
        }
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn velocity(&self) -> (i32, i32) {
        self.velocity
    }

    pub fn tail(&self) -> impl Iterator<Item = &Point> + '_ {
        self.tail.iter()
    }

    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    pub fn tail_capacity(&self) -> usize {
        self.tail.capacity()
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// Head first, then every tail segment.
    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    /// Turning straight back into the neck is allowed and ends the run on
    /// the next advance.
    pub fn set_velocity(&mut self, direction: Direction) {
        self.velocity = direction.velocity();
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, food: &mut Food, rng: &mut R) -> Result<Tick> {
        let mut tick = Tick::default();

        let growing = self.pending_growth > 0;
        if growing {
            self.reserve_segment()?;
            self.pending_growth -= 1;
        }

        // The tail follows the head's old cell before the head moves
        if growing || self.tail.pop_back().is_some() {
            self.tail.push_front(self.head);
        }

        let (dx, dy) = self.velocity;
        self.head = self.head.moved_by(dx, dy).wrapped();

        if self.tail.contains(&self.head) {
            debug!(head = ?self.head, length = self.tail.len(), "snake hit itself");
            self.reset();
            food.relocate(rng);
            tick.collided = true;
        }

        // Checked against the fresh snake too when a reset just happened
        if food.is_reached_by(self.head) {
            self.pending_growth += SNAKE_TAIL_INCREMENT;
            food.relocate(rng);
            tick.ate = true;
        }

        Ok(tick)
    }

    pub fn reset(&mut self) {
        self.head = Point::center();
        self.velocity = Down.velocity();
        self.tail.clear();
        self.tail.shrink_to(SNAKE_TAIL_INCREMENT);
        self.pending_growth = SNAKE_TAIL_INCREMENT - 1;
    }

    ///////////////////////////////////////////////////////////////////////////

    // Capacity doubles whenever a growth step finds the tail full.
    fn reserve_segment(&mut self) -> Result<()> {
        let len = self.tail.len();
        if len < self.tail.capacity() {
            return Ok(());
        }

        let extra = len.max(1);
        self.tail
            .try_reserve_exact(extra)
            .map_err(|source| Error::TailGrowth { requested: len + extra, source })
    }
}
