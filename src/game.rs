use rand::Rng;
use tracing::{debug, info};

use crate::config::{BACKGROUND_COLOR, CHUNK_SIZE, FOOD_COLOR, SNAKE_COLOR};
use crate::error::Result;
use crate::food::Food;
use crate::grid::Point;
use crate::input::{map_event, Command, EventSource};
use crate::render::{Canvas, Rect};
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Terminated,
}

pub struct SnakeGame<R> {
    snake: Snake,
    food: Food,
    score: u32,
    state: State,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(mut rng: R) -> Self {
        let food = Food::spawn(&mut rng);
        SnakeGame { snake: Snake::new(), food, score: 0, state: State::Running, rng }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Ticks until a quit request is seen at a tick boundary. The loop never
    /// sleeps; pacing comes from `Canvas::present`.
    pub fn run<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: Canvas + EventSource,
    {
        info!(food = ?self.food.position(), "game started");

        while self.state == State::Running {
            self.tick(backend)?;
        }

        info!(score = self.score, "game finished");
        Ok(())
    }

    pub fn tick<B>(&mut self, backend: &mut B) -> Result<()>
    where
        B: Canvas + EventSource,
    {
        self.drain_input(backend)?;
        self.update()?;
        self.draw(backend)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn drain_input<E: EventSource>(&mut self, events: &mut E) -> Result<()> {
        while let Some(event) = events.poll_event()? {
            match map_event(event) {
                Command::Steer(direction) => self.snake.set_velocity(direction),
                Command::Quit => self.state = State::Terminated,
                Command::None => {}
            }
        }

        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let tick = self.snake.advance(&mut self.food, &mut self.rng)?;

        if tick.collided {
            debug!(score = self.score, "run over, score reset");
            self.score = 0;
        }

        if tick.ate {
            self.score += 1;
            info!(score = self.score, "Score: {}", self.score);
        }

        Ok(())
    }

    fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<()> {
        canvas.clear()?;

        canvas.set_draw_color(SNAKE_COLOR)?;
        for segment in self.snake.segments() {
            canvas.fill_rect(cell_rect(segment))?;
        }

        canvas.set_draw_color(FOOD_COLOR)?;
        canvas.fill_rect(cell_rect(self.food.position()))?;

        // Next frame's clear uses whatever color is current
        canvas.set_draw_color(BACKGROUND_COLOR)?;
        canvas.present()
    }
}

fn cell_rect(p: Point) -> Rect {
    Rect::new(p.x, p.y, CHUNK_SIZE, CHUNK_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, Key};
    use crate::render::Rgba;
    use crate::snake::Direction;
    use rand::{rngs::StdRng, RngCore, SeedableRng};
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Color(Rgba),
        Fill(Rect),
        Present,
    }

    /// Records draw calls and hands out one batch of events per tick.
    #[derive(Default)]
    struct FakeBackend {
        calls: Vec<Call>,
        batches: VecDeque<Vec<InputEvent>>,
        current: VecDeque<InputEvent>,
        draining: bool,
    }

    impl FakeBackend {
        fn new(batches: Vec<Vec<InputEvent>>) -> Self {
            FakeBackend { batches: batches.into_iter().collect(), ..Default::default() }
        }

        fn presents(&self) -> usize {
            self.calls.iter().filter(|c| **c == Call::Present).count()
        }
    }

    impl Canvas for FakeBackend {
        fn clear(&mut self) -> Result<()> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn set_draw_color(&mut self, color: Rgba) -> Result<()> {
            self.calls.push(Call::Color(color));
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rect) -> Result<()> {
            self.calls.push(Call::Fill(rect));
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            self.calls.push(Call::Present);
            Ok(())
        }
    }

    impl EventSource for FakeBackend {
        fn poll_event(&mut self) -> Result<Option<InputEvent>> {
            if !self.draining {
                self.draining = true;
                self.current = self.batches.pop_front().unwrap_or_default().into_iter().collect();
            }

            let next = self.current.pop_front();
            if next.is_none() {
                self.draining = false;
            }
            Ok(next)
        }
    }

    fn game() -> SnakeGame<StdRng> {
        SnakeGame::new(StdRng::seed_from_u64(99))
    }

    fn cell(x: i32, y: i32) -> Rect {
        Rect::new(x, y, CHUNK_SIZE, CHUNK_SIZE)
    }

    #[test]
    fn test_new_game() {
        let game = game();
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), State::Running);
        assert_eq!(game.snake().tail_len(), 0);
        assert!(game.food.position().is_cell_aligned());
    }

    #[test]
    fn test_frame_draw_order() {
        let mut game = game();
        game.food = Food::at(Point::new(0, 0));
        let mut backend = FakeBackend::new(vec![]);

        game.tick(&mut backend).unwrap();

        assert_eq!(
            backend.calls,
            vec![
                Call::Clear,
                Call::Color(SNAKE_COLOR),
                Call::Fill(cell(590, 300)),
                Call::Fill(cell(590, 290)),
                Call::Color(FOOD_COLOR),
                Call::Fill(cell(0, 0)),
                Call::Color(BACKGROUND_COLOR),
                Call::Present,
            ]
        );
    }

    #[test]
    fn test_quit_finishes_current_tick() {
        let mut game = game();
        let mut backend = FakeBackend::new(vec![vec![], vec![InputEvent::key(Key::Escape)]]);

        game.run(&mut backend).unwrap();

        assert_eq!(game.state(), State::Terminated);
        assert_eq!(backend.presents(), 2);
        assert_eq!(game.snake().tail_len(), 2);
    }

    #[test]
    fn test_window_close_quits() {
        let mut game = game();
        let mut backend = FakeBackend::new(vec![vec![InputEvent::Quit]]);

        game.run(&mut backend).unwrap();

        assert_eq!(backend.presents(), 1);
    }

    #[test]
    fn test_last_direction_wins() {
        let mut game = game();
        game.food = Food::at(Point::new(0, 0));
        let mut backend = FakeBackend::new(vec![vec![
            InputEvent::key(Key::Up),
            InputEvent::key(Key::Char('a')),
            InputEvent::key(Key::Other),
            InputEvent::key(Key::Right),
        ]]);

        game.tick(&mut backend).unwrap();

        assert_eq!(game.snake().velocity(), Direction::Right.velocity());
        assert_eq!(game.snake().head(), Point::new(600, 290));
    }

    #[test]
    fn test_score_counts_meals() {
        let mut game = game();
        let mut backend = FakeBackend::new(vec![]);
        game.snake.set_velocity(Direction::Right);

        for expected in 1..=3 {
            let next = game.snake().head().moved_by(CHUNK_SIZE, 0);
            game.food = Food::at(next);
            game.tick(&mut backend).unwrap();
            assert_eq!(game.score(), expected);
        }
    }

    #[test]
    fn test_collision_resets_score() {
        let mut game = game();
        let mut backend = FakeBackend::new(vec![vec![], vec![], vec![InputEvent::key(Key::Left)]]);
        game.snake.set_velocity(Direction::Right);
        for _ in 0..2 {
            let next = game.snake().head().moved_by(CHUNK_SIZE, 0);
            game.food = Food::at(next);
            game.tick(&mut backend).unwrap();
        }
        assert_eq!(game.score(), 2);
        game.food = Food::at(Point::new(0, 0));

        game.tick(&mut backend).unwrap();

        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Point::center());
        assert_ne!(game.food.position(), Point::new(0, 0));
    }

    /// Replays fixed `u32` draws, then zeros.
    struct ScriptedRng(VecDeque<u32>);

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.0.pop_front().unwrap_or(0)
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    // Raw draw that `gen_range(0..range)` maps to `index`.
    fn draw_for(index: u32, range: u32) -> u32 {
        (((index as u64) << 32) / range as u64 + 1) as u32
    }

    #[test]
    fn test_collision_and_meal_in_same_tick() {
        // spawn at (0, 0), then the reset relocation lands on the center cell
        let draws = vec![0, 0, draw_for(59, 119), draw_for(29, 59)];
        let mut game = SnakeGame::new(ScriptedRng(draws.into_iter().collect()));
        assert_eq!(game.food.position(), Point::new(0, 0));
        game.score = 3;
        let mut backend = FakeBackend::new(vec![vec![], vec![], vec![InputEvent::key(Key::Up)]]);

        for _ in 0..3 {
            game.tick(&mut backend).unwrap();
        }

        // Reversal bit the neck, then the fresh head found the relocated food.
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().head(), Point::center());
        assert_eq!(game.snake().tail_len(), 0);
        assert_eq!(game.snake().pending_growth(), 9);
        assert_eq!(game.food.position(), Point::new(0, 0));
    }
}
