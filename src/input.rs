use crate::error::Result;
use crate::snake::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The surface the game runs in is going away.
    Quit,
    KeyDown { key: Key, ctrl: bool },
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        InputEvent::KeyDown { key, ctrl: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
    None,
}

/// Where pending input comes from. Returns `Ok(None)` once drained.
pub trait EventSource {
    fn poll_event(&mut self) -> Result<Option<InputEvent>>;
}

pub fn map_event(event: InputEvent) -> Command {
    let (key, ctrl) = match event {
        InputEvent::Quit => return Command::Quit,
        InputEvent::KeyDown { key, ctrl } => (key, ctrl),
    };

    match key {
        Key::Char('c') | Key::Char('C') if ctrl => Command::Quit,
        Key::Escape => Command::Quit,
        Key::Up => Command::Steer(Direction::Up),
        Key::Down => Command::Steer(Direction::Down),
        Key::Left => Command::Steer(Direction::Left),
        Key::Right => Command::Steer(Direction::Right),
        Key::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Steer(Direction::Up),
            's' => Command::Steer(Direction::Down),
            'a' => Command::Steer(Direction::Left),
            'd' => Command::Steer(Direction::Right),
            _ => Command::None,
        },
        Key::Other => Command::None,
    }
}
