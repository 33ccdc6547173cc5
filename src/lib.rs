//! Wrap-around snake: a fixed 1200x600 playfield of 10px cells, a snake that
//! grows by eating food and starts over when it bites itself.
//!
//! The simulation (`snake`, `food`, `grid`) knows nothing about terminals. The
//! game loop in `game` talks to its surroundings only through the `Canvas` and
//! `EventSource` traits; `term` implements both on top of crossterm.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;
