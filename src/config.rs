use std::path::{Path, PathBuf};

use clap::Parser;

use crate::render::Rgba;

pub const WINDOW_WIDTH: i32 = 1200;
pub const WINDOW_HEIGHT: i32 = 600;
pub const CHUNK_SIZE: i32 = 10;

pub const SNAKE_SPEED: i32 = 10;
pub const SNAKE_TAIL_INCREMENT: usize = 5;

pub const SNAKE_COLOR: Rgba = Rgba::opaque(255, 255, 255);
pub const FOOD_COLOR: Rgba = Rgba::opaque(255, 0, 255);
pub const BACKGROUND_COLOR: Rgba = Rgba::opaque(0, 0, 0);

/// Process options. The playfield itself is fixed by the constants above.
#[derive(Parser, Debug)]
#[command(name = "wrapsnake")]
#[command(version, about = "Wrap-around snake in the terminal")]
pub struct Args {
    /// Frame slots per second the terminal waits for when presenting
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Seed for food placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write log output to this file (otherwise stderr, unless it is the game screen)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Where log output goes while the game owns the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    // stderr is the game screen; anything written there would be drawn over
    Discard,
}

impl LogTarget {
    pub fn choose(log_file: Option<&Path>, stderr_is_tty: bool) -> Self {
        match log_file {
            Some(path) => LogTarget::File(path.to_path_buf()),
            None if stderr_is_tty => LogTarget::Discard,
            None => LogTarget::Stderr,
        }
    }
}
