use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: u8::MAX }
    }
}

/// Pixel rectangle, same units as entity coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }
}

/// The drawing surface a frame is submitted to.
///
/// `clear` fills the whole surface with the current draw color. `present`
/// shows the finished frame and is where an implementation may block until
/// its next frame slot.
pub trait Canvas {
    fn clear(&mut self) -> Result<()>;
    fn set_draw_color(&mut self, color: Rgba) -> Result<()>;
    fn fill_rect(&mut self, rect: Rect) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}
