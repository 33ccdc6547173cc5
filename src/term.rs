use std::io::{stdout, Stdout, Write};
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::{debug, warn};

use crate::config::{CHUNK_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::error::Result;
use crate::input::{EventSource, InputEvent, Key};
use crate::render::{Canvas, Rect, Rgba};

const COLUMNS: usize = (WINDOW_WIDTH / CHUNK_SIZE) as usize;
const ROWS: usize = (WINDOW_HEIGHT / CHUNK_SIZE) as usize;

// Upper half filled with the foreground color, lower half shows the background.
const HALF_BLOCK: char = '▀';

/// One color per grid cell. Pixel rectangles are snapped to the cells they touch.
struct FrameBuffer {
    cells: Vec<Rgba>,
}

impl FrameBuffer {
    fn new() -> Self {
        FrameBuffer { cells: vec![Rgba::default(); COLUMNS * ROWS] }
    }

    fn clear(&mut self, color: Rgba) {
        for cell in self.cells.iter_mut() {
            *cell = color;
        }
    }

    fn fill(&mut self, rect: Rect, color: Rgba) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }

        let (x0, x1) = cell_span(rect.x, rect.w, COLUMNS);
        let (y0, y1) = cell_span(rect.y, rect.h, ROWS);

        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * COLUMNS + x] = color;
            }
        }
    }

    fn cell(&self, x: usize, y: usize) -> Rgba {
        self.cells[y * COLUMNS + x]
    }

    /// Colors of the two grid rows that share terminal row `row`.
    fn glyph(&self, col: usize, row: usize) -> (Rgba, Rgba) {
        (self.cell(col, row * 2), self.cell(col, row * 2 + 1))
    }
}

// Half-open range of cells covered by `[start, start + len)` pixels, clipped to `limit`.
fn cell_span(start: i32, len: i32, limit: usize) -> (usize, usize) {
    let first = start.div_euclid(CHUNK_SIZE);
    let end = (start + len + CHUNK_SIZE - 1).div_euclid(CHUNK_SIZE);
    let clip = |v: i32| v.max(0).min(limit as i32) as usize;
    (clip(first), clip(end))
}

pub struct TermManager {
    stdout: Stdout,
    frame: FrameBuffer,
    // What each terminal glyph currently shows, so present only redraws changes.
    shown: Vec<Option<(Rgba, Rgba)>>,
    draw_color: Rgba,
    width: u16,
    height: u16,
    frame_interval: Duration,
    next_frame: Instant,
    active: bool,
}

impl TermManager {
    pub fn new(fps: u32) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let frame_interval = Duration::from_secs(1) / fps.max(1);

        let mut term = TermManager {
            stdout: stdout(),
            frame: FrameBuffer::new(),
            shown: vec![None; COLUMNS * (ROWS / 2)],
            draw_color: Rgba::opaque(0, 0, 0),
            width,
            height,
            frame_interval,
            next_frame: Instant::now(),
            active: false,
        };
        term.setup()?;

        if (width as usize) < COLUMNS || (height as usize) < ROWS / 2 {
            warn!(
                width,
                height,
                needed_width = COLUMNS,
                needed_height = ROWS / 2,
                "terminal too small, playfield is clipped"
            );
        }

        Ok(term)
    }

    pub fn setup(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn visible_columns(&self) -> usize {
        COLUMNS.min(self.width as usize)
    }

    fn visible_rows(&self) -> usize {
        (ROWS / 2).min(self.height as usize)
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        debug!(width, height, "terminal resized");
        self.width = width;
        self.height = height;
        for glyph in self.shown.iter_mut() {
            *glyph = None;
        }
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    fn wait_for_frame_slot(&mut self) {
        let now = Instant::now();
        if self.next_frame > now {
            sleep(self.next_frame - now);
            self.next_frame += self.frame_interval;
        } else {
            // Fell behind; start counting slots from here
            self.next_frame = now + self.frame_interval;
        }
    }
}

impl Canvas for TermManager {
    fn clear(&mut self) -> Result<()> {
        self.frame.clear(self.draw_color);
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgba) -> Result<()> {
        self.draw_color = color;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> Result<()> {
        self.frame.fill(rect, self.draw_color);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        for row in 0..self.visible_rows() {
            for col in 0..self.visible_columns() {
                let glyph = self.frame.glyph(col, row);
                let idx = row * COLUMNS + col;
                if self.shown[idx] == Some(glyph) {
                    continue;
                }

                let (top, bottom) = glyph;
                queue!(
                    self.stdout,
                    cursor::MoveTo(col as u16, row as u16),
                    SetForegroundColor(term_color(top)),
                    SetBackgroundColor(term_color(bottom)),
                    Print(HALF_BLOCK)
                )?;
                self.shown[idx] = Some(glyph);
            }
        }

        self.flush()?;
        self.wait_for_frame_slot();
        Ok(())
    }
}

impl EventSource for TermManager {
    fn poll_event(&mut self) -> Result<Option<InputEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(input_event(&key)));
                }
                Event::Resize(width, height) => self.resize(width, height)?,
                _ => {}
            }
        }

        Ok(None)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            eprintln!("failed to restore terminal: {}", e);
        }
    }
}

fn term_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn input_event(ev: &KeyEvent) -> InputEvent {
    let key = match ev.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };

    InputEvent::KeyDown { key, ctrl: ev.modifiers.contains(KeyModifiers::CONTROL) }
}
