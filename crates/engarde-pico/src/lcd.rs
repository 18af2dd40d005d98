//! 16x2 character display emulated on the Pico Display Pack.
//!
//! Writes land in a [`TextGrid`] first; after every call the cells that
//! differ from what is on the panel are redrawn, so the panel behaves like
//! a character LCD that updates as soon as it is written.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use engarde::grid::Cell;
use engarde::hw::{COLS, ROWS};
use engarde::{Display, Glyph, TextGrid};

// --- Geometry (landscape 240x135) ---
const SCREEN_W: i32 = 240;
const SCREEN_H: i32 = 135;
const CELL_W: i32 = 10;
const CELL_H: i32 = 20;
const GRID_W: i32 = CELL_W * COLS as i32;
const GRID_H: i32 = CELL_H * ROWS as i32;
const GRID_X: i32 = (SCREEN_W - GRID_W) / 2;
const GRID_Y: i32 = (SCREEN_H - GRID_H) / 2;
const BEZEL: i32 = 6;

// --- Colors ---
const LCD_BG: Rgb565 = Rgb565::new(2, 10, 20);
const LCD_FG: Rgb565 = Rgb565::WHITE;
const BEZEL_COLOR: Rgb565 = Rgb565::new(6, 12, 6);

/// Custom characters, 5x8, one byte per row (low 5 bits), in glyph slot order.
const GLYPH_ROWS: [[u8; 8]; Glyph::ALL.len()] = [
    // Sword
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100],
    // Trophy
    [0b11111, 0b11111, 0b01110, 0b01110, 0b00100, 0b00100, 0b01110, 0b11111],
    // Arrow
    [0b01000, 0b01100, 0b01110, 0b01111, 0b01110, 0b01100, 0b01000, 0b00000],
    // Clock
    [0b00000, 0b01110, 0b10101, 0b10111, 0b10001, 0b01110, 0b00000, 0b00000],
];

/// Glyph pixel scale inside a 10x20 cell.
const GLYPH_SCALE: i32 = 2;

pub struct Lcd<T> {
    panel: T,
    grid: TextGrid,
    /// What the panel currently shows; `None` forces a redraw.
    shown: [[Option<Cell>; COLS as usize]; ROWS as usize],
}

impl<T> Lcd<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    pub fn new(panel: T) -> Self {
        Self {
            panel,
            grid: TextGrid::new(),
            shown: [[None; COLS as usize]; ROWS as usize],
        }
    }

    /// Paints the bezel and an empty character area.
    pub fn draw_frame(&mut self) -> Result<(), T::Error> {
        self.panel.clear(Rgb565::BLACK)?;
        Rectangle::new(
            Point::new(GRID_X - BEZEL, GRID_Y - BEZEL),
            Size::new((GRID_W + 2 * BEZEL) as u32, (GRID_H + 2 * BEZEL) as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(BEZEL_COLOR))
        .draw(&mut self.panel)?;
        Rectangle::new(Point::new(GRID_X, GRID_Y), Size::new(GRID_W as u32, GRID_H as u32))
            .into_styled(PrimitiveStyle::with_fill(LCD_BG))
            .draw(&mut self.panel)?;
        self.shown = [[Some(Cell::Char(b' ')); COLS as usize]; ROWS as usize];
        Ok(())
    }

    fn flush(&mut self) {
        if !self.grid.take_dirty() {
            return;
        }
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = self.grid.cell(col, row);
                if self.shown[row as usize][col as usize] == Some(cell) {
                    continue;
                }
                if self.draw_cell(col, row, cell).is_err() {
                    log::warn!("LCD cell ({}, {}) write failed", col, row);
                    self.shown[row as usize][col as usize] = None;
                    continue;
                }
                self.shown[row as usize][col as usize] = Some(cell);
            }
        }
    }

    fn draw_cell(&mut self, col: u8, row: u8, cell: Cell) -> Result<(), T::Error> {
        let origin = Point::new(GRID_X + col as i32 * CELL_W, GRID_Y + row as i32 * CELL_H);
        Rectangle::new(origin, Size::new(CELL_W as u32, CELL_H as u32))
            .into_styled(PrimitiveStyle::with_fill(LCD_BG))
            .draw(&mut self.panel)?;

        match cell {
            Cell::Char(b' ') => Ok(()),
            Cell::Char(c) => {
                let buf = [c];
                let text = core::str::from_utf8(&buf).unwrap_or("?");
                let style = MonoTextStyle::new(&FONT_10X20, LCD_FG);
                Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.panel)?;
                Ok(())
            }
            Cell::Glyph(glyph) => {
                // 5x8 at 2x is 10x16, centered vertically in the 20 px cell
                let top = origin + Point::new(0, (CELL_H - 8 * GLYPH_SCALE) / 2);
                for (y, bits) in GLYPH_ROWS[glyph.index() as usize].iter().enumerate() {
                    for x in 0..5 {
                        if bits & (0b10000 >> x) == 0 {
                            continue;
                        }
                        Rectangle::new(
                            top + Point::new(x * GLYPH_SCALE, y as i32 * GLYPH_SCALE),
                            Size::new(GLYPH_SCALE as u32, GLYPH_SCALE as u32),
                        )
                        .into_styled(PrimitiveStyle::with_fill(LCD_FG))
                        .draw(&mut self.panel)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl<T> Display for Lcd<T>
where
    T: DrawTarget<Color = Rgb565>,
{
    fn clear(&mut self) {
        self.grid.clear();
        self.flush();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.grid.set_cursor(col, row);
    }

    fn print(&mut self, text: &str) {
        self.grid.print(text);
        self.flush();
    }

    fn draw_glyph(&mut self, glyph: Glyph) {
        self.grid.draw_glyph(glyph);
        self.flush();
    }
}
