//! In-memory character display.

use crate::hw::{COLS, Display, Glyph, ROWS};

/// A single display cell.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Cell {
    Char(u8),
    Glyph(Glyph),
}

const BLANK: Cell = Cell::Char(b' ');

/// 16x2 buffer implementing [`Display`] the way a character LCD behaves:
/// writes advance the cursor and anything past the last column is dropped.
/// A panel driver renders it whenever [`TextGrid::take_dirty`] says so.
#[derive(Debug, Clone)]
pub struct TextGrid {
    cells: [[Cell; COLS as usize]; ROWS as usize],
    col: u8,
    row: u8,
    dirty: bool,
}

impl TextGrid {
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; COLS as usize]; ROWS as usize],
            col: 0,
            row: 0,
            dirty: true,
        }
    }

    pub fn cell(&self, col: u8, row: u8) -> Cell {
        self.cells[row as usize][col as usize]
    }

    /// Row text with glyphs shown as `#`, trailing blanks trimmed.
    pub fn row_text(&self, row: u8) -> heapless::String<{ COLS as usize }> {
        let mut out = heapless::String::new();
        for cell in &self.cells[row as usize] {
            let ch = match *cell {
                Cell::Char(c) => c as char,
                Cell::Glyph(_) => '#',
            };
            // capacity equals the row width
            let _ = out.push(ch);
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out
    }

    pub fn contains(&self, needle: &str) -> bool {
        (0..ROWS).any(|row| self.row_text(row).contains(needle))
    }

    /// Returns and clears the changed-since-last-render flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn put(&mut self, cell: Cell) {
        if self.col < COLS && self.row < ROWS {
            self.cells[self.row as usize][self.col as usize] = cell;
            self.dirty = true;
        }
        self.col = self.col.saturating_add(1);
    }
}

impl Default for TextGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TextGrid {
    fn clear(&mut self) {
        self.cells = [[BLANK; COLS as usize]; ROWS as usize];
        self.col = 0;
        self.row = 0;
        self.dirty = true;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col;
        self.row = row;
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            let byte = if byte.is_ascii_graphic() || byte == b' ' { byte } else { b'?' };
            self.put(Cell::Char(byte));
        }
    }

    fn draw_glyph(&mut self, glyph: Glyph) {
        self.put(Cell::Glyph(glyph));
    }
}
