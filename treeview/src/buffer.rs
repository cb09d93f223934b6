use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second column of a wide character; not drawn on its own.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

/// Grid of cells the tree is painted into before it reaches the terminal.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Write `text` starting at (x, y), clipped at `max_x`, taking colors and
    /// attributes from `pen`. Returns the column after the last written
    /// character.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_x: u16, pen: Cell) -> u16 {
        let max_x = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if col.saturating_add(width) > max_x {
                break;
            }
            if let Some(cell) = self.get_mut(col, y) {
                *cell = Cell {
                    char: ch,
                    wide_continuation: false,
                    ..pen
                };
            }
            if width == 2 {
                if let Some(cell) = self.get_mut(col.saturating_add(1), y) {
                    *cell = Cell {
                        char: ' ',
                        wide_continuation: true,
                        ..pen
                    };
                }
            }
            col = col.saturating_add(width);
        }
        col
    }

    /// Paint the background of columns `x..max_x` on row `y`.
    pub fn fill_bg(&mut self, x: u16, y: u16, max_x: u16, bg: Rgb) {
        for col in x..max_x.min(self.width) {
            if let Some(cell) = self.get_mut(col, y) {
                cell.bg = bg;
            }
        }
    }

    /// Cells that differ from `other`, with their coordinates.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// The characters of row `y`, trailing spaces trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        let end = start + self.width as usize;
        let text: String = self.cells[start..end]
            .iter()
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect();
        text.trim_end().to_string()
    }
}
