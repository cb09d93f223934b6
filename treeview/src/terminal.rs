//! Crossterm backend: raw mode, alternate screen and diffed frame output.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self as ct_event, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::event::Event;
use crate::layout::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Owns the terminal for the lifetime of the value and restores it on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
    full_redraw: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            ct_event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        log::debug!("[terminal] entered raw mode at {}x{}", width, height);

        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            full_redraw: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Full screen area.
    pub fn area(&self) -> Rect {
        Rect::from_size(self.current.width(), self.current.height())
    }

    /// Wait up to `timeout` for input and return every pending event the
    /// widget layer understands. `None` blocks until one arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<Event>> {
        let mut raw: Vec<CrosstermEvent> = Vec::new();

        match timeout {
            Some(duration) => {
                if ct_event::poll(duration)? {
                    raw.push(ct_event::read()?);
                }
            }
            None => raw.push(ct_event::read()?),
        }
        while !raw.is_empty() && ct_event::poll(Duration::ZERO)? {
            raw.push(ct_event::read()?);
        }

        Ok(raw.iter().filter_map(Event::from_crossterm).collect())
    }

    /// Paint a frame with `paint` and write the cells that changed.
    pub fn draw<F>(&mut self, paint: F) -> io::Result<()>
    where
        F: FnOnce(&mut Buffer),
    {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            log::debug!("[terminal] resized to {}x{}", width, height);
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            self.full_redraw = true;
        }

        self.current.clear();
        paint(&mut self.current);
        self.flush()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let changed: Vec<(u16, u16, Cell)> = if self.full_redraw {
            let mut all = Vec::with_capacity(self.current.width() as usize * self.current.height() as usize);
            for y in 0..self.current.height() {
                for x in 0..self.current.width() {
                    if let Some(cell) = self.current.get(x, y) {
                        all.push((x, y, *cell));
                    }
                }
            }
            all
        } else {
            self.current
                .diff(&self.previous)
                .map(|(x, y, cell)| (x, y, *cell))
                .collect()
        };
        self.full_redraw = false;

        let mut pen = Pen::default();
        let mut next: Option<(u16, u16)> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        for (x, y, cell) in changed {
            if cell.wide_continuation {
                continue;
            }
            if next != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, &cell)?;
            write!(self.stdout, "{}", cell.char)?;
            next = Some((x.saturating_add(char_width(cell.char).max(1) as u16), y));
        }
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// Attributes last written to the terminal, so unchanged ones are skipped.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: TextStyle,
}

impl Pen {
    fn apply(&mut self, out: &mut io::Stdout, cell: &Cell) -> io::Result<()> {
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            self.bg = Some(cell.bg);
        }

        let style = cell.style;
        if style.bold != self.style.bold || style.dim != self.style.dim {
            queue!(out, SetAttribute(Attribute::NormalIntensity))?;
            if style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
        }
        if style.italic != self.style.italic {
            let attr = if style.italic { Attribute::Italic } else { Attribute::NoItalic };
            queue!(out, SetAttribute(attr))?;
        }
        if style.underline != self.style.underline {
            let attr = if style.underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            queue!(out, SetAttribute(attr))?;
        }
        self.style = style;
        Ok(())
    }
}

fn to_crossterm(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            ct_event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("[terminal] restored");
    }
}
