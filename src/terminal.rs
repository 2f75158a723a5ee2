// Copyright (c) 2026 kanafall developers

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor, event,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::Cell;
use crate::frame::Frame;

/// Scoped terminal session: raw mode, alternate screen, hidden cursor,
/// line wrap off. Restored by Drop; `restore_terminal_best_effort` covers
/// the panic and signal paths where Drop cannot run.
pub struct Terminal {
    stdout: Stdout,
    last: Vec<Cell>,
    last_size: (u16, u16),
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last: Vec::new(),
            last_size: (0, 0),
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Flush the frame to the screen, repainting only cells that differ
    /// from the previously painted frame.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size = (frame.width, frame.height);
        let full = frame.is_dirty_all() || self.last_size != size;

        let mut cur_fg: Option<Color> = None;
        let mut cur_bold = false;
        let mut cur_pos: Option<(u16, u16)> = None;

        if full {
            let len = frame.width as usize * frame.height as usize;
            self.last.clear();
            self.last.resize(len, Cell::blank());
            self.last_size = size;
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;

            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    let cell = frame.cell_at_index(idx);
                    self.emit(cell, &mut cur_fg, &mut cur_bold)?;
                    self.last[idx] = cell;
                }
            }
        } else {
            frame.sort_dirty();
            let width = frame.width as usize;
            for i in 0..frame.dirty_indices().len() {
                let idx = frame.dirty_indices()[i];
                let cell = frame.cell_at_index(idx);
                if self.last[idx] == cell {
                    continue;
                }
                self.last[idx] = cell;

                let x = (idx % width) as u16;
                let y = (idx / width) as u16;
                if cur_pos != Some((x, y)) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                self.emit(cell, &mut cur_fg, &mut cur_bold)?;
                // Print advanced the cursor one column.
                cur_pos = if x + 1 < frame.width {
                    Some((x + 1, y))
                } else {
                    None
                };
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }

    fn emit(&mut self, cell: Cell, cur_fg: &mut Option<Color>, cur_bold: &mut bool) -> Result<()> {
        if cell.fg != *cur_fg {
            self.stdout
                .queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            *cur_fg = cell.fg;
        }
        if cell.bold != *cur_bold {
            self.stdout.queue(SetAttribute(if cell.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            *cur_bold = cell.bold;
        }
        self.stdout.queue(Print(cell.ch))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal_best_effort();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
