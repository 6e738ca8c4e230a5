// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::canvas::{Canvas, Cell};
use crate::palette::to_color;
use crate::runtime::ColorMode;

pub struct Terminal {
    stdout: Stdout,
    mode: ColorMode,
    last: Option<Canvas>,
}

impl Terminal {
    pub fn new(mode: ColorMode) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            out.execute(EnableMouseCapture)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore(&mut out);
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            mode,
            last: None,
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

    /// Writes the cells that differ from the previous frame; everything on a
    /// size change or the first frame.
    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        let last = self.last.take();
        let full = needs_full_redraw(last.as_ref(), canvas);
        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut cur_fg: Option<Option<Color>> = None;
        let mut cur_bg: Option<Option<Color>> = None;
        let mut cur_pos: Option<(u16, u16)> = None;
        let mut written = 0usize;

        for (col, row, cell) in changed_cells(last.as_ref(), canvas) {
            if cur_pos != Some((col, row)) {
                self.stdout.queue(cursor::MoveTo(col, row))?;
            }
            self.queue_colors(cell, &mut cur_fg, &mut cur_bg)?;
            self.stdout.queue(Print(cell.ch))?;
            written += 1;

            let next = col.saturating_add(1);
            cur_pos = if next < canvas.width {
                Some((next, row))
            } else {
                None
            };
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        log::trace!("frame drawn: {} cells written (full={})", written, full);

        self.last = Some(match last {
            Some(mut prev) => {
                prev.clone_from(canvas);
                prev
            }
            None => canvas.clone(),
        });
        Ok(())
    }

    fn queue_colors(
        &mut self,
        cell: Cell,
        cur_fg: &mut Option<Option<Color>>,
        cur_bg: &mut Option<Option<Color>>,
    ) -> Result<()> {
        let fg = cell.fg.and_then(|c| to_color(self.mode, c));
        let bg = cell.bg.and_then(|c| to_color(self.mode, c));
        if *cur_fg != Some(fg) {
            self.stdout
                .queue(SetForegroundColor(fg.unwrap_or(Color::Reset)))?;
            *cur_fg = Some(fg);
        }
        if *cur_bg != Some(bg) {
            self.stdout
                .queue(SetBackgroundColor(bg.unwrap_or(Color::Reset)))?;
            *cur_bg = Some(bg);
        }
        Ok(())
    }
}

fn needs_full_redraw(last: Option<&Canvas>, next: &Canvas) -> bool {
    match last {
        Some(l) => l.width != next.width || l.height != next.height,
        None => true,
    }
}

/// Cells of `next` to write, in row-major order. With no usable previous
/// frame every cell is yielded.
pub fn changed_cells<'a>(
    last: Option<&'a Canvas>,
    next: &'a Canvas,
) -> impl Iterator<Item = (u16, u16, Cell)> + 'a {
    let prev = last.filter(|l| !needs_full_redraw(Some(l), next));
    (0..next.height)
        .flat_map(move |row| (0..next.width).map(move |col| (col, row)))
        .filter_map(move |(col, row)| {
            let cell = *next.get(col, row)?;
            match prev.and_then(|p| p.get(col, row)) {
                Some(old) if *old == cell => None,
                _ => Some((col, row, cell)),
            }
        })
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.stdout);
    }
}

fn restore(out: &mut Stdout) {
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

pub fn restore_terminal_best_effort() {
    restore(&mut stdout());
}
