use crate::color::PixelBackend;
use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

/// Rows reserved at the top for the status line.
pub(crate) const HUD_ROWS: u16 = 1;

/// Braille subpixel: ink a dot once its luminance clears this.
const INK_LUMINANCE: u32 = 32;

/// Terminal pixel canvas: one braille cell covers 2x4 pixels.
pub(crate) struct TermCanvas {
    w: usize,
    h: usize,
    px: Vec<u32>,
}

impl TermCanvas {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let w = cols as usize * 2;
        let h = rows.saturating_sub(HUD_ROWS) as usize * 4;
        Self {
            w,
            h,
            px: vec![0; w * h],
        }
    }

    pub(crate) fn fill(&mut self, color: u32) {
        self.px.fill(color & 0xFF_FFFF);
    }
}

impl PixelBackend for TermCanvas {
    fn size(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    fn get_pixel(&self, x: usize, y: usize) -> u32 {
        self.px[y * self.w + x]
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        self.px[y * self.w + x] = color & 0xFF_FFFF;
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct TermCell {
    ch: char,
    fg: Color,
}

impl Default for TermCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
        }
    }
}

/// Alternate-screen terminal with diff-based braille presentation.
pub(crate) struct Terminal {
    out: Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: Vec<TermCell>,
    cur: Vec<TermCell>,
}

impl Terminal {
    pub(crate) fn begin() -> Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        let n = cols as usize * rows.saturating_sub(HUD_ROWS) as usize;
        Ok(Self {
            out,
            cols,
            rows,
            prev: vec![TermCell::default(); n],
            cur: vec![TermCell::default(); n],
        })
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        let n = c as usize * r.saturating_sub(HUD_ROWS) as usize;
        self.prev = vec![TermCell::default(); n];
        self.cur = vec![TermCell::default(); n];
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Convert the canvas to braille cells and push only what changed.
    pub(crate) fn present(&mut self, canvas: &TermCanvas, hud: &str) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        // status line, padded to clear leftovers
        let cols = self.cols as usize;
        let mut line: String = hud.chars().take(cols).collect();
        while line.len() < cols {
            line.push(' ');
        }
        queue!(self.out, cursor::MoveTo(0, 0), ResetColor, Print(&line))?;

        let rows = self.rows.saturating_sub(HUD_ROWS) as usize;
        let (cw, chh) = canvas.size();
        let mut last_fg = None;

        for cy in 0..rows {
            for cx in 0..cols {
                let mut mask: u8 = 0;
                let mut sum_r: u32 = 0;
                let mut sum_g: u32 = 0;
                let mut sum_b: u32 = 0;
                let mut ink: u32 = 0;

                for dy in 0..4 {
                    for dx in 0..2 {
                        let x = cx * 2 + dx;
                        let y = cy * 4 + dy;
                        if x >= cw || y >= chh {
                            continue;
                        }
                        let p = canvas.get_pixel(x, y);
                        let r = (p >> 16) & 0xFF;
                        let g = (p >> 8) & 0xFF;
                        let b = p & 0xFF;
                        let lum = (r * 299 + g * 587 + b * 114) / 1000;
                        if lum >= INK_LUMINANCE {
                            mask |= braille_bit(dx, dy);
                            sum_r += r;
                            sum_g += g;
                            sum_b += b;
                            ink += 1;
                        }
                    }
                }

                let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
                let fg = if ink > 0 {
                    Color::Rgb {
                        r: (sum_r / ink) as u8,
                        g: (sum_g / ink) as u8,
                        b: (sum_b / ink) as u8,
                    }
                } else {
                    Color::White
                };

                let cell = TermCell { ch, fg };
                let i = cy * cols + cx;
                if self.prev[i] == cell {
                    self.cur[i] = cell;
                    continue;
                }
                self.cur[i] = cell;

                queue!(self.out, cursor::MoveTo(cx as u16, cy as u16 + HUD_ROWS))?;
                if last_fg != Some(fg) {
                    queue!(self.out, SetForegroundColor(fg))?;
                    last_fg = Some(fg);
                }
                queue!(self.out, Print(ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.copy_from_slice(&self.cur);
        Ok(())
    }
}

// Dot mapping for Unicode braille; the subpixel grid is 2x4.
fn braille_bit(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_masks_to_24_bits() {
        let mut canvas = TermCanvas::new(4, 3);
        assert_eq!(canvas.size(), (8, 8));
        canvas.set_pixel(3, 5, 0xFF_12_34_56);
        assert_eq!(canvas.get_pixel(3, 5), 0x12_34_56);
        canvas.fill(0x33_3333);
        assert_eq!(canvas.get_pixel(0, 0), 0x33_3333);
    }

    #[test]
    fn braille_bits_are_distinct_and_cover_the_block() {
        let mut seen: u8 = 0;
        for dy in 0..4 {
            for dx in 0..2 {
                let bit = braille_bit(dx, dy);
                assert_eq!(seen & bit, 0);
                seen |= bit;
            }
        }
        assert_eq!(seen, 0xFF);
    }
}
