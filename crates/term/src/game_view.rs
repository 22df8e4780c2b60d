//! GameView: maps a core `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, ShapeKind};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state that is not part of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewStatus {
    pub paused: bool,
}

/// A lightweight terminal renderer for the falling-block game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the field frame landed in the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(snap, ViewStatus::default(), viewport, fb);
    }

    pub fn render_into_with_status(
        &self,
        snap: &GameSnapshot,
        status: ViewStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let field_px_w = snap.width as u16 * self.cell_w;
        let field_px_h = snap.height as u16 * self.cell_h;
        let frame_w = field_px_w + 2;
        let frame_h = field_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), FIELD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        // Background for play area.
        fb.fill_rect(frame.x + 1, frame.y + 1, field_px_w, field_px_h, ' ', bg);

        // Border.
        self.draw_border(fb, frame, border);

        // Locked cells.
        let locked = CellStyle::new(Rgb::new(170, 170, 185), FIELD_BG).bold();
        for row in 0..snap.height as i16 {
            for col in 0..snap.width as i16 {
                if snap.cell(col, row) == Some(Cell::Filled) {
                    self.fill_cell_rect(fb, frame, snap, col, row, '█', locked);
                } else {
                    let dot = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
                    self.fill_cell_rect(fb, frame, snap, col, row, '·', dot);
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost_row)) = (snap.active, snap.ghost_row) {
            let ghost = CellStyle::new(Rgb::new(140, 140, 140), FIELD_BG).dim();
            for (col, row) in active.cells_at(ghost_row) {
                self.fill_cell_rect(fb, frame, snap, col, row, '░', ghost);
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            let style = CellStyle::new(kind_color(active.kind), FIELD_BG).bold();
            for (col, row) in active.cells() {
                self.fill_cell_rect(fb, frame, snap, col, row, '█', style);
            }
        }

        // Side panel (score/level/hold).
        self.draw_side_panel(fb, snap, viewport, frame);

        // Overlays.
        if snap.is_game_over() {
            self.draw_overlay_text(fb, frame, 0, "GAME OVER");
            let mut buf = [0u8; 24];
            let text = score_line(snap.score, &mut buf);
            self.draw_overlay_text(fb, frame, 1, text);
        } else if status.paused {
            self.draw_overlay_text(fb, frame, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        self.render_with_status(snap, ViewStatus::default(), viewport)
    }

    pub fn render_with_status(
        &self,
        snap: &GameSnapshot,
        status: ViewStatus,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_status(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Paint one field cell; coordinates outside the field are skipped
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        col: i16,
        row: i16,
        ch: char,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 || col >= snap.width as i16 || row >= snap.height as i16 {
            return;
        }
        let px = frame.x + 1 + col as u16 * self.cell_w;
        let py = frame.y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        // Tenths are enough: the multiplier grows in steps of 0.1.
        let tenths = (snap.speed_multiplier * 10.0).round() as u32;
        let int_w = fb.put_u32(panel_x, y, tenths / 10, value);
        fb.put_char(panel_x + int_w, y, '.', value);
        fb.put_u32(panel_x + int_w + 1, y, tenths % 10, value);
        fb.put_char(panel_x + int_w + 2, y, 'x', value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        if !snap.can_hold && snap.held.is_some() {
            let dim = CellStyle { dim: true, ..value };
            fb.put_str(panel_x + 5, y, "(used)", dim);
        }
        y = y.saturating_add(1);
        match snap.held {
            Some(held) => {
                let style = CellStyle::new(kind_color(held.kind), PANEL_BG).bold();
                self.draw_mini_shape(fb, panel_x, y, &held.shape, style);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
    }

    /// Draw a shape at 2 columns per cell, top-left at (x, y)
    fn draw_mini_shape(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        shape: &Shape,
        style: CellStyle,
    ) {
        for (r, c) in shape.cells() {
            let px = x.saturating_add(c as u16 * 2);
            let py = y.saturating_add(r as u16);
            fb.fill_rect(px, py, 2, 1, '█', style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, line: u16, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn kind_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::I => Rgb::new(80, 220, 220),
        ShapeKind::O => Rgb::new(240, 220, 80),
        ShapeKind::T => Rgb::new(200, 120, 220),
        ShapeKind::S => Rgb::new(100, 220, 120),
        ShapeKind::Z => Rgb::new(220, 80, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(255, 165, 0),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Format `SCORE n` into `buf` without allocating
fn score_line(score: u32, buf: &mut [u8; 24]) -> &str {
    const PREFIX: &[u8] = b"SCORE ";
    buf[..PREFIX.len()].copy_from_slice(PREFIX);

    let len = digit_count(score) as usize;
    let mut n = score;
    for i in (0..len).rev() {
        buf[PREFIX.len() + i] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    // Only ASCII was written.
    std::str::from_utf8(&buf[..PREFIX.len() + len]).unwrap_or("SCORE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }

    #[test]
    fn test_score_line() {
        let mut buf = [0u8; 24];
        assert_eq!(score_line(0, &mut buf), "SCORE 0");
        assert_eq!(score_line(1200, &mut buf), "SCORE 1200");
    }
}
