//! GameView: maps a [`BoardCanvas`] and [`Hud`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board uses y-up coordinates; screen rows grow downwards, so board row
//! `y` lands on canvas row `top - 1 - y`.

use crate::canvas::BoardCanvas;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::hud::Hud;
use crate::types::TileId;

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const PLAY_AGAIN_TEXT: &str = "press R to play again";

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the board and its side panel.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Screen-space placement of the framed board.
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
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(&self, canvas: &BoardCanvas, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let cols = canvas.width().max(0) as u16;
        let rows = canvas.height().max(0) as u16;
        let board_px_w = cols.saturating_mul(self.cell_w);
        let board_px_h = rows.saturating_mul(self.cell_h);
        let w = board_px_w.saturating_add(2);
        let h = board_px_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..rows {
            let y = canvas.top() - 1 - row as i32;
            for col in 0..cols {
                let x = canvas.left() + col as i32;
                match canvas.tile_at((x, y)) {
                    Some(tile) => {
                        let style = CellStyle::new(tile_color(tile), BOARD_BG).bold();
                        self.fill_cell_rect(fb, frame, col, row, '█', style);
                    }
                    None => self.fill_cell_rect(fb, frame, col, row, '·', empty),
                }
            }
        }

        self.draw_side_panel(fb, hud, viewport, frame);

        if hud.is_game_over() {
            draw_game_over(fb, frame);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, canvas: &BoardCanvas, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, hud, viewport, &mut fb);
        fb
    }

    fn fill_cell_rect(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, hud: &Hud, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [("SCORE", hud.score()), ("LINES", hud.lines()), ("PIECES", hud.pieces())] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "LAST", label);
        let last = hud.last_kind().map(|k| k.as_str()).unwrap_or("-");
        fb.put_str(panel_x, y.saturating_add(1), last, value);
        y = y.saturating_add(3);

        if hud.bonus_banner_visible() {
            let banner = CellStyle::new(tile_color(TileId(8)), PANEL_BG).bold();
            fb.put_str(panel_x, y, "BONUS!", banner);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
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

fn draw_game_over(fb: &mut FrameBuffer, frame: Frame) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let hint = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
    let mid_y = frame.y.saturating_add(frame.h / 2);
    put_centered(fb, frame, mid_y, GAME_OVER_TEXT, style);
    put_centered(fb, frame, mid_y.saturating_add(1), PLAY_AGAIN_TEXT, hint);
}

fn put_centered(fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

/// Color for a tile id; ids past the palette wrap around.
pub fn tile_color(tile: TileId) -> Rgb {
    const PALETTE: [Rgb; 8] = [
        Rgb::new(80, 220, 220),
        Rgb::new(240, 220, 80),
        Rgb::new(200, 120, 220),
        Rgb::new(100, 220, 120),
        Rgb::new(220, 80, 80),
        Rgb::new(80, 120, 220),
        Rgb::new(255, 165, 0),
        Rgb::new(255, 105, 180),
    ];
    match tile.0 {
        0 => Rgb::new(160, 160, 160),
        id => PALETTE[(id as usize - 1) % PALETTE.len()],
    }
}
