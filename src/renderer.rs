//! 2D canvas renderer
//!
//! Draws one snapshot per tick: board, obstacles, food, snake, then a text
//! overlay for the non-running phases. Sizes follow the canvas each frame.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::session::RenderSink;
use crate::settings::Settings;
use crate::sim::{Cell, EndReason, GamePhase, Snapshot};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    settings: Settings,
}

impl CanvasRenderer {
    /// `None` when the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement, settings: Settings) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            settings,
        })
    }

    fn tile_size(&self, tiles: i32) -> f64 {
        let side = self.canvas.width().min(self.canvas.height()) as f64;
        side / tiles.max(1) as f64
    }

    fn fill_cell(&self, cell: Cell, tile: f64, inset: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            cell.x as f64 * tile + inset,
            cell.y as f64 * tile + inset,
            tile - inset * 2.0,
            tile - inset * 2.0,
        );
    }

    fn draw_overlay(&self, snapshot: &Snapshot, side: f64) {
        let (title, detail) = match snapshot.phase {
            GamePhase::Running => return,
            GamePhase::Idle => ("WRAP SNAKE".to_string(), "Press Enter to start".to_string()),
            GamePhase::Paused => ("PAUSED".to_string(), "Space to resume".to_string()),
            GamePhase::Over => {
                let title = match snapshot.end {
                    Some(EndReason::BoardFull) => "BOARD FULL",
                    _ => "GAME OVER",
                };
                (title.to_string(), format!("Score {} - Enter to restart", snapshot.score))
            }
        };

        self.ctx.set_global_alpha(0.6);
        self.ctx.set_fill_style_str("#000");
        self.ctx.fill_rect(0.0, 0.0, side, side);
        self.ctx.set_global_alpha(1.0);

        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font(&format!("bold {}px monospace", (side / 12.0).round()));
        let _ = self.ctx.fill_text(&title, side / 2.0, side / 2.0 - side / 24.0);
        self.ctx.set_font(&format!("{}px monospace", (side / 28.0).round()));
        let _ = self.ctx.fill_text(&detail, side / 2.0, side / 2.0 + side / 16.0);
    }
}

impl RenderSink for CanvasRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        let [background, grid, head, body, food, obstacle] = self.settings.palette.colors();
        let tile = self.tile_size(snapshot.grid_tiles);
        let side = tile * snapshot.grid_tiles as f64;

        self.ctx.set_fill_style_str(background);
        self.ctx.fill_rect(0.0, 0.0, side, side);

        if self.settings.grid_lines {
            self.ctx.set_stroke_style_str(grid);
            self.ctx.set_line_width(1.0);
            for y in 0..snapshot.grid_tiles {
                for x in 0..snapshot.grid_tiles {
                    self.ctx
                        .stroke_rect(x as f64 * tile, y as f64 * tile, tile, tile);
                }
            }
        }

        for &cell in &snapshot.obstacles {
            self.fill_cell(cell, tile, 1.0, obstacle);
        }
        if let Some(cell) = snapshot.food {
            self.fill_cell(cell, tile, tile * 0.2, food);
        }
        for (i, &cell) in snapshot.snake.iter().enumerate().rev() {
            let color = if i == 0 { head } else { body };
            self.fill_cell(cell, tile, 1.0, color);
        }

        update_hud(snapshot);
        self.draw_overlay(snapshot, side);
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.settings = settings.clone();
    }
}

/// Score readouts living in the page around the canvas
fn update_hud(snapshot: &Snapshot) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = document.get_element_by_id("score") {
        el.set_text_content(Some(&snapshot.score.to_string()));
    }
    if let Some(el) = document.get_element_by_id("high-score") {
        el.set_text_content(Some(&snapshot.high_score.to_string()));
    }
}
