//! Canvas 2D backend
//!
//! Paints a `Scene` onto a `CanvasRenderingContext2d` using images that
//! were preloaded by the front end.

use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::scene::{DrawCmd, Scene};
use crate::consts::*;
use crate::platform::RenderGateway;
use crate::sim::Theme;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
    /// Draw the FPS readout in the corner
    pub fps: Option<u32>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, images: HashMap<String, HtmlImageElement>) -> Self {
        Self {
            ctx,
            images,
            fps: None,
        }
    }

    fn draw_image(&self, name: &str, x: f32, y: f32, w: f32, h: f32) -> Result<(), JsValue> {
        match self.images.get(name) {
            Some(img) => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, x as f64, y as f64, w as f64, h as f64,
            ),
            None => {
                log::warn!("Image not loaded: {name}");
                Ok(())
            }
        }
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Background(theme) => {
                let name = match theme {
                    Theme::Summer => "summer.jpg",
                    Theme::Winter => "winter.jpg",
                };
                self.draw_image(name, 0.0, 0.0, WIDTH, HEIGHT)?;
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(
                    rect.min.x as f64,
                    rect.min.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }
            DrawCmd::Image { name, rect } => {
                self.draw_image(name, rect.min.x, rect.min.y, rect.size.x, rect.size.y)?;
            }
            DrawCmd::Text {
                text,
                size,
                pos,
                align,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.set_font(&format!("{size}px Arial"));
                ctx.set_text_align(align.as_str());
                ctx.set_text_baseline("middle");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
            DrawCmd::Polyline { points, color, width } => {
                let Some(first) = points.first() else {
                    return Ok(());
                };
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(first.x as f64, first.y as f64);
                for p in &points[1..] {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
                ctx.stroke();
            }
        }
        Ok(())
    }
}

impl RenderGateway for CanvasRenderer {
    fn present(&mut self, scene: &Scene) {
        self.ctx.clear_rect(0.0, 0.0, WIDTH as f64, HEIGHT as f64);
        for cmd in &scene.cmds {
            if let Err(e) = self.draw(cmd) {
                log::warn!("Render error: {e:?}");
            }
        }
        if let Some(fps) = self.fps {
            self.ctx.set_fill_style_str("#FFFFFF");
            self.ctx.set_font("12px monospace");
            self.ctx.set_text_align("right");
            let _ = self.ctx.fill_text(&format!("{fps} fps"), WIDTH as f64 - 5.0, 75.0);
        }
    }
}
