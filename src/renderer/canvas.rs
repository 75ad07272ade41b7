//! Canvas 2D backend
//!
//! Replays a draw list on a `CanvasRenderingContext2d`. Canvas calls that can
//! throw are ignored; a bad frame is simply skipped.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::{self, DrawCmd, TextAlign};
use super::Renderer;
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::scene::Snapshot;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn path(&self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
    }

    fn execute(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Sky { top, bottom } => {
                let grd = ctx.create_linear_gradient(0.0, 0.0, 0.0, VIEW_HEIGHT as f64);
                grd.add_color_stop(0.0, top).ok();
                grd.add_color_stop(1.0, bottom).ok();
                ctx.set_fill_style_canvas_gradient(&grd);
                ctx.fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
            }
            DrawCmd::Rect { pos, size, fill } => {
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::StrokeRect {
                pos,
                size,
                stroke,
                width,
            } => {
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                ctx.set_line_width(1.0);
            }
            DrawCmd::Poly { points, fill } => {
                ctx.set_fill_style_str(fill);
                self.path(points);
                ctx.fill();
            }
            DrawCmd::Hump {
                x,
                width,
                height,
                base,
                fill,
            } => {
                let (x, w, h, base) = (*x as f64, *width as f64, *height as f64, *base as f64);
                ctx.set_fill_style_str(fill);
                ctx.begin_path();
                ctx.move_to(x, base);
                ctx.quadratic_curve_to(x + w / 2.0, base - h, x + w, base);
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Lines {
                segments,
                stroke,
                width,
            } => {
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                for (a, b) in segments {
                    ctx.move_to(a.x as f64, a.y as f64);
                    ctx.line_to(b.x as f64, b.y as f64);
                }
                ctx.stroke();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                fill,
            } => {
                ctx.set_fill_style_str(fill);
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    0.0,
                    0.0,
                    TAU,
                )
                .ok();
                ctx.fill();
            }
            DrawCmd::Text {
                text,
                pos,
                size,
                fill,
                align,
            } => {
                ctx.set_fill_style_str(fill);
                ctx.set_font(&format!("{}px monospace", size));
                ctx.set_text_align(match align {
                    TextAlign::Left => "left",
                    TextAlign::Center => "center",
                });
                ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
            }
            DrawCmd::Alpha(alpha) => ctx.set_global_alpha(*alpha as f64),
            DrawCmd::Push { origin, angle } => {
                ctx.save();
                ctx.translate(origin.x as f64, origin.y as f64).ok();
                ctx.rotate(*angle as f64).ok();
            }
            DrawCmd::Pop => ctx.restore(),
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.ctx
            .clear_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
        for cmd in &draw::build(snapshot) {
            self.execute(cmd);
        }
        self.ctx.set_global_alpha(1.0);
    }
}
