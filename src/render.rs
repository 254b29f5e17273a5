//! Canvas 2D drawing of a zone: background, grid, drawings, tokens.
//!
//! Everything after the background fill is drawn in world coordinates under
//! the camera transform.

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::editor::ZoneEditor;
use crate::geometry::{Point, screen_to_world};
use crate::model::{Character, Drawing, ShapeKind, Stroke, Token};
use crate::settings::TOKEN_RADIUS;
use crate::state::DrawingDraft;
use crate::state::interactable::RESIZE_HANDLE;

/// Images by url; `on_load` is attached once so a finished download can trigger a redraw.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
}

impl ImageCache {
    pub fn get(&mut self, url: &str, on_load: Option<&js_sys::Function>) -> Option<HtmlImageElement> {
        let img = match self.images.get(url) {
            Some(img) => img.clone(),
            None => {
                let img = HtmlImageElement::new().ok()?;
                img.set_onload(on_load);
                img.set_src(url);
                self.images.insert(url.to_string(), img.clone());
                img
            }
        };
        (img.complete() && img.natural_width() > 0).then_some(img)
    }
}

pub fn context_2d(canvas: &web_sys::HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

pub fn draw_zone(
    ctx: &CanvasRenderingContext2d,
    editor: &ZoneEditor,
    images: &mut ImageCache,
    on_load: Option<&js_sys::Function>,
    width: f64,
    height: f64,
) {
    let zone = editor.zone();
    let cam = &editor.camera;

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(&zone.background_color);
    ctx.fill_rect(0.0, 0.0, width, height);

    ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, cam.pan_x, cam.pan_y).ok();

    if let Some(bg) = zone.background_image.as_ref() {
        if let Some(img) = images.get(&bg.url, on_load) {
            ctx.save();
            ctx.translate(bg.x + bg.width / 2.0, bg.y + bg.height / 2.0).ok();
            ctx.rotate(bg.rotation * PI / 180.0).ok();
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &img,
                -bg.width / 2.0,
                -bg.height / 2.0,
                bg.width,
                bg.height,
            ).ok();
            ctx.restore();
        }
        if editor.is_editing_background() {
            ctx.set_stroke_style_str("#3b82f6");
            ctx.set_line_width(2.0 / cam.zoom);
            ctx.stroke_rect(bg.x, bg.y, bg.width, bg.height);
            ctx.set_fill_style_str("#3b82f6");
            let h = RESIZE_HANDLE;
            ctx.fill_rect(bg.x + bg.width - h / 2.0, bg.y + bg.height - h / 2.0, h, h);
        }
    }

    draw_grid(ctx, editor, width, height);

    draw_drawings(ctx, &zone.drawings);
    if let Some(DrawingDraft { color, thickness, stroke }) = editor.capture_preview() {
        ctx.set_global_alpha(0.7);
        draw_drawing(ctx, &color, thickness, &stroke);
        ctx.set_global_alpha(1.0);
    }

    for (token, character) in editor.tokens_for_render() {
        let label = editor.token_label(token);
        let dragged = editor.dragged_token() == Some(token.id.as_str());
        draw_token(ctx, token, character, &label, dragged, images, on_load);
    }

    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
}

fn draw_grid(ctx: &CanvasRenderingContext2d, editor: &ZoneEditor, width: f64, height: f64) {
    let zone = editor.zone();
    let cam = &editor.camera;
    let g = zone.grid_size;
    let top_left = screen_to_world(Point::ORIGIN, cam.zoom, cam.pan());
    let bottom_right = screen_to_world(Point::new(width, height), cam.zoom, cam.pan());

    ctx.save();
    ctx.set_global_alpha(zone.grid_opacity);
    ctx.set_stroke_style_str(&zone.grid_color);
    ctx.set_line_width(1.0 / cam.zoom);
    ctx.begin_path();
    let mut x = (top_left.x / g).floor() * g;
    while x <= bottom_right.x {
        ctx.move_to(x, top_left.y);
        ctx.line_to(x, bottom_right.y);
        x += g;
    }
    let mut y = (top_left.y / g).floor() * g;
    while y <= bottom_right.y {
        ctx.move_to(top_left.x, y);
        ctx.line_to(bottom_right.x, y);
        y += g;
    }
    ctx.stroke();
    ctx.restore();
}

fn draw_drawing(ctx: &CanvasRenderingContext2d, color: &str, thickness: f64, stroke: &Stroke) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(thickness);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    match stroke {
        Stroke::Path(points) => {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            ctx.begin_path();
            ctx.move_to(first.x, first.y);
            if rest.is_empty() {
                // A single click still leaves a dot.
                ctx.line_to(first.x + 0.01, first.y);
            }
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
            ctx.stroke();
        }
        Stroke::Shape(shape) => {
            ctx.begin_path();
            match shape.kind {
                ShapeKind::Rectangle => {
                    let x = shape.start.x.min(shape.end.x);
                    let y = shape.start.y.min(shape.end.y);
                    ctx.rect(x, y, (shape.end.x - shape.start.x).abs(), (shape.end.y - shape.start.y).abs());
                }
                ShapeKind::Circle => {
                    ctx.arc(shape.start.x, shape.start.y, shape.radius(), 0.0, 2.0 * PI).ok();
                }
                ShapeKind::Line => {
                    ctx.move_to(shape.start.x, shape.start.y);
                    ctx.line_to(shape.end.x, shape.end.y);
                }
            }
            if let Some(fill) = shape.fill.as_deref().filter(|_| shape.kind != ShapeKind::Line) {
                ctx.set_fill_style_str(fill);
                ctx.fill();
            }
            ctx.stroke();
        }
    }
}

fn draw_token(
    ctx: &CanvasRenderingContext2d,
    token: &Token,
    character: &Character,
    label: &str,
    dragged: bool,
    images: &mut ImageCache,
    on_load: Option<&js_sys::Function>,
) {
    let (x, y, r) = (token.x, token.y, TOKEN_RADIUS);
    ctx.save();
    if token.is_dead {
        ctx.set_global_alpha(0.5);
    }

    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, 2.0 * PI).ok();
    ctx.set_fill_style_str("#e5e7eb");
    ctx.fill();

    match character.image().and_then(|url| images.get(url, on_load)) {
        Some(img) => {
            ctx.save();
            ctx.begin_path();
            ctx.arc(x, y, r, 0.0, 2.0 * PI).ok();
            ctx.clip();
            ctx.draw_image_with_html_image_element_and_dw_and_dh(&img, x - r, y - r, r * 2.0, r * 2.0).ok();
            ctx.restore();
        }
        None => {
            ctx.set_fill_style_str("#374151");
            ctx.set_font("bold 18px sans-serif");
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(&character.initial(), x, y).ok();
        }
    }

    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, 2.0 * PI).ok();
    ctx.set_stroke_style_str(character.kind.color());
    ctx.set_line_width(if dragged { 4.0 } else { 3.0 });
    ctx.stroke();

    if token.is_dead {
        ctx.set_stroke_style_str("#dc2626");
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(x - r * 0.6, y - r * 0.6);
        ctx.line_to(x + r * 0.6, y + r * 0.6);
        ctx.move_to(x + r * 0.6, y - r * 0.6);
        ctx.line_to(x - r * 0.6, y + r * 0.6);
        ctx.stroke();
    }

    ctx.set_global_alpha(1.0);
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("top");
    ctx.set_fill_style_str("rgba(0,0,0,0.7)");
    let text_w = ctx.measure_text(label).map(|m| m.width()).unwrap_or(0.0);
    ctx.fill_rect(x - text_w / 2.0 - 4.0, y + r + 2.0, text_w + 8.0, 16.0);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_text(label, x, y + r + 4.0).ok();
    ctx.restore();
}

/// Drawings are drawn oldest first so newer strokes cover older ones.
pub fn draw_drawings(ctx: &CanvasRenderingContext2d, drawings: &[Drawing]) {
    for d in drawings {
        draw_drawing(ctx, &d.color, d.thickness, &d.stroke);
    }
}
