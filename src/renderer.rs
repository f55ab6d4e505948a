//! 2D canvas renderer
//!
//! Draws walls and the threshold as filled shapes and everything else as
//! sprites, scaled so the whole playfield (plus the floor below it) fits the
//! canvas.

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::{BACKGROUND, VIEWPORT_HEIGHT, WORLD_WIDTH};
use crate::sim::{Body, BuildError, Category, RenderStyle, Shape, Sprite};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Texture path -> image (loads lazily on first use)
    images: HashMap<&'static str, HtmlImageElement>,
    show_threshold: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, show_threshold: bool) -> Result<Self, BuildError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(BuildError::NoContext)?;

        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            images: HashMap::new(),
            show_threshold,
        })
    }

    /// World units -> canvas pixels
    pub fn scale(&self) -> (f64, f64) {
        (
            self.canvas.width() as f64 / WORLD_WIDTH as f64,
            self.canvas.height() as f64 / VIEWPORT_HEIGHT as f64,
        )
    }

    pub fn render(&mut self, bodies: &[Body]) {
        let (sx, sy) = self.scale();
        let ctx = &self.ctx;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        ctx.scale(sx, sy).ok();

        for body in bodies {
            match body.render {
                RenderStyle::Hidden => {}
                RenderStyle::Fill(color) => {
                    if !self.show_threshold && body.filter.is(Category::BorderLine) {
                        continue;
                    }
                    self.draw_fill(body, color);
                }
                RenderStyle::Sprite(sprite) => self.draw_sprite(body, sprite),
            }
        }
    }

    /// Move the origin to the body's center and rotate by its angle
    fn enter_body(&self, body: &Body) {
        self.ctx.save();
        self.ctx
            .translate(body.position.x as f64, body.position.y as f64)
            .ok();
        self.ctx.rotate(body.angle as f64).ok();
    }

    fn draw_fill(&self, body: &Body, color: &str) {
        self.enter_body(body);
        self.ctx.set_fill_style_str(color);
        match body.shape {
            Shape::Circle { radius } => {
                self.ctx.begin_path();
                self.ctx.arc(0.0, 0.0, radius as f64, 0.0, TAU).ok();
                self.ctx.fill();
            }
            Shape::Rectangle { width, height } => {
                let (w, h) = (width as f64, height as f64);
                self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
            }
        }
        self.ctx.restore();
    }

    fn draw_sprite(&mut self, body: &Body, sprite: Sprite) {
        let Some(image) = self.image(sprite.texture) else {
            return;
        };
        // Skip until the image has decoded
        if !image.complete() || image.natural_width() == 0 {
            return;
        }
        let w = image.natural_width() as f64 * sprite.x_scale as f64;
        let h = image.natural_height() as f64 * sprite.y_scale as f64;

        self.enter_body(body);
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&image, -w / 2.0, -h / 2.0, w, h)
            .ok();
        self.ctx.restore();
    }

    fn image(&mut self, texture: &'static str) -> Option<HtmlImageElement> {
        if let Some(image) = self.images.get(texture) {
            return Some(image.clone());
        }
        match HtmlImageElement::new() {
            Ok(image) => {
                image.set_src(texture);
                self.images.insert(texture, image.clone());
                Some(image)
            }
            Err(e) => {
                log::warn!("Failed to create image for {}: {:?}", texture, e);
                None
            }
        }
    }
}
