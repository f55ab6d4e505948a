//! Browser platform layer
//!
//! Handles DOM lookups and pointer input:
//! - The canvas the game draws on
//! - The drag constraint bound to the canvas mouse
//! - Client -> world coordinate mapping

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement};

use crate::consts::{VIEWPORT_HEIGHT, WORLD_WIDTH};
use crate::sim::{BuildError, DragConstraint, InputConstraint};

/// Canvas element id
pub const CANVAS_ID: &str = "canvas";
/// Element whose click drops the sand
pub const SPAWN_TARGET: &str = ".matter";

/// Look up the game canvas
pub fn find_canvas(document: &Document) -> Result<HtmlCanvasElement, BuildError> {
    document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| BuildError::MissingElement(format!("#{}", CANVAS_ID)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BuildError::NotACanvas(format!("#{}", CANVAS_ID)))
}

/// Look up the spawn click target (optional; the game just never starts without it)
pub fn find_spawn_target(document: &Document) -> Option<Element> {
    document.query_selector(SPAWN_TARGET).ok().flatten()
}

/// Mouse on the game canvas
pub struct CanvasPointer {
    canvas: Option<HtmlCanvasElement>,
}

impl CanvasPointer {
    pub fn new(canvas: Option<HtmlCanvasElement>) -> Self {
        Self { canvas }
    }

    /// Convert client (page) coordinates to world coordinates
    pub fn to_world(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let w = rect.width().max(1.0);
        let h = rect.height().max(1.0);
        let x = (client_x - rect.left()) / w * WORLD_WIDTH as f64;
        let y = (client_y - rect.top()) / h * VIEWPORT_HEIGHT as f64;
        Vec2::new(x as f32, y as f32)
    }
}

impl InputConstraint for CanvasPointer {
    fn drag_constraint(&mut self) -> Result<DragConstraint, BuildError> {
        match self.canvas {
            Some(_) => Ok(DragConstraint::default()),
            None => Err(BuildError::MissingElement(format!("#{}", CANVAS_ID))),
        }
    }
}
