// Camera: zoom factor and pan offset between screen and world space.
use crate::geometry::{Point, screen_to_world, world_to_screen};
use crate::settings::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    /// Pan offset in screen pixels.
    pub pan_x: f64,
    pub pan_y: f64,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
        }
    }
}

impl Camera {
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen_to_world(screen, self.zoom, self.pan())
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.zoom, self.pan())
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    // Button steps keep two decimals so repeated clicks land on 0.3, 0.4 ... 3.0.
    pub fn zoom_in(&mut self) {
        self.set_zoom(((self.zoom + ZOOM_STEP) * 100.0).round() / 100.0);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(((self.zoom - ZOOM_STEP) * 100.0).round() / 100.0);
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor` fixed.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        let world = self.screen_to_world(anchor);
        self.set_zoom(self.zoom * factor);
        self.pan_x = anchor.x - world.x * self.zoom;
        self.pan_y = anchor.y - world.y * self.zoom;
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn begin_pan(&mut self, screen: Point) {
        self.panning = true;
        self.last_x = screen.x;
        self.last_y = screen.y;
    }

    /// Follow the pointer while panning; returns false when no pan is active.
    pub fn pan_to(&mut self, screen: Point) -> bool {
        if !self.panning {
            return false;
        }
        self.pan_x += screen.x - self.last_x;
        self.pan_y += screen.y - self.last_y;
        self.last_x = screen.x;
        self.last_y = screen.y;
        true
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn end_pan(&mut self) {
        self.panning = false;
    }
}
