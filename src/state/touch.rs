// Two-finger pinch/pan gesture state; the navigation path for touch input.
use super::camera::Camera;
use crate::geometry::Point;

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    start_pinch_dist: f64,
    start_zoom: f64,
    last_center: Point,
}

impl TouchState {
    pub fn begin_single(&mut self) {
        self.single_active = true;
        self.pinch = false;
    }

    pub fn begin_pinch(&mut self, a: Point, b: Point, camera: &Camera) {
        self.single_active = false;
        self.pinch = true;
        self.start_pinch_dist = a.distance(b).max(1.0);
        self.start_zoom = camera.zoom;
        self.last_center = midpoint(a, b);
    }

    /// Zoom by the finger spread and pan by the movement of their midpoint.
    pub fn pinch_to(&mut self, a: Point, b: Point, camera: &mut Camera) -> bool {
        if !self.pinch {
            return false;
        }
        let center = midpoint(a, b);
        let target = self.start_zoom * a.distance(b) / self.start_pinch_dist;
        camera.zoom_at(target / camera.zoom, center);
        camera.pan_by(center.x - self.last_center.x, center.y - self.last_center.y);
        self.last_center = center;
        true
    }

    pub fn end(&mut self) {
        self.single_active = false;
        self.pinch = false;
    }
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
