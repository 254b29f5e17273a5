//! Screen/world coordinate conversion, grid snapping and the small amount of
//! plane geometry the eraser needs.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset_to(self, other: Point) -> Point {
        Point::new(other.x - self.x, other.y - self.y)
    }
}

/// Screen pixel -> world pixel for the given zoom and pan offset (screen pixels).
pub fn screen_to_world(screen: Point, zoom: f64, pan: Point) -> Point {
    Point::new((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

/// Inverse of [`screen_to_world`]; only used for drawing.
pub fn world_to_screen(world: Point, zoom: f64, pan: Point) -> Point {
    Point::new(world.x * zoom + pan.x, world.y * zoom + pan.y)
}

/// One axis of a snapped position: the cell-center pixel value and the cell index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnappedAxis {
    pub value: f64,
    pub cell: i64,
}

/// Snap `v` to the center of the nearest cell of size `g`.
///
/// Nearest-center with edge ties going to the higher cell is `floor(v / g)`,
/// so a value that already sits on a center maps back onto itself.
pub fn snap_axis(v: f64, g: f64) -> SnappedAxis {
    let cell = (v / g).floor();
    SnappedAxis {
        value: cell * g + g / 2.0,
        cell: cell as i64,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnappedPoint {
    pub x: f64,
    pub y: f64,
    pub grid_x: i64,
    pub grid_y: i64,
}

pub fn snap_point(p: Point, g: f64) -> SnappedPoint {
    let sx = snap_axis(p.x, g);
    let sy = snap_axis(p.y, g);
    SnappedPoint {
        x: sx.value,
        y: sy.value,
        grid_x: sx.cell,
        grid_y: sy.cell,
    }
}

/// Pixel position of the center of cell `cell` for grid size `g`.
pub fn cell_center(cell: i64, g: f64) -> f64 {
    cell as f64 * g + g / 2.0
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
/// Falls back to the distance to `a` when the line is degenerate.
pub fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return p.distance(a);
    }
    ((dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs()) / len
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn expanded(self, by: f64) -> Self {
        Self {
            min: Point::new(self.min.x - by, self.min.y - by),
            max: Point::new(self.max.x + by, self.max.y + by),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_keeps_centers_in_place() {
        let s = snap_axis(125.0, 50.0);
        assert_eq!(s.value, 125.0);
        assert_eq!(s.cell, 2);
    }

    #[test]
    fn snap_edge_goes_to_higher_cell() {
        let s = snap_axis(100.0, 50.0);
        assert_eq!(s.cell, 2);
        assert_eq!(s.value, 125.0);
    }

    #[test]
    fn snap_negative_coordinates() {
        let s = snap_axis(-10.0, 50.0);
        assert_eq!(s.cell, -1);
        assert_eq!(s.value, -25.0);
    }

    #[test]
    fn line_distance_ignores_segment_ends() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_line(Point::new(500.0, 3.0), a, b), 3.0);
    }

    #[test]
    fn degenerate_line_uses_point_distance() {
        let a = Point::new(1.0, 1.0);
        assert_eq!(distance_to_line(Point::new(4.0, 5.0), a, a), 5.0);
    }

    #[test]
    fn rect_from_any_corner_order() {
        let r = Rect::from_corners(Point::new(10.0, 0.0), Point::new(0.0, 20.0));
        assert!(r.contains(Point::new(5.0, 10.0)));
        assert_eq!((r.min, r.max), (Point::new(0.0, 0.0), Point::new(10.0, 20.0)));
    }
}
