// src/graph/layout.rs

//! Fixed placement: maps normalized node positions onto a viewport.

use crate::config::model::ViewportSection;
use crate::graph::node::Position;

/// Vertical lift applied to the midpoint of a connection so edges arch
/// instead of running straight.
pub const CONNECTION_ARCH: f64 = 30.0;

/// Integer point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Control point of a connection curve. Not snapped to the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        ViewportSection::default().into()
    }
}

impl From<ViewportSection> for Viewport {
    fn from(section: ViewportSection) -> Self {
        Self {
            width: section.width,
            height: section.height,
        }
    }
}

impl Viewport {
    /// Scale a normalized position to viewport coordinates, rounding to the
    /// nearest unit.
    pub fn project(&self, pos: Position) -> Point {
        Point {
            x: (pos.x * f64::from(self.width)).round() as i64,
            y: (pos.y * f64::from(self.height)).round() as i64,
        }
    }

    /// Control point of the quadratic curve drawn between two nodes: the
    /// midpoint of the segment, lifted by [`CONNECTION_ARCH`].
    pub fn connection_control_point(&self, from: Position, to: Position) -> ControlPoint {
        let p1 = self.project(from);
        let p2 = self.project(to);
        let (x1, y1) = (p1.x as f64, p1.y as f64);
        let (dx, dy) = ((p2.x - p1.x) as f64, (p2.y - p1.y) as f64);
        ControlPoint {
            x: x1 + dx * 0.5,
            y: y1 + dy * 0.5 - CONNECTION_ARCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_onto_default_viewport() {
        let vp = Viewport::default();
        assert_eq!(vp, Viewport { width: 1200, height: 700 });
        assert_eq!(vp.project(Position::new(0.15, 0.22)), Point { x: 180, y: 154 });
        assert_eq!(vp.project(Position::new(1.0, 1.0)), Point { x: 1200, y: 700 });
    }

    #[test]
    fn control_point_arches_above_midpoint() {
        let vp = Viewport { width: 100, height: 100 };
        let cp = vp.connection_control_point(Position::new(0.0, 0.5), Position::new(1.0, 0.5));
        assert_eq!(cp, ControlPoint { x: 50.0, y: 20.0 });
    }

    #[test]
    fn control_point_keeps_half_units_on_odd_spans() {
        let vp = Viewport { width: 101, height: 51 };
        let cp = vp.connection_control_point(Position::new(0.0, 0.0), Position::new(1.0, 1.0));
        assert_eq!(cp, ControlPoint { x: 50.5, y: 25.5 - 30.0 });
    }
}
