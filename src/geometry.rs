use crate::{AnchorKind, Node};
use serde::{Deserialize, Serialize};

/// A point in canvas space (pixels, origin at the canvas top-left)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Rectangle representing position and size on canvas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered_at(center: Point, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Get the right edge of the rectangle
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge of the rectangle
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

/// Canvas size and its origin in the enclosing surface (window) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl CanvasBounds {
    /// Convert a surface position into canvas-local coordinates
    pub fn to_canvas(&self, surface: Point) -> Point {
        Point::new(surface.x - self.origin_x, surface.y - self.origin_y)
    }

    /// Convert a canvas-local position into surface coordinates
    pub fn to_surface(&self, canvas: Point) -> Point {
        Point::new(canvas.x + self.origin_x, canvas.y + self.origin_y)
    }
}

/// Maps nodes and their anchors to canvas-local geometry.
///
/// Implementations are owned by the rendering layer. They receive the live
/// node on every call and must answer from the current layout, never from a
/// cache that can outlive a move.
pub trait GeometryAdapter {
    /// Center of a node's anchor
    fn anchor_center(&self, node: &Node, anchor: AnchorKind) -> Point {
        self.anchor_bounds(node, anchor).center()
    }

    /// Hit box of a node's anchor
    fn anchor_bounds(&self, node: &Node, anchor: AnchorKind) -> Rectangle;

    /// Whole node box
    fn node_bounds(&self, node: &Node) -> Rectangle;

    /// Draggable header strip of a node
    fn header_bounds(&self, node: &Node) -> Rectangle;

    fn canvas_bounds(&self) -> CanvasBounds;
}

/// Fixed node dimensions used by [`LayoutGeometry`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeLayout {
    pub width: f32,
    pub height: f32,
    pub header_height: f32,
    pub anchor_size: f32,
}

impl Default for NodeLayout {
    fn default() -> Self {
        Self {
            width: 180.0,
            height: 96.0,
            header_height: 28.0,
            anchor_size: 14.0,
        }
    }
}

/// Geometry computed from node positions and a [`NodeLayout`].
///
/// The input anchor sits on the middle of the left edge, the output anchor on
/// the middle of the right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub layout: NodeLayout,
    pub canvas: CanvasBounds,
}

impl LayoutGeometry {
    pub fn new(layout: NodeLayout, canvas: CanvasBounds) -> Self {
        Self { layout, canvas }
    }
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        Self::new(
            NodeLayout::default(),
            CanvasBounds {
                width: 1280.0,
                height: 800.0,
                origin_x: 0.0,
                origin_y: 0.0,
            },
        )
    }
}

impl GeometryAdapter for LayoutGeometry {
    fn anchor_bounds(&self, node: &Node, anchor: AnchorKind) -> Rectangle {
        let bounds = self.node_bounds(node);
        let mid_y = bounds.y + bounds.height / 2.0;
        let edge_x = match anchor {
            AnchorKind::Input => bounds.x,
            AnchorKind::Output => bounds.right(),
        };
        let size = self.layout.anchor_size;
        Rectangle::centered_at(Point::new(edge_x, mid_y), size, size)
    }

    fn node_bounds(&self, node: &Node) -> Rectangle {
        Rectangle::new(
            node.position.x,
            node.position.y,
            self.layout.width,
            self.layout.height,
        )
    }

    fn header_bounds(&self, node: &Node) -> Rectangle {
        Rectangle::new(
            node.position.x,
            node.position.y,
            self.layout.width,
            self.layout.header_height,
        )
    }

    fn canvas_bounds(&self) -> CanvasBounds {
        self.canvas
    }
}
