//! Connection geometry: anchor endpoints and the straight segment between them.

use crate::error::{EditorError, Result};
use crate::{AnchorKind, Connection, ConnectionId, GeometryAdapter, GraphStore, NodeId, Point};

/// Straight segment descriptor the render surface uses to place and rotate a wire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub start: Point,
    pub end: Point,
    /// Euclidean distance between the endpoints
    pub length: f32,
    /// `atan2(dy, dx)` in degrees
    pub angle_degrees: f32,
}

impl Route {
    pub fn between(start: Point, end: Point) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        Self {
            start,
            end,
            length: start.distance_to(end),
            angle_degrees: dy.atan2(dx).to_degrees(),
        }
    }
}

/// Computes wire geometry from the live graph. Holds no state, so nothing can go stale.
pub struct ConnectionRouter;

impl ConnectionRouter {
    /// Route one connection: from the center of the source anchor to the
    /// center of the target anchor
    pub fn route(
        connection: &Connection,
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> Result<Route> {
        let start = Self::anchor_point(
            store,
            geometry,
            &connection.source_node,
            connection.source_anchor,
        )?;
        let end = Self::anchor_point(
            store,
            geometry,
            &connection.target_node,
            connection.target_anchor,
        )?;
        Ok(Route::between(start, end))
    }

    /// Route a connection by id
    pub fn route_id(
        id: &ConnectionId,
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> Result<Route> {
        let connection = store
            .connection(id)
            .ok_or_else(|| EditorError::ConnectionNotFound(id.clone()))?;
        Self::route(connection, store, geometry)
    }

    /// Recompute the routes a `move_node` marked dirty.
    /// Ids that no longer exist are skipped.
    pub fn reroute(
        dirty: &[ConnectionId],
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> Vec<(ConnectionId, Route)> {
        dirty
            .iter()
            .filter_map(|id| {
                Self::route_id(id, store, geometry)
                    .ok()
                    .map(|route| (id.clone(), route))
            })
            .collect()
    }

    /// Route every connection in insertion order
    pub fn route_all(
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
    ) -> Vec<(ConnectionId, Route)> {
        store
            .connections()
            .filter_map(|c| {
                Self::route(c, store, geometry)
                    .ok()
                    .map(|route| (c.id.clone(), route))
            })
            .collect()
    }

    /// Temporary wire from an anchor to the live pointer during a connection drag
    pub fn preview(origin: Point, pointer: Point) -> Route {
        Route::between(origin, pointer)
    }

    fn anchor_point(
        store: &GraphStore,
        geometry: &dyn GeometryAdapter,
        node: &NodeId,
        anchor: AnchorKind,
    ) -> Result<Point> {
        let node = store
            .node(node)
            .ok_or_else(|| EditorError::NodeNotFound(node.clone()))?;
        Ok(geometry.anchor_center(node, anchor))
    }
}
