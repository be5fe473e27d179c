use std::{collections::HashMap, fmt};

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectorId(pub u32);

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connector {}", self.0)
    }
}

/// A rectangle on the canvas together with the points where connectors are
/// attached to its boundary, at most one per connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    rect: Rect,
    anchors: HashMap<ConnectorId, Point<i32>>,
}

impl Node {
    pub fn new(id: NodeId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            anchors: HashMap::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn anchor(&self, connector: ConnectorId) -> Option<Point<i32>> {
        self.anchors.get(&connector).copied()
    }

    pub fn anchors(&self) -> impl Iterator<Item = (ConnectorId, Point<i32>)> + '_ {
        self.anchors.iter().map(|(connector, point)| (*connector, *point))
    }

    /// A point is available to `connector` if that connector already holds it
    /// or no other connector does.
    pub fn is_anchor_available(&self, connector: ConnectorId, point: Point<i32>) -> bool {
        if self.anchor(connector) == Some(point) {
            return true;
        }

        !self.anchors.values().any(|anchor| *anchor == point)
    }

    pub(crate) fn insert_anchor(
        &mut self,
        connector: ConnectorId,
        point: Point<i32>,
    ) -> Option<Point<i32>> {
        log::debug!("{}: attach {} at {:?}", self.id, connector, point);
        self.anchors.insert(connector, point)
    }

    pub(crate) fn remove_anchor(&mut self, connector: ConnectorId) -> Option<Point<i32>> {
        let removed = self.anchors.remove(&connector);

        if let Some(point) = removed {
            log::debug!("{}: detach {} at {:?}", self.id, connector, point);
        }

        removed
    }

    /// Moves the node, carrying its anchors along.
    pub(crate) fn relocate(&mut self, rect: Rect) {
        let (dx, dy) = (rect.left - self.rect.left, rect.top - self.rect.top);

        for point in self.anchors.values_mut() {
            *point = Point::new(point.x() + dx, point.y() + dy);
        }

        self.rect = rect;
    }
}
