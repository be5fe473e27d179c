use geo::Point;

use crate::router::RouteOutcome;

use super::{ConnectorId, NodeId};

/// An edge of the diagram, drawn as a Manhattan route from its source node
/// to its target node.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    id: ConnectorId,
    source: NodeId,
    target: NodeId,
    outcome: Option<RouteOutcome>,
    source_anchor: Option<Point<i32>>,
    target_anchor: Option<Point<i32>>,
}

impl Connector {
    pub fn new(id: ConnectorId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            outcome: None,
            source_anchor: None,
            target_anchor: None,
        }
    }

    pub fn id(&self) -> ConnectorId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Outcome of the last search, `None` before the first one.
    pub fn outcome(&self) -> Option<&RouteOutcome> {
        self.outcome.as_ref()
    }

    pub fn route(&self) -> &[Point<i32>] {
        self.outcome.as_ref().map_or(&[], |outcome| outcome.points())
    }

    pub fn source_anchor(&self) -> Option<Point<i32>> {
        self.source_anchor
    }

    pub fn target_anchor(&self) -> Option<Point<i32>> {
        self.target_anchor
    }

    /// Replaces the copy of the anchor held on `node`.
    pub(crate) fn sync_anchor(&mut self, node: NodeId, anchor: Option<Point<i32>>) {
        if self.source == node {
            self.source_anchor = anchor;
        }
        if self.target == node {
            self.target_anchor = anchor;
        }
    }

    pub(crate) fn commit(
        &mut self,
        outcome: RouteOutcome,
        source_anchor: Option<Point<i32>>,
        target_anchor: Option<Point<i32>>,
    ) {
        self.outcome = Some(outcome);
        self.source_anchor = source_anchor;
        self.target_anchor = target_anchor;
    }
}
