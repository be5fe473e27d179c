use geo::Point;
use rstar::{Envelope, AABB};

use crate::router::RouterError;

use super::{ConnectorId, Node, NodeId};

/// Read access to the rectangles a route has to steer around.
///
/// A search holds this view for its whole duration and may read it from
/// several threads at once, hence `Sync`.
pub trait AccessObstacles: Sync {
    fn node(&self, id: NodeId) -> Option<&Node>;

    fn nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_>;

    /// Nodes directly linked to `id` in the overlap graph.
    fn overlaps(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Nodes whose rectangle touches `envelope`, edges included.
    fn locate_intersecting(
        &self,
        envelope: AABB<[i32; 2]>,
    ) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(
            self.nodes()
                .filter(move |node| envelope.intersects(&node.rect().envelope())),
        )
    }
}

/// Bookkeeping of the anchors committed by a search.
pub trait AccessAnchors {
    fn record_anchor(
        &mut self,
        node: NodeId,
        connector: ConnectorId,
        point: Point<i32>,
    ) -> Result<(), RouterError>;

    fn release_anchor(&mut self, node: NodeId, connector: ConnectorId) -> Option<Point<i32>>;
}
