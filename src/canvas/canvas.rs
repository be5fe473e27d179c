use std::collections::HashMap;

use bimap::BiHashMap;
use contracts::{debug_ensures, debug_invariant};
use geo::Point;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use rstar::{
    primitives::{GeomWithData, Rectangle},
    RTree, AABB,
};
use thiserror::Error;

use crate::{
    geometry::Rect,
    router::{RouteOutcome, Router, RouterError, RouterOptions},
};

use super::{AccessAnchors, AccessObstacles, Connector, ConnectorId, Node, NodeId};

pub type NodeBbox = GeomWithData<Rectangle<[i32; 2]>, NodeId>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
    #[error("{0} already exists")]
    DuplicateNode(NodeId),
    #[error("{0} does not exist")]
    UnknownNode(NodeId),
    #[error("{0} already exists")]
    DuplicateConnector(ConnectorId),
    #[error("{0} does not exist")]
    UnknownConnector(ConnectorId),
    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Registry of the rectangles of one drawing surface and of the connectors
/// between them.
///
/// Besides the nodes themselves it keeps an R-tree of their envelopes for
/// corridor queries and an overlap graph linking every two nodes that come
/// closer than `overlap_margin` to each other.
#[derive(Debug)]
pub struct Canvas {
    nodes: HashMap<NodeId, Node>,
    rtree: RTree<NodeBbox>,
    overlap_graph: StableUnGraph<NodeId, ()>,
    graph_indices: BiHashMap<NodeId, NodeIndex>,
    connectors: HashMap<ConnectorId, Connector>,
    overlap_margin: i32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(10)
    }
}

#[debug_invariant(self.rtree.size() == self.nodes.len())]
#[debug_invariant(self.overlap_graph.node_count() == self.nodes.len())]
impl Canvas {
    pub fn new(overlap_margin: i32) -> Self {
        Self {
            nodes: HashMap::new(),
            rtree: RTree::new(),
            overlap_graph: StableUnGraph::default(),
            graph_indices: BiHashMap::new(),
            connectors: HashMap::new(),
            overlap_margin,
        }
    }

    #[debug_ensures(ret.is_ok() -> self.nodes.len() == old(self.nodes.len()) + 1)]
    pub fn add_node(&mut self, id: NodeId, rect: Rect) -> Result<(), CanvasError> {
        if self.nodes.contains_key(&id) {
            return Err(CanvasError::DuplicateNode(id));
        }

        self.insert_node(Node::new(id, rect));
        Ok(())
    }

    /// Removes a node together with every connector attached to it.
    #[debug_ensures(ret.is_ok() -> self.nodes.len() == old(self.nodes.len()) - 1)]
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node, CanvasError> {
        if !self.nodes.contains_key(&id) {
            return Err(CanvasError::UnknownNode(id));
        }

        for connector in self.connectors_of(id) {
            self.remove_connector(connector)?;
        }

        self.detach_node(id).ok_or(CanvasError::UnknownNode(id))
    }

    /// Moves a node and relinks its overlaps. Its anchors move along with it,
    /// in the node and in the connectors holding them; routes attached to it
    /// are left as they are until rerouted.
    pub fn move_node(&mut self, id: NodeId, rect: Rect) -> Result<(), CanvasError> {
        let mut node = self.detach_node(id).ok_or(CanvasError::UnknownNode(id))?;
        node.relocate(rect);

        for connector in self.connectors.values_mut() {
            if connector.touches(id) {
                connector.sync_anchor(id, node.anchor(connector.id()));
            }
        }

        self.insert_node(node);
        Ok(())
    }

    pub fn add_connector(
        &mut self,
        id: ConnectorId,
        source: NodeId,
        target: NodeId,
    ) -> Result<(), CanvasError> {
        if self.connectors.contains_key(&id) {
            return Err(CanvasError::DuplicateConnector(id));
        }

        for node in [source, target] {
            if !self.nodes.contains_key(&node) {
                return Err(CanvasError::UnknownNode(node));
            }
        }

        self.connectors
            .insert(id, Connector::new(id, source, target));
        Ok(())
    }

    /// Removes a connector and frees its anchors on both ends.
    pub fn remove_connector(&mut self, id: ConnectorId) -> Result<Connector, CanvasError> {
        let connector = self
            .connectors
            .remove(&id)
            .ok_or(CanvasError::UnknownConnector(id))?;

        self.release_anchor(connector.source(), id);
        self.release_anchor(connector.target(), id);

        Ok(connector)
    }

    /// Searches a new route for a connector and stores it.
    pub fn route_connector(
        &mut self,
        id: ConnectorId,
        options: &RouterOptions,
    ) -> Result<RouteOutcome, CanvasError> {
        let connector = self
            .connectors
            .get(&id)
            .ok_or(CanvasError::UnknownConnector(id))?;
        let (source, target) = (connector.source(), connector.target());

        let outcome = Router::new(self, *options).search_route(id, source, target)?;

        let source_anchor = self.nodes.get(&source).and_then(|node| node.anchor(id));
        let target_anchor = self.nodes.get(&target).and_then(|node| node.anchor(id));

        if let Some(connector) = self.connectors.get_mut(&id) {
            connector.commit(outcome.clone(), source_anchor, target_anchor);
        }

        Ok(outcome)
    }

    /// Searches new routes for every connector attached to a node, e.g. after
    /// the node was moved.
    pub fn reroute_node(
        &mut self,
        id: NodeId,
        options: &RouterOptions,
    ) -> Result<Vec<(ConnectorId, RouteOutcome)>, CanvasError> {
        if !self.nodes.contains_key(&id) {
            return Err(CanvasError::UnknownNode(id));
        }

        self.connectors_of(id)
            .into_iter()
            .map(|connector| Ok((connector, self.route_connector(connector, options)?)))
            .collect()
    }

    fn insert_node(&mut self, node: Node) {
        let id = node.id();
        let rect = node.rect();
        let index = self.overlap_graph.add_node(id);

        self.graph_indices.insert(id, index);
        self.rtree
            .insert(NodeBbox::new(rect.to_rtree_rectangle(), id));
        self.nodes.insert(id, node);
        self.link_overlaps(id, rect, index);
    }

    fn detach_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;

        self.rtree
            .remove(&NodeBbox::new(node.rect().to_rtree_rectangle(), id));

        if let Some((_, index)) = self.graph_indices.remove_by_left(&id) {
            self.overlap_graph.remove_node(index);
        }

        Some(node)
    }

    fn link_overlaps(&mut self, id: NodeId, rect: Rect, index: NodeIndex) {
        let inflated = rect.inflate(self.overlap_margin);

        let neighbors: Vec<NodeIndex> = self
            .rtree
            .locate_in_envelope_intersecting(&inflated.envelope())
            .map(|bbox| bbox.data)
            .filter(|other| *other != id)
            .filter(|other| {
                self.nodes
                    .get(other)
                    .is_some_and(|node| node.rect().intersects(&inflated))
            })
            .filter_map(|other| self.graph_indices.get_by_left(&other).copied())
            .collect();

        for neighbor in neighbors {
            self.overlap_graph.update_edge(index, neighbor, ());
        }
    }
}

impl Canvas {
    pub fn overlap_margin(&self) -> i32 {
        self.overlap_margin
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.connectors.get(&id)
    }

    pub fn connectors(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// Connectors attached to a node, in id order.
    pub fn connectors_of(&self, node: NodeId) -> Vec<ConnectorId> {
        let mut ids: Vec<ConnectorId> = self
            .connectors
            .values()
            .filter(|connector| connector.touches(node))
            .map(|connector| connector.id())
            .collect();
        ids.sort();
        ids
    }
}

impl AccessObstacles for Canvas {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(self.nodes.values())
    }

    fn overlaps(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        let Some(index) = self.graph_indices.get_by_left(&id) else {
            return Box::new(std::iter::empty());
        };

        Box::new(
            self.overlap_graph
                .neighbors(*index)
                .filter_map(|neighbor| self.overlap_graph.node_weight(neighbor).copied()),
        )
    }

    fn locate_intersecting(
        &self,
        envelope: AABB<[i32; 2]>,
    ) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(
            self.rtree
                .locate_in_envelope_intersecting(&envelope)
                .filter_map(|bbox| self.nodes.get(&bbox.data)),
        )
    }
}

impl AccessAnchors for Canvas {
    fn record_anchor(
        &mut self,
        node: NodeId,
        connector: ConnectorId,
        point: Point<i32>,
    ) -> Result<(), RouterError> {
        self.nodes
            .get_mut(&node)
            .ok_or(RouterError::UnknownNode(node))?
            .insert_anchor(connector, point);
        Ok(())
    }

    fn release_anchor(&mut self, node: NodeId, connector: ConnectorId) -> Option<Point<i32>> {
        self.nodes.get_mut(&node)?.remove_anchor(connector)
    }
}
