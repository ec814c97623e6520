//! Weighted road graph keyed by externally assigned node identifiers.
//!
//! The [`Graph`] owns every node coordinate and every outgoing arc list.
//! Coordinates feed the straight-line heuristic used by
//! [`find_path`](crate::find_path); arc weights are the actual traversal costs.

use std::collections::HashMap;

use geo::{Coord, Distance, Euclidean, Point};
use thiserror::Error;

/// Identifier of a node in the road graph.
pub type NodeId = u64;

/// A directed, weighted arc leaving a node.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// Node the arc points at.
    pub to: NodeId,
    /// Traversal cost; expected to be finite and non-negative.
    pub weight: f64,
}

/// An arc together with the node it leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcRef {
    /// Node the arc leaves.
    pub from: NodeId,
    /// Node the arc points at.
    pub to: NodeId,
    /// Traversal cost.
    pub weight: f64,
}

/// Errors raised by coordinate lookups on a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node was never registered with [`Graph::add_node`].
    #[error("node {id} not found")]
    NodeNotFound {
        /// The identifier that failed to resolve.
        id: NodeId,
    },
}

/// Road graph with planar coordinates and an adjacency list per node.
///
/// # Examples
/// ```
/// use courier_core::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_node(0, 0.0, 0.0);
/// graph.add_node(1, 3.0, 4.0);
/// graph.add_edge(0, 1, 5.0, true);
///
/// assert_eq!(graph.neighbors(1).len(), 1);
/// assert_eq!(graph.straight_line_distance(0, 1)?, 5.0);
/// # Ok::<(), courier_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, Coord<f64>>,
    adjacency: HashMap<NodeId, Vec<Arc>>,
}

impl Graph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, overwriting any previous coordinate for `id`.
    ///
    /// Existing arcs leaving `id` are kept.
    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) {
        self.nodes.insert(id, Coord { x, y });
        self.adjacency.entry(id).or_default();
    }

    /// Append the arc `u -> v`, and `v -> u` as well when `undirected` is set.
    ///
    /// Endpoints are not checked against the registered nodes; an arc to an
    /// unknown id is accepted and fails later at coordinate lookup.
    /// Parallel arcs are kept side by side.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64, undirected: bool) {
        self.adjacency
            .entry(u)
            .or_default()
            .push(Arc { to: v, weight });
        if undirected {
            self.adjacency
                .entry(v)
                .or_default()
                .push(Arc { to: u, weight });
        }
    }

    /// Outgoing arcs of `u`, empty when `u` has none.
    #[must_use]
    pub fn neighbors(&self, u: NodeId) -> &[Arc] {
        self.adjacency.get(&u).map_or(&[], Vec::as_slice)
    }

    /// Coordinate of `u`.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] when `u` was never added.
    pub fn coords(&self, u: NodeId) -> Result<Coord<f64>, GraphError> {
        self.nodes
            .get(&u)
            .copied()
            .ok_or(GraphError::NodeNotFound { id: u })
    }

    /// Euclidean distance between the coordinates of `a` and `b`.
    ///
    /// This is a heuristic estimate only and never a traversal cost.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeNotFound`] when either node is unknown.
    pub fn straight_line_distance(&self, a: NodeId, b: NodeId) -> Result<f64, GraphError> {
        let from = self.coords(a)?;
        let to = self.coords(b)?;
        Ok(planar_distance(from, to))
    }

    /// Whether `id` was registered with [`Graph::add_node`].
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed arcs. An undirected edge counts twice.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterate over registered nodes and their coordinates in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, Coord<f64>)> + '_ {
        self.nodes.iter().map(|(id, coord)| (*id, *coord))
    }

    /// Iterate over every directed arc in arbitrary order.
    pub fn arcs(&self) -> impl Iterator<Item = ArcRef> + '_ {
        self.adjacency.iter().flat_map(|(from, arcs)| {
            arcs.iter().map(move |arc| ArcRef {
                from: *from,
                to: arc.to,
                weight: arc.weight,
            })
        })
    }

    /// Arcs whose endpoints are not both registered nodes.
    #[must_use]
    pub fn dangling_arcs(&self) -> Vec<ArcRef> {
        let mut dangling: Vec<ArcRef> = self
            .arcs()
            .filter(|arc| !self.contains(arc.from) || !self.contains(arc.to))
            .collect();
        sort_arcs(&mut dangling);
        dangling
    }

    /// Arcs cheaper than the straight-line distance between their endpoints.
    ///
    /// The search heuristic stays admissible only while this list is empty.
    /// Arcs with an unknown endpoint are skipped; see
    /// [`Graph::dangling_arcs`].
    #[must_use]
    pub fn inadmissible_arcs(&self) -> Vec<ArcRef> {
        let mut violations: Vec<ArcRef> = self
            .arcs()
            .filter(|arc| {
                self.straight_line_distance(arc.from, arc.to)
                    .is_ok_and(|distance| arc.weight < distance)
            })
            .collect();
        sort_arcs(&mut violations);
        violations
    }
}

/// Euclidean distance between two planar coordinates.
#[must_use]
pub fn planar_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

fn sort_arcs(arcs: &mut [ArcRef]) {
    arcs.sort_by(|lhs, rhs| {
        lhs.from
            .cmp(&rhs.from)
            .then_with(|| lhs.to.cmp(&rhs.to))
            .then_with(|| lhs.weight.total_cmp(&rhs.weight))
    });
}
