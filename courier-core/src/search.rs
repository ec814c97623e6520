//! A* shortest-path search over a [`Graph`].
//!
//! The frontier is a binary min-heap keyed by `cost-so-far + straight-line
//! distance to the goal`. Entries tie-break on the smaller node id. Stale
//! entries stay in the heap and are discarded when popped.
//!
//! The straight-line heuristic is admissible only when every arc weight is at
//! least the straight-line distance between its endpoints. That precondition
//! is not enforced here; [`Graph::inadmissible_arcs`] reports violations.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{Graph, GraphError, NodeId};

/// Result of a single-pair search.
///
/// An unreachable goal is data, not an error: the cost is `+inf` and the
/// node list is empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPath {
    /// Sum of arc weights along `nodes`.
    pub cost: f64,
    /// Visited nodes from start to goal inclusive.
    pub nodes: Vec<NodeId>,
}

impl ShortestPath {
    /// The sentinel returned when the goal cannot be reached.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            nodes: Vec::new(),
        }
    }

    /// Whether the search connected start to goal.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    cost: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

// `BinaryHeap` pops the greatest entry, so both keys are flipped: the lowest
// priority wins, then the lowest node id.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the minimum-cost path from `start` to `goal`.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when `start` or `goal` has no
/// coordinate, or when an arc leads to an unregistered node.
///
/// # Examples
/// ```
/// use courier_core::{Graph, find_path};
///
/// let mut graph = Graph::new();
/// graph.add_node(0, 0.0, 0.0);
/// graph.add_node(1, 1.0, 0.0);
/// graph.add_node(2, 2.0, 0.0);
/// graph.add_edge(0, 1, 1.0, true);
/// graph.add_edge(1, 2, 1.0, true);
///
/// let path = find_path(&graph, 0, 2)?;
/// assert_eq!(path.cost, 2.0);
/// assert_eq!(path.nodes, vec![0, 1, 2]);
/// # Ok::<(), courier_core::GraphError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "path costs and heuristic priorities are floating-point sums"
)]
pub fn find_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<ShortestPath, GraphError> {
    let start_heuristic = graph.straight_line_distance(start, goal)?;

    let mut frontier = BinaryHeap::new();
    let mut best_cost: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    frontier.push(FrontierEntry {
        priority: start_heuristic,
        cost: 0.0,
        node: start,
    });

    while let Some(FrontierEntry { cost, node, .. }) = frontier.pop() {
        if best_cost.get(&node).is_some_and(|best| cost > *best) {
            continue;
        }
        if node == goal {
            return Ok(ShortestPath {
                cost,
                nodes: reconstruct(&came_from, start, goal),
            });
        }

        for arc in graph.neighbors(node) {
            let tentative = cost + arc.weight;
            let improved = match best_cost.entry(arc.to) {
                Entry::Vacant(slot) => {
                    slot.insert(tentative);
                    true
                }
                Entry::Occupied(mut slot) if tentative < *slot.get() => {
                    slot.insert(tentative);
                    true
                }
                Entry::Occupied(_) => false,
            };
            if improved {
                came_from.insert(arc.to, node);
                let heuristic = graph.straight_line_distance(arc.to, goal)?;
                frontier.push(FrontierEntry {
                    priority: tentative + heuristic,
                    cost: tentative,
                    node: arc.to,
                });
            }
        }
    }

    Ok(ShortestPath::unreachable())
}

fn reconstruct(came_from: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(previous) = came_from.get(&current) else {
            break;
        };
        nodes.push(*previous);
        current = *previous;
    }
    nodes.reverse();
    nodes
}
