//! Greedy tour construction for a single courier.
//!
//! Stops are sequenced by nearest neighbour on straight-line distance, then
//! consecutive stops are stitched together with [`find_path`]. The ordering
//! ignores road distance, so a stop that is close as the crow flies but far
//! by road can make the tour longer than necessary.

use std::iter;

use courier_core::{Graph, GraphError, NodeId, Route, find_path, planar_distance};
use log::{debug, warn};

/// Order `stops` greedily starting from `start`.
///
/// Each step picks the remaining stop closest to the current position by
/// straight-line distance. Ties go to the stop that appears first in
/// `stops`. Duplicate stops are kept and visited back to back.
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when `start` or any stop has no
/// coordinates.
///
/// # Examples
/// ```
/// use courier_core::Graph;
/// use courier_solver::nearest_neighbour_order;
///
/// let mut graph = Graph::new();
/// for (id, x) in [(0, 0.0), (1, 5.0), (2, 1.0), (3, 2.0)] {
///     graph.add_node(id, x, 0.0);
/// }
/// let order = nearest_neighbour_order(&graph, &[1, 2, 3], 0)?;
/// assert_eq!(order, vec![2, 3, 1]);
/// # Ok::<(), courier_core::GraphError>(())
/// ```
pub fn nearest_neighbour_order(
    graph: &Graph,
    stops: &[NodeId],
    start: NodeId,
) -> Result<Vec<NodeId>, GraphError> {
    let mut position = graph.coords(start)?;
    let mut remaining = stops
        .iter()
        .map(|stop| graph.coords(*stop).map(|coord| (*stop, coord)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut order = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let mut closest: Option<(usize, f64)> = None;
        for (idx, (_, coord)) in remaining.iter().enumerate() {
            let distance = planar_distance(position, *coord);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((idx, distance));
            }
        }
        let Some((idx, _)) = closest else { break };
        let (stop, coord) = remaining.remove(idx);
        order.push(stop);
        position = coord;
    }
    Ok(order)
}

/// Build a closed tour from `depot` through every stop and back.
///
/// An empty stop list yields [`Route::trivial`]. If any leg between
/// consecutive visits is unreachable the whole tour collapses to
/// [`Route::unreachable`].
///
/// # Errors
/// Returns [`GraphError::NodeNotFound`] when the depot, a stop, or a node
/// reached through an arc has no coordinates.
///
/// # Examples
/// ```
/// use courier_core::Graph;
/// use courier_solver::build_route;
///
/// let mut graph = Graph::new();
/// graph.add_node(0, 0.0, 0.0);
/// graph.add_node(1, 1.0, 0.0);
/// graph.add_edge(0, 1, 1.0, true);
///
/// let route = build_route(&graph, &[1], 0)?;
/// assert_eq!(route.nodes, vec![0, 1, 0]);
/// assert_eq!(route.cost, 2.0);
/// # Ok::<(), courier_core::GraphError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "tour cost is the floating-point sum of leg costs"
)]
pub fn build_route(graph: &Graph, stops: &[NodeId], depot: NodeId) -> Result<Route, GraphError> {
    if stops.is_empty() {
        graph.coords(depot)?;
        return Ok(Route::trivial(depot));
    }

    let order = nearest_neighbour_order(graph, stops, depot)?;
    let mut nodes = vec![depot];
    let mut cost = 0.0;
    let mut current = depot;
    for next in order.into_iter().chain(iter::once(depot)) {
        let leg = find_path(graph, current, next)?;
        if !leg.is_reachable() {
            warn!("no path from node {current} to node {next}; tour is unreachable");
            return Ok(Route::unreachable());
        }
        debug!("leg {current} -> {next} costs {}", leg.cost);
        nodes.extend(leg.nodes.into_iter().skip(1));
        cost += leg.cost;
        current = next;
    }
    Ok(Route::new(nodes, cost))
}
