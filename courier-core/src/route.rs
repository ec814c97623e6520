//! Courier tours through the road graph.
//!
//! A route starts and ends at the depot and carries the summed arc weights
//! of its stitched legs.

use crate::graph::NodeId;

/// An ordered walk through the road graph with its total cost.
///
/// # Examples
/// ```
/// use courier_core::Route;
///
/// let route = Route::trivial(4);
/// assert_eq!(route.nodes, vec![4]);
/// assert_eq!(route.cost, 0.0);
/// assert!(route.is_reachable());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Nodes in visiting order, depot first and last.
    pub nodes: Vec<NodeId>,
    /// Sum of arc weights along the walk; `+inf` when a leg is unreachable.
    pub cost: f64,
}

impl Route {
    /// Construct a route from its nodes and cost.
    #[must_use]
    pub const fn new(nodes: Vec<NodeId>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    /// The route of a courier with nothing to deliver.
    #[must_use]
    pub fn trivial(depot: NodeId) -> Self {
        Self::new(vec![depot], 0.0)
    }

    /// The sentinel for a tour with at least one unreachable leg.
    ///
    /// # Examples
    /// ```
    /// use courier_core::Route;
    ///
    /// let route = Route::unreachable();
    /// assert!(route.nodes.is_empty());
    /// assert!(route.cost.is_infinite());
    /// ```
    #[must_use]
    pub const fn unreachable() -> Self {
        Self::new(Vec::new(), f64::INFINITY)
    }

    /// Whether every leg of the tour was connected.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Whether the walk passes through `node`.
    #[must_use]
    pub fn visits(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_route_is_depot_only() {
        let route = Route::trivial(3);
        assert_eq!(route.nodes, vec![3]);
        assert!(route.visits(3));
        assert!(!route.visits(4));
    }

    #[test]
    fn unreachable_route_is_empty_and_infinite() {
        let route = Route::unreachable();
        assert!(!route.is_reachable());
        assert_eq!(route.cost, f64::INFINITY);
    }
}
