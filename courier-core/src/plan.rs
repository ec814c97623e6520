use std::collections::BTreeMap;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::graph::{Graph, GraphError, NodeId};
use crate::route::Route;

/// Parameters for a dispatch run.
///
/// The request names the deliveries to split between couriers, the shared
/// depot, the number of couriers and a seed for the stochastic partitioning
/// step.
///
/// # Examples
/// ```rust
/// use courier_core::DispatchRequest;
///
/// let request = DispatchRequest {
///     deliveries: vec![3, 4, 5],
///     depot: 0,
///     couriers: 2,
///     seed: 42,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchRequest {
    /// Delivery node ids in input order. Duplicates are kept.
    pub deliveries: Vec<NodeId>,
    /// Start and end node of every courier tour.
    pub depot: NodeId,
    /// Number of couriers, i.e. clusters.
    pub couriers: usize,
    /// Seed for reproducible partitioning.
    pub seed: u64,
}

impl DispatchRequest {
    /// Check the request before any work is done.
    ///
    /// # Errors
    /// Returns [`PlanError::ZeroCouriers`] when no courier is requested and
    /// [`PlanError::InsufficientDeliveries`] when there are fewer deliveries
    /// than couriers.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.couriers == 0 {
            return Err(PlanError::ZeroCouriers);
        }
        if self.deliveries.len() < self.couriers {
            return Err(PlanError::InsufficientDeliveries {
                deliveries: self.deliveries.len(),
                couriers: self.couriers,
            });
        }
        Ok(())
    }
}

/// The tour assigned to one courier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterRoute {
    /// Cluster label in `0..couriers`.
    pub cluster: usize,
    /// Deliveries assigned to the cluster, in request order.
    pub stops: Vec<NodeId>,
    /// The stitched tour; [`Route::unreachable`] when a leg failed.
    pub route: Route,
}

/// Aggregate cost figures for a dispatch run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanMetrics {
    /// Sum of all cluster costs; `+inf` when any cluster is unreachable.
    pub total_route_cost: f64,
    /// Cost per cluster label.
    pub cluster_costs: BTreeMap<usize, f64>,
    /// `total_route_cost` divided by the courier count.
    pub avg_cost_per_cluster: f64,
    /// Number of deliveries in the request.
    pub num_deliveries: usize,
    /// Number of couriers in the request.
    pub num_clusters: usize,
    /// Depot node id.
    pub depot_node: NodeId,
}

impl PlanMetrics {
    /// Aggregate the costs of `routes` for `request`.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{ClusterRoute, DispatchRequest, PlanMetrics, Route};
    ///
    /// let request = DispatchRequest { deliveries: vec![1, 2], depot: 0, couriers: 2, seed: 1 };
    /// let routes = vec![
    ///     ClusterRoute { cluster: 0, stops: vec![1], route: Route::new(vec![0, 1, 0], 2.0) },
    ///     ClusterRoute { cluster: 1, stops: vec![2], route: Route::new(vec![0, 2, 0], 4.0) },
    /// ];
    /// let metrics = PlanMetrics::from_routes(&request, &routes);
    /// assert_eq!(metrics.total_route_cost, 6.0);
    /// assert_eq!(metrics.avg_cost_per_cluster, 3.0);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "costs are floating-point sums averaged over a small courier count"
    )]
    pub fn from_routes(request: &DispatchRequest, routes: &[ClusterRoute]) -> Self {
        let cluster_costs: BTreeMap<usize, f64> = routes
            .iter()
            .map(|cluster| (cluster.cluster, cluster.route.cost))
            .collect();
        let total_route_cost: f64 = cluster_costs.values().sum();
        let avg_cost_per_cluster = total_route_cost / request.couriers.max(1) as f64;
        Self {
            total_route_cost,
            cluster_costs,
            avg_cost_per_cluster,
            num_deliveries: request.deliveries.len(),
            num_clusters: request.couriers,
            depot_node: request.depot,
        }
    }
}

/// Diagnostic information about a dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub solve_time: Duration,
    /// Partitioning iterations executed.
    pub partition_iterations: usize,
    /// Whether partitioning stopped on a stable assignment rather than on
    /// its iteration budget.
    pub converged: bool,
}

/// Result of a successful dispatch run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchPlan {
    /// One tour per cluster label, ordered by label.
    pub routes: Vec<ClusterRoute>,
    /// Cluster label per delivery, aligned with the request's deliveries.
    pub labels: Vec<usize>,
    /// Final centroid per cluster label.
    pub centroids: Vec<Coord<f64>>,
    /// Aggregate costs.
    pub metrics: PlanMetrics,
    /// Planner diagnostics.
    pub diagnostics: Diagnostics,
}

impl DispatchPlan {
    /// Clusters whose tour has an unreachable leg.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{ClusterRoute, DispatchPlan, DispatchRequest, PlanMetrics, Route};
    ///
    /// let request = DispatchRequest { deliveries: vec![1], depot: 0, couriers: 1, seed: 1 };
    /// let routes = vec![ClusterRoute { cluster: 0, stops: vec![1], route: Route::unreachable() }];
    /// let plan = DispatchPlan {
    ///     metrics: PlanMetrics::from_routes(&request, &routes),
    ///     routes,
    ///     labels: vec![0],
    ///     centroids: Vec::new(),
    ///     diagnostics: Default::default(),
    /// };
    /// assert_eq!(plan.unreachable_clusters(), vec![0]);
    /// ```
    #[must_use]
    pub fn unreachable_clusters(&self) -> Vec<usize> {
        self.routes
            .iter()
            .filter(|cluster| !cluster.route.is_reachable())
            .map(|cluster| cluster.cluster)
            .collect()
    }
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The request asked for zero couriers.
    #[error("at least one courier is required")]
    ZeroCouriers,
    /// There are fewer deliveries than couriers.
    #[error("cannot split {deliveries} deliveries between {couriers} couriers")]
    InsufficientDeliveries {
        /// Number of deliveries supplied.
        deliveries: usize,
        /// Number of couriers requested.
        couriers: usize,
    },
    /// A delivery, the depot or an arc referenced an unknown node.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Split deliveries between couriers and build a tour for each.
///
/// Implementations report configuration problems as [`PlanError`] and
/// unreachable clusters as data inside the returned [`DispatchPlan`].
/// Planners must be `Send + Sync` so one instance can serve many threads.
pub trait Planner: Send + Sync {
    /// Plan `request` over `graph`.
    ///
    /// # Errors
    /// Returns [`PlanError`] when the request is invalid or references nodes
    /// missing from `graph`.
    fn plan(&self, graph: &Graph, request: &DispatchRequest) -> Result<DispatchPlan, PlanError>;
}
