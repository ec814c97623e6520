//! `ClusterPlanner`: partition deliveries, then route each cluster.
//!
//! Configuration problems abort the run with a [`PlanError`]. A cluster
//! whose tour has an unreachable leg is still reported, with an infinite
//! cost, so the remaining clusters stay usable.

use std::time::Instant;

use courier_core::{
    ClusterRoute, Diagnostics, DispatchPlan, DispatchRequest, Graph, NodeId, PlanError,
    PlanMetrics, Planner,
};
use geo::Coord;
use log::{info, warn};

use crate::partition::{DEFAULT_MAX_ITERATIONS, PartitionConfig, PartitionError, partition_seeded};
use crate::tour::build_route;

/// Configuration for [`ClusterPlanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterPlannerConfig {
    /// Upper bound on partitioning rounds.
    pub max_iterations: usize,
}

impl Default for ClusterPlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Planner that clusters deliveries with seeded k-means and builds one
/// nearest-neighbour tour per cluster.
///
/// # Examples
/// ```
/// use courier_core::{DispatchRequest, Graph, Planner};
/// use courier_solver::ClusterPlanner;
///
/// let mut graph = Graph::new();
/// for (id, x) in [(0, 0.0), (1, 1.0), (2, 2.0)] {
///     graph.add_node(id, x, 0.0);
/// }
/// graph.add_edge(0, 1, 1.0, true);
/// graph.add_edge(1, 2, 1.0, true);
///
/// let request = DispatchRequest { deliveries: vec![1, 2], depot: 0, couriers: 1, seed: 42 };
/// let plan = ClusterPlanner::new().plan(&graph, &request)?;
/// assert_eq!(plan.routes[0].route.nodes, vec![0, 1, 2, 1, 0]);
/// assert_eq!(plan.metrics.total_route_cost, 4.0);
/// # Ok::<(), courier_core::PlanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterPlanner {
    config: ClusterPlannerConfig,
}

impl ClusterPlanner {
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClusterPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(config: ClusterPlannerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClusterPlannerConfig {
        &self.config
    }
}

impl Planner for ClusterPlanner {
    fn plan(&self, graph: &Graph, request: &DispatchRequest) -> Result<DispatchPlan, PlanError> {
        request.validate()?;
        let started_at = Instant::now();
        graph.coords(request.depot)?;

        let points = request
            .deliveries
            .iter()
            .map(|delivery| graph.coords(*delivery))
            .collect::<Result<Vec<Coord<f64>>, _>>()?;

        let config =
            PartitionConfig::new(request.couriers).with_max_iterations(self.config.max_iterations);
        let partition = partition_seeded(&points, &config, request.seed)?;
        let partition_iterations = partition.iterations();
        let converged = partition.converged();
        if !converged {
            warn!(
                "partitioning stopped after {partition_iterations} iterations without converging"
            );
        }
        let (labels, centroids) = partition.into_parts();

        let routes = group_stops(&request.deliveries, &labels, request.couriers)
            .into_iter()
            .enumerate()
            .map(|(cluster, stops)| {
                let route = build_route(graph, &stops, request.depot)?;
                if !route.is_reachable() {
                    warn!("cluster {cluster} has an unreachable stop; reporting infinite cost");
                }
                Ok(ClusterRoute {
                    cluster,
                    stops,
                    route,
                })
            })
            .collect::<Result<Vec<_>, PlanError>>()?;

        let metrics = PlanMetrics::from_routes(request, &routes);
        info!(
            "planned {} deliveries for {} couriers; total cost {}",
            metrics.num_deliveries, metrics.num_clusters, metrics.total_route_cost
        );

        Ok(DispatchPlan {
            routes,
            labels,
            centroids,
            metrics,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                partition_iterations,
                converged,
            },
        })
    }
}

impl From<PartitionError> for PlanError {
    fn from(err: PartitionError) -> Self {
        match err {
            PartitionError::ZeroClusters => Self::ZeroCouriers,
            PartitionError::InsufficientPoints { points, clusters } => {
                Self::InsufficientDeliveries {
                    deliveries: points,
                    couriers: clusters,
                }
            }
        }
    }
}

/// Bucket `deliveries` by label, keeping request order within each bucket.
fn group_stops(deliveries: &[NodeId], labels: &[usize], clusters: usize) -> Vec<Vec<NodeId>> {
    let mut groups = vec![Vec::new(); clusters];
    for (delivery, label) in deliveries.iter().zip(labels) {
        if let Some(group) = groups.get_mut(*label) {
            group.push(*delivery);
        }
    }
    groups
}

#[cfg(test)]
mod tests;
