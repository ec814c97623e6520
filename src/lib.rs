//! Facade crate for the courier dispatch engine.
//!
//! This crate re-exports the core graph and plan types together with the
//! k-means cluster planner, so callers need a single dependency to load a
//! graph, plan a dispatch and inspect the resulting tours.
//!
//! ```
//! use courier_engine::{ClusterPlanner, DispatchRequest, Graph, Planner};
//!
//! let mut graph = Graph::new();
//! graph.add_node(0, 0.0, 0.0);
//! graph.add_node(1, 1.0, 0.0);
//! graph.add_node(2, 2.0, 0.0);
//! graph.add_edge(0, 1, 1.0, true);
//! graph.add_edge(1, 2, 1.0, true);
//!
//! let request = DispatchRequest {
//!     deliveries: vec![2, 1],
//!     depot: 0,
//!     couriers: 1,
//!     seed: 42,
//! };
//! let plan = ClusterPlanner::new().plan(&graph, &request)?;
//! assert_eq!(plan.metrics.total_route_cost, 4.0);
//! # Ok::<(), courier_engine::PlanError>(())
//! ```

#![forbid(unsafe_code)]

pub use courier_core::{
    ClusterRoute, Diagnostics, DispatchPlan, DispatchRequest, Graph, GraphError, NodeId,
    PlanError, PlanMetrics, Planner, Route, ShortestPath, find_path,
};

pub use courier_solver::{
    ClusterPlanner, ClusterPlannerConfig, Partition, PartitionConfig, PartitionError, build_route,
    nearest_neighbour_order, partition, partition_seeded,
};
