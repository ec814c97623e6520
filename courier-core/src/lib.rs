//! Core domain types for the courier dispatch engine.
//!
//! The crate owns the road [`Graph`], the A* [`find_path`] search over it,
//! and the request and plan types exchanged with [`Planner`]
//! implementations. Configuration problems surface as errors; an
//! unreachable goal is reported as data so a single disconnected cluster
//! does not hide the results of the others.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod graph;
mod plan;
mod route;
pub mod search;

pub use graph::{Arc, ArcRef, Graph, GraphError, NodeId, planar_distance};
pub use plan::{
    ClusterRoute, Diagnostics, DispatchPlan, DispatchRequest, PlanError, PlanMetrics, Planner,
};
pub use route::Route;
pub use search::{ShortestPath, find_path};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
