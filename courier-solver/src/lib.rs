//! Clustering and tour construction for courier dispatch.
//!
//! This crate provides [`ClusterPlanner`], the default implementation of the
//! [`Planner`](courier_core::Planner) trait. Deliveries are split between
//! couriers with seeded k-means ([`partition`]), and each cluster is turned
//! into a closed tour from the depot ([`build_route`]) by nearest-neighbour
//! sequencing and A* stitching.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod partition;
mod planner;
mod tour;

pub use partition::{
    DEFAULT_MAX_ITERATIONS, Partition, PartitionConfig, PartitionError, partition,
    partition_seeded,
};
pub use planner::{ClusterPlanner, ClusterPlannerConfig};
pub use tour::{build_route, nearest_neighbour_order};
