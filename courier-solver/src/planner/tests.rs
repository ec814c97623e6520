//! Tests for the `ClusterPlanner`.

use super::*;
use courier_core::{GraphError, Route};
use rstest::{fixture, rstest};

/// Depot 0 at the origin, a western pair (1, 2) and an eastern pair (3, 4),
/// all joined along the x axis.
#[fixture]
fn two_pairs() -> Graph {
    let mut graph = Graph::new();
    for (id, x) in [(0, 0.0), (1, -10.0), (2, -11.0), (3, 10.0), (4, 11.0)] {
        graph.add_node(id, x, 0.0);
    }
    graph.add_edge(0, 1, 10.0, true);
    graph.add_edge(1, 2, 1.0, true);
    graph.add_edge(0, 3, 10.0, true);
    graph.add_edge(3, 4, 1.0, true);
    graph
}

fn request(deliveries: Vec<NodeId>, couriers: usize) -> DispatchRequest {
    DispatchRequest {
        deliveries,
        depot: 0,
        couriers,
        seed: 42,
    }
}

#[rstest]
fn separated_pairs_get_one_courier_each(two_pairs: Graph) {
    let plan = ClusterPlanner::new()
        .plan(&two_pairs, &request(vec![1, 2, 3, 4], 2))
        .expect("plan succeeds");

    assert_eq!(plan.routes.len(), 2);
    assert_eq!(plan.labels[0], plan.labels[1]);
    assert_eq!(plan.labels[2], plan.labels[3]);
    assert_ne!(plan.labels[0], plan.labels[2]);
    for cluster in &plan.routes {
        assert_eq!(cluster.stops.len(), 2);
        assert!((cluster.route.cost - 22.0).abs() < 1e-12);
        assert_eq!(cluster.route.nodes.first(), Some(&0));
        assert_eq!(cluster.route.nodes.last(), Some(&0));
    }
    assert!((plan.metrics.total_route_cost - 44.0).abs() < 1e-12);
    assert!((plan.metrics.avg_cost_per_cluster - 22.0).abs() < 1e-12);
    assert_eq!(plan.centroids.len(), 2);
    assert!(plan.diagnostics.converged);
}

#[rstest]
fn unreachable_cluster_is_reported_with_the_rest(mut two_pairs: Graph) {
    two_pairs.add_node(5, 50.0, 0.0);
    two_pairs.add_node(6, 51.0, 0.0);
    let plan = ClusterPlanner::new()
        .plan(&two_pairs, &request(vec![1, 2, 5, 6], 2))
        .expect("plan succeeds");

    let isolated = plan.labels[2];
    assert_eq!(plan.unreachable_clusters(), vec![isolated]);
    assert!(plan.metrics.total_route_cost.is_infinite());
    let reachable = plan
        .routes
        .iter()
        .find(|cluster| cluster.cluster != isolated)
        .expect("reachable cluster");
    assert!((reachable.route.cost - 22.0).abs() < 1e-12);
    assert_eq!(
        plan.metrics.cluster_costs.get(&reachable.cluster),
        Some(&reachable.route.cost)
    );
}

#[rstest]
fn invalid_requests_fail_before_planning(two_pairs: Graph) {
    let planner = ClusterPlanner::new();
    assert_eq!(
        planner.plan(&two_pairs, &request(vec![1], 0)),
        Err(PlanError::ZeroCouriers)
    );
    assert_eq!(
        planner.plan(&two_pairs, &request(vec![1], 2)),
        Err(PlanError::InsufficientDeliveries {
            deliveries: 1,
            couriers: 2
        })
    );
}

#[rstest]
fn unknown_delivery_aborts_the_run(two_pairs: Graph) {
    let err = ClusterPlanner::new()
        .plan(&two_pairs, &request(vec![1, 99], 1))
        .expect_err("unknown delivery");
    assert_eq!(err, PlanError::Graph(GraphError::NodeNotFound { id: 99 }));
}

#[rstest]
fn unknown_depot_aborts_the_run(two_pairs: Graph) {
    let mut bad = request(vec![1, 2], 1);
    bad.depot = 42;
    let err = ClusterPlanner::new()
        .plan(&two_pairs, &bad)
        .expect_err("unknown depot");
    assert_eq!(err, PlanError::Graph(GraphError::NodeNotFound { id: 42 }));
}

#[rstest]
fn zero_iteration_budget_still_produces_routes(two_pairs: Graph) {
    let planner = ClusterPlanner::with_config(ClusterPlannerConfig { max_iterations: 0 });
    let plan = planner
        .plan(&two_pairs, &request(vec![1, 2, 3, 4], 2))
        .expect("plan succeeds");

    // Every label is still zero, so the second courier stays at the depot.
    assert_eq!(plan.labels, vec![0, 0, 0, 0]);
    assert_eq!(plan.routes[1].route, Route::trivial(0));
    assert!(plan.routes[1].stops.is_empty());
    assert_eq!(plan.diagnostics.partition_iterations, 0);
    assert!(!plan.diagnostics.converged);
}

#[rstest]
fn same_seed_gives_same_plan(two_pairs: Graph) {
    let planner = ClusterPlanner::new();
    let first = planner
        .plan(&two_pairs, &request(vec![1, 2, 3, 4], 2))
        .expect("plan succeeds");
    let second = planner
        .plan(&two_pairs, &request(vec![1, 2, 3, 4], 2))
        .expect("plan succeeds");
    assert_eq!(first.routes, second.routes);
    assert_eq!(first.labels, second.labels);
    assert_eq!(first.centroids, second.centroids);
}

#[rstest]
fn stops_keep_request_order_within_a_group() {
    let groups = group_stops(&[7, 8, 9, 10], &[1, 0, 1, 0], 3);
    assert_eq!(groups, vec![vec![8, 10], vec![7, 9], Vec::new()]);
}

#[rstest]
fn partition_errors_map_onto_plan_errors() {
    assert_eq!(
        PlanError::from(PartitionError::ZeroClusters),
        PlanError::ZeroCouriers
    );
    assert_eq!(
        PlanError::from(PartitionError::InsufficientPoints {
            points: 1,
            clusters: 3
        }),
        PlanError::InsufficientDeliveries {
            deliveries: 1,
            couriers: 3
        }
    );
}
