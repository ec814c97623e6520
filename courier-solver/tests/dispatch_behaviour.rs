//! Behavioural tests for `ClusterPlanner` using rstest-bdd.

use std::cell::RefCell;

use courier_core::{DispatchPlan, DispatchRequest, Graph, NodeId, PlanError, Planner};
use courier_solver::ClusterPlanner;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct DispatchWorld {
    graph: RefCell<Graph>,
    outcome: RefCell<Option<Result<DispatchPlan, PlanError>>>,
}

impl DispatchWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_plan(&self) -> DispatchPlan {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
            .expect("expected planning success")
    }

    fn dispatch(&self, deliveries: Vec<NodeId>, couriers: usize) {
        let request = DispatchRequest {
            deliveries,
            depot: 0,
            couriers,
            seed: 42,
        };
        let outcome = ClusterPlanner::new().plan(&self.graph.borrow(), &request);
        self.outcome.replace(Some(outcome));
    }
}

#[fixture]
fn world() -> DispatchWorld {
    DispatchWorld::default()
}

#[given("a depot west of four stops on a line")]
fn given_line(world: &DispatchWorld) {
    let mut graph = Graph::new();
    for (id, x) in (0_u64..5).zip([-1.0, 0.0, 1.0, 2.0, 3.0]) {
        graph.add_node(id, x, 0.0);
    }
    for id in 0_u64..4 {
        graph.add_edge(id, id + 1, 1.0, true);
    }
    world.graph.replace(graph);
}

#[given("a depot between two distant pairs of stops")]
fn given_two_pairs(world: &DispatchWorld) {
    let mut graph = Graph::new();
    for (id, x) in [(0, 0.0), (1, -10.0), (2, -11.0), (3, 10.0), (4, 11.0)] {
        graph.add_node(id, x, 0.0);
    }
    graph.add_edge(0, 1, 10.0, true);
    graph.add_edge(1, 2, 1.0, true);
    graph.add_edge(0, 3, 10.0, true);
    graph.add_edge(3, 4, 1.0, true);
    world.graph.replace(graph);
}

#[given("a pair of stops with no road to the depot")]
fn given_isolated_pair(world: &DispatchWorld) {
    let mut graph = world.graph.borrow_mut();
    graph.add_node(5, 0.0, 40.0);
    graph.add_node(6, 0.0, 41.0);
    graph.add_edge(5, 6, 1.0, true);
}

#[when("one courier is dispatched to every stop")]
fn when_one_courier(world: &DispatchWorld) {
    world.dispatch(vec![3, 1, 4, 2], 1);
}

#[when("two couriers are dispatched to all four stops")]
fn when_two_couriers(world: &DispatchWorld) {
    world.dispatch(vec![1, 2, 3, 4], 2);
}

#[when("two couriers are dispatched to the western and isolated pairs")]
fn when_two_couriers_with_isolated_pair(world: &DispatchWorld) {
    world.dispatch(vec![1, 2, 5, 6], 2);
}

#[then("the route visits the stops in increasing x order and returns")]
fn then_line_order(world: &DispatchWorld) {
    let plan = world.expect_plan();
    let nodes = plan.routes.first().map(|cluster| cluster.route.nodes.clone());
    assert_eq!(nodes, Some(vec![0, 1, 2, 3, 4, 3, 2, 1, 0]));
}

#[then("the route costs 8.0")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point costs"
)]
fn then_line_cost(world: &DispatchWorld) {
    let plan = world.expect_plan();
    assert!((plan.metrics.total_route_cost - 8.0).abs() < 1e-12);
}

#[then("each pair is served by its own courier")]
fn then_pairs_split(world: &DispatchWorld) {
    let plan = world.expect_plan();
    assert_eq!(plan.labels.first(), plan.labels.get(1));
    assert_eq!(plan.labels.get(2), plan.labels.get(3));
    assert_ne!(plan.labels.first(), plan.labels.get(2));
}

#[then("the total cost is 44.0")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point costs"
)]
fn then_total_cost(world: &DispatchWorld) {
    let plan = world.expect_plan();
    assert!((plan.metrics.total_route_cost - 44.0).abs() < 1e-12);
}

#[then("exactly one cluster is reported unreachable")]
fn then_one_unreachable(world: &DispatchWorld) {
    let plan = world.expect_plan();
    assert_eq!(plan.unreachable_clusters().len(), 1);
    assert_eq!(plan.routes.len(), 2);
    assert!(plan.metrics.total_route_cost.is_infinite());
}

#[then("the reachable cluster costs 22.0")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point costs"
)]
fn then_reachable_cost(world: &DispatchWorld) {
    let plan = world.expect_plan();
    let finite: Vec<f64> = plan
        .metrics
        .cluster_costs
        .values()
        .copied()
        .filter(|cost| cost.is_finite())
        .collect();
    assert_eq!(finite.len(), 1);
    assert!(finite.iter().all(|cost| (cost - 22.0).abs() < 1e-12));
}

#[scenario(path = "tests/features/dispatch.feature", index = 0)]
fn collinear_tour(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", index = 1)]
fn separated_pairs(world: DispatchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", index = 2)]
fn unreachable_cluster(world: DispatchWorld) {
    let _ = world;
}
