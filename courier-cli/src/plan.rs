//! Plan command implementation for the courier CLI.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{DispatchPlan, DispatchRequest, Graph, NodeId, Planner};
use courier_data::{load_graph, read_deliveries, write_metrics, write_plan};
use courier_solver::{ClusterPlanner, ClusterPlannerConfig, DEFAULT_MAX_ITERATIONS};
use log::{debug, info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_COURIERS, ARG_DELIVERIES, ARG_DEPOT, ARG_EDGES, ARG_MAX_ITERATIONS, ARG_NODES, ARG_OUT,
    ARG_SEED, CliError, ENV_COURIERS,
};

pub(crate) const DEFAULT_NODES: &str = "data/city_nodes.csv";
pub(crate) const DEFAULT_EDGES: &str = "data/city_edges.csv";
pub(crate) const DEFAULT_DELIVERIES: &str = "data/deliveries.csv";
pub(crate) const DEFAULT_OUT: &str = "outputs";
pub(crate) const DEFAULT_DEPOT: NodeId = 0;
pub(crate) const DEFAULT_COURIERS: usize = 3;
pub(crate) const DEFAULT_SEED: u64 = 42;
pub(crate) const METRICS_FILE: &str = "metrics.json";
pub(crate) const PLAN_FILE: &str = "plan.json";

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a road graph and a delivery list from CSV, split the \
                 deliveries between couriers with seeded k-means, and build a \
                 nearest-neighbour tour from the depot for each courier. \
                 Metrics and the full plan are written as JSON.",
    about = "Plan courier tours over a road graph"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct PlanArgs {
    /// Nodes CSV with `id,x,y` columns.
    #[arg(long = ARG_NODES, value_name = "path")]
    #[serde(default)]
    pub(crate) nodes: Option<Utf8PathBuf>,
    /// Edges CSV with `u,v,w` columns; edges are undirected.
    #[arg(long = ARG_EDGES, value_name = "path")]
    #[serde(default)]
    pub(crate) edges: Option<Utf8PathBuf>,
    /// Deliveries CSV with a `node_id` column.
    #[arg(long = ARG_DELIVERIES, value_name = "path")]
    #[serde(default)]
    pub(crate) deliveries: Option<Utf8PathBuf>,
    /// Node id every tour starts and ends at.
    #[arg(long = ARG_DEPOT, value_name = "id")]
    #[serde(default)]
    pub(crate) depot: Option<NodeId>,
    /// Number of couriers (clusters).
    #[arg(long = ARG_COURIERS, short = 'k', value_name = "count")]
    #[serde(default)]
    pub(crate) couriers: Option<usize>,
    /// Seed for reproducible clustering.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Upper bound on clustering iterations.
    #[arg(long = ARG_MAX_ITERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_iterations: Option<usize>,
    /// Directory receiving `metrics.json` and `plan.json`.
    #[arg(long = ARG_OUT, value_name = "dir")]
    #[serde(default)]
    pub(crate) out: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) nodes: Utf8PathBuf,
    pub(crate) edges: Utf8PathBuf,
    pub(crate) deliveries: Utf8PathBuf,
    pub(crate) depot: NodeId,
    pub(crate) couriers: usize,
    pub(crate) seed: u64,
    pub(crate) max_iterations: usize,
    pub(crate) out: Utf8PathBuf,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.nodes, ARG_NODES)?;
        Self::require_existing(&self.edges, ARG_EDGES)?;
        Self::require_existing(&self.deliveries, ARG_DELIVERIES)?;
        match courier_fs::file_is_file(&self.out) {
            Ok(true) => Err(CliError::OutputDirectoryNotDirectory {
                path: self.out.clone(),
            }),
            Ok(false) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_OUT,
                path: self.out.clone(),
                source,
            }),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match courier_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn metrics_path(&self) -> Utf8PathBuf {
        self.out.join(METRICS_FILE)
    }

    fn plan_path(&self) -> Utf8PathBuf {
        self.out.join(PLAN_FILE)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let couriers = args.couriers.unwrap_or(DEFAULT_COURIERS);
        if couriers == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_COURIERS,
                env: ENV_COURIERS,
                reason: "at least one courier is required",
            });
        }
        Ok(Self {
            nodes: args.nodes.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_NODES)),
            edges: args.edges.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_EDGES)),
            deliveries: args
                .deliveries
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DELIVERIES)),
            depot: args.depot.unwrap_or(DEFAULT_DEPOT),
            couriers,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            max_iterations: args.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS),
            out: args.out.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUT)),
        })
    }
}

/// Builds a planner for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Box<dyn Planner>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Box<dyn Planner> {
        Box::new(ClusterPlanner::with_config(ClusterPlannerConfig {
            max_iterations: config.max_iterations,
        }))
    }
}

pub(crate) fn run_plan(args: PlanArgs, builder: &dyn PlannerBuilder) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    run_plan_with(args, builder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let plan = execute_plan(&config, builder)?;
    write_summary(writer, &config, &plan).map_err(CliError::WriteSummary)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(config: &PlanConfig, builder: &dyn PlannerBuilder) -> Result<DispatchPlan, CliError> {
    let graph = load_graph(&config.nodes, &config.edges)?;
    warn_inadmissible_arcs(&graph);
    let deliveries = read_deliveries(&config.deliveries)?;

    let request = DispatchRequest {
        deliveries,
        depot: config.depot,
        couriers: config.couriers,
        seed: config.seed,
    };
    let planner = builder.build(config);
    let plan = planner.plan(&graph, &request)?;
    info!(
        "plan ready in {:?} after {} partition iterations",
        plan.diagnostics.solve_time, plan.diagnostics.partition_iterations
    );

    courier_fs::ensure_dir(&config.out).map_err(|source| CliError::CreateOutputDirectory {
        path: config.out.clone(),
        source,
    })?;
    write_metrics(&config.metrics_path(), &plan.metrics)?;
    write_plan(&config.plan_path(), &plan)?;
    Ok(plan)
}

fn warn_inadmissible_arcs(graph: &Graph) {
    let inadmissible = graph.inadmissible_arcs();
    if inadmissible.is_empty() {
        return;
    }
    warn!(
        "{} arcs weigh less than the straight-line distance between their endpoints; \
         shortest paths may be suboptimal",
        inadmissible.len()
    );
    for arc in &inadmissible {
        debug!("inadmissible arc {} -> {} (weight {})", arc.from, arc.to, arc.weight);
    }
}

fn write_summary(writer: &mut dyn Write, config: &PlanConfig, plan: &DispatchPlan) -> io::Result<()> {
    let metrics = &plan.metrics;
    writeln!(writer, "=== Courier dispatch plan ===")?;
    writeln!(
        writer,
        "Deliveries: {} | Couriers: {}",
        metrics.num_deliveries, metrics.num_clusters
    )?;
    writeln!(writer, "Total route cost: {:.2}", metrics.total_route_cost)?;
    for cluster in &plan.routes {
        writeln!(
            writer,
            "  Cluster {}: cost={:.2}, stops={}",
            cluster.cluster,
            cluster.route.cost,
            cluster.stops.len()
        )?;
    }
    let unreachable = plan.unreachable_clusters();
    if !unreachable.is_empty() {
        let labels: Vec<String> = unreachable.iter().map(ToString::to_string).collect();
        writeln!(writer, "Unreachable clusters: {}", labels.join(", "))?;
    }
    writeln!(writer, "Metrics saved to {}", config.metrics_path())?;
    writeln!(writer, "Plan saved to {}", config.plan_path())?;
    Ok(())
}
