//! Fixture city written to a temporary directory for CLI tests.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Depot 0 at the origin, a western pair (1, 2) and an eastern pair (3, 4).
const NODES: &str = "id,x,y\n0,0,0\n1,-10,0\n2,-11,0\n3,10,0\n4,11,0\n";
const EDGES: &str = "u,v,w\n0,1,10\n1,2,1\n0,3,10\n3,4,1\n";
const DELIVERIES: &str = "node_id\n1\n2\n3\n4\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) struct CityFiles {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) nodes: Utf8PathBuf,
    pub(super) edges: Utf8PathBuf,
    pub(super) deliveries: Utf8PathBuf,
    pub(super) out: Utf8PathBuf,
}

impl CityFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let nodes = root.join("city_nodes.csv");
        let edges = root.join("city_edges.csv");
        let deliveries = root.join("deliveries.csv");
        write_utf8(&nodes, NODES.as_bytes());
        write_utf8(&edges, EDGES.as_bytes());
        write_utf8(&deliveries, DELIVERIES.as_bytes());
        let out = root.join("outputs");
        Self {
            _dir: dir,
            root,
            nodes,
            edges,
            deliveries,
            out,
        }
    }

    /// Arguments pointing at the fixture with two couriers.
    pub(super) fn args(&self) -> PlanArgs {
        PlanArgs {
            nodes: Some(self.nodes.clone()),
            edges: Some(self.edges.clone()),
            deliveries: Some(self.deliveries.clone()),
            couriers: Some(2),
            out: Some(self.out.clone()),
            ..PlanArgs::default()
        }
    }

    pub(super) fn config(&self) -> PlanConfig {
        PlanConfig::try_from(self.args()).expect("fixture config")
    }

    pub(super) fn read_output(&self, name: &str) -> serde_json::Value {
        let text = fs::read_to_string(self.out.join(name).as_std_path()).expect("read output");
        serde_json::from_str(&text).expect("output JSON")
    }
}
