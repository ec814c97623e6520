//! Graph and delivery loaders.
//!
//! Node files carry `id,x,y`, edge files `u,v,w` and delivery files
//! `node_id`. Edges are inserted as undirected. Surrounding whitespace in
//! fields is ignored.

use camino::Utf8Path;
use courier_core::{Graph, NodeId};
use courier_fs::open_utf8_file;
use csv::{Position, StringRecord, Trim};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct NodeRow {
    id: NodeId,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeRow {
    u: NodeId,
    v: NodeId,
    w: f64,
}

#[derive(Debug, Deserialize)]
struct DeliveryRow {
    node_id: NodeId,
}

/// Load a road graph from a nodes table and an undirected edges table.
///
/// A node id listed twice keeps its last coordinate.
///
/// # Errors
/// Returns [`LoadError`] when a file cannot be opened or parsed, a
/// coordinate is not finite, a weight is negative or not finite, or an edge
/// names a node absent from the nodes table.
pub fn load_graph(nodes_csv: &Utf8Path, edges_csv: &Utf8Path) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();
    for (line, row) in read_rows::<NodeRow>(nodes_csv)? {
        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(LoadError::InvalidCoordinate {
                path: nodes_csv.to_path_buf(),
                line,
                id: row.id,
            });
        }
        if graph.contains(row.id) {
            warn!("{nodes_csv}:{line}: node {} redefined", row.id);
        }
        graph.add_node(row.id, row.x, row.y);
    }

    for (line, row) in read_rows::<EdgeRow>(edges_csv)? {
        if !(row.w.is_finite() && row.w >= 0.0) {
            return Err(LoadError::InvalidWeight {
                path: edges_csv.to_path_buf(),
                line,
                u: row.u,
                v: row.v,
                weight: row.w,
            });
        }
        if let Some(id) = [row.u, row.v].into_iter().find(|id| !graph.contains(*id)) {
            return Err(LoadError::UnknownNode {
                path: edges_csv.to_path_buf(),
                line,
                id,
            });
        }
        graph.add_edge(row.u, row.v, row.w, true);
    }

    debug!(
        "loaded {} nodes and {} arcs from {nodes_csv} and {edges_csv}",
        graph.node_count(),
        graph.arc_count()
    );
    Ok(graph)
}

/// Read delivery node ids in file order, keeping duplicates.
///
/// # Errors
/// Returns [`LoadError`] when the file cannot be opened or parsed.
pub fn read_deliveries(path: &Utf8Path) -> Result<Vec<NodeId>, LoadError> {
    let deliveries: Vec<NodeId> = read_rows::<DeliveryRow>(path)?
        .into_iter()
        .map(|(_, row)| row.node_id)
        .collect();
    debug!("read {} deliveries from {path}", deliveries.len());
    Ok(deliveries)
}

/// Decode every row of a headed CSV file, pairing each with its line.
fn read_rows<T>(path: &Utf8Path) -> Result<Vec<(u64, T)>, LoadError>
where
    T: DeserializeOwned,
{
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source: csv::Error| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = reader.headers().map_err(parse_error)?.clone();
    let mut record = StringRecord::new();
    let mut rows = Vec::new();
    while reader.read_record(&mut record).map_err(parse_error)? {
        let line = record.position().map_or(0, Position::line);
        let row = record.deserialize(Some(&headers)).map_err(parse_error)?;
        rows.push((line, row));
    }
    Ok(rows)
}
