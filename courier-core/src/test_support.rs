//! Graph builders shared by unit, property and behaviour tests.

use crate::{Graph, NodeId};

/// Nodes `0..len` spaced `spacing` apart on the x axis, joined in sequence
/// by undirected edges weighted with their length.
///
/// # Examples
/// ```rust
/// use courier_core::test_support::line_graph;
///
/// let graph = line_graph(3, 1.0);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.arc_count(), 4);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "test coordinates are small multiples of the spacing"
)]
pub fn line_graph(len: u64, spacing: f64) -> Graph {
    let mut graph = Graph::new();
    for id in 0..len {
        graph.add_node(id, id as f64 * spacing, 0.0);
    }
    for id in 1..len {
        graph.add_edge(id - 1, id, spacing, true);
    }
    graph
}

/// A `width` by `height` lattice with unit spacing and unit-weight
/// undirected edges between horizontal and vertical neighbours.
///
/// Node ids are `y * width + x`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "test coordinates are small lattice indices"
)]
pub fn grid_graph(width: u64, height: u64) -> Graph {
    let mut graph = Graph::new();
    for y in 0..height {
        for x in 0..width {
            graph.add_node(grid_id(width, x, y), x as f64, y as f64);
        }
    }
    for y in 0..height {
        for x in 0..width {
            let id = grid_id(width, x, y);
            if x + 1 < width {
                graph.add_edge(id, grid_id(width, x + 1, y), 1.0, true);
            }
            if y + 1 < height {
                graph.add_edge(id, grid_id(width, x, y + 1), 1.0, true);
            }
        }
    }
    graph
}

/// Id of the lattice node at `(x, y)` in a [`grid_graph`] of `width`.
#[must_use]
pub const fn grid_id(width: u64, x: u64, y: u64) -> NodeId {
    y * width + x
}
