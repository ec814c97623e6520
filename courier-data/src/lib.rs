//! CSV loaders and JSON writers for courier dispatch.
//!
//! Responsibilities:
//! - Build a [`Graph`](courier_core::Graph) from node and edge tables.
//! - Read the ordered delivery list.
//! - Persist plan metrics and full plans as pretty-printed JSON.
//!
//! Boundaries:
//! - No planning logic; that lives in `courier-solver`.
//! - All file access goes through `courier-fs`.

#![forbid(unsafe_code)]

mod error;
mod load;
mod persist;

pub use error::{LoadError, PersistError};
pub use load::{load_graph, read_deliveries};
pub use persist::{write_metrics, write_plan};
