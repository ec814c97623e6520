//! Pretty-printed JSON artefacts.
//!
//! Non-finite costs, such as those of unreachable clusters, are written as
//! `null`.

use std::io::{BufWriter, Write};

use camino::Utf8Path;
use courier_core::{DispatchPlan, PlanMetrics};
use courier_fs::create_utf8_file;
use log::info;
use serde::Serialize;

use crate::error::PersistError;

/// Write plan metrics to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns [`PersistError`] when the file cannot be created or written.
pub fn write_metrics(path: &Utf8Path, metrics: &PlanMetrics) -> Result<(), PersistError> {
    write_json(path, metrics)?;
    info!("metrics written to {path}");
    Ok(())
}

/// Write a full plan (routes, labels, centroids, metrics and diagnostics)
/// to `path`, creating parent directories as needed.
///
/// # Errors
/// Returns [`PersistError`] when the file cannot be created or written.
pub fn write_plan(path: &Utf8Path, plan: &DispatchPlan) -> Result<(), PersistError> {
    write_json(path, plan)?;
    info!("plan written to {path}");
    Ok(())
}

fn write_json<T>(path: &Utf8Path, value: &T) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
{
    let file = create_utf8_file(path).map_err(|source| PersistError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .and_then(|()| writer.flush().map_err(serde_json::Error::io))
        .map_err(|source| PersistError::Serialise {
            path: path.to_path_buf(),
            source,
        })
}
