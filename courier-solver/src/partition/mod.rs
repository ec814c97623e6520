//! Seeded k-means partitioning of delivery coordinates.
//!
//! Initial centroids are `k` distinct points sampled without replacement.
//! Each iteration assigns every point to its nearest centroid (the lowest
//! centroid index wins ties), stops as soon as the assignment repeats, and
//! otherwise moves each centroid to the mean of its points. A cluster left
//! without points is re-seeded on a random existing point so the next
//! assignment pass never sees an undefined centroid.
//!
//! All randomness is drawn from the caller's generator, which makes runs
//! reproducible for a fixed seed.

use courier_core::planar_distance;
use geo::Coord;
use log::debug;
use rand::{Rng, SeedableRng, seq::index};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Iteration budget used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Parameters for [`partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Number of clusters `k`.
    pub clusters: usize,
    /// Upper bound on assignment/update rounds.
    pub max_iterations: usize,
}

impl PartitionConfig {
    /// Configuration for `clusters` clusters with the default budget.
    #[must_use]
    pub const fn new(clusters: usize) -> Self {
        Self {
            clusters,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Replace the iteration budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Errors returned by [`partition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// Zero clusters were requested.
    #[error("at least one cluster is required")]
    ZeroClusters,
    /// Fewer points than clusters.
    #[error("cannot form {clusters} clusters from {points} points")]
    InsufficientPoints {
        /// Number of points supplied.
        points: usize,
        /// Number of clusters requested.
        clusters: usize,
    },
}

/// Final cluster assignment.
///
/// # Examples
/// ```
/// use courier_solver::{PartitionConfig, partition_seeded};
/// use geo::Coord;
///
/// let points = [
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
///     Coord { x: 10.0, y: 0.0 },
///     Coord { x: 11.0, y: 0.0 },
/// ];
/// let partition = partition_seeded(&points, &PartitionConfig::new(2), 42)?;
/// let labels = partition.labels();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// # Ok::<(), courier_solver::PartitionError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    labels: Vec<usize>,
    centroids: Vec<Coord<f64>>,
    iterations: usize,
    converged: bool,
}

impl Partition {
    /// Cluster label per input point, each in `0..k`.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Centroid per cluster label.
    #[must_use]
    pub fn centroids(&self) -> &[Coord<f64>] {
        &self.centroids
    }

    /// Assignment rounds executed, including the one that detected
    /// convergence.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the run stopped on a repeated assignment rather than on the
    /// iteration budget.
    #[must_use]
    pub const fn converged(&self) -> bool {
        self.converged
    }

    /// Indices of the points labelled `label`.
    #[must_use]
    pub fn members(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, assigned)| **assigned == label)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Sum of squared distances from each point to its assigned centroid.
    ///
    /// `points` must be the slice the partition was computed from.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "inertia is a floating-point sum of squares"
    )]
    pub fn inertia(&self, points: &[Coord<f64>]) -> f64 {
        points
            .iter()
            .zip(&self.labels)
            .filter_map(|(point, label)| {
                self.centroids
                    .get(*label)
                    .map(|centroid| planar_distance(*point, *centroid).powi(2))
            })
            .sum()
    }

    /// Split into labels and centroids.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<Coord<f64>>) {
        (self.labels, self.centroids)
    }
}

/// Partition `points` into `config.clusters` groups using `rng`.
///
/// # Errors
/// Returns [`PartitionError::ZeroClusters`] when no cluster is requested and
/// [`PartitionError::InsufficientPoints`] when `points` has fewer entries
/// than clusters. Both are checked before any iteration.
pub fn partition<R>(
    points: &[Coord<f64>],
    config: &PartitionConfig,
    rng: &mut R,
) -> Result<Partition, PartitionError>
where
    R: Rng + ?Sized,
{
    let clusters = config.clusters;
    if clusters == 0 {
        return Err(PartitionError::ZeroClusters);
    }
    if points.len() < clusters {
        return Err(PartitionError::InsufficientPoints {
            points: points.len(),
            clusters,
        });
    }

    let mut centroids: Vec<Coord<f64>> = index::sample(rng, points.len(), clusters)
        .into_iter()
        .filter_map(|idx| points.get(idx).copied())
        .collect();
    let mut labels = vec![0_usize; points.len()];
    let mut iterations = 0_usize;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let assignment = assign(points, &centroids);
        if assignment == labels {
            converged = true;
            break;
        }
        let moved = labels
            .iter()
            .zip(&assignment)
            .filter(|(previous, next)| previous != next)
            .count();
        debug!("partition iteration {iterations}: {moved} points changed cluster");
        labels = assignment;
        update_centroids(points, &labels, &mut centroids, rng);
    }

    debug!(
        "partitioned {} points into {clusters} clusters after {iterations} iterations (converged: {converged})",
        points.len()
    );
    Ok(Partition {
        labels,
        centroids,
        iterations,
        converged,
    })
}

/// [`partition`] driven by a `ChaCha8Rng` seeded with `seed`.
///
/// # Errors
/// See [`partition`].
pub fn partition_seeded(
    points: &[Coord<f64>],
    config: &PartitionConfig,
    seed: u64,
) -> Result<Partition, PartitionError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    partition(points, config, &mut rng)
}

fn assign(points: &[Coord<f64>], centroids: &[Coord<f64>]) -> Vec<usize> {
    points
        .iter()
        .map(|point| nearest_centroid(*point, centroids))
        .collect()
}

fn nearest_centroid(point: Coord<f64>, centroids: &[Coord<f64>]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = planar_distance(point, *centroid);
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((idx, distance));
        }
    }
    best.map_or(0, |(idx, _)| idx)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "centroids are coordinate-wise means over small point counts"
)]
fn update_centroids<R>(
    points: &[Coord<f64>],
    labels: &[usize],
    centroids: &mut [Coord<f64>],
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let mut sums = vec![(Coord { x: 0.0, y: 0.0 }, 0_usize); centroids.len()];
    for (point, label) in points.iter().zip(labels) {
        if let Some((sum, count)) = sums.get_mut(*label) {
            *sum = *sum + *point;
            *count += 1;
        }
    }

    for (label, (centroid, (sum, count))) in centroids.iter_mut().zip(sums).enumerate() {
        if count > 0 {
            *centroid = sum / count as f64;
            continue;
        }
        let replacement = rng.gen_range(0..points.len());
        if let Some(point) = points.get(replacement) {
            debug!("cluster {label} is empty; re-seeding on point {replacement}");
            *centroid = *point;
        }
    }
}
