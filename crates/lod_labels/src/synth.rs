//! Synthetic hierarchical label datasets.
//!
//! Level 0 holds Gaussian blobs of base points. Every further level summarizes the base
//! points with fewer k-means centers, so coarser levels carry fewer, more important labels.
use glam::Vec2;
use rand::Rng as RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::label::Label;

/// Parameters for [`generate_hierarchy`].
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchySpec {
    /// Number of level-0 points.
    pub samples: usize,
    /// Number of Gaussian blobs the base points are drawn around.
    pub blobs: usize,
    /// Standard deviation of each blob.
    pub blob_sigma: f32,
    /// Size of the square-ish domain the blob centers are drawn from, centered on the origin.
    pub extent: Vec2,
    /// Cluster count for levels 1, 2, ...; one entry per coarser level.
    pub clusters_per_level: Vec<usize>,
    /// Lloyd iterations per level.
    pub kmeans_iterations: usize,
}

impl Default for HierarchySpec {
    fn default() -> Self {
        Self {
            samples: 500,
            blobs: 50,
            blob_sigma: 0.5,
            extent: Vec2::new(20.0, 20.0),
            clusters_per_level: vec![128, 64, 32, 16, 8, 4],
            kmeans_iterations: 16,
        }
    }
}

impl HierarchySpec {
    pub fn new(samples: usize, blobs: usize) -> Self {
        Self {
            samples,
            blobs,
            ..Default::default()
        }
    }

    pub fn with_blob_sigma(mut self, blob_sigma: f32) -> Self {
        self.blob_sigma = blob_sigma;
        self
    }

    pub fn with_extent(mut self, extent: Vec2) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_clusters_per_level(mut self, clusters_per_level: Vec<usize>) -> Self {
        self.clusters_per_level = clusters_per_level;
        self
    }

    pub fn with_kmeans_iterations(mut self, kmeans_iterations: usize) -> Self {
        self.kmeans_iterations = kmeans_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(Error::InvalidConfig("samples must be > 0".into()));
        }
        if self.blobs == 0 {
            return Err(Error::InvalidConfig("blobs must be > 0".into()));
        }
        if !self.blob_sigma.is_finite() || self.blob_sigma < 0.0 {
            return Err(Error::InvalidConfig("blob_sigma must be >= 0".into()));
        }
        if !(self.extent.x > 0.0 && self.extent.y > 0.0) {
            return Err(Error::InvalidConfig(
                "extent must be > 0 in both components".into(),
            ));
        }
        if self.clusters_per_level.contains(&0) {
            return Err(Error::InvalidConfig(
                "clusters_per_level entries must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Generates base points plus one k-means summary level per `clusters_per_level` entry.
///
/// Base labels are named `point-<i>`; summary labels `level <l>\ncluster <j>`. Output is
/// ordered by level and deterministic for a given RNG state.
pub fn generate_hierarchy(spec: &HierarchySpec, rng: &mut dyn RngCore) -> Result<Vec<Label>> {
    spec.validate()?;

    let half = spec.extent * 0.5;
    let centers: Vec<Vec2> = (0..spec.blobs)
        .map(|_| Vec2::new(rand01(rng) * spec.extent.x, rand01(rng) * spec.extent.y) - half)
        .collect();

    let base: Vec<Vec2> = (0..spec.samples)
        .map(|i| {
            let (nx, ny) = box_muller_pair(rng);
            centers[i % centers.len()] + Vec2::new(nx, ny) * spec.blob_sigma
        })
        .collect();

    let mut labels: Vec<Label> = base
        .iter()
        .enumerate()
        .map(|(i, &p)| Label::new(p, 0, format!("point-{i}")))
        .collect();

    for (level_index, &k) in spec.clusters_per_level.iter().enumerate() {
        let level = level_index as u32 + 1;
        let summary = kmeans(&base, k, spec.kmeans_iterations, rng);
        debug!(
            "Level {}: {} cluster centers from {} points.",
            level,
            summary.len(),
            base.len()
        );
        labels.extend(
            summary
                .into_iter()
                .enumerate()
                .map(|(j, p)| Label::new(p, level, format!("level {level}\ncluster {j}"))),
        );
    }

    Ok(labels)
}

/// Lloyd's k-means. Initial centers are `k` distinct points; `k` is capped at `points.len()`.
pub fn kmeans(points: &[Vec2], k: usize, iterations: usize, rng: &mut dyn RngCore) -> Vec<Vec2> {
    let k = k.min(points.len());
    if k == 0 {
        return Vec::new();
    }

    // Partial Fisher-Yates over indices for distinct seeds.
    let mut order: Vec<usize> = (0..points.len()).collect();
    for i in 0..k {
        let span = order.len() - i;
        let j = i + ((rand01(rng) * span as f32) as usize).min(span - 1);
        order.swap(i, j);
    }
    let mut centers: Vec<Vec2> = order[..k].iter().map(|&i| points[i]).collect();

    let mut sums = vec![Vec2::ZERO; k];
    let mut counts = vec![0usize; k];
    for _ in 0..iterations {
        sums.fill(Vec2::ZERO);
        counts.fill(0);

        for &p in points {
            let nearest = nearest_center(&centers, p);
            sums[nearest] += p;
            counts[nearest] += 1;
        }

        let mut moved = false;
        for ((center, &sum), &count) in centers.iter_mut().zip(&sums).zip(&counts) {
            // Empty clusters keep their previous center.
            if count == 0 {
                continue;
            }
            let next = sum / count as f32;
            if next != *center {
                moved = true;
                *center = next;
            }
        }
        if !moved {
            break;
        }
    }

    centers
}

fn nearest_center(centers: &[Vec2], p: Vec2) -> usize {
    centers
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance_squared(p).total_cmp(&b.distance_squared(p)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[inline]
fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

fn box_muller_pair(rng: &mut dyn RngCore) -> (f32, f32) {
    let u1 = (1.0 - rand01(rng)).clamp(f32::MIN_POSITIVE, 1.0);
    let u2 = rand01(rng);

    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * core::f32::consts::PI * u2;

    (r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::level::partition;

    fn small_spec() -> HierarchySpec {
        HierarchySpec::new(120, 6).with_clusters_per_level(vec![24, 8, 2])
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_hierarchy(&HierarchySpec::new(0, 4), &mut rng).is_err());
        assert!(generate_hierarchy(&HierarchySpec::new(10, 0), &mut rng).is_err());
        let zero_level = HierarchySpec::new(10, 2).with_clusters_per_level(vec![4, 0]);
        assert!(generate_hierarchy(&zero_level, &mut rng).is_err());
        let flat = HierarchySpec::new(10, 2).with_extent(Vec2::new(0.0, 5.0));
        assert!(generate_hierarchy(&flat, &mut rng).is_err());
    }

    #[test]
    fn levels_have_requested_sizes() {
        let mut rng = StdRng::seed_from_u64(42);
        let labels = generate_hierarchy(&small_spec(), &mut rng).unwrap();
        let set = partition(labels, &Label::level_of).unwrap();
        assert_eq!(set.bucket_sizes(), vec![120, 24, 8, 2]);
        assert_eq!(set.bucket_items(0).next().unwrap().text, "point-0");
        assert_eq!(set.bucket_items(2).next().unwrap().text, "level 2\ncluster 0");
    }

    #[test]
    fn generation_is_deterministic_for_same_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let la = generate_hierarchy(&small_spec(), &mut a).unwrap();
        let lb = generate_hierarchy(&small_spec(), &mut b).unwrap();
        assert_eq!(la, lb);
    }

    #[test]
    fn kmeans_caps_k_and_handles_empty_input() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(kmeans(&[], 4, 10, &mut rng).is_empty());
        let points = [Vec2::ZERO, Vec2::ONE];
        assert_eq!(kmeans(&points, 5, 10, &mut rng).len(), 2);
    }

    #[test]
    fn kmeans_finds_separated_clusters() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut points = Vec::new();
        for i in 0..20 {
            let jitter = i as f32 * 0.01;
            points.push(Vec2::new(-10.0 + jitter, 0.0));
            points.push(Vec2::new(10.0 - jitter, 0.0));
        }
        let mut centers = kmeans(&points, 2, 32, &mut rng);
        centers.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert!((centers[0].x + 9.905).abs() < 1e-3);
        assert!((centers[1].x - 9.905).abs() < 1e-3);
    }
}
