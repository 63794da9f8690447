use crate::{seeder::seed_centroids, ColorPoint};

/// The default number of assignment/update cycles after which clustering stops even if it hasn't converged.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// A final cluster: its centroid and how many points were assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    centroid: ColorPoint,
    population: u32,
}

/// The outcome of a clustering run. Clusters are in centroid order, i.e. the order the seeds were picked in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterResult {
    pub clusters: Vec<Cluster>,
    pub iterations: usize,
    pub converged: bool,
}

/// Lloyd's K-Means over raw RGB points, seeded deterministically with [`seed_centroids`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
}

impl Cluster {
    pub fn new(centroid: ColorPoint, population: u32) -> Cluster {
        Self { centroid, population }
    }

    pub fn centroid(self) -> ColorPoint {
        self.centroid
    }

    pub fn population(self) -> u32 {
        self.population
    }
}

impl ClusterResult {
    fn empty() -> Self {
        Self {
            clusters: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self { max_iterations, ..self }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Seed `k` centroids from the points and refine them. An empty point set, or `k` of zero, gives no clusters.
    pub fn run(&self, points: &[ColorPoint]) -> ClusterResult {
        let centroids = seed_centroids(points, self.k);
        self.run_from(points, centroids)
    }

    /// Refine the given initial centroids over the points until they stop moving or the iteration cap is hit.
    ///
    /// Hitting the cap isn't an error: the last computed centroids and memberships are returned with `converged` unset.
    pub fn run_from(&self, points: &[ColorPoint], mut centroids: Vec<ColorPoint>) -> ClusterResult {
        if points.is_empty() || centroids.is_empty() {
            return ClusterResult::empty();
        }

        let mut members: Vec<Vec<ColorPoint>> = vec![Vec::new(); centroids.len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            // memberships only live for the current iteration
            for cluster in &mut members {
                cluster.clear();
            }

            for &point in points {
                members[nearest_centroid(point, &centroids)].push(point);
            }

            let updated: Vec<ColorPoint> = centroids
                .iter()
                .zip(&members)
                .map(|(&centroid, cluster)| mean_color(cluster).unwrap_or(centroid))
                .collect();

            converged = updated == centroids;
            centroids = updated;

            log::trace!("k-means iteration {iterations}: {centroids:?}");

            if converged {
                break;
            }
        }

        log::debug!(
            "k-means over {} points with k = {} finished after {iterations} iterations (converged: {converged})",
            points.len(),
            centroids.len()
        );

        let clusters = centroids
            .into_iter()
            .zip(&members)
            .map(|(centroid, cluster)| Cluster::new(centroid, cluster.len() as u32))
            .collect();

        ClusterResult {
            clusters,
            iterations,
            converged,
        }
    }
}

/// The index of the centroid closest to the point. Equal distances resolve to the lowest index.
fn nearest_centroid(point: ColorPoint, centroids: &[ColorPoint]) -> usize {
    let mut nearest = 0;
    let mut nearest_distance = u32::MAX;

    for (index, centroid) in centroids.iter().enumerate() {
        let distance = point.squared_distance(*centroid);

        if distance < nearest_distance {
            nearest = index;
            nearest_distance = distance;
        }
    }

    nearest
}

/// The per-channel mean of the colors, each channel rounded half up to the nearest integer. `None` for no colors.
fn mean_color(colors: &[ColorPoint]) -> Option<ColorPoint> {
    if colors.is_empty() {
        return None;
    }

    let (red_sum, green_sum, blue_sum) = colors
        .iter()
        .fold((0u64, 0u64, 0u64), |(red_sum, green_sum, blue_sum), color| {
            (
                red_sum + color.red() as u64,
                green_sum + color.green() as u64,
                blue_sum + color.blue() as u64,
            )
        });

    let count = colors.len() as u64;
    // the mean of 8-bit values stays within 8 bits, so the narrowing below can't truncate
    let rounded_mean = |sum: u64| ((2 * sum + count) / (2 * count)) as u8;

    Some(ColorPoint::new(
        rounded_mean(red_sum),
        rounded_mean(green_sum),
        rounded_mean(blue_sum),
    ))
}
