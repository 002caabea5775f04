use crate::hls::Hls;
use kmeans_colors::{get_kmeans, Calculate};
use palette::Srgb;
use std::collections::HashSet;

/// A k-means centroid and the number of samples assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    red: u8,
    green: u8,
    blue: u8,
    population: u32,
}

impl Cluster {
    pub fn new((red, green, blue): (u8, u8, u8), population: u32) -> Cluster {
        Self {
            red,
            green,
            blue,
            population,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn hls(self) -> Hls {
        Hls::from_rgb(self.rgb())
    }

    pub fn population(self) -> u32 {
        self.population
    }
}

/// Parameters of one k-means clustering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct KmeansParams {
    pub k: usize,
    pub restarts: usize,
    pub max_iter: usize,
    pub converge: f32,
    pub seed: u64,
}

/// Result of [`cluster_samples`]. `k` is the cluster count actually used.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Clustering {
    pub clusters: Vec<Cluster>,
    pub k: usize,
    /// Sum of squared distances from every sample to its centroid, in `[0, 1]` RGB units.
    pub inertia: f64,
}

/// Clusters the samples in RGB space and returns the non-empty clusters in centroid order.
///
/// The requested `k` is reduced to the number of distinct sample colors. Every restart uses its own seed derived from
/// `params.seed`. The samples are then reassigned to each run's final centroids, and the run with the lowest inertia
/// wins, so the outcome is deterministic for fixed parameters. Runs that hit `max_iter` without converging still
/// return their last iterate.
pub(crate) fn cluster_samples(samples: &[(u8, u8, u8)], params: KmeansParams) -> Clustering {
    let distinct = samples.iter().copied().collect::<HashSet<_>>().len();
    let k = params.k.min(distinct);

    if k == 0 {
        return Clustering {
            clusters: Vec::new(),
            k,
            inertia: 0.0,
        };
    }

    let buf = linear(samples);

    let mut best: Option<(Vec<Srgb>, Vec<u32>, f64)> = None;
    for run in 0..params.restarts.max(1) as u64 {
        let seed = params.seed.wrapping_add(run);
        let result = get_kmeans(k, params.max_iter, params.converge, false, &buf, seed);
        let (populations, inertia) = assign(&buf, &result.centroids);
        log::trace!("k-means run {} (seed {}) inertia {:.4}", run, seed, inertia);

        if best.as_ref().map_or(true, |(_, _, lowest)| inertia < *lowest) {
            best = Some((result.centroids, populations, inertia));
        }
    }

    let (centroids, populations, inertia) = best.unwrap_or_default();

    let clusters = centroids
        .iter()
        .zip(populations)
        .filter(|(_, population)| *population > 0)
        .map(|(centroid, population)| Cluster::new(centroid.into_format::<u8>().into_components(), population))
        .collect();

    Clustering { clusters, k, inertia }
}

fn linear(samples: &[(u8, u8, u8)]) -> Vec<Srgb> {
    samples
        .iter()
        .map(|&rgb| Srgb::<u8>::from_components(rgb).into_format::<f32>())
        .collect()
}

/// Assigns every sample to its nearest centroid, the first one on ties. Returns the population of each centroid and
/// the summed squared distance of the assignment.
fn assign(buf: &[Srgb], centroids: &[Srgb]) -> (Vec<u32>, f64) {
    let mut populations = vec![0u32; centroids.len()];
    let mut inertia = 0.0;

    for color in buf {
        let nearest = centroids
            .iter()
            .map(|centroid| Calculate::difference(color, centroid))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((index, distance)) = nearest {
            populations[index] += 1;
            inertia += distance as f64;
        }
    }

    (populations, inertia)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn params(k: usize) -> KmeansParams {
        KmeansParams {
            k,
            restarts: 3,
            max_iter: 20,
            converge: 0.0025,
            seed: 0,
        }
    }

    #[test]
    fn separates_well_spread_colors() {
        let mut samples = vec![(250, 10, 10); 40];
        samples.extend(vec![(10, 10, 250); 30]);
        samples.extend(vec![(10, 250, 10); 20]);

        let clustering = cluster_samples(&samples, params(3));

        assert_eq!(clustering.k, 3);
        assert_eq!(clustering.clusters.len(), 3);

        let mut found = clustering
            .clusters
            .iter()
            .map(|cluster| (cluster.rgb(), cluster.population()))
            .collect::<Vec<_>>();
        found.sort();

        assert_eq!(found, vec![((10, 10, 250), 30), ((10, 250, 10), 20), ((250, 10, 10), 40)]);
    }

    #[test]
    fn k_is_reduced_to_distinct_colors() {
        let samples = vec![(1, 2, 3), (1, 2, 3), (200, 100, 50)];

        let clustering = cluster_samples(&samples, params(8));

        assert_eq!(clustering.k, 2);
        assert_eq!(clustering.clusters.iter().map(|c| c.population()).sum::<u32>(), 3);
    }

    #[test]
    fn empty_samples_give_no_clusters() {
        let clustering = cluster_samples(&[], params(4));

        assert_eq!(clustering.k, 0);
        assert!(clustering.clusters.is_empty());
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        let samples = (0..400u32)
            .map(|i| ((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect::<Vec<_>>();

        assert_eq!(cluster_samples(&samples, params(6)), cluster_samples(&samples, params(6)));
    }

    #[test]
    fn keeps_the_restart_with_lowest_inertia() {
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..20 {
            let centers = (0..8).map(|_| [rng.gen::<u8>(), rng.gen(), rng.gen()]).collect::<Vec<_>>();
            let samples = (0..400)
                .map(|i| {
                    let [r, g, b] = centers[i % centers.len()];
                    (
                        r.saturating_add_signed(rng.gen_range(-12..=12)),
                        g.saturating_add_signed(rng.gen_range(-12..=12)),
                        b.saturating_add_signed(rng.gen_range(-12..=12)),
                    )
                })
                .collect::<Vec<_>>();

            let kept = cluster_samples(&samples, params(5));
            let best_single = (0..3)
                .map(|seed| {
                    cluster_samples(
                        &samples,
                        KmeansParams {
                            restarts: 1,
                            seed,
                            ..params(5)
                        },
                    )
                    .inertia
                })
                .fold(f64::INFINITY, f64::min);

            assert!(kept.inertia <= best_single, "{} > {}", kept.inertia, best_single);
        }
    }

    #[test]
    fn assignment_uses_nearest_centroid() {
        let buf = linear(&[(0, 0, 0), (10, 0, 0), (250, 250, 250), (255, 255, 255), (128, 128, 128)]);
        let centroids = linear(&[(0, 0, 0), (255, 255, 255), (0, 0, 255)]);

        let (populations, inertia) = assign(&buf, &centroids);

        assert_eq!(populations, vec![2, 3, 0]);
        assert!(inertia > 0.0);
    }

    #[test]
    fn populations_follow_the_final_centroids() {
        // a single iteration stops before the assignment catches up with the moved centroids
        let samples = (0..400u32)
            .map(|i| ((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect::<Vec<_>>();
        let single = KmeansParams {
            max_iter: 1,
            restarts: 1,
            ..params(6)
        };

        let buf = linear(&samples);
        let run = get_kmeans(6, 1, single.converge, false, &buf, single.seed);
        let (expected, _) = assign(&buf, &run.centroids);

        let clustering = cluster_samples(&samples, single);

        assert_eq!(
            clustering.clusters.iter().map(|c| c.population()).collect::<Vec<_>>(),
            expected.into_iter().filter(|&p| p > 0).collect::<Vec<_>>()
        );
    }
}
