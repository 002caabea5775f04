// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract the dye color of a photographed garment and propose companion colors for it.
//!
//! Extraction crops the photo toward its center, area-averages the crop down to a small grid, optionally drops
//! pixels that cannot be dyed fabric, clusters the rest with k-means and scores each centroid by saturation and
//! lightness. The harmony generator then rotates the chosen color's hue in HLS space.
//!
//! ```no_run
//! use stylematch::{generate_palette, FabricExtractor, Preset, Scheme};
//!
//! let image = stylematch::image::open("kurta.jpg").unwrap().to_rgb8();
//! let extraction = FabricExtractor::from_preset(Preset::Balanced).extract(&image).unwrap();
//! let palette = generate_palette(extraction.color(), Scheme::Classic);
//!
//! for (role, rgb) in palette.iter() {
//!     println!("{}: {}", role, stylematch::format_hex(rgb));
//! }
//! ```

mod cluster;
mod config;
mod error;
mod filter;
mod garment;
mod harmony;
mod hex;
mod hls;
mod region;
mod sampling;
mod scoring;

pub use crate::{
    cluster::Cluster,
    config::{ExtractorConfig, Preset, DEFAULT_CLUSTERS, MAX_CLUSTERS},
    error::{Error, InvalidImage, Result},
    filter::{ChromaticBand, Filter, MIN_FILTERED_SAMPLES},
    garment::Garment,
    harmony::{generate_palette, generate_palette_with, HarmonyRules, Palette, Role, Scheme},
    hex::{css_rgb, format_hex, parse_hex},
    hls::{hls_to_rgb, rgb_to_hls, Hls},
    region::Roi,
    sampling::{pick_pixel, DEFAULT_SAMPLE_GRID},
    scoring::{
        Candidate, LightnessBand, ScoreFormula, ScoringPolicy, Selection, SkinTonePenalty, ACHROMATIC_MAX_SATURATION,
        NEUTRAL_GRAY,
    },
};
pub use image;
pub use palette;

use cluster::{cluster_samples, KmeansParams};
use filter::apply_filters;
use image::{math::Rect, RgbImage};

/// A condition the pipeline worked around instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recovery {
    /// The region contained no pixel; the whole image was used.
    DegenerateRoi,
    /// The pre-filters left fewer than [`MIN_FILTERED_SAMPLES`] samples; they were ignored.
    FilterStarved { kept: usize },
    /// There were fewer distinct sample colors than requested clusters; k was reduced.
    ClusteringUnderflow { requested: usize, used: usize },
    /// No centroid passed the lightness band; the fallback chain picked the color.
    NoChromaticCandidate,
}

/// The outcome of one extraction, with everything that led to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extraction {
    color: (u8, u8, u8),
    region: (u32, u32, u32, u32),
    sample_count: usize,
    candidates: Vec<Candidate>,
    selection: Selection,
    recoveries: Vec<Recovery>,
}

impl Extraction {
    /// The color judged to be the garment's dye.
    pub fn color(&self) -> (u8, u8, u8) {
        self.color
    }

    pub fn hls(&self) -> Hls {
        Hls::from_rgb(self.color)
    }

    /// The analyzed region as `(x, y, width, height)`.
    pub fn region(&self) -> (u32, u32, u32, u32) {
        self.region
    }

    /// Number of samples that were clustered.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn recoveries(&self) -> &[Recovery] {
        &self.recoveries
    }
}

pub struct FabricExtractor {
    config: ExtractorConfig,
    filters: Vec<Box<dyn Filter>>,
}

impl FabricExtractor {
    pub fn new() -> Self {
        Self::from_config(ExtractorConfig::default())
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self::from_config(preset.config())
    }

    /// Builds an extractor from a configuration. The configured pre-filter, if any, becomes the first filter.
    pub fn from_config(config: ExtractorConfig) -> Self {
        let filters = config
            .prefilter
            .map(|band| Box::new(band) as Box<dyn Filter>)
            .into_iter()
            .collect();

        Self { config, filters }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn region(self, roi: Roi) -> Self {
        Self {
            config: ExtractorConfig { roi, ..self.config },
            ..self
        }
    }

    pub fn clusters(self, clusters: usize) -> Self {
        Self {
            config: ExtractorConfig { clusters, ..self.config },
            ..self
        }
    }

    pub fn sample_grid(self, width: u32, height: u32) -> Self {
        Self {
            config: ExtractorConfig {
                sample_grid: (width, height),
                ..self.config
            },
            ..self
        }
    }

    pub fn scoring(self, scoring: ScoringPolicy) -> Self {
        Self {
            config: ExtractorConfig { scoring, ..self.config },
            ..self
        }
    }

    pub fn restarts(self, restarts: usize) -> Self {
        Self {
            config: ExtractorConfig { restarts, ..self.config },
            ..self
        }
    }

    pub fn seed(self, seed: u64) -> Self {
        Self {
            config: ExtractorConfig { seed, ..self.config },
            ..self
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Removes every filter, including the configured pre-filter.
    pub fn clear_filters(self) -> Self {
        Self {
            config: ExtractorConfig {
                prefilter: None,
                ..self.config
            },
            filters: Vec::new(),
        }
    }

    /// Extracts the fabric color from an RGB image.
    ///
    /// Fails only for a zero-sized image or an unusable configuration; every other problem degrades to a best-effort
    /// answer recorded in [`Extraction::recoveries`].
    pub fn extract(&self, image: &RgbImage) -> Result<Extraction> {
        let (width, height) = image.dimensions();
        sampling::validate_dimensions(width, height)?;
        self.config.validate()?;

        let mut recoveries = Vec::new();

        let (region, degenerate) = self.config.roi.resolve_or_full(width, height);
        if degenerate {
            log::debug!("region {:?} is empty in a {}x{} image, using the full image", self.config.roi, width, height);
            recoveries.push(Recovery::DegenerateRoi);
        }

        let samples = sampling::sample_region(image, region, self.config.sample_grid);
        log::debug!("sampled {} pixels from region {:?}", samples.len(), region);

        let filtered = apply_filters(samples, &self.filters);
        if filtered.starved {
            log::debug!(
                "filters kept only {} of {} samples, clustering unfiltered samples",
                filtered.kept,
                filtered.samples.len()
            );
            recoveries.push(Recovery::FilterStarved { kept: filtered.kept });
        }

        let clustering = cluster_samples(
            &filtered.samples,
            KmeansParams {
                k: self.config.clusters,
                restarts: self.config.restarts,
                max_iter: self.config.max_iter,
                converge: self.config.converge,
                seed: self.config.seed,
            },
        );
        if clustering.k < self.config.clusters {
            log::debug!(
                "only {} distinct sample colors, reducing k from {}",
                clustering.k,
                self.config.clusters
            );
            recoveries.push(Recovery::ClusteringUnderflow {
                requested: self.config.clusters,
                used: clustering.k,
            });
        }

        let candidates = scoring::score_clusters(&clustering.clusters, self.config.scoring);
        let (color, selection) = scoring::select(&candidates);
        if selection != Selection::Scored {
            log::debug!("no candidate inside the lightness band, fell back to {:?}", selection);
            recoveries.push(Recovery::NoChromaticCandidate);
        }

        Ok(Extraction {
            color,
            region: rect_tuple(region),
            sample_count: filtered.samples.len(),
            candidates,
            selection,
            recoveries,
        })
    }

    /// Extracts the fabric color from a row-major interleaved pixel buffer.
    pub fn extract_raw(&self, width: u32, height: u32, channels: usize, data: &[u8]) -> Result<Extraction> {
        let image = sampling::image_from_raw(width, height, channels, data)?;
        self.extract(&image)
    }
}

impl Default for FabricExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the fabric color using the given region, cluster count and scoring policy, with every other parameter
/// at its default.
pub fn extract_fabric_color(image: &RgbImage, roi: Roi, k: usize, scoring: ScoringPolicy) -> Result<(u8, u8, u8)> {
    FabricExtractor::new()
        .region(roi)
        .clusters(k)
        .scoring(scoring)
        .extract(image)
        .map(|extraction| extraction.color())
}

fn rect_tuple(rect: Rect) -> (u32, u32, u32, u32) {
    (rect.x, rect.y, rect.width, rect.height)
}
