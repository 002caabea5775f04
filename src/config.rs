//! Tunable parameters of the extraction pipeline and the named presets built from them.
//!
//! Every knob lives in [`ExtractorConfig`]. The presets only differ in crop, cluster count and scoring; they all run
//! through the same code.

use crate::{
    filter::ChromaticBand,
    region::Roi,
    sampling::DEFAULT_SAMPLE_GRID,
    scoring::{ScoringPolicy, SkinTonePenalty},
    Error, Result,
};
use std::{fmt, str::FromStr};

pub const DEFAULT_CLUSTERS: usize = 5;
pub const DEFAULT_RESTARTS: usize = 3;
pub const DEFAULT_MAX_ITER: usize = 20;
/// Convergence threshold on centroid movement, in `[0, 1]` RGB units.
pub const DEFAULT_CONVERGE: f32 = 0.0025;

/// Cluster labels are 8-bit.
pub const MAX_CLUSTERS: usize = 255;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractorConfig {
    /// Region of the photo to analyze
    pub roi: Roi,

    /// Maximum (width, height) of the downsampled sample grid
    pub sample_grid: (u32, u32),

    /// Optional "colorful pixels only" pre-filter
    pub prefilter: Option<ChromaticBand>,

    /// Requested k-means cluster count, reduced to the number of distinct samples when needed
    pub clusters: usize,

    /// Number of k-means initializations; the lowest-score run wins
    pub restarts: usize,

    pub max_iter: usize,

    pub converge: f32,

    /// Seed of the first initialization
    pub seed: u64,

    pub scoring: ScoringPolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Preset::Balanced.config()
    }
}

impl ExtractorConfig {
    /// Checks the parameters that cannot be recovered from at extraction time.
    pub fn validate(&self) -> Result<()> {
        if self.clusters == 0 || self.clusters > MAX_CLUSTERS {
            return Err(Error::parameter("clusters", self.clusters));
        }

        if self.sample_grid.0 == 0 || self.sample_grid.1 == 0 {
            return Err(Error::parameter(
                "sample_grid",
                format!("{}x{}", self.sample_grid.0, self.sample_grid.1),
            ));
        }

        if self.restarts == 0 {
            return Err(Error::parameter("restarts", self.restarts));
        }

        if self.max_iter == 0 {
            return Err(Error::parameter("max_iter", self.max_iter));
        }

        if !self.converge.is_finite() || self.converge < 0.0 {
            return Err(Error::parameter("converge", self.converge));
        }

        Ok(())
    }

    #[cfg(feature = "cli")]
    pub fn from_json_file(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            serde_json::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;

        Ok(config)
    }
}

/// Named starting points for [`ExtractorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preset {
    /// Central half of the frame, moderate cluster count, vibrancy scoring.
    #[default]
    Balanced,
    /// Central 30%, few clusters. For flat-lay product shots with a lot of backdrop.
    TightCropVibrant,
    /// Weighted scoring that keeps light pastel fabrics from losing to darker trims.
    PastelAware,
    /// Center-top crop with a skin-tone penalty, for garments worn by a model.
    TopBiased,
    /// Whole frame, many clusters, no pre-filter.
    WideScan,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Balanced,
        Preset::TightCropVibrant,
        Preset::PastelAware,
        Preset::TopBiased,
        Preset::WideScan,
    ];

    pub fn config(self) -> ExtractorConfig {
        let base = ExtractorConfig {
            roi: Roi::centered(0.25, 0.25),
            sample_grid: DEFAULT_SAMPLE_GRID,
            prefilter: Some(ChromaticBand::default()),
            clusters: DEFAULT_CLUSTERS,
            restarts: DEFAULT_RESTARTS,
            max_iter: DEFAULT_MAX_ITER,
            converge: DEFAULT_CONVERGE,
            seed: 0,
            scoring: ScoringPolicy::vibrant(),
        };

        match self {
            Preset::Balanced => base,
            Preset::TightCropVibrant => ExtractorConfig {
                roi: Roi::centered(0.15, 0.15),
                sample_grid: (60, 60),
                clusters: 4,
                ..base
            },
            Preset::PastelAware => ExtractorConfig {
                clusters: 6,
                scoring: ScoringPolicy::pastel_aware(),
                ..base
            },
            Preset::TopBiased => ExtractorConfig {
                roi: Roi::Edges {
                    top: 0.15,
                    bottom: 0.6,
                    left: 0.25,
                    right: 0.75,
                },
                clusters: 8,
                scoring: ScoringPolicy::vibrant().skin_tone_penalty(SkinTonePenalty::default()),
                ..base
            },
            Preset::WideScan => ExtractorConfig {
                roi: Roi::Full,
                prefilter: None,
                clusters: 12,
                ..base
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Balanced => "balanced",
            Preset::TightCropVibrant => "tight-crop-vibrant",
            Preset::PastelAware => "pastel-aware",
            Preset::TopBiased => "top-biased",
            Preset::WideScan => "wide-scan",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            assert_eq!(preset.config().validate(), Ok(()), "{preset}");
            assert!((4..=12).contains(&preset.config().clusters), "{preset}");
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
        assert!("vibrant".parse::<Preset>().is_err());
    }

    #[test]
    fn rejects_unusable_parameters() {
        let config = ExtractorConfig {
            clusters: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::InvalidParameter {
                parameter: "clusters",
                value: "0".to_string()
            })
        );

        let config = ExtractorConfig {
            clusters: 256,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractorConfig {
            sample_grid: (0, 60),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractorConfig {
            converge: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
