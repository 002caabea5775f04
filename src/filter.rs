use crate::hls::Hls;

const BLACK_MAX_LIGHTNESS: f32 = 0.12;
const WHITE_MIN_LIGHTNESS: f32 = 0.92;
const GRAY_MAX_SATURATION: f32 = 0.15;

/// Below this many surviving samples a pre-filter is abandoned and the unfiltered sample set is clustered instead.
pub const MIN_FILTERED_SAMPLES: usize = 10;

/// A trait used to implement pre-filters for the sample set.
///
/// Before clustering, filters drop sample pixels that are unlikely to be dyed fabric, such as studio backdrops,
/// deep shadows or skin. The same color is given in both sRGB and HLS for convenience.
///
/// See [`crate::FabricExtractor::add_filter`] on how to add filters to the extraction.
pub trait Filter {
    fn is_allowed(&self, rgb: (u8, u8, u8), hls: Hls) -> bool;
}

/// Keeps "colorful" pixels: drops near-black, near-white and low-saturation samples.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromaticBand {
    pub min_lightness: f32,
    pub max_lightness: f32,
    pub min_saturation: f32,
}

impl Default for ChromaticBand {
    fn default() -> Self {
        Self {
            min_lightness: BLACK_MAX_LIGHTNESS,
            max_lightness: WHITE_MIN_LIGHTNESS,
            min_saturation: GRAY_MAX_SATURATION,
        }
    }
}

impl Filter for ChromaticBand {
    fn is_allowed(&self, _: (u8, u8, u8), hls: Hls) -> bool {
        hls.lightness > self.min_lightness && hls.lightness < self.max_lightness && hls.saturation >= self.min_saturation
    }
}

impl<F> Filter for F
where
    F: Fn((u8, u8, u8), Hls) -> bool,
{
    fn is_allowed(&self, rgb: (u8, u8, u8), hls: Hls) -> bool {
        self(rgb, hls)
    }
}

/// Outcome of running the pre-filters over a sample set.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Filtered {
    pub samples: Vec<(u8, u8, u8)>,
    /// Number of samples the filters let through, even when the result was abandoned.
    pub kept: usize,
    pub starved: bool,
}

/// Applies every filter to the samples. If the filters leave fewer than [`MIN_FILTERED_SAMPLES`] pixels, filtering is
/// abandoned and the original samples are returned.
pub(crate) fn apply_filters(samples: Vec<(u8, u8, u8)>, filters: &[Box<dyn Filter>]) -> Filtered {
    if filters.is_empty() {
        let kept = samples.len();
        return Filtered {
            samples,
            kept,
            starved: false,
        };
    }

    let allowed = samples
        .iter()
        .copied()
        .filter(|&rgb| {
            let hls = Hls::from_rgb(rgb);
            filters.iter().all(|filter| filter.is_allowed(rgb, hls))
        })
        .collect::<Vec<_>>();

    let kept = allowed.len();
    if kept < MIN_FILTERED_SAMPLES {
        Filtered {
            samples,
            kept,
            starved: true,
        }
    } else {
        Filtered {
            samples: allowed,
            kept,
            starved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> Vec<Box<dyn Filter>> {
        vec![Box::new(ChromaticBand::default())]
    }

    #[test]
    fn band_rejects_backdrops() {
        let band = ChromaticBand::default();
        let allowed = |rgb| band.is_allowed(rgb, Hls::from_rgb(rgb));

        assert!(allowed((200, 30, 40)));
        assert!(allowed((30, 60, 160)));
        assert!(!allowed((255, 255, 255)));
        assert!(!allowed((250, 248, 245)));
        assert!(!allowed((5, 5, 8)));
        assert!(!allowed((128, 128, 128)));
    }

    #[test]
    fn keeps_only_colorful_samples() {
        let mut samples = vec![(255, 255, 255); 50];
        samples.extend(vec![(200, 20, 20); 20]);

        let filtered = apply_filters(samples, &band());

        assert!(!filtered.starved);
        assert_eq!(filtered.kept, 20);
        assert!(filtered.samples.iter().all(|&rgb| rgb == (200, 20, 20)));
    }

    #[test]
    fn starved_filter_is_abandoned() {
        let mut samples = vec![(255, 255, 255); 95];
        samples.extend(vec![(200, 20, 20); 5]);

        let filtered = apply_filters(samples.clone(), &band());

        assert!(filtered.starved);
        assert_eq!(filtered.kept, 5);
        assert_eq!(filtered.samples, samples);
    }

    #[test]
    fn tiny_sample_sets_are_never_filtered() {
        let samples = vec![(255, 255, 255), (200, 20, 20), (10, 200, 30)];

        let filtered = apply_filters(samples.clone(), &band());

        assert!(filtered.starved);
        assert_eq!(filtered.kept, 2);
        assert_eq!(filtered.samples, samples);
    }

    #[test]
    fn closures_are_filters() {
        let filters: Vec<Box<dyn Filter>> = vec![Box::new(|(r, _, _): (u8, u8, u8), _: Hls| r > 100)];
        let samples = (0..20).map(|i| (i * 10, 0, 0)).collect();

        let filtered = apply_filters(samples, &filters);

        assert_eq!(filtered.kept, 9);
        assert!(filtered.starved);
        assert_eq!(filtered.samples.len(), 20);

        let filters: Vec<Box<dyn Filter>> = vec![Box::new(|(r, _, _): (u8, u8, u8), _: Hls| r >= 50)];
        let samples = (0..20).map(|i| (i * 10, 0, 0)).collect();

        let filtered = apply_filters(samples, &filters);

        assert!(!filtered.starved);
        assert_eq!(filtered.samples.len(), 15);
    }
}
