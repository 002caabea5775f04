use crate::{cluster::Cluster, hls::Hls};

const WEIGHT_SATURATION: f32 = 0.65;
const WEIGHT_LIGHTNESS: f32 = 0.35;

const MIN_FABRIC_LIGHTNESS: f32 = 0.1;
const MAX_FABRIC_LIGHTNESS: f32 = 0.97;

/// Centroids at or below this saturation count as achromatic.
pub const ACHROMATIC_MAX_SATURATION: f32 = 0.02;
/// Returned when every candidate is achromatic and none passed the lightness band.
pub const NEUTRAL_GRAY: (u8, u8, u8) = (128, 128, 128);

/// How a candidate's vibrancy score is computed from its HLS coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreFormula {
    /// `saturation * (1 - |lightness - 0.5|)`: rewards saturated mid-tones.
    Vibrancy,
    /// `saturation_weight * saturation + lightness_weight * lightness`: leans toward lighter, pastel fabrics.
    Weighted { saturation_weight: f32, lightness_weight: f32 },
}

impl ScoreFormula {
    pub fn weighted(saturation_weight: f32, lightness_weight: f32) -> Self {
        let sum = saturation_weight + lightness_weight;

        if sum > 0.0 {
            ScoreFormula::Weighted {
                saturation_weight: saturation_weight / sum,
                lightness_weight: lightness_weight / sum,
            }
        } else {
            ScoreFormula::Weighted {
                saturation_weight,
                lightness_weight,
            }
        }
    }

    pub fn score(self, hls: Hls) -> f32 {
        match self {
            ScoreFormula::Vibrancy => hls.saturation * (1.0 - (hls.lightness - 0.5).abs()),
            ScoreFormula::Weighted {
                saturation_weight,
                lightness_weight,
            } => saturation_weight * hls.saturation + lightness_weight * hls.lightness,
        }
    }
}

/// An exclusive lightness range; centroids outside it are treated as shadow or highlight, never as fabric.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightnessBand {
    pub min: f32,
    pub max: f32,
}

impl LightnessBand {
    pub fn contains(self, lightness: f32) -> bool {
        lightness > self.min && lightness < self.max
    }
}

impl Default for LightnessBand {
    fn default() -> Self {
        Self {
            min: MIN_FABRIC_LIGHTNESS,
            max: MAX_FABRIC_LIGHTNESS,
        }
    }
}

/// De-prioritizes candidates that look like skin by multiplying their score by `factor`.
///
/// This is a rough heuristic. The hue and saturation ranges only describe some skin tones under some lighting, and
/// a garment dyed in a matching hue is penalized just the same. It is off unless explicitly configured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkinTonePenalty {
    /// Hue range in turns, inclusive. A start above the end wraps through red, e.g. `(340/360, 50/360)`.
    pub hue: (f32, f32),
    pub saturation: (f32, f32),
    pub lightness: (f32, f32),
    pub factor: f32,
}

impl SkinTonePenalty {
    pub fn matches(self, hls: Hls) -> bool {
        self.hue_matches(hls.hue)
            && (self.saturation.0..=self.saturation.1).contains(&hls.saturation)
            && (self.lightness.0..=self.lightness.1).contains(&hls.lightness)
    }

    fn hue_matches(self, hue: f32) -> bool {
        let (start, end) = self.hue;

        if start <= end {
            (start..=end).contains(&hue)
        } else {
            hue >= start || hue <= end
        }
    }
}

impl Default for SkinTonePenalty {
    fn default() -> Self {
        Self {
            hue: (0.0, 50.0 / 360.0),
            saturation: (0.2, 0.7),
            lightness: (0.3, 0.85),
            factor: 0.5,
        }
    }
}

/// Decides which cluster centroid is the fabric.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringPolicy {
    formula: ScoreFormula,
    lightness_band: Option<LightnessBand>,
    skin_tone: Option<SkinTonePenalty>,
}

impl ScoringPolicy {
    /// Saturated mid-tones win; near-black and near-white centroids are excluded.
    pub fn vibrant() -> Self {
        Self {
            formula: ScoreFormula::Vibrancy,
            lightness_band: Some(LightnessBand::default()),
            skin_tone: None,
        }
    }

    /// Weighted saturation and lightness, so light pastel fabrics are not beaten by darker accents.
    pub fn pastel_aware() -> Self {
        Self {
            formula: ScoreFormula::weighted(WEIGHT_SATURATION, WEIGHT_LIGHTNESS),
            ..Self::vibrant()
        }
    }

    pub fn new(formula: ScoreFormula) -> Self {
        Self {
            formula,
            lightness_band: None,
            skin_tone: None,
        }
    }

    pub fn lightness_band(self, band: LightnessBand) -> Self {
        Self {
            lightness_band: Some(band),
            ..self
        }
    }

    pub fn clear_lightness_band(self) -> Self {
        Self {
            lightness_band: None,
            ..self
        }
    }

    pub fn skin_tone_penalty(self, penalty: SkinTonePenalty) -> Self {
        Self {
            skin_tone: Some(penalty),
            ..self
        }
    }

    pub fn formula(self) -> ScoreFormula {
        self.formula
    }

    pub fn band(self) -> Option<LightnessBand> {
        self.lightness_band
    }

    pub fn skin_tone(self) -> Option<SkinTonePenalty> {
        self.skin_tone
    }

    pub fn score(self, hls: Hls) -> f32 {
        let score = self.formula.score(hls);

        match self.skin_tone {
            Some(penalty) if penalty.matches(hls) => score * penalty.factor,
            _ => score,
        }
    }

    fn in_band(self, hls: Hls) -> bool {
        self.lightness_band.map_or(true, |band| band.contains(hls.lightness))
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::vibrant()
    }
}

/// A scored cluster centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub cluster: Cluster,
    pub hls: Hls,
    pub score: f32,
    pub in_band: bool,
}

/// How the extracted color was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Highest scoring candidate inside the lightness band.
    Scored,
    /// No candidate passed the band; the most saturated one was taken.
    MostSaturated,
    /// Everything was achromatic and outside the band, or there were no candidates at all.
    NeutralDefault,
}

pub(crate) fn score_clusters(clusters: &[Cluster], policy: ScoringPolicy) -> Vec<Candidate> {
    clusters
        .iter()
        .map(|&cluster| {
            let hls = cluster.hls();
            let candidate = Candidate {
                cluster,
                hls,
                score: policy.score(hls),
                in_band: policy.in_band(hls),
            };

            log::trace!(
                "candidate {:?} pop {} hls ({:.3}, {:.3}, {:.3}) score {:.4} in band {}",
                cluster.rgb(),
                cluster.population(),
                hls.hue,
                hls.lightness,
                hls.saturation,
                candidate.score,
                candidate.in_band
            );

            candidate
        })
        .collect()
}

/// Picks the fabric color from scored candidates. Ties go to the first candidate encountered.
pub(crate) fn select(candidates: &[Candidate]) -> ((u8, u8, u8), Selection) {
    if let Some(best) = first_max_by(candidates.iter().filter(|c| c.in_band), |c| c.score) {
        return (best.cluster.rgb(), Selection::Scored);
    }

    match first_max_by(candidates.iter(), |c| c.hls.saturation) {
        Some(most_saturated) if most_saturated.hls.saturation > ACHROMATIC_MAX_SATURATION => {
            (most_saturated.cluster.rgb(), Selection::MostSaturated)
        }
        _ => (NEUTRAL_GRAY, Selection::NeutralDefault),
    }
}

fn first_max_by<'a, I, F>(candidates: I, key: F) -> Option<&'a Candidate>
where
    I: Iterator<Item = &'a Candidate>,
    F: Fn(&Candidate) -> f32,
{
    let mut max_score = 0.0;
    let mut max_candidate = None;

    for candidate in candidates {
        let score = key(candidate);

        if max_candidate.is_none() || score > max_score {
            max_candidate = Some(candidate);
            max_score = score;
        }
    }

    max_candidate
}
