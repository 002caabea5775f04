//! Hue/lightness/saturation triples.
//!
//! Hue is kept as a fraction of a full turn in `[0, 1)` so harmony offsets read as fractions of the color wheel.
//! Conversions go through [`palette::Hsl`], which shares the HLS lightness and saturation definitions.

use palette::{Hsl, IntoColor, Srgb};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hls {
    pub hue: f32,
    pub lightness: f32,
    pub saturation: f32,
}

impl Hls {
    pub fn new(hue: f32, lightness: f32, saturation: f32) -> Self {
        Self {
            hue: wrap_hue(hue),
            lightness: lightness.clamp(0.0, 1.0),
            saturation: saturation.clamp(0.0, 1.0),
        }
    }

    pub fn from_rgb(rgb: (u8, u8, u8)) -> Self {
        let raw: Srgb<f32> = Srgb::<u8>::from_components(rgb).into_format();
        let hsl: Hsl = raw.into_color();
        let (hue, saturation, lightness) = hsl.into_components();

        Self::new(
            hue.into_positive_degrees() / 360.0,
            finite_or_zero(lightness),
            finite_or_zero(saturation),
        )
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        let hsl: Hsl = Hsl::new(self.hue * 360.0, self.saturation, self.lightness);
        let raw: Srgb<f32> = hsl.into_color();

        raw.into_format::<u8>().into_components()
    }

    /// Rotates the hue by `offset` turns, keeping lightness and saturation.
    pub fn rotate(self, offset: f32) -> Self {
        Self {
            hue: wrap_hue(self.hue + offset),
            ..self
        }
    }

    pub fn with_lightness(self, lightness: f32) -> Self {
        Self {
            lightness: lightness.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn with_saturation(self, saturation: f32) -> Self {
        Self {
            saturation: saturation.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Shortest distance between two hues, in turns.
    pub fn hue_distance(self, other: Hls) -> f32 {
        let d = (self.hue - other.hue).abs();
        d.min(1.0 - d)
    }
}

pub fn rgb_to_hls(rgb: (u8, u8, u8)) -> Hls {
    Hls::from_rgb(rgb)
}

pub fn hls_to_rgb(hls: Hls) -> (u8, u8, u8) {
    hls.to_rgb()
}

fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }

    let wrapped = hue.rem_euclid(1.0);

    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
