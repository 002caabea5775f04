//! Companion colors derived from a base color by hue rotation in HLS space.
//!
//! Rotating the hue at fixed lightness and saturation keeps every palette member a comparably saturated, perceptually
//! related color. Channel arithmetic in RGB does not, and tends to produce muddy results.

use crate::hls::Hls;
use std::{fmt, str::FromStr};

/// A named palette member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Opposite on the color wheel.
    Contrast,
    /// Near-identical hue, a subtle variation.
    Tonal,
    /// Even three-way split.
    Designer,
    /// Secondary contrast, next to the complement.
    SplitComplementary,
    /// A pale, desaturated tint of the base hue.
    Soft,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Contrast => "Perfect Contrast",
            Role::Tonal => "Tonal Harmony",
            Role::Designer => "Modern Designer",
            Role::SplitComplementary => "Split Complement",
            Role::Soft => "Soft Neutral",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which roles a palette contains, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    /// Contrast, tonal and designer.
    #[default]
    Classic,
    /// The classic three plus a split complement.
    Split,
    /// The classic three plus a soft neutral.
    Soft,
}

impl Scheme {
    pub fn roles(self) -> &'static [Role] {
        match self {
            Scheme::Classic => &[Role::Contrast, Role::Tonal, Role::Designer],
            Scheme::Split => &[Role::Contrast, Role::Tonal, Role::Designer, Role::SplitComplementary],
            Scheme::Soft => &[Role::Contrast, Role::Tonal, Role::Designer, Role::Soft],
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Scheme::Classic),
            "split" => Ok(Scheme::Split),
            "soft" => Ok(Scheme::Soft),
            other => Err(format!("unknown scheme {other:?}, expected classic, split or soft")),
        }
    }
}

/// Hue offsets, in turns, and the soft-variant targets used by [`generate_palette_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HarmonyRules {
    pub contrast: f32,
    pub tonal: f32,
    pub designer: f32,
    pub split_complementary: f32,
    pub soft_lightness: f32,
    pub soft_saturation: f32,
}

impl Default for HarmonyRules {
    fn default() -> Self {
        Self {
            contrast: 0.5,
            tonal: 0.05,
            designer: 0.33,
            split_complementary: 0.42,
            soft_lightness: 0.9,
            soft_saturation: 0.15,
        }
    }
}

impl HarmonyRules {
    /// The HLS color a role takes for the given base.
    pub fn apply(&self, role: Role, base: Hls) -> Hls {
        match role {
            Role::Contrast => base.rotate(self.contrast),
            Role::Tonal => base.rotate(self.tonal),
            Role::Designer => base.rotate(self.designer),
            Role::SplitComplementary => base.rotate(self.split_complementary),
            Role::Soft => base
                .with_lightness(self.soft_lightness)
                .with_saturation(self.soft_saturation),
        }
    }
}

/// An ordered mapping from role to color. Roles are unique; order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    base: (u8, u8, u8),
    entries: Vec<(Role, (u8, u8, u8))>,
}

impl Palette {
    pub fn base(&self) -> (u8, u8, u8) {
        self.base
    }

    pub fn get(&self, role: Role) -> Option<(u8, u8, u8)> {
        self.entries.iter().find(|(r, _)| *r == role).map(|(_, rgb)| *rgb)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.entries.iter().map(|(role, _)| *role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, (u8, u8, u8))> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generates a palette with the default [`HarmonyRules`]. Never fails: achromatic bases just rotate a hue that has
/// no visible effect.
pub fn generate_palette(base: (u8, u8, u8), scheme: Scheme) -> Palette {
    generate_palette_with(base, scheme, &HarmonyRules::default())
}

pub fn generate_palette_with(base: (u8, u8, u8), scheme: Scheme, rules: &HarmonyRules) -> Palette {
    let hls = Hls::from_rgb(base);

    Palette {
        base,
        entries: scheme
            .roles()
            .iter()
            .map(|&role| (role, rules.apply(role, hls).to_rgb()))
            .collect(),
    }
}
