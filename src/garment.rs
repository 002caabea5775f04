use std::{fmt, str::FromStr};

/// The photographed garment's category. Decides what the companion colors are called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Garment {
    Kurta,
    Saree,
    #[default]
    Shirt,
}

impl Garment {
    pub const ALL: [Garment; 3] = [Garment::Kurta, Garment::Saree, Garment::Shirt];

    /// Names of the two companion items a palette is proposed for.
    pub fn companions(self) -> (&'static str, &'static str) {
        match self {
            Garment::Kurta => ("Leggings", "Chunny"),
            Garment::Saree => ("Blouse", "Accessories"),
            Garment::Shirt => ("Trouser", "Accessories"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Garment::Kurta => "Kurta",
            Garment::Saree => "Saree",
            Garment::Shirt => "Shirt",
        }
    }
}

impl fmt::Display for Garment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Garment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Garment::ALL
            .into_iter()
            .find(|garment| garment.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown garment {s:?}, expected kurta, saree or shirt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn companion_labels() {
        assert_eq!(Garment::Kurta.companions(), ("Leggings", "Chunny"));
        assert_eq!(Garment::Saree.companions(), ("Blouse", "Accessories"));
        assert_eq!(Garment::Shirt.companions(), ("Trouser", "Accessories"));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("KURTA".parse::<Garment>(), Ok(Garment::Kurta));
        assert_eq!(" saree ".parse::<Garment>(), Ok(Garment::Saree));
        assert!("lehenga".parse::<Garment>().is_err());
    }
}
