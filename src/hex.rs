use crate::{Error, Result};

/// Formats a color as a lowercase `#rrggbb` string.
pub fn format_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parses a six digit hex color, with or without a leading `#`. Digits are case-insensitive.
pub fn parse_hex(value: &str) -> Result<(u8, u8, u8)> {
    let digits = value.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(value.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| Error::InvalidHex(value.to_string()))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats a color as a CSS `rgb()` function.
pub fn css_rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("rgb({}, {}, {})", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lowercase_with_padding() {
        assert_eq!(format_hex((255, 0, 0)), "#ff0000");
        assert_eq!(format_hex((0, 10, 171)), "#000aab");
    }

    #[test]
    fn parses_either_case_and_optional_hash() {
        assert_eq!(parse_hex("#FF0000").unwrap(), (255, 0, 0));
        assert_eq!(parse_hex("#ff0000").unwrap(), (255, 0, 0));
        assert_eq!(parse_hex("00aB10").unwrap(), (0, 171, 16));
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "#", "#fff", "#ff00000", "#gg0000", "+f0000", "#+f0000", "#ff 000"] {
            assert_eq!(parse_hex(bad), Err(Error::InvalidHex(bad.to_string())), "{bad:?}");
        }
    }

    #[test]
    fn every_channel_value_round_trips() {
        for v in 0..=255u8 {
            for rgb in [(v, 0, 0), (0, v, 0), (0, 0, v), (v, v, v)] {
                assert_eq!(parse_hex(&format_hex(rgb)).unwrap(), rgb);
            }
        }
    }

    #[test]
    fn css_view() {
        assert_eq!(css_rgb((12, 34, 56)), "rgb(12, 34, 56)");
    }
}
