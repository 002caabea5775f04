use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;
use stylematch::{
    format_hex, generate_palette, hls_to_rgb, parse_hex, rgb_to_hls, Garment, HarmonyRules, Hls, Role, Scheme,
};

fn random_rgb(rng: &mut StdRng) -> (u8, u8, u8) {
    (rng.gen(), rng.gen(), rng.gen())
}

#[test]
fn hls_round_trip_on_random_colors() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..50_000 {
        let rgb = random_rgb(&mut rng);
        let back = hls_to_rgb(rgb_to_hls(rgb));

        assert!((rgb.0 as i16 - back.0 as i16).abs() <= 1, "{rgb:?} -> {back:?}");
        assert!((rgb.1 as i16 - back.1 as i16).abs() <= 1, "{rgb:?} -> {back:?}");
        assert!((rgb.2 as i16 - back.2 as i16).abs() <= 1, "{rgb:?} -> {back:?}");
    }
}

#[test]
fn contrast_is_the_half_turn_rotation() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..2_000 {
        let rgb = random_rgb(&mut rng);
        let base = rgb_to_hls(rgb);
        let expected = hls_to_rgb(Hls::new(base.hue + 0.5, base.lightness, base.saturation));

        let palette = generate_palette(rgb, Scheme::Classic);

        assert_eq!(palette.get(Role::Contrast), Some(expected), "{rgb:?}");
    }
}

#[test]
fn navy_contrast() {
    let palette = generate_palette((0, 0, 128), Scheme::Split);
    let base = rgb_to_hls((0, 0, 128));
    let contrast = rgb_to_hls(palette.get(Role::Contrast).unwrap());

    assert!((base.hue_distance(contrast) - 0.5).abs() < 0.01);
    assert!((base.lightness - contrast.lightness).abs() < 0.01);
    assert!((base.saturation - contrast.saturation).abs() < 0.01);
}

#[test]
fn palettes_are_always_fully_populated() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut bases = vec![(0, 0, 0), (255, 255, 255), (128, 128, 128), (1, 0, 0)];
    bases.extend((0..500).map(|_| random_rgb(&mut rng)));

    for base in bases {
        for scheme in [Scheme::Classic, Scheme::Split, Scheme::Soft] {
            let palette = generate_palette(base, scheme);
            let roles = palette.roles().collect::<HashSet<_>>();

            assert_eq!(palette.base(), base);
            assert_eq!(roles.len(), palette.len());
            assert_eq!(palette.len(), scheme.roles().len());
            assert!((3..=4).contains(&palette.len()));
        }
    }
}

#[test]
fn custom_tonal_offset() {
    let rules = HarmonyRules {
        tonal: 0.08,
        ..HarmonyRules::default()
    };
    let base = rgb_to_hls((200, 40, 40));

    let tonal = rules.apply(Role::Tonal, base);

    assert!((tonal.hue - 0.08).abs() < 1e-6);
}

#[test]
fn hex_views() {
    assert_eq!(format_hex((255, 0, 0)), "#ff0000");
    assert_eq!(parse_hex("#FF0000").unwrap(), (255, 0, 0));

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..1_000 {
        let rgb = random_rgb(&mut rng);
        assert_eq!(parse_hex(&format_hex(rgb).to_uppercase()).unwrap(), rgb);
    }
}

#[test]
fn garment_companions_for_every_category() {
    for garment in Garment::ALL {
        let (first, second) = garment.companions();
        assert_ne!(first, second);
    }
}
