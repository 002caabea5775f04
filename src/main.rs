use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use stylematch::{
    css_rgb, format_hex, generate_palette, parse_hex, ExtractorConfig, Extraction, FabricExtractor, Garment, Palette,
    Preset, Scheme,
};

/// Extract a garment's fabric color from product photos and suggest companion colors.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required_unless_present = "hex")]
    inputs: Vec<PathBuf>,

    /// Extraction preset: balanced, tight-crop-vibrant, pastel-aware, top-biased or wide-scan
    #[arg(short, long, default_value_t = Preset::Balanced)]
    preset: Preset,

    /// JSON extractor configuration, overrides --preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the preset's cluster count
    #[arg(short = 'k', long)]
    clusters: Option<usize>,

    /// Garment category used to name the companion items: kurta, saree or shirt
    #[arg(short, long, default_value_t = Garment::Shirt)]
    garment: Garment,

    /// Palette scheme: classic, split or soft
    #[arg(short, long, default_value = "classic")]
    scheme: Scheme,

    /// Skip extraction and build the palette from this hex color
    #[arg(long)]
    hex: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    source: String,
    garment: Garment,
    companions: (&'static str, &'static str),
    color: String,
    palette: Vec<(&'static str, String)>,
    extraction: Option<&'a Extraction>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    if let Some(hex) = &args.hex {
        let color = parse_hex(hex).with_context(|| format!("--hex {hex}"))?;
        return print_report(&args, "manual".to_string(), color, None);
    }

    let mut config = match &args.config {
        Some(path) => ExtractorConfig::from_json_file(path)?,
        None => args.preset.config(),
    };
    if let Some(clusters) = args.clusters {
        config.clusters = clusters;
    }

    let extractor = FabricExtractor::from_config(config);

    for input in &args.inputs {
        let image = image_open(input)?;
        let extraction = extractor
            .extract(&image)
            .with_context(|| format!("extracting fabric color from {}", input.display()))?;

        print_report(&args, input.display().to_string(), extraction.color(), Some(&extraction))?;
    }

    Ok(())
}

fn image_open(path: &Path) -> Result<stylematch::image::RgbImage> {
    let image = stylematch::image::open(path).with_context(|| format!("decoding {}", path.display()))?;
    Ok(image.to_rgb8())
}

fn print_report(args: &Args, source: String, color: (u8, u8, u8), extraction: Option<&Extraction>) -> Result<()> {
    let palette = generate_palette(color, args.scheme);

    if args.json {
        let report = Report {
            source,
            garment: args.garment,
            companions: args.garment.companions(),
            color: format_hex(color),
            palette: palette.iter().map(|(role, rgb)| (role.label(), format_hex(rgb))).collect(),
            extraction,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(args, &source, color, &palette);
    }

    Ok(())
}

fn print_text(args: &Args, source: &str, color: (u8, u8, u8), palette: &Palette) {
    let (first, second) = args.garment.companions();

    println!("{source}");
    println!("  fabric color  {}  {}", format_hex(color), css_rgb(color));
    println!("  pairings for {first} & {second}:");
    for (role, rgb) in palette.iter() {
        println!("    {:<18}{}  {}", role.label(), format_hex(rgb), css_rgb(rgb));
    }
}
