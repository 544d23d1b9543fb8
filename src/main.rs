use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use resvg::usvg;
use serde::Serialize;
use std::path::{Path, PathBuf};
use techradar::RadarConfig;
use techradar::fonts::CosmicTextMeasure;
use techradar::radar::{Legend, RadarLayout, layout_legend, layout_radar, render_svg};
use tiny_skia::{Pixmap, Transform};
use tracing_subscriber::EnvFilter;

/// Lay out and render a technology radar
#[derive(Parser, Debug)]
#[command(name = "techradar")]
#[command(version)]
#[command(about = "Render a technology radar to SVG, PNG, PDF or a JSON layout", long_about = None)]
struct Args {
    /// Radar config in TOML, YAML or JSON (use "-" for stdin)
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output file path (extension determines format: .svg, .png, .pdf or .json)
    #[arg(short, long, value_name = "OUTPUT", required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Override the placement seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Override the collision relaxation tick cap
    #[arg(long)]
    max_ticks: Option<usize>,

    /// Render only one quadrant (0-3)
    #[arg(long, value_name = "QUADRANT")]
    zoom: Option<usize>,

    /// Raster scale multiplier for PNG output
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Log layout progress
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Serialize)]
struct LayoutExport<'a> {
    layout: &'a RadarLayout,
    legend: &'a Legend,
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(shell) = args.completions {
        clap_complete::generate(
            shell,
            &mut Args::command(),
            "techradar",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let input = args.input.ok_or("Missing INPUT")?;
    let output = args.output.ok_or("Missing --output")?;

    let (source, source_path) = if input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        (buffer, None)
    } else {
        let content = std::fs::read_to_string(&input)
            .map_err(|e| format!("Failed to read input file: {}", e))?;
        (content, Some(input.as_path()))
    };

    let mut config = RadarConfig::from_source(&source, source_path).map_err(|e| e.to_string())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    if args.zoom.is_some() {
        config.zoomed_quadrant = args.zoom;
    }

    let layout = layout_radar(&config).map_err(|e| e.to_string())?;
    tracing::info!(
        entries = layout.entries.len(),
        ticks = layout.outcome.ticks,
        settled = layout.outcome.settled,
        "radar laid out"
    );

    let mut measure = CosmicTextMeasure::new();
    let legend = layout_legend(&config, &layout, &mut measure);

    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or("Output file has no extension")?
        .to_ascii_lowercase();

    match output_ext.as_str() {
        "json" => {
            let export = LayoutExport {
                layout: &layout,
                legend: &legend,
            };
            let json = serde_json::to_string_pretty(&export)
                .map_err(|e| format!("Failed to serialize layout: {}", e))?;
            std::fs::write(&output, json).map_err(|e| format!("Failed to write JSON: {}", e))?;
        }
        "svg" => {
            let svg = render_svg(&config, &layout, &legend);
            std::fs::write(&output, svg).map_err(|e| format!("Failed to write SVG: {}", e))?;
        }
        "png" => {
            let svg = render_svg(&config, &layout, &legend);
            let png_data = svg_to_png(&svg, args.png_scale)?;
            std::fs::write(&output, png_data)
                .map_err(|e| format!("Failed to write PNG: {}", e))?;
        }
        "pdf" => {
            let svg = render_svg(&config, &layout, &legend);
            let pdf_data = svg_to_pdf(&svg)?;
            std::fs::write(&output, pdf_data)
                .map_err(|e| format!("Failed to write PDF: {}", e))?;
        }
        _ => {
            return Err(format!(
                "Unsupported output format: .{} (use .svg, .png, .pdf or .json)",
                output_ext
            ));
        }
    }

    tracing::info!(path = %output.display(), "radar saved");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, String> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("Invalid --png-scale value: {}", scale));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();

        let local_fonts = Path::new("fonts");
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }

        let families = FallbackFamilies::pick(
            fontdb
                .faces()
                .flat_map(|face| face.families.iter().map(|(family, _)| family.as_str())),
        );
        if let Some(family) = families.sans() {
            fontdb.set_sans_serif_family(family);
            fontdb.set_serif_family(family);
        }
    }

    let tree =
        usvg::Tree::from_str(svg, &opts).map_err(|e| format!("Failed to parse SVG: {}", e))?;

    let svg_width = (tree.size().width() * scale).ceil() as u32;
    let svg_height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(svg_width, svg_height).ok_or("Failed to create pixmap")?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| format!("Failed to encode PNG: {}", e))
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, String> {
    use svg2pdf::usvg::fontdb;

    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();

    let local_fonts = Path::new("fonts");
    if local_fonts.is_dir() {
        fontdb.load_fonts_dir(local_fonts);
    }

    let families = FallbackFamilies::pick(
        fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.as_str())),
    );
    if let Some(family) = families.sans() {
        fontdb.set_sans_serif_family(family);
        fontdb.set_serif_family(family);
    }

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(fontdb),
        ..Default::default()
    };

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts)
        .map_err(|e| format!("Failed to parse SVG: {}", e))?;

    // Text as paths: avoids PDFs with missing glyphs when font embedding fails.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };
    let page_options = svg2pdf::PageOptions::default();

    svg2pdf::to_pdf(&tree, options, page_options)
        .map_err(|e| format!("Failed to convert SVG to PDF: {}", e))
}

/// Font families used when the radar's font list names nothing installed.
#[derive(Debug, Default)]
struct FallbackFamilies {
    sans: Option<String>,
    first: Option<String>,
}

impl FallbackFamilies {
    fn pick<'a>(families: impl Iterator<Item = &'a str>) -> Self {
        let mut picked = Self::default();
        for family in families {
            if picked.first.is_none() {
                picked.first = Some(family.to_string());
            }
            if picked.sans.is_none() && family.to_ascii_lowercase().contains("sans") {
                picked.sans = Some(family.to_string());
                break;
            }
        }
        picked
    }

    fn sans(&self) -> Option<&str> {
        self.sans.as_deref().or(self.first.as_deref())
    }
}
