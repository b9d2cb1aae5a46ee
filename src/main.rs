use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palettize::models::Settings;
use palettize::services::{default_output_path, DitherPipeline};
use palettize_core::threshold::{MatrixKind, ThresholdMatrix};
use palettize_core::{MathMode, Palette};

#[derive(Parser)]
#[command(name = "palettize")]
#[command(about = "Reduce images to a fixed palette with ordered, error diffusion and positional dithering")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dither a PNG image to a palette
    Dither {
        /// Input PNG file
        input: PathBuf,

        /// Palette file (one hex color per line)
        #[arg(short, long)]
        palette: PathBuf,

        /// Output PNG file (default: <input>_<dither>-<distance>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (.json, .yaml or .yml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dither type: none, ordered, fs, positional
        #[arg(short, long)]
        dither: Option<String>,

        /// Distance mode: srgb, lrgb, oklab, oklab_l
        #[arg(long)]
        distance_mode: Option<String>,

        /// Diffusion mode: srgb, lrgb, oklab, oklab_l
        #[arg(long)]
        math_mode: Option<String>,

        /// Threshold matrix: bayerN, bluenoise16, ign
        #[arg(short, long)]
        matrix: Option<String>,

        /// Match on lightness only
        #[arg(long)]
        mono: bool,

        /// Convert the image to gray first
        #[arg(long)]
        grayscale: bool,

        /// Alpha dither type: none, ordered, fs (enables alpha dithering)
        #[arg(long)]
        alpha_type: Option<String>,

        /// Alpha steps between transparent and opaque
        #[arg(long)]
        alpha_factor: Option<u32>,

        /// Positional dithering worker threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List the entries of a palette file
    Palette {
        /// Palette file
        file: PathBuf,

        /// Mode the average spread is reported in
        #[arg(short, long, default_value = "oklab")]
        mode: String,
    },
    /// Print the values of a threshold matrix tile
    Matrix {
        /// Matrix name: bayerN, bluenoise16, ign
        name: String,

        /// Tile side to print (default: the matrix size, 8 for ign)
        #[arg(short, long)]
        size: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "palettize=debug,palettize_core=debug"
    } else {
        "palettize=info,palettize_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Dither {
            input,
            palette,
            output,
            config,
            dither,
            distance_mode,
            math_mode,
            matrix,
            mono,
            grayscale,
            alpha_type,
            alpha_factor,
            threads,
            optimize,
        } => {
            let mut settings = match &config {
                Some(path) => Settings::load(path)
                    .with_context(|| format!("loading settings from {}", path.display()))?,
                None => Settings::default(),
            };

            // Flags override the settings file
            if let Some(v) = dither {
                settings.dither_type = v;
            }
            if let Some(v) = distance_mode {
                settings.distance_mode = v;
            }
            if let Some(v) = math_mode {
                settings.math_mode = v;
            }
            if let Some(v) = matrix {
                settings.matrix_type = v;
            }
            if let Some(v) = alpha_type {
                settings.dither_alpha = true;
                settings.alpha_type = v;
            }
            if let Some(v) = alpha_factor {
                settings.alpha_factor = v;
            }
            if threads.is_some() {
                settings.threads = threads;
            }
            settings.mono |= mono;
            settings.grayscale |= grayscale;

            let options = settings.to_options().context("invalid dither settings")?;
            let output = output.unwrap_or_else(|| default_output_path(&input, &options));

            let report = DitherPipeline::new(options)
                .grayscale(settings.grayscale)
                .optimize(optimize)
                .run(&input, &palette, &output)
                .with_context(|| format!("dithering {}", input.display()))?;

            println!(
                "Wrote {} ({}x{}, {} colors, {:.2}s)",
                report.output.display(),
                report.width,
                report.height,
                report.palette_size,
                report.elapsed.as_secs_f64()
            );
            Ok(())
        }
        Commands::Palette { file, mode } => run_palette_command(&file, &mode),
        Commands::Matrix { name, size } => run_matrix_command(&name, size),
    }
}

/// Print palette entries with their Oklab coordinates.
fn run_palette_command(file: &std::path::Path, mode: &str) -> anyhow::Result<()> {
    let mode: MathMode = mode.parse()?;
    let palette =
        Palette::load(file).with_context(|| format!("loading palette {}", file.display()))?;

    println!("{:>4}  {:<8} {:>8} {:>8} {:>8}  achromatic", "#", "hex", "L", "a", "b");
    for (index, color) in palette.iter().enumerate() {
        let lab = color.oklab();
        println!(
            "{index:>4}  {:<8} {:>8.4} {:>8.4} {:>8.4}  {}",
            color.to_string(),
            lab.l,
            lab.a,
            lab.b,
            if color.is_achromatic() { "yes" } else { "no" }
        );
    }

    let [s0, s1, s2] = palette.average_spread(mode).values();
    println!("\nAverage spread ({mode}): {s0:.4} {s1:.4} {s2:.4}");
    Ok(())
}

/// Print one tile of a threshold matrix.
fn run_matrix_command(name: &str, size: Option<usize>) -> anyhow::Result<()> {
    let kind: MatrixKind = name.parse()?;
    let matrix = ThresholdMatrix::new(kind);
    let side = size.unwrap_or_else(|| match matrix.cell_count() {
        Some(cells) => (cells as f64).sqrt().round() as usize,
        None => 8,
    });

    println!("{kind}: {} levels", matrix.levels());
    for y in 0..side {
        let row: Vec<String> = (0..side)
            .map(|x| format!("{:+.4}", matrix.threshold(x, y)))
            .collect();
        println!("{}", row.join(" "));
    }
    Ok(())
}
