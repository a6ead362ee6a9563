use anyhow::Context;
use clap::Parser;
use image::ImageReader;
use log::LevelFilter;
use std::path::{Path, PathBuf};

use pesoscan::{ClassificationPipeline, Outcome, PipelineConfig};

const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Parser)]
#[command(name = "pesoscan")]
#[command(about = "Identify a Colombian coin or banknote from a photo by shape, size and color")]
struct Cli {
    /// Path to input image file (JPEG or PNG)
    #[arg(value_name = "IMAGE", required_unless_present = "print_config")]
    image_path: Option<PathBuf>,

    /// JSON configuration overriding the built-in thresholds and reference tables
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report no denomination when the best match scores above this value
    #[arg(long, value_name = "SCORE")]
    max_distance: Option<f64>,

    /// Run shape detection and color sampling one after the other
    #[arg(long)]
    sequential: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { LevelFilter::Info } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(max) = args.max_distance {
        config.matching.max_distance = Some(max);
    }

    if args.print_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let Some(image_path) = args.image_path else {
        anyhow::bail!("no image given");
    };
    check_extension(&image_path)?;

    log::info!("Loading image: {:?}", image_path);
    let img = ImageReader::open(&image_path)
        .with_context(|| format!("Failed to open {}", image_path.display()))?
        .with_guessed_format()?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    log::info!("Image loaded: {}x{}", img.width(), img.height());

    let pipeline = ClassificationPipeline::new(config)?.with_parallel(!args.sequential);

    let outcome = match pipeline.run(&img) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    match &outcome {
        Outcome::Classified(c) => {
            println!(
                "This {} appears to be {} COP.",
                c.kind,
                group_thousands(c.denomination)
            );
            println!("Dominant color (RGB): {}", c.color);
            if let Some(diameter) = c.diameter_mm {
                println!("Estimated diameter: {:.1} mm", diameter);
            }
        }
        Outcome::NoMatch { color, .. } => {
            println!("Could not determine the denomination.");
            println!("Dominant color (RGB): {}", color);
        }
        Outcome::Unrecognized => {
            if let Some(reason) = outcome.reason() {
                eprintln!("Error: {}", reason);
            }
            std::process::exit(2);
        }
    }

    Ok(())
}

fn check_extension(path: &Path) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        anyhow::bail!(
            "Unsupported file type {:?}; expected one of {}",
            path,
            SUPPORTED_EXTENSIONS.join(", ")
        )
    }
}

/// 20000 -> "20,000"
fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
