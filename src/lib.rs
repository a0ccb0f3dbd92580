//! imgaug: geometric image augmentation with bounding-box labels kept in sync.
//!
//! A pipeline is a tree of [`Transform`]s: primitive geometric operations
//! (flip, crop, pad, resize) and combinators (sequential, sometimes,
//! some-of, one-of). Running it on an image rewrites the image through a
//! [`Canvas`] backend and re-derives every label so it still outlines the
//! same object. Randomness comes from one seeded source in [`Config`], so a
//! fixed seed and tree always produce the same output.
//!
//! # Modules
//!
//! - [`geom`]: Points, rectangles, edge masks and sampling ranges
//! - [`labels`]: The label set and its JSON file format
//! - [`config`]: Seeded configuration and the label-retention policy
//! - [`canvas`]: The image backend trait and its `image` crate implementation
//! - [`transform`]: Primitive transforms and combinators
//! - [`pipeline`]: YAML/JSON pipeline documents
//! - [`error`]: Error types for imgaug operations

pub mod canvas;
pub mod config;
pub mod error;
pub mod geom;
pub mod labels;
pub mod pipeline;
pub mod transform;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::Rgba;

pub use canvas::Canvas;
pub use config::{BBoxPolicy, Config};
pub use error::AugmentError;
pub use labels::Labels;
pub use transform::Transform;

/// The imgaug CLI application.
#[derive(Parser)]
#[command(name = "imgaug")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline once on an image and its labels.
    Augment(AugmentArgs),
    /// Parse a pipeline document and print its transform tree.
    Check(CheckArgs),
    /// Draw label outlines onto an image.
    Draw(DrawArgs),
}

/// Arguments for the augment subcommand.
#[derive(clap::Args)]
struct AugmentArgs {
    /// Input image.
    image: PathBuf,

    /// Pipeline document (YAML, or JSON with a .json extension).
    #[arg(long)]
    pipeline: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(long, short)]
    output: PathBuf,

    /// Input labels JSON. Without it the image is augmented with no labels.
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Where to write the transformed labels JSON.
    #[arg(long)]
    labels_output: Option<PathBuf>,

    /// Override the seed from the pipeline document.
    #[arg(long, env = "IMGAUG_SEED")]
    seed: Option<u64>,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Pipeline document to check.
    pipeline: PathBuf,
}

/// Arguments for the draw subcommand.
#[derive(clap::Args)]
struct DrawArgs {
    /// Input image.
    image: PathBuf,

    /// Labels JSON to draw.
    #[arg(long)]
    labels: PathBuf,

    /// Output image.
    #[arg(long, short)]
    output: PathBuf,
}

/// Run the imgaug CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AugmentError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Augment(args)) => run_augment(args),
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Draw(args)) => run_draw(args),
        None => {
            println!("imgaug {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Geometric image augmentation with bounding-box labels.");
            println!();
            println!("Run 'imgaug --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .try_init();
}

fn read_image(path: &Path) -> Result<image::DynamicImage, AugmentError> {
    image::open(path).map_err(|source| AugmentError::ImageRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write_image(path: &Path, img: &image::DynamicImage) -> Result<(), AugmentError> {
    img.save(path).map_err(|source| AugmentError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute the augment subcommand.
fn run_augment(args: AugmentArgs) -> Result<(), AugmentError> {
    let doc = pipeline::read_pipeline(&args.pipeline)?;
    let mut cfg = doc.config(args.seed)?;

    let img = read_image(&args.image)?;
    let labels = match &args.labels {
        Some(path) => labels::io_json::read_labels(path)?,
        None => Labels::default(),
    };

    log::info!(
        "augmenting {} ({}x{}, {} label(s)) with seed {}",
        args.image.display(),
        img.width(),
        img.height(),
        labels.len(),
        cfg.seed()
    );
    let before = labels.len();
    let (img, labels) = doc.pipeline.apply(&mut cfg, img, labels)?;

    // Encoders such as JPEG reject an alpha channel.
    let img = match args.output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            image::DynamicImage::ImageRgb8(img.to_rgb8())
        }
        _ => img,
    };
    write_image(&args.output, &img)?;

    if let Some(path) = &args.labels_output {
        labels::io_json::write_labels(path, &labels)?;
    }

    println!(
        "Wrote {} ({}x{}), kept {} of {} label(s)",
        args.output.display(),
        img.width(),
        img.height(),
        labels.len(),
        before
    );
    Ok(())
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), AugmentError> {
    let doc = pipeline::read_pipeline(&args.pipeline)?;
    let cfg = doc.config(None)?;

    println!("Pipeline OK: {}", args.pipeline.display());
    println!(
        "seed: {}, min_area: {}, min_visibility: {}",
        cfg.seed(),
        cfg.policy().min_area,
        cfg.policy().min_visibility
    );
    println!();
    print!("{}", doc.pipeline);
    Ok(())
}

/// Execute the draw subcommand.
fn run_draw(args: DrawArgs) -> Result<(), AugmentError> {
    let img = read_image(&args.image)?;
    let labels = labels::io_json::read_labels(&args.labels)?;

    let drawn = canvas::draw_labels(&img, &labels, Rgba([255, 0, 0, 255]));
    let drawn = match args.output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            image::DynamicImage::ImageRgb8(drawn.to_rgb8())
        }
        _ => drawn,
    };
    write_image(&args.output, &drawn)?;

    println!("Drew {} label(s) to {}", labels.len(), args.output.display());
    Ok(())
}
