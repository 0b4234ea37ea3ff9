//! unink CLI - handwritten-note highlight exporter
//!
//! The exporter boundary: reads a decoded scene document, runs
//! extraction, and persists the in-memory artifacts to disk.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unink::{ExtractOptions, Extractor, Highlight, HighlightContent, SceneDocument};

#[derive(Parser)]
#[command(name = "unink")]
#[command(version)]
#[command(about = "Extract handwritten-note highlights to text, images, and SVG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract highlights from a decoded scene document
    Extract {
        /// Decoded scene document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Disable raster cropping of rectangular selections
        #[arg(long)]
        no_crop: bool,

        /// Disable the snap-to-text crop refinement
        #[arg(long)]
        no_snap: bool,

        /// Rasterization DPI for reference pages
        #[arg(long, default_value = "300")]
        dpi: u32,

        /// Margin around composed vector documents
        #[arg(long, default_value = "0")]
        margin: f64,

        /// Rectangularity threshold for crop detection
        #[arg(long, default_value = "0.8")]
        threshold: f64,

        /// Process pages sequentially
        #[arg(long)]
        sequential: bool,
    },

    /// Show scene document information
    Info {
        /// Decoded scene document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            no_crop,
            no_snap,
            dpi,
            margin,
            threshold,
            sequential,
        } => {
            let mut options = ExtractOptions::new()
                .with_cropping(!no_crop)
                .with_snap_to_text(!no_snap)
                .with_dpi(dpi)
                .with_margin(margin)
                .with_rectangle_threshold(threshold);
            if sequential {
                options = options.sequential();
            }
            cmd_extract(&input, output.as_deref(), options)
        }
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            println!("unink {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn load_document(input: &Path) -> Result<SceneDocument, Box<dyn Error>> {
    let json = fs::read_to_string(input)?;
    Ok(serde_json::from_str(&json)?)
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    options: ExtractOptions,
) -> Result<(), Box<dyn Error>> {
    let doc = load_document(input)?;

    let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "scene".to_string());
        PathBuf::from(format!("{stem}-highlights"))
    });
    fs::create_dir_all(&output_dir)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("extracting {} pages", doc.pages.len()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let highlights = Extractor::with_options(options).extract(&doc)?;
    spinner.finish_and_clear();

    let mut index = Vec::new();
    for highlight in &highlights {
        index.push(persist_highlight(highlight, &output_dir)?);
    }

    let index_path = output_dir.join("highlights.json");
    fs::write(&index_path, serde_json::to_string_pretty(&index)?)?;

    println!(
        "{} {} highlights from {}",
        "extracted".green().bold(),
        highlights.len(),
        input.display()
    );
    println!("  index: {}", index_path.display().to_string().cyan());
    Ok(())
}

/// Write one highlight's artifact (if any) and return its index entry.
fn persist_highlight(
    highlight: &Highlight,
    output_dir: &Path,
) -> Result<serde_json::Value, Box<dyn Error>> {
    let page = page_label(highlight.page_index);
    let tags: Vec<&String> = highlight.tags.iter().collect();

    let entry = match &highlight.content {
        HighlightContent::Text { text, color } => {
            println!(
                "  {} page {page}: {}",
                "text".yellow(),
                text.as_str().italic()
            );
            serde_json::json!({
                "type": "text",
                "page": highlight.page_index,
                "block": highlight.block_index,
                "tags": tags,
                "text": text,
                "color": color.hex(),
            })
        }
        HighlightContent::Image { artifact } => {
            let name = format!(
                "page-{page}-block-{}.{}",
                highlight.block_index,
                artifact.extension()
            );
            let path = output_dir.join(&name);
            fs::write(&path, &artifact.bytes)?;
            println!("  {} page {page}: {name}", "image".blue());
            serde_json::json!({
                "type": "image",
                "page": highlight.page_index,
                "block": highlight.block_index,
                "tags": tags,
                "path": name,
            })
        }
        HighlightContent::Drawing { artifact } => {
            let name = format!("page-{page}-drawing.{}", artifact.extension());
            let path = output_dir.join(&name);
            fs::write(&path, &artifact.bytes)?;
            println!("  {} page {page}: {name}", "drawing".magenta());
            serde_json::json!({
                "type": "drawing",
                "page": highlight.page_index,
                "tags": tags,
                "path": name,
            })
        }
    };
    Ok(entry)
}

fn page_label(page_index: i32) -> String {
    if page_index >= 0 {
        page_index.to_string()
    } else {
        "unknown".to_string()
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn Error>> {
    let doc = load_document(input)?;

    println!("{} {}", "document:".bold(), doc.name);
    println!("  pages: {}", doc.pages.len());
    println!("  mapped pages: {}", doc.page_map.len());
    println!(
        "  canvas: {} x {}",
        doc.canvas_width(),
        doc.canvas_height()
    );
    if let Some(zoom) = &doc.zoom {
        println!(
            "  zoom: scale {} centered at ({}, {})",
            zoom.scale, zoom.center_x, zoom.center_y
        );
    }

    for page in &doc.pages {
        let blocks = page.blocks.len();
        let ink = page.blocks.iter().filter(|b| b.as_ink().is_some()).count();
        let text = page.blocks.iter().filter(|b| b.is_text()).count();
        let tags: Vec<&String> = page.tags.iter().collect();
        println!(
            "  {} {blocks} blocks ({ink} ink, {text} text){}",
            page.id.cyan(),
            if tags.is_empty() {
                String::new()
            } else {
                format!(" tags: {tags:?}")
            }
        );
    }
    Ok(())
}
