//! Autopatch CLI - run grid and patch operations on a JSON layout snapshot.
//!
//! Every subcommand loads an `InMemoryLayout` snapshot, runs one operation,
//! and (for writing commands) saves the snapshot back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autopatch_core::{
    auto_patch, create_grid_from_shapes, create_uniform_grid, summarize_layer, InMemoryLayout,
    LayerSpec, LayoutHost, PatchingConfig, Resolution, UniformGridConfig, Warning,
};
use clap::{Args, Parser, Subcommand};

/// Grid-and-patch post-processing for layout snapshots
#[derive(Parser)]
#[command(name = "autopatch")]
#[command(about = "Build writing-field grids and place patches on electrode crossings")]
struct Cli {
    /// Layout snapshot (JSON) to operate on
    #[arg(short, long)]
    layout: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WriteOpts {
    /// Where to save the result (default: overwrite the input layout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Clear destination layers before writing
    #[arg(long)]
    clear: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the grid from writing fields, then patch electrode crossings
    Patch {
        /// Patching configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        #[command(flatten)]
        write: WriteOpts,
    },

    /// Build grid lines along the outlines of shapes on a layer
    EdgeGrid {
        /// Layer with the writing-field shapes, e.g. 50/0
        #[arg(long)]
        source: LayerSpec,

        /// Destination grid layer
        #[arg(long)]
        grid: LayerSpec,

        /// Line width in micrometers
        #[arg(long, default_value_t = 1.0)]
        width: f64,

        #[command(flatten)]
        write: WriteOpts,
    },

    /// Draw an evenly spaced writing-field grid
    UniformGrid {
        /// Destination grid layer
        #[arg(long)]
        layer: LayerSpec,

        /// Exposure area side length in micrometers
        #[arg(long)]
        area: f64,

        /// Writing field side length in micrometers
        #[arg(long)]
        field: f64,

        /// Line width in micrometers
        #[arg(long, default_value_t = 1.0)]
        width: f64,

        /// Left edge of the area in micrometers
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x_left: f64,

        /// Bottom edge of the area in micrometers
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y_bottom: f64,

        #[command(flatten)]
        write: WriteOpts,
    },

    /// List the shapes on a layer
    Inspect {
        #[arg(long)]
        layer: LayerSpec,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut layout = load_layout(&cli.layout)?;
    let res = Resolution::new(layout.dbu())
        .with_context(|| format!("Invalid dbu in {}", cli.layout.display()))?;

    match cli.command {
        Commands::Patch { config, write } => {
            let config = load_config(&config)?;
            if write.clear {
                clear_layers(&mut layout, &[config.grid_layer, config.patch_layer])?;
            }
            let report = auto_patch(&mut layout, res, &config)?;
            println!(
                "Grid: {} shapes on layer {}; patches: {} on layer {} from {} intersection(s)",
                report.grid.shapes_written,
                report.grid.layer,
                report.patches.patches,
                report.patches.layer,
                report.patches.intersections,
            );
            print_warnings(report.warnings());
            save_layout(&layout, write.output.as_deref().unwrap_or(&cli.layout))
        }
        Commands::EdgeGrid {
            source,
            grid,
            width,
            write,
        } => {
            if write.clear {
                clear_layers(&mut layout, &[grid])?;
            }
            let report = create_grid_from_shapes(&mut layout, res, source, grid, width)?;
            println!(
                "Grid: {} shapes ({} pieces) on layer {}",
                report.shapes_written, report.pieces, report.layer
            );
            print_warnings(report.warnings.iter());
            save_layout(&layout, write.output.as_deref().unwrap_or(&cli.layout))
        }
        Commands::UniformGrid {
            layer,
            area,
            field,
            width,
            x_left,
            y_bottom,
            write,
        } => {
            if write.clear {
                clear_layers(&mut layout, &[layer])?;
            }
            let config = UniformGridConfig {
                grid_layer: layer,
                area_size: area,
                field_size: field,
                line_width: width,
                x_left,
                y_bottom,
            };
            let report = create_uniform_grid(&mut layout, res, &config)?;
            println!("Grid: {} lines on layer {}", report.shapes_written, report.layer);
            print_warnings(report.warnings.iter());
            save_layout(&layout, write.output.as_deref().unwrap_or(&cli.layout))
        }
        Commands::Inspect { layer, json } => {
            let summary = summarize_layer(&layout, layer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for (i, shape) in summary.shapes.iter().enumerate() {
                    match shape.bbox {
                        Some(b) => println!(
                            "  - shape {i}: ({}, {}) .. ({}, {}), area {} um^2",
                            b.min.x,
                            b.min.y,
                            b.max.x,
                            b.max.y,
                            shape.area as f64 * res.um_per_unit() * res.um_per_unit()
                        ),
                        None => println!("  - shape {i}: empty"),
                    }
                }
                println!(
                    "Total shapes found on layer {}: {}",
                    summary.layer,
                    summary.shape_count()
                );
            }
            Ok(())
        }
    }
}

fn load_layout(path: &Path) -> Result<InMemoryLayout> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout {}", path.display()))?;
    InMemoryLayout::from_json(&json)
        .with_context(|| format!("Failed to parse layout {}", path.display()))
}

fn load_config(path: &Path) -> Result<PatchingConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    PatchingConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn save_layout(layout: &InMemoryLayout, path: &Path) -> Result<()> {
    let json = layout.to_json().context("Failed to serialize layout")?;
    fs::write(path, json).with_context(|| format!("Failed to write layout {}", path.display()))?;
    log::info!("Layout saved to {}", path.display());
    Ok(())
}

fn clear_layers(layout: &mut InMemoryLayout, layers: &[LayerSpec]) -> Result<()> {
    for &spec in layers {
        if let Some(handle) = layout.find_layer(spec) {
            layout.clear_layer(handle)?;
            log::info!("Cleared layer {spec}");
        }
    }
    Ok(())
}

fn print_warnings<'a>(warnings: impl Iterator<Item = &'a Warning>) {
    for warning in warnings {
        println!("Warning: {warning}");
    }
}
