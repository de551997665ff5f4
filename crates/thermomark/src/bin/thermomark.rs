//! Command-line front end for the thermogram annotation toolkit.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use thermomark::core::init_with_level;
use thermomark::{
    detect_defects, parse_defects, render_grid, render_markers, DetectionParams, GridSpec,
    PanelSpec,
};

#[derive(Parser)]
#[command(name = "thermomark", about = "Annotate thermal-inspection panel images")]
struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overlay the dual-resolution measurement grid.
    Grid {
        image: PathBuf,
        #[arg(long, default_value_t = 24)]
        step_small: u32,
        #[arg(long, default_value_t = 118)]
        step_large: u32,
        #[arg(long, default_value_t = 160)]
        opacity: u8,
        #[arg(long, default_value_t = 500.0)]
        panel_width: f64,
        #[arg(long, default_value_t = 400.0)]
        panel_height: f64,
        #[arg(short, long, default_value = "grid_overlay.jpg")]
        output: PathBuf,
    },
    /// Draw severity-coded markers from a defect list JSON file.
    Mark {
        image: PathBuf,
        /// JSON array of defect records (mm or legacy pixel format).
        #[arg(long)]
        defects: PathBuf,
        #[arg(long, default_value_t = 500.0)]
        panel_width: f64,
        #[arg(long, default_value_t = 400.0)]
        panel_height: f64,
        #[arg(short, long, default_value = "marked_defects.jpg")]
        output: PathBuf,
    },
    /// Auto-detect candidate defects from pixel intensity.
    Detect {
        image: PathBuf,
        #[arg(long, default_value_t = 90)]
        threshold: u8,
        #[arg(long, default_value_t = 150.0)]
        min_area: f64,
        /// Write the JSON report here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Info);
    init_with_level(level)?;

    match cli.command {
        Command::Grid {
            image,
            step_small,
            step_large,
            opacity,
            panel_width,
            panel_height,
            output,
        } => {
            let bytes = fs::read(&image)?;
            let grid = GridSpec {
                step_small_px: step_small,
                step_large_px: step_large,
                opacity,
            };
            let panel = PanelSpec::new(panel_width, panel_height);
            let jpeg = render_grid(&bytes, &grid, &panel)?;
            fs::write(&output, jpeg)?;
            info!("grid overlay written to {}", output.display());
        }
        Command::Mark {
            image,
            defects,
            panel_width,
            panel_height,
            output,
        } => {
            let bytes = fs::read(&image)?;
            let list = parse_defects(&fs::read_to_string(&defects)?)?;
            info!("marking {} defect(s)", list.len());
            let panel = PanelSpec::new(panel_width, panel_height);
            let jpeg = render_markers(&bytes, &list, &panel)?;
            fs::write(&output, jpeg)?;
            info!("marked image written to {}", output.display());
        }
        Command::Detect {
            image,
            threshold,
            min_area,
            output,
        } => {
            let bytes = fs::read(&image)?;
            let params = DetectionParams {
                threshold,
                min_area_px: min_area,
            };
            let report = detect_defects(&bytes, &params)?;
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!("report written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
