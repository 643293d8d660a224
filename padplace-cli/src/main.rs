//! PadPlace CLI - DXF-driven KiCad footprint placement from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use padplace::{
    discover_footprints, export_coordinates_csv, Circle, PadPlaceCore, PlacementOptions,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "padplace")]
#[command(about = "DXF-driven footprint placement for KiCad PCB files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract circle coordinates from a DXF drawing
    Extract {
        /// Path to the DXF file
        #[arg(value_name = "DXF")]
        dxf: PathBuf,

        /// Keep only circles with this radius (rounded to 1 decimal)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Negate y coordinates (DXF y-up vs. PCB y-down)
        #[arg(long)]
        flip_y: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Also write the coordinates to this CSV file
        #[arg(long, value_name = "FILE")]
        export_csv: Option<PathBuf>,
    },

    /// Update footprint locations in a KiCad PCB file from a DXF drawing
    Update {
        /// Path to the DXF file
        #[arg(value_name = "DXF")]
        dxf: PathBuf,

        /// Path to the .kicad_pcb file (a tagged copy is written; the
        /// input is never modified)
        #[arg(value_name = "PCB")]
        pcb: PathBuf,

        /// Footprint identifier to match (library path substring)
        #[arg(short, long, value_name = "ID")]
        footprint: String,

        /// Keep only circles with this radius (rounded to 1 decimal)
        #[arg(short, long)]
        radius: Option<f64>,

        /// Negate y coordinates (DXF y-up vs. PCB y-down)
        #[arg(long)]
        flip_y: bool,

        /// Offset added to written x coordinates
        #[arg(long, default_value_t = 0.0)]
        offset_x: f64,

        /// Offset added to written y coordinates
        #[arg(long, default_value_t = 0.0)]
        offset_y: f64,

        /// Tag inserted before the output file extension
        #[arg(long, default_value = "_updated")]
        tag: String,

        /// Channel remap file (`source: destination` per line)
        #[arg(long, value_name = "FILE")]
        remap: Option<PathBuf>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// List unique footprint identifiers in a PCB file
    Footprints {
        /// Path to the .kicad_pcb file
        #[arg(value_name = "PCB")]
        pcb: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for scripting
    Json,
    /// CSV rows on stdout (extract only)
    Csv,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Extract {
            dxf,
            radius,
            flip_y,
            format,
            export_csv,
        } => handle_extract(&dxf, radius, flip_y, format, export_csv.as_deref()),
        Commands::Update {
            dxf,
            pcb,
            footprint,
            radius,
            flip_y,
            offset_x,
            offset_y,
            tag,
            remap,
            format,
        } => handle_update(
            &dxf, &pcb, &footprint, radius, flip_y, offset_x, offset_y, tag, remap, format,
        ),
        Commands::Footprints { pcb } => handle_footprints(&pcb),
    };

    process::exit(exit_code);
}

fn handle_extract(
    dxf: &std::path::Path,
    radius: Option<f64>,
    flip_y: bool,
    format: OutputFormat,
    export_csv: Option<&std::path::Path>,
) -> i32 {
    let options = PlacementOptions {
        target_radius: radius,
        flip_y,
        ..PlacementOptions::default()
    };

    let circles = match PadPlaceCore::extract_coordinates(dxf, &options) {
        Ok(circles) => circles,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Some(path) = export_csv {
        if let Err(e) = export_coordinates_csv(path, &circles) {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    match format {
        OutputFormat::Human => output_human(dxf, &circles),
        OutputFormat::Json => output_json(dxf, &circles),
        OutputFormat::Csv => output_csv(&circles),
    }
    0
}

#[allow(clippy::too_many_arguments)]
fn handle_update(
    dxf: &std::path::Path,
    pcb: &std::path::Path,
    footprint: &str,
    radius: Option<f64>,
    flip_y: bool,
    offset_x: f64,
    offset_y: f64,
    tag: String,
    remap: Option<PathBuf>,
    format: OutputFormat,
) -> i32 {
    let options = PlacementOptions {
        target_radius: radius,
        flip_y,
        x_offset: offset_x,
        y_offset: offset_y,
        name_tag: tag,
        remap_file: remap,
    };

    let report = match PadPlaceCore::update_from_dxf(dxf, pcb, footprint, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match format {
        OutputFormat::Human => {
            println!(
                "Updated {} of {} footprints matching \"{}\".",
                report.updated, report.requested, footprint
            );
            println!("New file saved as {}.", report.output_path.display());
            if report.updated < report.requested {
                println!(
                    "Warning: {} coordinates were not placed; check the footprint identifier.",
                    report.requested - report.updated
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "footprint": footprint,
                "updated": report.updated,
                "requested": report.requested,
                "output": report.output_path.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
        }
        OutputFormat::Csv => {
            eprintln!("Error: CSV output is not supported for update");
            return 1;
        }
    }

    // Nothing placed while coordinates were supplied is a failure for
    // scripted callers.
    if report.updated == 0 && report.requested > 0 {
        return 1;
    }
    0
}

fn handle_footprints(pcb: &std::path::Path) -> i32 {
    match discover_footprints(pcb) {
        Ok(names) => {
            println!(
                "Found {} unique footprint types in {}:",
                names.len(),
                pcb.display()
            );
            for name in names {
                println!("  {}", name);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn output_human(dxf: &std::path::Path, circles: &[Circle]) {
    println!("Extracted {} circles from {}:", circles.len(), dxf.display());
    for (idx, circle) in circles.iter().enumerate() {
        println!(
            "  channel {:>3}: X: {}, Y: {}, R: {}",
            idx + 1,
            circle.x,
            circle.y,
            circle.r
        );
    }
}

fn output_json(dxf: &std::path::Path, circles: &[Circle]) {
    let output = serde_json::json!({
        "file": dxf.display().to_string(),
        "count": circles.len(),
        "circles": circles,
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn output_csv(circles: &[Circle]) {
    println!("channel,x,y,r");
    for (idx, circle) in circles.iter().enumerate() {
        println!("{},{},{},{}", idx + 1, circle.x, circle.y, circle.r);
    }
}
