use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use geojson_query::io::load_geojson;
use geojson_query::output::{Report, write_nearest};
use geojson_query::query::{
    coordinates_at, distance_between, geometry_type_at, nearest_feature, nearest_feature_par,
    polygon_area_at,
};

#[derive(Parser)]
#[command(about = "Area, distance and nearest-feature queries over GeoJSON")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a feature's geometry type and coordinates
    Info {
        file: PathBuf,

        /// Feature index within the collection
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Planar area of a polygon feature (square input units)
    Area {
        file: PathBuf,

        /// Feature index within the collection
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Great-circle distance (km) between the first points of two files
    Distance { first: PathBuf, second: PathBuf },
    /// Find the point feature nearest to a coordinate
    Nearest {
        file: PathBuf,

        /// Query latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Query longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Scan features on all cores
        #[arg(long)]
        parallel: bool,

        /// Write the nearest feature to this GeoJSON path
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn print_report(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Info { file, index } => {
            let collection = load_geojson(&file)?;
            let geometry_type = geometry_type_at(&collection, index)?;
            let coordinates = coordinates_at(&collection, index)?;

            if cli.json {
                print_report(&Report::Info {
                    index,
                    geometry_type,
                    coordinates,
                })?;
            } else {
                println!("Geometry type: {geometry_type}");
                println!("Coordinates: {coordinates}");
            }
        }
        Command::Area { file, index } => {
            let collection = load_geojson(&file)?;
            let area = polygon_area_at(&collection, index)
                .with_context(|| format!("Cannot compute area for {}", file.display()))?;

            if cli.json {
                print_report(&Report::Area { index, area })?;
            } else {
                println!("Area: {area} (planar, square coordinate units)");
            }
        }
        Command::Distance { first, second } => {
            let a = load_geojson(&first)?;
            let b = load_geojson(&second)?;
            let distance_km = distance_between(&a, &b).with_context(|| {
                format!(
                    "Cannot compute distance between {} and {}",
                    first.display(),
                    second.display()
                )
            })?;

            if cli.json {
                print_report(&Report::Distance { distance_km })?;
            } else {
                println!("Distance: {distance_km:.3} km");
            }
        }
        Command::Nearest {
            file,
            lat,
            lon,
            parallel,
            output,
        } => {
            eprintln!("Loading {}...", file.display());
            let collection = load_geojson(&file)?;

            eprintln!("Searching {} features...", collection.len());
            let nearest = if parallel {
                nearest_feature_par(&collection, lat, lon)?
            } else {
                nearest_feature(&collection, lat, lon)?
            };

            if cli.json {
                print_report(&Report::nearest(nearest.as_ref()))?;
            } else if let Some(n) = &nearest {
                println!("Nearest geometry type: {}", n.feature.geometry.type_name());
                println!("Nearest coordinates: {}", n.feature.geometry.coordinates());
                println!("Distance: {:.3} km", n.distance_km);
                println!("Properties:");
                for (key, value) in &n.feature.properties {
                    println!("  {key}: {value}");
                }
            } else {
                println!("No point features found in {}", file.display());
            }

            if let Some(path) = &output {
                if write_nearest(path, nearest.as_ref())? {
                    eprintln!("Wrote {}", path.display());
                } else {
                    eprintln!("Nothing written to {}: no point features", path.display());
                }
            }
        }
    }

    Ok(())
}
