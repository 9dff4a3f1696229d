use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_lib::{
    plan_route, Dataset, DatasetPaths, LineStringFeature, Point, RouteEndpoint, RouteRequest,
    DEFAULT_CRS,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor route planning over surveyed floorplan graphs")]
struct Cli {
    /// GeoJSON file with surveyed node positions and neighbour lists.
    #[arg(long)]
    nodes: PathBuf,

    /// GeoJSON file with room polygons and anchor nodes.
    #[arg(long)]
    floorplan: PathBuf,

    /// GeoJSON file with the serviceable-area boundary polygons.
    #[arg(long)]
    boundary: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the shortest walkable route between two locations.
    Route {
        /// Start location: a room label or an `x,y` coordinate.
        #[arg(long = "from")]
        from: String,
        /// Destination location: a room label or an `x,y` coordinate.
        #[arg(long = "to")]
        to: String,
        /// Room names the route must not pass through (repeatable).
        #[arg(long = "avoid")]
        avoid: Vec<String>,
        /// Coordinate reference system recorded on the output feature.
        #[arg(long, default_value = DEFAULT_CRS)]
        crs: String,
        /// Write the GeoJSON LineString to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = DatasetPaths {
        nodes: cli.nodes,
        floorplan: cli.floorplan,
        boundary: cli.boundary,
    };

    match cli.command {
        Command::Route {
            from,
            to,
            avoid,
            crs,
            output,
        } => handle_route(&paths, &from, &to, avoid, &crs, output.as_deref()),
    }
}

fn handle_route(
    paths: &DatasetPaths,
    from: &str,
    to: &str,
    avoid: Vec<String>,
    crs: &str,
    output: Option<&Path>,
) -> Result<()> {
    let dataset = Dataset::load(paths).context("failed to load the routing datasets")?;

    let request = RouteRequest {
        start: parse_endpoint(from),
        end: parse_endpoint(to),
        restricted_rooms: avoid,
    };
    let plan = plan_route(&dataset, &request)?;
    tracing::info!(hops = plan.hop_count(), cost = plan.total_cost, "route found");

    let graph = dataset.graph()?;
    let feature = LineStringFeature::from_plan(graph, &plan, crs)?;

    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            feature.write_to(file)?;
            println!("Route written to {}", path.display());
        }
        None => println!("{}", feature.to_json_string()?),
    }

    Ok(())
}

/// An endpoint that parses as `x,y` floats is a coordinate; anything else is
/// treated as a room label.
fn parse_endpoint(raw: &str) -> RouteEndpoint {
    if let Some((x, y)) = raw.split_once(',') {
        if let (Ok(x), Ok(y)) = (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
            return RouteEndpoint::Coordinate(Point::new(x, y));
        }
    }
    RouteEndpoint::Label(raw.trim().to_string())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
