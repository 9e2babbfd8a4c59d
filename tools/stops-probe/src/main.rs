use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use parada_core::client::{HttpFetcher, SiriClient};
use parada_core::transit::{point, StaticStopProvider, StopIdentifier, StopProvider};
use parada_core::TransitConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stops-probe",
    author,
    version,
    about = "Rank bundled bus stops around a point and query live arrivals",
    long_about = "Loads an OSM bus stop export (bare element array or Overpass response), \
                  ranks every usable stop by distance from the given point and prints the \
                  nearest ones.\n\n\
                  Optionally queries the operator's /siri endpoint for the line list or \
                  the upcoming arrivals at one stop."
)]
struct Args {
    /// Geodata JSON file with the bus stop export
    #[arg(short, long)]
    input: PathBuf,

    /// Latitude to rank around (defaults to the city fallback)
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude to rank around (defaults to the city fallback)
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// How many stops to print
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Only print stops within this many kilometres
    #[arg(short, long)]
    radius: Option<f64>,

    /// Fetch arrivals for this stop reference
    #[arg(short, long)]
    arrivals: Option<String>,

    /// Fetch the line list
    #[arg(long)]
    lines: bool,

    /// Override the live data base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the city query parameter
    #[arg(long)]
    city: Option<String>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let mut config = TransitConfig::salamanca();
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(city) = &args.city {
        config = config.with_city(city);
    }

    log::info!("=== Stops Probe ===");
    log::info!("Input: {}", args.input.display());

    if !args.input.exists() {
        bail!("Input file does not exist: {}", args.input.display());
    }

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let provider =
        StaticStopProvider::from_geodata_json(&bytes).context("Failed to parse geodata")?;
    log::info!(
        "Loaded {} records, {} usable stops",
        provider.record_count(),
        provider.len()
    );

    let reference = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => point(lat, lon),
        (None, None) => config.fallback_location(),
        _ => bail!("--lat and --lon must be given together"),
    };
    log::info!("Reference: {:.5}, {:.5}", reference.y(), reference.x());

    let ranked = match args.radius {
        Some(radius_km) => provider.stops_near(reference, radius_km),
        None => provider.ranked_stops(reference),
    };
    log::info!("");
    log::info!("Nearest stops ({} ranked):", ranked.len());
    for entry in ranked.iter().take(args.limit) {
        log::info!(
            "  {:>6}  {:<40} {:>7.3} km",
            entry.stop.id,
            entry.stop.name,
            entry.distance_km
        );
    }

    if !args.lines && args.arrivals.is_none() {
        return Ok(());
    }

    let fetcher = HttpFetcher::new().context("Failed to build HTTP client")?;
    let client = SiriClient::new(fetcher, &config).context("Invalid live data configuration")?;

    if args.lines {
        log::info!("");
        log::info!("Fetching lines from {}", client.lines_url());
        let lines = client.lines().await.context("Failed to fetch lines")?;
        for line in &lines {
            log::info!("  {:>4}  {} ({} stops)", line.id, line.name, line.stops.len());
            for stop in &line.stops {
                log::debug!("        {:>6}  {}", stop.id, stop.name);
            }
        }
    }

    if let Some(stop) = &args.arrivals {
        let id = StopIdentifier::new(stop.as_str());
        match provider.get_stop(&id) {
            Some(known) => log::info!("Stop {}: {}", known.id, known.name),
            None => log::warn!("Stop {id} is not in the geodata export"),
        }

        log::info!("");
        log::info!("Fetching arrivals from {}", client.arrivals_url(&id));
        let buses = client.arrivals(&id).await.context("Failed to fetch arrivals")?;
        if buses.is_empty() {
            log::info!("  No buses expected");
        }
        for bus in &buses {
            log::info!("  {:>4}  {:<30} {}", bus.line, bus.direction, bus.time);
        }
    }

    Ok(())
}
