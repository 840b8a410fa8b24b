//! voltroute CLI
//!
//! Command-line interface for planning EV trips from the terminal.

#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use application::{RoutingPort, TripForm, TripService};
use clap::{Parser, Subcommand};
use infrastructure::{
    AppConfig, ChargingApiAdapter, MapScene, SqliteTripStore, SummaryPanel, TemplateEngine,
    create_pool, format_quantity,
};
use integration_charging::HttpChargingClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// voltroute CLI
#[derive(Parser)]
#[command(name = "voltroute")]
#[command(author, version, about = "EV trip planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to an explicit config file
    #[arg(long)]
    config: Option<String>,

    /// Override the charging backend base URL
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the vehicles offered by the charging backend
    Vehicles,

    /// Plan a trip and print its summary
    ///
    /// Fetches the vehicle, computes the route with charging stops and
    /// persists the result, so a later `last` can replay it offline.
    Plan {
        /// Vehicle id from the catalog
        #[arg(long)]
        vehicle: String,

        /// Departure city
        #[arg(long)]
        from: String,

        /// Destination city
        #[arg(long)]
        to: String,

        /// Write the trip map as an HTML page to this path
        #[arg(long)]
        map_out: Option<PathBuf>,
    },

    /// Show the last planned trip without calling the backend
    Last {
        /// Write the stored trip map as an HTML page to this path
        #[arg(long)]
        map_out: Option<PathBuf>,
    },

    /// Estimate charging time and price for a distance
    Estimate {
        /// Vehicle id from the catalog
        #[arg(long)]
        vehicle: String,

        /// Trip distance in kilometers
        #[arg(long)]
        distance: f64,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the routing adapter from the loaded configuration
fn build_adapter(config: &AppConfig) -> anyhow::Result<ChargingApiAdapter> {
    let client = HttpChargingClient::new(&config.api.to_api_config())?;
    Ok(ChargingApiAdapter::new(client))
}

/// Build the trip service backed by the SQLite store
fn build_service(
    config: &AppConfig,
    adapter: Arc<ChargingApiAdapter>,
) -> anyhow::Result<TripService> {
    let pool = create_pool(&config.storage)?;
    let store = Arc::new(SqliteTripStore::new(Arc::new(pool)));
    Ok(TripService::new(adapter, store))
}

/// Print a summary panel under an emoji heading
fn print_panel(panel: &SummaryPanel) {
    println!("📋 Trip summary:");
    for line in panel.lines() {
        println!("   {}: {}", line.label, line.value);
    }
}

/// Render a map scene and write the HTML page to `path`
fn write_map_file(engine: &TemplateEngine, scene: &MapScene, path: &Path) -> anyhow::Result<()> {
    let html = engine.render_map(scene)?;
    std::fs::write(path, html)?;
    Ok(())
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    tracing::debug!(api_url = %config.api.base_url, "Configuration loaded");

    match cli.command {
        Commands::Vehicles => {
            let adapter = build_adapter(&config)?;

            match adapter.list_vehicles().await {
                Ok(vehicles) if vehicles.is_empty() => {
                    println!("📭 The catalog is empty");
                },
                Ok(vehicles) => {
                    println!("🚗 Available vehicles:");
                    for vehicle in &vehicles {
                        println!("   {}  {}", vehicle.id, vehicle.display_name());
                    }
                },
                Err(e) => {
                    println!("❌ Could not fetch the catalog: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Plan {
            vehicle,
            from,
            to,
            map_out,
        } => {
            let adapter = Arc::new(build_adapter(&config)?);
            let service = build_service(&config, Arc::clone(&adapter))?;
            service.hydrate().await;

            let mut form = TripForm::new();
            form.load_catalog(adapter.as_ref()).await;

            // The catalog is advisory; a failed or incomplete catalog never
            // blocks submission.
            if let Some(error) = form.catalog_error() {
                println!("⚠️  Vehicle catalog unavailable: {error}");
            } else if let Some(found) = form.find_vehicle(&vehicle) {
                println!("🚗 Vehicle: {}", found.display_name());
            } else {
                println!("⚠️  Vehicle {vehicle} is not in the catalog, sending the id as given");
            }

            form.set_vehicle_id(vehicle.as_str());
            form.set_origin(from.as_str());
            form.set_destination(to.as_str());

            let request = match form.try_submit(service.is_loading()) {
                Ok(request) => request,
                Err(e) => {
                    println!("❌ {e}");
                    std::process::exit(1);
                },
            };

            println!("🔌 Planning trip from {from} to {to}...");

            match service.plan_trip(&request).await {
                Ok(outcome) => {
                    let panel = SummaryPanel::build(Some(&outcome.vehicle), Some(&outcome.route));
                    print_panel(&panel);

                    if let Some(path) = map_out {
                        let scene = MapScene::build(&outcome.map, &config.map.to_render_options());
                        if scene.is_blank() {
                            println!("⚠️  No route geometry came back, skipping the map");
                        } else {
                            let engine = TemplateEngine::new()?;
                            write_map_file(&engine, &scene, &path)?;
                            println!("🗺️  Map written to {}", path.display());
                        }
                    }
                },
                Err(e) => {
                    println!("❌ Trip planning failed: {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Last { map_out } => {
            let adapter = Arc::new(build_adapter(&config)?);
            let service = build_service(&config, adapter)?;
            service.hydrate().await;

            let state = service.snapshot();
            let panel = SummaryPanel::build(state.vehicle.as_ref(), state.route.as_ref());
            if panel.is_empty() {
                println!("📭 No trip planned yet");
            } else {
                print_panel(&panel);
            }

            if let Some(path) = map_out {
                // An empty state still renders, as the default view of France.
                let engine = TemplateEngine::new()?;
                let scene = MapScene::build(&state.map, &config.map.to_render_options());
                write_map_file(&engine, &scene, &path)?;
                println!("🗺️  Map written to {}", path.display());
            }
        },

        Commands::Estimate { vehicle, distance } => {
            let adapter = build_adapter(&config)?;

            match adapter.estimate_charging(&vehicle, distance).await {
                Ok(estimate) => {
                    println!("⚡ Charging estimate for {}:", format_quantity(distance, "km"));
                    match estimate.charging_hours {
                        Some(hours) => {
                            println!("   Charging time: {}", format_quantity(hours, "h"));
                        },
                        None => println!("   Charging time: unavailable"),
                    }
                    if let Some(price) = estimate.price {
                        println!("   Price: {}", format_quantity(price, "€"));
                    }
                },
                Err(e) => {
                    println!("❌ Charging estimate failed: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
