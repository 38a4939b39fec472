use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use trip_estimator::{
    AirportTable, Coordinate, PlanRequest, TripEstimatorConfig, TripEstimatorError, TripPlanner,
    TripQuery, distance_km,
    format::{format_date, format_date_range, format_rupiah},
    logging, web,
};

#[derive(Parser)]
#[command(name = "trip-estimator", version, about = "Trip cost, flight and nearest-airport estimation")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "TRIP_ESTIMATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Great-circle distance between two points
    Distance {
        /// Origin as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,
        /// Destination as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
    },
    /// Nearest airport to a point
    Airport {
        /// Point as LAT,LON
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        at: Coordinate,
    },
    /// Estimate trip cost from explicit inputs
    Estimate {
        #[command(flatten)]
        trip: TripArgs,
        /// Per-person round-trip fare; implies --flight
        #[arg(long)]
        fare: Option<f64>,
    },
    /// Resolve airports, suggest a flight and estimate the trip
    Plan {
        #[command(flatten)]
        trip: TripArgs,
    },
    /// Run the HTTP API
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct TripArgs {
    /// Origin as LAT,LON
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    from: Coordinate,
    /// Destination as LAT,LON
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    to: Coordinate,
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,
    /// Last day, inclusive (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,
    #[arg(long, default_value_t = 1)]
    adults: u32,
    #[arg(long, default_value_t = 0)]
    children: u32,
    /// Price per day; defaults to the configured value
    #[arg(long)]
    price: Option<f64>,
    /// Include a flight in the estimate
    #[arg(long)]
    flight: bool,
}

fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {e}"))?;
    Coordinate::new(lat, lon).map_err(|e| e.user_message())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TripEstimatorConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    if cli.verbose {
        match &cli.config {
            Some(path) => tracing::debug!("Using config from: {}", path.display()),
            None => tracing::debug!("Using default configuration"),
        }
    }

    run_command(config, cli.command).await.map_err(describe)
}

/// Turn library errors into their user-facing message
fn describe(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<TripEstimatorError>() {
        Some(e) => anyhow!("{} ({})", e.user_message(), e),
        None => err,
    }
}

fn build_planner(config: &TripEstimatorConfig) -> Result<TripPlanner> {
    let airports = Arc::new(config.airport_table()?);
    Ok(TripPlanner::from_config(config, airports))
}

async fn run_command(mut config: TripEstimatorConfig, command: Command) -> Result<()> {
    match command {
        Command::Distance { from, to } => {
            println!("{:.1} km", distance_km(&from, &to));
        }
        Command::Airport { at } => print_airport(&config.airport_table()?, &at),
        Command::Estimate { trip, fare } => {
            let price = trip
                .price
                .unwrap_or(config.estimation.default_price_per_day);
            let mut query = TripQuery::new(trip.from, trip.to, trip.start, trip.end, price)
                .with_travelers(trip.adults, trip.children);
            if trip.flight || fare.is_some() {
                query = query.with_flight(fare);
            }

            let result = build_planner(&config)?.estimator().estimate(&query)?;
            println!(
                "{} ({} hari), {} dewasa, {} anak-anak",
                format_date_range(trip.start, trip.end),
                result.duration_days,
                trip.adults,
                trip.children
            );
            println!("Berangkat: {}", format_date(trip.start));
            println!("Jarak: {:.1} km", result.distance_km);
            if result.flight_included {
                println!("Penerbangan: {}", format_rupiah(result.flight_cost, true));
            }
            println!("Total: {}", format_rupiah(result.total_cost, true));
        }
        Command::Plan { trip } => {
            let request = PlanRequest {
                origin: trip.from,
                destination: trip.to,
                start_date: trip.start,
                end_date: trip.end,
                adults: trip.adults,
                children: trip.children,
                price_per_day: trip.price,
                include_flight: trip.flight,
            };
            let plan = build_planner(&config)?.plan(&request)?;
            let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{json}");
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(config).await?;
        }
    }
    Ok(())
}

fn print_airport(airports: &AirportTable, at: &Coordinate) {
    let airport = airports.nearest(at);
    println!(
        "{} - {} ({}), {:.1} km",
        airport.code,
        airport.name,
        airport.city,
        distance_km(at, &airport.coordinate)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coordinate() {
        let c = parse_coordinate("-6.2088, 106.8456").unwrap();
        assert_eq!(c.latitude, -6.2088);
        assert_eq!(c.longitude, 106.8456);
    }

    #[rstest]
    #[case("95,0", "out of range")]
    #[case("0,181", "out of range")]
    #[case("abc", "expected LAT,LON")]
    #[case("abc,1", "bad latitude")]
    #[case("1,", "bad longitude")]
    fn test_parse_coordinate_rejects(#[case] input: &str, #[case] message: &str) {
        let err = parse_coordinate(input).unwrap_err();
        assert!(err.contains(message), "{err}");
    }

    #[test]
    fn test_negative_coordinates_parse_as_values() {
        let cli = Cli::try_parse_from([
            "trip-estimator",
            "distance",
            "--from",
            "-6.2088,106.8456",
            "--to",
            "-8.7462,115.1669",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Distance { .. }));
    }
}
