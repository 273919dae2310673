use crate::{
    client::ItineraryApiClient,
    config::{self, ServiceConfig},
    core::view::{ViewEvent, ViewState},
    render::render_view,
    server::run_serve,
    types::trip::{BudgetLevel, Interest, TripRequest},
};
use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{collections::HashMap, env, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the trip-itinerary tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    match matches.subcommand() {
        Some(("serve", sub)) => serve(sub).await,
        Some(("plan", sub)) => plan(sub).await,
        _ => unreachable!("subcommand_required is set"),
    }
}

fn command() -> Command {
    Command::new("trip-itinerary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate day-by-day travel itineraries with Gemini")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the itinerary HTTP API")
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to bind (or set BIND_ADDRESS)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Port to listen on (or set PORT)"),
                )
                .arg(
                    Arg::new("api-key")
                        .short('k')
                        .long("api-key")
                        .value_name("KEY")
                        .help("Gemini API key (or set GEMINI_API_KEY)"),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Gemini model name (or set GEMINI_MODEL)"),
                )
                .arg(
                    Arg::new("base-url")
                        .short('u')
                        .long("base-url")
                        .value_name("URL")
                        .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("Upstream request timeout (or set UPSTREAM_TIMEOUT_SECS)"),
                )
                .arg(
                    Arg::new("strict-shape")
                        .long("strict-shape")
                        .action(ArgAction::SetTrue)
                        .help("Reject itineraries whose counts or totals are off"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Request an itinerary from a running server and print it")
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("PLACE")
                        .required(true),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("interest")
                        .short('i')
                        .long("interest")
                        .value_name("INTEREST")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Repeat for each interest: beaches, history, nightlife, nature, food, adventure, culture, shopping"),
                )
                .arg(
                    Arg::new("budget")
                        .long("budget")
                        .value_name("LEVEL")
                        .default_value("medium")
                        .help("low, medium or high"),
                )
                .arg(
                    Arg::new("server")
                        .short('s')
                        .long("server")
                        .value_name("URL")
                        .env(config::ENV_API_URL)
                        .default_value(config::DEFAULT_API_URL)
                        .help("Itinerary API root"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("How long to wait for the server (default: upstream timeout + 30)"),
                ),
        )
}

async fn serve(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    // Flags take precedence over the environment
    let mut overrides: HashMap<&str, String> = HashMap::new();
    for (flag, key) in [
        ("bind", config::ENV_BIND),
        ("port", config::ENV_PORT),
        ("api-key", config::ENV_API_KEY),
        ("model", config::ENV_MODEL),
        ("base-url", config::ENV_BASE_URL),
        ("timeout", config::ENV_TIMEOUT),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            overrides.insert(key, value.clone());
        }
    }
    if matches.get_flag("strict-shape") {
        overrides.insert(config::ENV_STRICT_SHAPE, "true".to_string());
    }

    let config = ServiceConfig::from_lookup(|key| {
        overrides.get(key).cloned().or_else(|| env::var(key).ok())
    })?;
    info!("Starting itinerary service with {:?}", config);

    if let Err(e) = run_serve(&config).await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

async fn plan(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let destination = required(matches, "destination")?;
    let start = parse_date(required(matches, "start")?)?;
    let end = parse_date(required(matches, "end")?)?;
    let budget: BudgetLevel = required(matches, "budget")?.parse()?;
    let interests = matches
        .get_many::<String>("interest")
        .into_iter()
        .flatten()
        .map(|raw| raw.parse::<Interest>())
        .collect::<Result<Vec<_>, _>>()?;

    let request = TripRequest::from_form(destination, start, end, &interests, budget);
    let client = ItineraryApiClient::new(required(matches, "server")?, client_timeout(matches)?)?;
    info!("Requesting itinerary from {}", client.base_url());

    let loading = ViewState::default().transition(ViewEvent::Submit(request.clone()));
    print!("{}", render_view(&loading));
    let state = client.submit(ViewState::default(), request).await;
    print!("{}", render_view(&state));

    if let ViewState::Error(message) = state {
        error!("Itinerary request failed: {}", message);
        return Err(message.into());
    }
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("--{name} is required"))
}

fn client_timeout(matches: &ArgMatches) -> Result<Duration, Box<dyn std::error::Error>> {
    match matches.get_one::<String>("timeout") {
        Some(raw) => Ok(config::parse_timeout(raw)?),
        None => Ok(Duration::from_secs(config::DEFAULT_CLIENT_TIMEOUT_SECS)),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date {raw}, expected YYYY-MM-DD"))
}
