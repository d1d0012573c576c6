use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use onebusaway::{Client, Config, HttpTransport, Params, ResolutionPolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        help = "Json configuration file with baseUrl and apiKey (OBA_BASE_URL and OBA_API_KEY override it)"
    )]
    config: Option<PathBuf>,

    #[arg(long, help = "Fail when a response references an object it does not ship")]
    strict: bool,

    #[arg(
        short,
        long = "param",
        value_parser = parse_param,
        help = "Extra query parameter as key=value, can be repeated"
    )]
    params: Vec<(String, String)>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows an agency
    Agency {
        #[arg(long)]
        id: String,
    },
    /// Shows the trips and stop times of a block
    Block {
        #[arg(long)]
        id: String,
    },
    /// Shows a route and its agency
    Route {
        #[arg(long)]
        id: String,
    },
    /// Shows a stop and the routes serving it
    Stop {
        #[arg(long)]
        id: String,
    },
    /// Shows a trip
    Trip {
        #[arg(long)]
        id: String,
    },
    /// Lists the upcoming arrivals and departures at a stop
    Arrivals {
        #[arg(long)]
        id: String,
    },
    /// Shows the schedule of a stop, for today or the `date` parameter
    Schedule {
        #[arg(long)]
        id: String,
    },
    /// Lists the active vehicles of an agency
    Vehicles {
        #[arg(long)]
        id: String,
    },
    /// Shows the time of the server
    CurrentTime,
    /// Reports a problem with a stop
    ReportStopProblem {
        #[arg(long)]
        id: String,
        #[arg(long, help = "Problem code, e.g. stop_name_wrong or stop_location_wrong")]
        code: Option<String>,
        #[arg(long, help = "Free text comment")]
        comment: Option<String>,
    },
    /// Reports a problem with a trip
    ReportTripProblem {
        #[arg(long)]
        id: String,
        #[arg(long, help = "Problem code, e.g. vehicle_never_came or vehicle_does_not_stop_here")]
        code: Option<String>,
        #[arg(long, help = "Free text comment")]
        comment: Option<String>,
    },
}

fn parse_param(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("'{}' is not formatted as key=value", s))?;
    Ok((key.to_owned(), value.to_owned()))
}

fn load_config(path: &Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("Failed to load the configuration {}", path.display()))?,
        None => Config::default(),
    };
    Ok(config.with_env_overrides())
}

fn report_params(mut params: Params, code: Option<String>, comment: Option<String>) -> Params {
    if let Some(code) = code {
        params.insert("code".to_owned(), code);
    }
    if let Some(comment) = comment {
        params.insert("userComment".to_owned(), comment);
    }
    params
}

fn run(client: &Client<HttpTransport>, command: Command, params: Params) -> Result<()> {
    match command {
        Command::Agency { id } => println!("{:#?}", client.agency(&id)?),
        Command::Block { id } => println!("{:#?}", client.block(&id)?),
        Command::Route { id } => println!("{:#?}", client.route(&id)?),
        Command::Stop { id } => println!("{:#?}", client.stop(&id)?),
        Command::Trip { id } => println!("{:#?}", client.trip(&id)?),
        Command::Arrivals { id } => println!(
            "{:#?}",
            client.arrivals_and_departures_for_stop(&id, &params)?
        ),
        Command::Schedule { id } => println!("{:#?}", client.schedule_for_stop(&id, &params)?),
        Command::Vehicles { id } => println!("{:#?}", client.vehicles_for_agency(&id, &params)?),
        Command::CurrentTime => println!("{:#?}", client.current_time()?),
        Command::ReportStopProblem { id, code, comment } => {
            client.report_problem_with_stop(&id, &report_params(params, code, comment))?;
            println!("Problem with stop {} reported", id);
        }
        Command::ReportTripProblem { id, code, comment } => {
            client.report_problem_with_trip(&id, &report_params(params, code, comment))?;
            println!("Problem with trip {} reported", id);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args.config)?;
    let policy = if args.strict {
        ResolutionPolicy::Strict
    } else {
        ResolutionPolicy::Tolerant
    };
    let client = Client::from_config(&config)
        .context("Invalid configuration")?
        .with_policy(policy);
    log::debug!("using {}", client.base_url());

    let params = args.params.into_iter().collect();
    run(&client, args.command, params).context("The request failed")
}
