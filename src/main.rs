use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use huntcast::{
    config::Config,
    engine::{EngineSettings, Forecaster, OutlookRequest, PredictionEngine, PredictionRequest},
    logging,
    report::ReportWriter,
    species::Species,
    weather::{ConfiguredWeather, FileWeather, NoWeather, StaticWeather, WeatherObservation},
    web, ConfigLoader,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Wildlife activity predictions for hunting areas")]
struct Cli {
    /// Path to a YAML config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a bounding box and print the ranked predictions as JSON
    Predict {
        /// JSON request: bounds, terrain, optional sightings/species/at
        #[arg(long)]
        input: PathBuf,

        /// Also write the batch into this directory
        #[arg(long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        weather: WeatherArgs,
    },
    /// Rank the hours of a day for each species
    Outlook {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Repeat to select several species (all when omitted)
        #[arg(long)]
        species: Vec<String>,

        /// Day to rank, YYYY-MM-DD (today when omitted)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        weather: WeatherArgs,
    },
    /// Print the species profile tables as JSON
    Species,
    /// Serve the JSON API
    Serve {
        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,

        #[command(flatten)]
        weather: WeatherArgs,
    },
}

#[derive(Debug, Args)]
struct WeatherArgs {
    /// Weather JSON file (observation or OpenWeatherMap response); overrides the config
    #[arg(long)]
    weather: Option<PathBuf>,

    /// Score without weather
    #[arg(long, conflicts_with = "weather")]
    no_weather: bool,

    /// Manual observation, °F
    #[arg(
        long,
        allow_negative_numbers = true,
        requires_all = ["wind_speed", "precipitation", "pressure"],
        conflicts_with_all = ["weather", "no_weather"]
    )]
    temperature: Option<f64>,

    /// Manual observation, mph
    #[arg(long, requires = "temperature")]
    wind_speed: Option<f64>,

    /// Manual observation, inches per hour
    #[arg(long, requires = "temperature")]
    precipitation: Option<f64>,

    /// Manual observation, inHg
    #[arg(long, requires = "temperature")]
    pressure: Option<f64>,
}

impl WeatherArgs {
    fn provider(&self, config: &Config) -> ConfiguredWeather {
        if self.no_weather {
            return ConfiguredWeather::Disabled(NoWeather);
        }
        if let (Some(temperature), Some(wind_speed), Some(precipitation), Some(pressure)) = (
            self.temperature,
            self.wind_speed,
            self.precipitation,
            self.pressure,
        ) {
            return ConfiguredWeather::Static(StaticWeather(WeatherObservation {
                temperature,
                wind_speed,
                precipitation,
                pressure,
            }));
        }
        match self.weather.as_ref().or(config.weather.source.as_ref()) {
            Some(path) => ConfiguredWeather::File(FileWeather::new(path)),
            None => ConfiguredWeather::Disabled(NoWeather),
        }
    }
}

fn forecaster(config: &Config, weather: &WeatherArgs) -> Forecaster<ConfiguredWeather> {
    Forecaster::new(
        PredictionEngine::new(EngineSettings::from_config(config)),
        weather.provider(config),
        config.weather.timeout(),
    )
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::new(".").load_or_default(cli.config.as_ref())?;
    logging::init(&config.logging.level);

    match cli.command {
        Command::Predict {
            input,
            out,
            weather,
        } => {
            let data = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read request {}", input.display()))?;
            let request: PredictionRequest = serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            let batch = forecaster(&config, &weather)
                .generate_predictions(&request)
                .await?;
            if let Some(dir) = out {
                let path = ReportWriter::new(dir).write(&batch)?;
                info!(path = %path.display(), "wrote prediction report");
            }
            print_json(&batch)?;
        }
        Command::Outlook {
            lat,
            lon,
            species,
            date,
            weather,
        } => {
            let request = OutlookRequest {
                lat,
                lon,
                species: (!species.is_empty()).then_some(species),
                at: date.map(|day| day.and_time(NaiveTime::MIN)),
            };
            let outlooks = forecaster(&config, &weather).outlook(&request).await?;
            print_json(&outlooks)?;
        }
        Command::Species => {
            let profiles: Vec<_> = Species::ALL
                .into_iter()
                .map(|species| (species, species.profile()))
                .collect();
            print_json(&profiles)?;
        }
        Command::Serve {
            host,
            port,
            weather,
        } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let addr = server.socket_addr()?;
            web::run(Arc::new(forecaster(&config, &weather)), addr).await?;
        }
    }
    Ok(())
}
