mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod render;

use clap::Parser;
use cli::{Cli, Commands, LocationArgs};
use config::Config;
use datasources::{
    ConfiguredLocation, HomeAssistantLightSensor, ImagePayload, OpenWeatherMapClient,
    PlantIdClient,
};
use db::{save_plant, Database, KeyValueCollection, PlantCollection};
use error::Result;
use logic::PlantService;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Check => {
            let config = load_config(&cli.config)?;
            check_connections(&config).await;
            Ok(())
        }
        Commands::Identify {
            ref image,
            save,
            assess,
            location,
        } => {
            let config = load_config(&cli.config)?;
            let service = build_service(&config, location);

            let payload = ImagePayload::load(&reqwest::Client::new(), image).await?;
            let plant = service.identify(&payload).await?;

            let saved_id = if save {
                let collection = open_collection(&cli)?;
                Some(save_plant(&collection, plant.clone(), payload.image_ref())?.id)
            } else {
                None
            };

            let conditions = if assess {
                Some(service.assess(&plant).await?)
            } else {
                None
            };

            if cli.json {
                print_json(&serde_json::json!({
                    "plant": plant,
                    "saved_id": saved_id,
                    "growing_conditions": conditions,
                }))?;
            } else {
                print!("{}", render::plant_summary(&plant));
                if let Some(id) = saved_id {
                    println!("Saved as {}", id);
                }
                if let Some(ref c) = conditions {
                    println!();
                    print!("{}", render::conditions(c));
                }
            }
            Ok(())
        }
        Commands::Assess { ref id, location } => {
            let config = load_config(&cli.config)?;
            let saved = open_collection(&cli)?.find(id)?;
            let service = build_service(&config, location);
            let conditions = service.assess(&saved.plant).await?;

            if cli.json {
                print_json(&conditions)?;
            } else {
                println!("{} ({})", saved.plant.name, saved.plant.scientific_name);
                print!("{}", render::conditions(&conditions));
            }
            Ok(())
        }
        Commands::List => {
            let plants = open_collection(&cli)?.all()?;
            if cli.json {
                print_json(&plants)?;
            } else {
                print!("{}", render::saved_list(&plants));
            }
            Ok(())
        }
        Commands::Show { ref id } => {
            let saved = open_collection(&cli)?.find(id)?;
            if cli.json {
                print_json(&saved)?;
            } else {
                println!("Saved {}", saved.saved_at_iso());
                if saved.image.is_inline() {
                    println!("Image: inline ({} chars)", saved.image.as_str().len());
                } else {
                    println!("Image: {}", saved.image.as_str());
                }
                print!("{}", render::care_guide(&saved.plant));
            }
            Ok(())
        }
        Commands::Remove { ref id } => {
            if open_collection(&cli)?.remove(id)? {
                println!("Removed {}", id);
                Ok(())
            } else {
                Err(error::LeafLensError::NotFound(format!("saved plant {}", id)))
            }
        }
    }
}

fn load_config(path: &Option<std::path::PathBuf>) -> Result<Config> {
    if !Config::exists(path.as_ref()) {
        eprintln!("Please copy config/config.yaml.example to config/config.yaml or run `leaflens init`");
    }
    Config::load(path.clone())
}

fn open_collection(cli: &Cli) -> Result<KeyValueCollection<Database>> {
    let db = Database::open(cli.data_dir.as_ref())?;
    tracing::debug!(path = %db.path().display(), "Opened database");
    Ok(KeyValueCollection::new(db))
}

fn build_service(config: &Config, location: LocationArgs) -> PlantService {
    let identifier = Box::new(PlantIdClient::new(config.plant_id.clone()));
    let locator = Box::new(ConfiguredLocation::new(
        config.coordinates(location.lat, location.lon),
    ));

    let mut service = PlantService::new(identifier, locator)
        .with_fallback_weather(config.assessment.fallback_weather());

    // Create OpenWeatherMap client if configured and enabled
    match config
        .openweathermap
        .as_ref()
        .filter(|c| c.enabled && !c.api_key.is_empty())
    {
        Some(owm) => {
            service = service.with_weather(Box::new(OpenWeatherMapClient::new(owm.clone())));
        }
        None => {
            tracing::info!("OpenWeatherMap not configured - assessments use the default reading");
        }
    }

    if let Some(ref sensor) = config.light_sensor {
        service = service.with_light_sensor(Box::new(HomeAssistantLightSensor::new(sensor.clone())));
    }

    service
}

async fn check_connections(config: &Config) {
    let plant_id = PlantIdClient::new(config.plant_id.clone());
    let plant_id_ok = plant_id.test_connection().await.unwrap_or(false);
    println!("Plant.id:       {}", status_label(plant_id_ok));

    match (&config.openweathermap, config.coordinates(None, None)) {
        (Some(owm), Some(coords)) if owm.enabled => {
            let client = OpenWeatherMapClient::new(owm.clone());
            let ok = client.test_connection(coords).await.unwrap_or(false);
            println!("OpenWeatherMap: {}", status_label(ok));
        }
        (Some(owm), None) if owm.enabled => {
            println!("OpenWeatherMap: SKIPPED (no location configured)");
        }
        _ => println!("OpenWeatherMap: NOT CONFIGURED"),
    }

    match config.light_sensor {
        Some(ref sensor) => {
            let client = HomeAssistantLightSensor::new(sensor.clone());
            let ok = client.test_connection().await.unwrap_or(false);
            println!("Light sensor:   {}", status_label(ok));
        }
        None => println!("Light sensor:   NOT CONFIGURED (time-of-day estimate)"),
    }
}

fn status_label(ok: bool) -> &'static str {
    if ok {
        "OK"
    } else {
        "OFFLINE"
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
