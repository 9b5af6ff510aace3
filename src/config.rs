use crate::error::{LeafLensError, Result};
use crate::models::{Coordinates, WeatherObservation};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub plant_id: PlantIdConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub location: Option<LocationConfig>,
    pub light_sensor: Option<LightSensorConfig>,
    #[serde(default)]
    pub assessment: AssessmentConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct PlantIdConfig {
    pub api_key: String,
    #[serde(default = "default_plant_id_endpoint")]
    pub endpoint: String,
}

fn default_plant_id_endpoint() -> String {
    "https://api.plant.id/v2".into()
}

impl std::fmt::Debug for PlantIdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantIdConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(config: LocationConfig) -> Self {
        Coordinates::new(config.latitude, config.longitude)
    }
}

/// Home Assistant illuminance sensor used as the ambient light source.
#[derive(Clone, Deserialize, Serialize)]
pub struct LightSensorConfig {
    pub url: String,
    pub token: String,
    pub illuminance_entity: String,
}

impl std::fmt::Debug for LightSensorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightSensorConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("illuminance_entity", &self.illuminance_entity)
            .finish()
    }
}

/// Reading substituted when the weather service cannot be reached.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AssessmentConfig {
    #[serde(default = "default_fallback_temperature")]
    pub fallback_temperature_c: f64,
    #[serde(default = "default_fallback_humidity")]
    pub fallback_humidity_percent: f64,
}

fn default_fallback_temperature() -> f64 {
    20.0
}

fn default_fallback_humidity() -> f64 {
    50.0
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            fallback_temperature_c: default_fallback_temperature(),
            fallback_humidity_percent: default_fallback_humidity(),
        }
    }
}

impl AssessmentConfig {
    pub fn fallback_weather(&self) -> WeatherObservation {
        WeatherObservation::new(self.fallback_temperature_c, self.fallback_humidity_percent)
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(LeafLensError::Config(format!(
                "Config file not found at {:?}. Run `leaflens init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| LeafLensError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse config text after `${VAR}` substitution.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| LeafLensError::Config(format!("Failed to parse config: {}", e)))?;

        if config.plant_id.api_key.trim().is_empty() {
            return Err(LeafLensError::Config(
                "plant_id.api_key is empty - set PLANT_ID_API_KEY or edit config.yaml".into(),
            ));
        }

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/leaflens/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| LeafLensError::Config("Cannot determine config directory".into()))?
            .join("leaflens");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up LeafLens!");
        println!();

        println!("Plant.id");
        let plant_id_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(input_error)?;

        println!();

        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                enabled: true,
            })
        };

        println!();

        println!("Location (used for local weather)");
        let latitude: f64 = Input::new()
            .with_prompt("  Latitude")
            .default(39.83)
            .interact_text()
            .map_err(input_error)?;

        let longitude: f64 = Input::new()
            .with_prompt("  Longitude")
            .default(-75.87)
            .interact_text()
            .map_err(input_error)?;

        println!();

        println!("Home Assistant light sensor (leave URL blank to skip)");
        let ha_url: String = Input::new()
            .with_prompt("  URL")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(input_error)?;

        let light_sensor = if ha_url.is_empty() {
            None
        } else {
            let token: String = Password::new()
                .with_prompt("  Token")
                .allow_empty_password(true)
                .interact()
                .map_err(input_error)?;

            let illuminance_entity: String = Input::new()
                .with_prompt("  Illuminance entity")
                .default("sensor.living_room_illuminance".into())
                .interact_text()
                .map_err(input_error)?;

            Some(LightSensorConfig {
                url: ha_url,
                token,
                illuminance_entity,
            })
        };

        println!();

        let config = Config {
            plant_id: PlantIdConfig {
                api_key: plant_id_key,
                endpoint: default_plant_id_endpoint(),
            },
            openweathermap,
            location: Some(LocationConfig {
                latitude,
                longitude,
            }),
            light_sensor,
            assessment: AssessmentConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| LeafLensError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# LeafLens Configuration\n# Generated by `leaflens init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("LEAFLENS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| LeafLensError::Config("Cannot determine data directory".into()))?
            .join("leaflens");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("leaflens.db"))
    }

    /// Configured location, with CLI coordinates taking priority.
    pub fn coordinates(&self, latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => self.location.map(Coordinates::from),
        }
    }
}

fn input_error(e: dialoguer::Error) -> LeafLensError {
    LeafLensError::Config(format!("Input error: {}", e))
}
