use super::WeatherProvider;
use crate::config::OpenWeatherMapConfig;
use crate::error::{LeafLensError, Result};
use crate::models::{Coordinates, WeatherObservation};
use async_trait::async_trait;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn current_url(&self, at: Coordinates) -> String {
        format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            API_BASE_URL, at.latitude, at.longitude, self.config.api_key
        )
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, at: Coordinates) -> Result<bool> {
        let response = self
            .client
            .get(self.current_url(at))
            .send()
            .await
            .map_err(|e| {
                LeafLensError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

fn parse_current(body: &str) -> Result<WeatherObservation> {
    let owm: OwmCurrentResponse = serde_json::from_str(body).map_err(|e| {
        LeafLensError::DataSourceUnavailable(format!(
            "Failed to parse OpenWeatherMap response: {}",
            e
        ))
    })?;

    if let Some(name) = owm.name.as_deref().filter(|n| !n.is_empty()) {
        tracing::debug!(location = %name, "OpenWeatherMap resolved location");
    }

    Ok(WeatherObservation::new(owm.main.temp, owm.main.humidity))
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn current(&self, at: Coordinates) -> Result<WeatherObservation> {
        let response = self
            .client
            .get(self.current_url(at))
            .send()
            .await
            .map_err(|e| {
                LeafLensError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LeafLensError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_current(&body)
    }
}
