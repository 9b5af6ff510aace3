use super::LightSensor;
use crate::config::LightSensorConfig;
use crate::error::{LeafLensError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Ambient light from a Home Assistant illuminance entity (lux).
pub struct HomeAssistantLightSensor {
    client: reqwest::Client,
    config: LightSensorConfig,
}

#[derive(Debug, Deserialize)]
struct EntityState {
    state: String,
    #[allow(dead_code)]
    entity_id: String,
}

fn parse_lux(state: &str) -> Result<f64> {
    state.trim().parse::<f64>().map_err(|_| {
        LeafLensError::DataSourceUnavailable(format!(
            "Home Assistant illuminance state '{}' is not numeric",
            state
        ))
    })
}

impl HomeAssistantLightSensor {
    pub fn new(config: LightSensorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn get_entity_state(&self, entity_id: &str) -> Result<String> {
        let url = format!(
            "{}/api/states/{}",
            self.config.url.trim_end_matches('/'),
            entity_id
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| LeafLensError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        if !response.status().is_success() {
            return Err(LeafLensError::DataSourceUnavailable(format!(
                "Home Assistant returned {}",
                response.status()
            )));
        }

        let entity: EntityState = response.json().await.map_err(|e| {
            LeafLensError::DataSourceUnavailable(format!(
                "Failed to parse Home Assistant response: {}",
                e
            ))
        })?;

        Ok(entity.state)
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/", self.config.url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .send()
            .await
            .map_err(|e| LeafLensError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl LightSensor for HomeAssistantLightSensor {
    async fn illuminance(&self) -> Result<f64> {
        let state = self.get_entity_state(&self.config.illuminance_entity).await?;
        parse_lux(&state)
    }
}
