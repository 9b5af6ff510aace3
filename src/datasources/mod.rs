pub mod homeassistant;
pub mod image;
pub mod location;
pub mod openweathermap;
pub mod plantid;

pub use homeassistant::HomeAssistantLightSensor;
pub use image::ImagePayload;
pub use location::ConfiguredLocation;
pub use openweathermap::OpenWeatherMapClient;
pub use plantid::{IdentifyResponse, PlantIdClient};

use crate::error::Result;
use crate::models::{Coordinates, WeatherObservation};
use async_trait::async_trait;

/// Identifies a plant from a photo.
#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    async fn identify(&self, image: &ImagePayload) -> Result<IdentifyResponse>;
}

/// Current weather at a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, at: Coordinates) -> Result<WeatherObservation>;
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<Coordinates>;
}

/// Ambient light sensor reporting illuminance in lux.
#[async_trait]
pub trait LightSensor: Send + Sync {
    async fn illuminance(&self) -> Result<f64>;
}
