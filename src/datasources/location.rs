use super::LocationProvider;
use crate::error::{LeafLensError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;

/// Location taken from config or the command line.
pub struct ConfiguredLocation {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn locate(&self) -> Result<Coordinates> {
        let coords = self.coordinates.ok_or_else(|| {
            LeafLensError::GeolocationUnavailable(
                "no location configured; set `location` in config.yaml or pass --lat/--lon"
                    .into(),
            )
        })?;

        if !(-90.0..=90.0).contains(&coords.latitude) || !(-180.0..=180.0).contains(&coords.longitude)
        {
            return Err(LeafLensError::GeolocationUnavailable(format!(
                "coordinates out of range: {}",
                coords
            )));
        }

        Ok(coords)
    }
}
