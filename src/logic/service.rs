use super::{assessor, classifier, ranges, recommendations, suitability};
use crate::datasources::plantid::Suggestion;
use crate::datasources::{
    ImagePayload, LightSensor, LocationProvider, PlantIdentifier, WeatherProvider,
};
use crate::error::{LeafLensError, Result};
use crate::models::{
    light_from_hour, lux_to_level, CareDifficulty, CareInstructions, EnvironmentalReading,
    GrowingConditions, HumidityCondition, Level, LightCondition, PlantIdentification,
    TemperatureCondition, WeatherObservation,
};
use chrono::Timelike;

pub const DEFAULT_WATERING: &str = "Water when top soil feels dry";
pub const DEFAULT_SUNLIGHT: &str = "Moderate to bright indirect light";
pub const DEFAULT_TEMPERATURE: &str = "65-80°F (18-27°C)";
pub const DEFAULT_SOIL: &str = "Well-draining potting mix";
pub const UNKNOWN_NAME: &str = "Unknown Plant";
pub const UNKNOWN_SPECIES: &str = "Unknown Species";
pub const NO_DESCRIPTION: &str = "No description available";

/// Sequences the external lookups and the pure assessment steps.
pub struct PlantService {
    identifier: Box<dyn PlantIdentifier>,
    location: Box<dyn LocationProvider>,
    weather: Option<Box<dyn WeatherProvider>>,
    light_sensor: Option<Box<dyn LightSensor>>,
    fallback_weather: WeatherObservation,
    clock: fn() -> u32,
}

fn local_hour() -> u32 {
    chrono::Local::now().hour()
}

impl PlantService {
    pub fn new(identifier: Box<dyn PlantIdentifier>, location: Box<dyn LocationProvider>) -> Self {
        Self {
            identifier,
            location,
            weather: None,
            light_sensor: None,
            fallback_weather: WeatherObservation::new(20.0, 50.0),
            clock: local_hour,
        }
    }

    pub fn with_weather(mut self, weather: Box<dyn WeatherProvider>) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_light_sensor(mut self, sensor: Box<dyn LightSensor>) -> Self {
        self.light_sensor = Some(sensor);
        self
    }

    /// Reading used whenever the weather service cannot answer.
    pub fn with_fallback_weather(mut self, fallback: WeatherObservation) -> Self {
        self.fallback_weather = fallback;
        self
    }

    /// Source of the local hour for the time-of-day light estimate.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: fn() -> u32) -> Self {
        self.clock = clock;
        self
    }

    pub async fn identify(&self, image: &ImagePayload) -> Result<PlantIdentification> {
        let response = self.identifier.identify(image).await.map_err(|e| match e {
            LeafLensError::IdentificationFailed(_) => e,
            other => LeafLensError::IdentificationFailed(other.to_string()),
        })?;

        let top = response
            .top()
            .ok_or_else(|| LeafLensError::IdentificationFailed("No plant matches found".into()))?;

        tracing::info!(
            plant = top.plant_name().unwrap_or(UNKNOWN_NAME),
            probability = top.probability.unwrap_or_default(),
            "Plant identified"
        );

        Ok(build_identification(top))
    }

    pub async fn assess(&self, plant: &PlantIdentification) -> Result<GrowingConditions> {
        let coords = self
            .location
            .locate()
            .await
            .map_err(|e| LeafLensError::AssessmentFailed(e.to_string()))?;

        let weather = self.current_weather(coords).await;
        let light = self.current_light().await;

        Ok(evaluate(plant, &EnvironmentalReading::new(weather, light)))
    }

    async fn current_weather(&self, coords: crate::models::Coordinates) -> WeatherObservation {
        let Some(ref provider) = self.weather else {
            tracing::warn!("Weather service not configured - using default reading");
            return self.fallback_weather;
        };

        match provider.current(coords).await {
            Ok(obs) => {
                tracing::debug!(
                    temperature_c = obs.temperature_c,
                    humidity = obs.humidity_percent,
                    "Fetched local weather"
                );
                obs
            }
            Err(e) => {
                tracing::warn!("Failed to fetch weather, using default reading: {}", e);
                self.fallback_weather
            }
        }
    }

    async fn current_light(&self) -> Level {
        if let Some(ref sensor) = self.light_sensor {
            match sensor.illuminance().await {
                Ok(lux) => {
                    tracing::debug!(lux, "Read ambient light sensor");
                    return lux_to_level(lux);
                }
                Err(e) => {
                    tracing::warn!("Light sensor unavailable, estimating from time of day: {}", e);
                }
            }
        }

        light_from_hour((self.clock)())
    }
}

/// Fill the Identification Result from the top candidate, classifying
/// free text and substituting default instructions for missing fields.
pub fn build_identification(suggestion: &Suggestion) -> PlantIdentification {
    let details = suggestion.plant_details.as_ref();

    let watering_text = details.and_then(|d| d.watering()).unwrap_or("");
    let sunlight_text = details.and_then(|d| d.sunlight()).unwrap_or("");
    let description = details.and_then(|d| d.description());

    let care_difficulty = match details {
        Some(d) => classifier::care_difficulty(&classifier::CareText::new(
            watering_text,
            sunlight_text,
            d.temperature().unwrap_or(""),
            description.unwrap_or(""),
        )),
        None => CareDifficulty::Moderate,
    };

    let humidity = details
        .and_then(|d| d.humidity())
        .map(str::to_string)
        .unwrap_or_else(|| classifier::humidity_band(description.unwrap_or("")).to_string());

    let soil = details
        .and_then(|d| d.soil())
        .unwrap_or(DEFAULT_SOIL)
        .to_string();

    PlantIdentification {
        name: suggestion.plant_name().unwrap_or(UNKNOWN_NAME).to_string(),
        scientific_name: details
            .and_then(|d| d.scientific_name())
            .or_else(|| suggestion.plant_name())
            .unwrap_or(UNKNOWN_SPECIES)
            .to_string(),
        description: description.unwrap_or(NO_DESCRIPTION).to_string(),
        care_difficulty,
        water_needs: classifier::water_needs(watering_text),
        light_requirements: classifier::light_needs(sunlight_text),
        soil_type: soil.clone(),
        care_instructions: CareInstructions {
            watering: details
                .and_then(|d| d.watering())
                .unwrap_or(DEFAULT_WATERING)
                .to_string(),
            sunlight: details
                .and_then(|d| d.sunlight())
                .unwrap_or(DEFAULT_SUNLIGHT)
                .to_string(),
            temperature: details
                .and_then(|d| d.temperature())
                .unwrap_or(DEFAULT_TEMPERATURE)
                .to_string(),
            humidity,
            soil,
        },
    }
}

/// Compare a reading against the plant's ideal ranges.
pub fn evaluate(plant: &PlantIdentification, reading: &EnvironmentalReading) -> GrowingConditions {
    let ideal_temp = ranges::temperature_range(&plant.care_instructions.temperature);
    let ideal_humidity = ranges::humidity_range(&plant.care_instructions.humidity);

    let temp_status = assessor::assess_temperature(reading.temperature_c, &ideal_temp);
    let humidity_status = assessor::assess_humidity(reading.humidity_percent, &ideal_humidity);
    let light_status = assessor::assess_light(reading.light, plant.light_requirements);

    GrowingConditions {
        temperature: TemperatureCondition {
            current: reading.temperature_c,
            ideal: ideal_temp,
            status: temp_status,
        },
        humidity: HumidityCondition {
            current: reading.humidity_percent,
            ideal: ideal_humidity,
            status: humidity_status,
        },
        light: LightCondition {
            current: reading.light,
            ideal: plant.light_requirements,
            status: light_status,
        },
        recommendations: recommendations::generate(temp_status, humidity_status, light_status),
        overall_suitability: suitability::score(temp_status, humidity_status, light_status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::plantid::decode_response;
    use crate::datasources::IdentifyResponse;
    use crate::models::{
        Coordinates, HumidityStatus, IdealRange, LightStatus, Suitability, TemperatureStatus,
    };
    use async_trait::async_trait;

    struct FakeIdentifier(std::result::Result<&'static str, &'static str>);

    #[async_trait]
    impl PlantIdentifier for FakeIdentifier {
        async fn identify(&self, _image: &ImagePayload) -> Result<IdentifyResponse> {
            match self.0 {
                Ok(body) => decode_response(body),
                Err(msg) => Err(LeafLensError::DataSourceUnavailable(msg.into())),
            }
        }
    }

    struct FixedLocation(Option<Coordinates>);

    #[async_trait]
    impl LocationProvider for FixedLocation {
        async fn locate(&self) -> Result<Coordinates> {
            self.0
                .ok_or_else(|| LeafLensError::GeolocationUnavailable("not supported".into()))
        }
    }

    struct FakeWeather(Option<WeatherObservation>);

    #[async_trait]
    impl WeatherProvider for FakeWeather {
        async fn current(&self, _at: Coordinates) -> Result<WeatherObservation> {
            self.0
                .ok_or_else(|| LeafLensError::DataSourceUnavailable("HTTP 500".into()))
        }
    }

    struct FakeSensor(Option<f64>);

    #[async_trait]
    impl LightSensor for FakeSensor {
        async fn illuminance(&self) -> Result<f64> {
            self.0
                .ok_or_else(|| LeafLensError::DataSourceUnavailable("no sensor".into()))
        }
    }

    const ALOE: &str = r#"{"suggestions":[{
        "plant_name": "Aloe vera",
        "probability": 0.91,
        "plant_details": {
            "scientific_name": "Aloe barbadensis",
            "wiki_description": {"value": "A succulent native to arid regions."},
            "watering": {"text": "water sparingly, allow soil to dry"},
            "sunlight": {"text": "Full sun to bright indirect light"},
            "temperature": {"text": "Between 13 and 27 degrees"}
        }
    }]}"#;

    fn image() -> ImagePayload {
        ImagePayload::from_bytes(vec![0xff, 0xd8, 0xff], "image/jpeg").unwrap()
    }

    fn noon() -> u32 {
        12
    }

    fn midnight() -> u32 {
        0
    }

    fn service(body: std::result::Result<&'static str, &'static str>) -> PlantService {
        PlantService::new(
            Box::new(FakeIdentifier(body)),
            Box::new(FixedLocation(Some(Coordinates::new(39.8, -75.8)))),
        )
        .with_clock(noon)
    }

    #[tokio::test]
    async fn identifies_and_classifies_top_candidate() {
        let plant = service(Ok(ALOE)).identify(&image()).await.unwrap();

        assert_eq!(plant.name, "Aloe vera");
        assert_eq!(plant.scientific_name, "Aloe barbadensis");
        assert_eq!(plant.water_needs, Level::Low);
        assert_eq!(plant.light_requirements, Level::High);
        // Only "bright indirect" scores (+1)
        assert_eq!(plant.care_difficulty, CareDifficulty::Easy);
        assert_eq!(plant.care_instructions.humidity, "Low humidity (30-40%)");
        assert_eq!(plant.care_instructions.soil, DEFAULT_SOIL);
        assert_eq!(plant.soil_type, DEFAULT_SOIL);
    }

    #[tokio::test]
    async fn no_candidates_is_identification_failure() {
        let err = service(Ok(r#"{"suggestions":[]}"#))
            .identify(&image())
            .await
            .unwrap_err();
        assert!(matches!(err, LeafLensError::IdentificationFailed(_)));
    }

    #[tokio::test]
    async fn upstream_errors_become_identification_failure() {
        let err = service(Err("connection refused"))
            .identify(&image())
            .await
            .unwrap_err();
        match err {
            LeafLensError::IdentificationFailed(msg) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn bare_suggestion_gets_defaults() {
        let response = decode_response(r#"{"suggestions":[{}]}"#).unwrap();
        let plant = build_identification(response.top().unwrap());

        assert_eq!(plant.name, UNKNOWN_NAME);
        assert_eq!(plant.scientific_name, UNKNOWN_SPECIES);
        assert_eq!(plant.description, NO_DESCRIPTION);
        assert_eq!(plant.care_difficulty, CareDifficulty::Moderate);
        assert_eq!(plant.water_needs, Level::Medium);
        assert_eq!(plant.light_requirements, Level::Medium);
        assert_eq!(plant.care_instructions.watering, DEFAULT_WATERING);
        assert_eq!(plant.care_instructions.sunlight, DEFAULT_SUNLIGHT);
        assert_eq!(plant.care_instructions.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(plant.care_instructions.humidity, "Average humidity (40-60%)");
    }

    #[test]
    fn scientific_name_falls_back_to_plant_name() {
        let response =
            decode_response(r#"{"suggestions":[{"plant_name":"Ficus lyrata","plant_details":{}}]}"#)
                .unwrap();
        let plant = build_identification(response.top().unwrap());
        assert_eq!(plant.scientific_name, "Ficus lyrata");
        // Details present but empty: difficulty is scored, not defaulted
        assert_eq!(plant.care_difficulty, CareDifficulty::Easy);
    }

    #[test]
    fn humidity_text_from_service_wins() {
        let response = decode_response(
            r#"{"suggestions":[{"plant_details":{"humidity":{"text":"55-75%"},"wiki_description":{"value":"tropical"}}}]}"#,
        )
        .unwrap();
        let plant = build_identification(response.top().unwrap());
        assert_eq!(plant.care_instructions.humidity, "55-75%");
    }

    #[tokio::test]
    async fn weather_failure_uses_default_reading() {
        let svc = service(Ok(ALOE)).with_weather(Box::new(FakeWeather(None)));
        let plant = svc.identify(&image()).await.unwrap();
        let conditions = svc.assess(&plant).await.unwrap();

        assert_eq!(conditions.temperature.current, 20.0);
        assert_eq!(conditions.humidity.current, 50.0);
        // Parsed from "Between 13 and 27 degrees" and "Low humidity (30-40%)"
        assert_eq!(conditions.temperature.ideal, IdealRange::new(13.0, 27.0));
        assert_eq!(conditions.temperature.status, TemperatureStatus::Ideal);
        assert_eq!(conditions.humidity.ideal, IdealRange::new(30.0, 40.0));
        assert_eq!(conditions.humidity.status, HumidityStatus::TooHumid);
        // Noon with no sensor is High, matching a full-sun plant
        assert_eq!(conditions.light.current, Level::High);
        assert_eq!(conditions.light.status, LightStatus::Ideal);
        assert_eq!(conditions.overall_suitability, Suitability::Good);
        assert_eq!(
            conditions.recommendations,
            vec!["Improve air circulation and consider using a dehumidifier"]
        );
    }

    #[tokio::test]
    async fn fallback_reading_is_configurable() {
        let svc = service(Ok(ALOE))
            .with_fallback_weather(WeatherObservation::new(5.0, 35.0));
        let plant = svc.identify(&image()).await.unwrap();
        let conditions = svc.assess(&plant).await.unwrap();

        assert_eq!(conditions.temperature.current, 5.0);
        assert_eq!(conditions.temperature.status, TemperatureStatus::TooCold);
        assert_eq!(conditions.humidity.status, HumidityStatus::Ideal);
    }

    #[tokio::test]
    async fn uses_live_weather_and_light_sensor() {
        let svc = service(Ok(ALOE))
            .with_weather(Box::new(FakeWeather(Some(WeatherObservation::new(31.0, 20.0)))))
            .with_light_sensor(Box::new(FakeSensor(Some(10.0))));
        let plant = svc.identify(&image()).await.unwrap();
        let conditions = svc.assess(&plant).await.unwrap();

        assert_eq!(conditions.temperature.status, TemperatureStatus::TooHot);
        assert_eq!(conditions.humidity.status, HumidityStatus::TooDry);
        assert_eq!(conditions.light.current, Level::Low);
        assert_eq!(conditions.light.status, LightStatus::TooLow);
        assert_eq!(conditions.overall_suitability, Suitability::Poor);
        assert_eq!(conditions.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn failing_light_sensor_falls_back_to_time_of_day() {
        let svc = service(Ok(ALOE))
            .with_light_sensor(Box::new(FakeSensor(None)))
            .with_clock(midnight);
        let plant = svc.identify(&image()).await.unwrap();
        let conditions = svc.assess(&plant).await.unwrap();

        assert_eq!(conditions.light.current, Level::Low);
        assert_eq!(conditions.light.status, LightStatus::TooLow);
    }

    #[tokio::test]
    async fn missing_geolocation_fails_assessment() {
        let svc = PlantService::new(
            Box::new(FakeIdentifier(Ok(ALOE))),
            Box::new(FixedLocation(None)),
        );
        let plant = svc.identify(&image()).await.unwrap();
        let err = svc.assess(&plant).await.unwrap_err();
        assert!(matches!(err, LeafLensError::AssessmentFailed(_)));
    }

    #[test]
    fn default_temperature_text_parses_fahrenheit_pair() {
        let response = decode_response(r#"{"suggestions":[{}]}"#).unwrap();
        let plant = build_identification(response.top().unwrap());
        let conditions = evaluate(
            &plant,
            &EnvironmentalReading::new(WeatherObservation::new(20.0, 50.0), Level::Medium),
        );
        assert_eq!(conditions.temperature.ideal, IdealRange::new(65.0, 80.0));
        assert_eq!(conditions.temperature.status, TemperatureStatus::TooCold);
        assert_eq!(conditions.humidity.status, HumidityStatus::Ideal);
        assert_eq!(conditions.light.status, LightStatus::Ideal);
        assert_eq!(conditions.overall_suitability, Suitability::Good);
    }
}
