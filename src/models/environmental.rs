use super::plant::Level;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Current temperature and humidity at the plant's location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub humidity_percent: f64,
}

impl WeatherObservation {
    pub fn new(temperature_c: f64, humidity_percent: f64) -> Self {
        Self {
            temperature_c,
            humidity_percent,
        }
    }
}

/// Environment snapshot taken for one assessment. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub light: Level,
}

impl EnvironmentalReading {
    pub fn new(weather: WeatherObservation, light: Level) -> Self {
        Self {
            temperature_c: weather.temperature_c,
            humidity_percent: weather.humidity_percent,
            light,
        }
    }
}

/// Inclusive comfort band for temperature (°C) or relative humidity (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub const DEFAULT_TEMPERATURE: IdealRange = IdealRange {
        min: 18.0,
        max: 27.0,
    };
    pub const DEFAULT_HUMIDITY: IdealRange = IdealRange {
        min: 40.0,
        max: 60.0,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl std::fmt::Display for IdealRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}-{:.0}", self.min, self.max)
    }
}

/// Bucket an illuminance reading: <50 lux is Low, <1000 lux is Medium.
pub fn lux_to_level(lux: f64) -> Level {
    if lux < 50.0 {
        Level::Low
    } else if lux < 1000.0 {
        Level::Medium
    } else {
        Level::High
    }
}

/// Estimate light from the local hour when no sensor is available.
/// Night (before 06:00, after 18:00) is Low; early morning and late
/// afternoon (before 09:00, after 15:00) are Medium; midday is High.
pub fn light_from_hour(hour: u32) -> Level {
    if hour < 6 || hour > 18 {
        Level::Low
    } else if hour < 9 || hour > 15 {
        Level::Medium
    } else {
        Level::High
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}
