use crate::models::{HumidityStatus, LightStatus, TemperatureStatus};

fn temperature_advice(status: TemperatureStatus) -> Option<&'static str> {
    match status {
        TemperatureStatus::TooCold => {
            Some("Consider moving the plant to a warmer location or using a heat mat")
        }
        TemperatureStatus::TooHot => {
            Some("Move the plant away from heat sources and consider increasing ventilation")
        }
        TemperatureStatus::Ideal => None,
    }
}

fn humidity_advice(status: HumidityStatus) -> Option<&'static str> {
    match status {
        HumidityStatus::TooDry => {
            Some("Use a humidity tray or mist the plant regularly to increase moisture")
        }
        HumidityStatus::TooHumid => {
            Some("Improve air circulation and consider using a dehumidifier")
        }
        HumidityStatus::Ideal => None,
    }
}

fn light_advice(status: LightStatus) -> Option<&'static str> {
    match status {
        LightStatus::TooLow => {
            Some("Move the plant closer to a light source or consider using grow lights")
        }
        LightStatus::TooHigh => {
            Some("Provide shade or move the plant further from direct sunlight")
        }
        LightStatus::Ideal => None,
    }
}

/// At most one line per axis, always temperature, humidity, light.
pub fn generate(
    temperature: TemperatureStatus,
    humidity: HumidityStatus,
    light: LightStatus,
) -> Vec<String> {
    [
        temperature_advice(temperature),
        humidity_advice(humidity),
        light_advice(light),
    ]
    .into_iter()
    .flatten()
    .map(String::from)
    .collect()
}
