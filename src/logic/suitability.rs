use crate::models::{HumidityStatus, LightStatus, Suitability, TemperatureStatus};

pub fn score(
    temperature: TemperatureStatus,
    humidity: HumidityStatus,
    light: LightStatus,
) -> Suitability {
    let ideal_count = [temperature.is_ideal(), humidity.is_ideal(), light.is_ideal()]
        .into_iter()
        .filter(|ideal| *ideal)
        .count();

    match ideal_count {
        3 => Suitability::Excellent,
        2 => Suitability::Good,
        1 => Suitability::Fair,
        _ => Suitability::Poor,
    }
}
