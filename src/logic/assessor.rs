use crate::models::{HumidityStatus, IdealRange, Level, LightStatus, TemperatureStatus};

/// Position of a reading relative to an inclusive band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Below,
    Within,
    Above,
}

fn band(current: f64, ideal: &IdealRange) -> Band {
    if current < ideal.min {
        Band::Below
    } else if current > ideal.max {
        Band::Above
    } else {
        Band::Within
    }
}

pub fn assess_temperature(current_c: f64, ideal: &IdealRange) -> TemperatureStatus {
    match band(current_c, ideal) {
        Band::Below => TemperatureStatus::TooCold,
        Band::Above => TemperatureStatus::TooHot,
        Band::Within => TemperatureStatus::Ideal,
    }
}

pub fn assess_humidity(current_percent: f64, ideal: &IdealRange) -> HumidityStatus {
    match band(current_percent, ideal) {
        Band::Below => HumidityStatus::TooDry,
        Band::Above => HumidityStatus::TooHumid,
        Band::Within => HumidityStatus::Ideal,
    }
}

pub fn assess_light(current: Level, ideal: Level) -> LightStatus {
    match current.rank().cmp(&ideal.rank()) {
        std::cmp::Ordering::Less => LightStatus::TooLow,
        std::cmp::Ordering::Greater => LightStatus::TooHigh,
        std::cmp::Ordering::Equal => LightStatus::Ideal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMFORT: IdealRange = IdealRange {
        min: 18.0,
        max: 27.0,
    };

    #[test]
    fn temperature_thresholds() {
        assert_eq!(assess_temperature(15.0, &COMFORT), TemperatureStatus::TooCold);
        assert_eq!(assess_temperature(30.0, &COMFORT), TemperatureStatus::TooHot);
        assert_eq!(assess_temperature(22.0, &COMFORT), TemperatureStatus::Ideal);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(assess_temperature(18.0, &COMFORT), TemperatureStatus::Ideal);
        assert_eq!(assess_temperature(27.0, &COMFORT), TemperatureStatus::Ideal);
        assert_eq!(assess_temperature(17.9, &COMFORT), TemperatureStatus::TooCold);
        assert_eq!(assess_temperature(27.1, &COMFORT), TemperatureStatus::TooHot);
    }

    #[test]
    fn humidity_thresholds() {
        let ideal = IdealRange::DEFAULT_HUMIDITY;
        assert_eq!(assess_humidity(30.0, &ideal), HumidityStatus::TooDry);
        assert_eq!(assess_humidity(75.0, &ideal), HumidityStatus::TooHumid);
        assert_eq!(assess_humidity(50.0, &ideal), HumidityStatus::Ideal);
    }

    #[test]
    fn inverted_range_checks_min_first() {
        // min 30, max 20: anything under 30 is too cold, even 10
        let inverted = IdealRange::new(30.0, 20.0);
        assert_eq!(assess_temperature(10.0, &inverted), TemperatureStatus::TooCold);
        assert_eq!(assess_temperature(25.0, &inverted), TemperatureStatus::TooCold);
        assert_eq!(assess_temperature(35.0, &inverted), TemperatureStatus::TooHot);
    }

    #[test]
    fn light_compares_ordinals() {
        assert_eq!(assess_light(Level::Low, Level::High), LightStatus::TooLow);
        assert_eq!(assess_light(Level::High, Level::Low), LightStatus::TooHigh);
        assert_eq!(assess_light(Level::Medium, Level::High), LightStatus::TooLow);
        for level in [Level::Low, Level::Medium, Level::High] {
            assert_eq!(assess_light(level, level), LightStatus::Ideal);
        }
    }
}
