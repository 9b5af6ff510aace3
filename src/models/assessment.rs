use super::environmental::IdealRange;
use super::plant::Level;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureStatus {
    Ideal,
    #[serde(rename = "Too Cold")]
    TooCold,
    #[serde(rename = "Too Hot")]
    TooHot,
}

impl TemperatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Ideal => "Ideal",
            TemperatureStatus::TooCold => "Too Cold",
            TemperatureStatus::TooHot => "Too Hot",
        }
    }

    pub fn is_ideal(&self) -> bool {
        matches!(self, TemperatureStatus::Ideal)
    }
}

impl std::fmt::Display for TemperatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumidityStatus {
    Ideal,
    #[serde(rename = "Too Dry")]
    TooDry,
    #[serde(rename = "Too Humid")]
    TooHumid,
}

impl HumidityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityStatus::Ideal => "Ideal",
            HumidityStatus::TooDry => "Too Dry",
            HumidityStatus::TooHumid => "Too Humid",
        }
    }

    pub fn is_ideal(&self) -> bool {
        matches!(self, HumidityStatus::Ideal)
    }
}

impl std::fmt::Display for HumidityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightStatus {
    Ideal,
    #[serde(rename = "Too Low")]
    TooLow,
    #[serde(rename = "Too High")]
    TooHigh,
}

impl LightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightStatus::Ideal => "Ideal",
            LightStatus::TooLow => "Too Low",
            LightStatus::TooHigh => "Too High",
        }
    }

    pub fn is_ideal(&self) -> bool {
        matches!(self, LightStatus::Ideal)
    }
}

impl std::fmt::Display for LightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suitability {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Suitability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Poor => "Poor",
            Suitability::Fair => "Fair",
            Suitability::Good => "Good",
            Suitability::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCondition {
    pub current: f64,
    pub ideal: IdealRange,
    pub status: TemperatureStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityCondition {
    pub current: f64,
    pub ideal: IdealRange,
    pub status: HumidityStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCondition {
    pub current: Level,
    pub ideal: Level,
    pub status: LightStatus,
}

/// Live conditions compared against what one plant prefers.
/// Recomputed on demand and never stored apart from its plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingConditions {
    pub temperature: TemperatureCondition,
    pub humidity: HumidityCondition,
    pub light: LightCondition,
    pub recommendations: Vec<String>,
    pub overall_suitability: Suitability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_with_spaces() {
        assert_eq!(
            serde_json::to_string(&TemperatureStatus::TooCold).unwrap(),
            "\"Too Cold\""
        );
        assert_eq!(
            serde_json::to_string(&HumidityStatus::TooHumid).unwrap(),
            "\"Too Humid\""
        );
        assert_eq!(
            serde_json::to_string(&LightStatus::Ideal).unwrap(),
            "\"Ideal\""
        );
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(TemperatureStatus::TooHot.to_string(), "Too Hot");
        assert_eq!(HumidityStatus::TooDry.to_string(), "Too Dry");
        assert_eq!(LightStatus::TooHigh.to_string(), "Too High");
        assert_eq!(Suitability::Excellent.to_string(), "Excellent");
    }

    #[test]
    fn suitability_orders_worst_to_best() {
        assert!(Suitability::Poor < Suitability::Fair);
        assert!(Suitability::Good < Suitability::Excellent);
    }
}
