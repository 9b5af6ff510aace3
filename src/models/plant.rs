use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareDifficulty {
    Easy,
    Moderate,
    Hard,
}

impl CareDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareDifficulty::Easy => "Easy",
            CareDifficulty::Moderate => "Moderate",
            CareDifficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for CareDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Three-step scale shared by water need, light need and measured light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }

    /// Ordinal used when comparing a measured level against a requirement.
    pub fn rank(&self) -> u8 {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareInstructions {
    pub watering: String,
    pub sunlight: String,
    pub temperature: String,
    pub humidity: String,
    pub soil: String,
}

/// A plant as identified from one photo, with care attributes derived from
/// the identification service's free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantIdentification {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub care_difficulty: CareDifficulty,
    pub water_needs: Level,
    pub light_requirements: Level,
    pub soil_type: String,
    pub care_instructions: CareInstructions,
}
