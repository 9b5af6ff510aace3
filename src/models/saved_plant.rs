use super::plant::PlantIdentification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the photo of a saved plant lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    /// `data:<mime>;base64,<payload>` kept alongside the record
    Inline { data_url: String },
    Url { url: String },
}

impl ImageRef {
    pub fn as_str(&self) -> &str {
        match self {
            ImageRef::Inline { data_url } => data_url,
            ImageRef::Url { url } => url,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlant {
    pub id: String,
    pub saved_at: DateTime<Utc>,
    pub image: ImageRef,
    #[serde(flatten)]
    pub plant: PlantIdentification,
}

impl SavedPlant {
    pub fn new(plant: PlantIdentification, image: ImageRef) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            image,
            plant,
        }
    }

    /// Save time as ISO-8601 in UTC.
    pub fn saved_at_iso(&self) -> String {
        self.saved_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CareDifficulty, CareInstructions, Level};

    fn sample_plant() -> PlantIdentification {
        PlantIdentification {
            name: "Pothos".into(),
            scientific_name: "Epipremnum aureum".into(),
            description: "A trailing vine".into(),
            care_difficulty: CareDifficulty::Easy,
            water_needs: Level::Medium,
            light_requirements: Level::Low,
            soil_type: "Well-draining potting mix".into(),
            care_instructions: CareInstructions {
                watering: "Water when top soil feels dry".into(),
                sunlight: "Low to bright indirect light".into(),
                temperature: "65-80°F (18-27°C)".into(),
                humidity: "Average humidity (40-60%)".into(),
                soil: "Well-draining potting mix".into(),
            },
        }
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let image = ImageRef::Url {
            url: "https://example.com/pothos.jpg".into(),
        };
        let a = SavedPlant::new(sample_plant(), image.clone());
        let b = SavedPlant::new(sample_plant(), image);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn saved_at_is_iso_8601_utc() {
        let saved = SavedPlant::new(
            sample_plant(),
            ImageRef::Inline {
                data_url: "data:image/png;base64,AAAA".into(),
            },
        );
        let iso = saved.saved_at_iso();
        assert!(iso.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&iso).is_ok());
    }

    #[test]
    fn plant_fields_are_flattened() {
        let saved = SavedPlant::new(
            sample_plant(),
            ImageRef::Url {
                url: "https://example.com/pothos.jpg".into(),
            },
        );
        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["name"], "Pothos");
        assert_eq!(json["image"]["kind"], "url");

        let back: SavedPlant = serde_json::from_value(json).unwrap();
        assert_eq!(back, saved);
    }
}
