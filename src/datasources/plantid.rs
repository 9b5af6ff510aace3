use super::image::ImagePayload;
use super::PlantIdentifier;
use crate::config::PlantIdConfig;
use crate::error::{LeafLensError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Detail fields requested with every identification.
pub const PLANT_DETAILS: &[&str] = &[
    "common_names",
    "url",
    "wiki_description",
    "taxonomy",
    "watering",
    "sunlight",
    "temperature",
    "soil",
    "growth_habit",
];

pub struct PlantIdClient {
    client: reqwest::Client,
    config: PlantIdConfig,
}

#[derive(Debug, Serialize)]
struct IdentifyRequest<'a> {
    api_key: &'a str,
    images: Vec<String>,
    plant_details: &'a [&'a str],
}

// Plant.id v2 response structures. Unknown fields are ignored; a field
// present with the wrong shape is a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub suggestions: Option<Vec<Suggestion>>,
}

impl IdentifyResponse {
    /// Highest-ranked candidate.
    pub fn top(&self) -> Option<&Suggestion> {
        self.suggestions.as_ref().and_then(|s| s.first())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub plant_name: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub plant_details: Option<PlantDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlantDetails {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub wiki_description: Option<WikiDescription>,
    #[serde(default)]
    pub watering: Option<TextField>,
    #[serde(default)]
    pub sunlight: Option<TextField>,
    #[serde(default)]
    pub temperature: Option<TextField>,
    #[serde(default)]
    pub humidity: Option<TextField>,
    #[serde(default)]
    pub soil: Option<TextField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikiDescription {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextField {
    #[serde(default)]
    pub text: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl PlantDetails {
    pub fn watering(&self) -> Option<&str> {
        non_empty(self.watering.as_ref().and_then(|f| f.text.as_ref()))
    }

    pub fn sunlight(&self) -> Option<&str> {
        non_empty(self.sunlight.as_ref().and_then(|f| f.text.as_ref()))
    }

    pub fn temperature(&self) -> Option<&str> {
        non_empty(self.temperature.as_ref().and_then(|f| f.text.as_ref()))
    }

    pub fn humidity(&self) -> Option<&str> {
        non_empty(self.humidity.as_ref().and_then(|f| f.text.as_ref()))
    }

    pub fn soil(&self) -> Option<&str> {
        non_empty(self.soil.as_ref().and_then(|f| f.text.as_ref()))
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.wiki_description.as_ref().and_then(|d| d.value.as_ref()))
    }

    pub fn scientific_name(&self) -> Option<&str> {
        non_empty(self.scientific_name.as_ref())
    }
}

impl Suggestion {
    pub fn plant_name(&self) -> Option<&str> {
        non_empty(self.plant_name.as_ref())
    }
}

/// Decode a raw identify response body.
pub fn decode_response(body: &str) -> Result<IdentifyResponse> {
    serde_json::from_str(body).map_err(|e| {
        LeafLensError::IdentificationFailed(format!("malformed Plant.id response: {}", e))
    })
}

impl PlantIdClient {
    pub fn new(config: PlantIdConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// Test connection to the Plant.id API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("usage_info"))
            .header("Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| LeafLensError::DataSourceUnavailable(format!("Plant.id: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl PlantIdentifier for PlantIdClient {
    async fn identify(&self, image: &ImagePayload) -> Result<IdentifyResponse> {
        let request = IdentifyRequest {
            api_key: &self.config.api_key,
            images: vec![image.to_base64()],
            plant_details: PLANT_DETAILS,
        };

        tracing::info!(size = image.bytes.len(), "Sending image to Plant.id");

        let response = self
            .client
            .post(self.endpoint("identify"))
            .json(&request)
            .send()
            .await
            .map_err(|e| LeafLensError::DataSourceUnavailable(format!("Plant.id: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LeafLensError::DataSourceUnavailable(format!(
                "Plant.id returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        decode_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 123,
        "suggestions": [
            {
                "id": 1,
                "plant_name": "Aloe vera",
                "probability": 0.94,
                "plant_details": {
                    "scientific_name": "Aloe vera",
                    "common_names": ["Aloe"],
                    "wiki_description": {"value": "A succulent from arid regions.", "citation": "wiki"},
                    "watering": {"text": "Water sparingly", "min": 1, "max": 2},
                    "sunlight": {"text": ""},
                    "growth_habit": "succulent"
                }
            },
            {"plant_name": "Haworthia"}
        ]
    }"#;

    #[test]
    fn decodes_top_suggestion() {
        let response = decode_response(SAMPLE).unwrap();
        let top = response.top().unwrap();
        assert_eq!(top.plant_name(), Some("Aloe vera"));
        assert_eq!(top.probability, Some(0.94));

        let details = top.plant_details.as_ref().unwrap();
        assert_eq!(details.watering(), Some("Water sparingly"));
        assert_eq!(details.description(), Some("A succulent from arid regions."));
        assert_eq!(details.temperature(), None);
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let response = decode_response(SAMPLE).unwrap();
        let details = response.top().unwrap().plant_details.clone().unwrap();
        assert_eq!(details.sunlight(), None);
    }

    #[test]
    fn numeric_watering_ranges_have_no_text() {
        let body = r#"{"suggestions":[{"plant_name":"Fern","plant_details":{"watering":{"min":2,"max":3}}}]}"#;
        let response = decode_response(body).unwrap();
        let details = response.top().unwrap().plant_details.as_ref().unwrap();
        assert_eq!(details.watering(), None);
    }

    #[test]
    fn missing_or_null_suggestions_have_no_top() {
        assert!(decode_response("{}").unwrap().top().is_none());
        assert!(decode_response(r#"{"suggestions":null}"#).unwrap().top().is_none());
        assert!(decode_response(r#"{"suggestions":[]}"#).unwrap().top().is_none());
    }

    #[test]
    fn malformed_payload_is_an_identification_failure() {
        assert!(matches!(
            decode_response("not json"),
            Err(LeafLensError::IdentificationFailed(_))
        ));
        assert!(matches!(
            decode_response(r#"{"suggestions":"oops"}"#),
            Err(LeafLensError::IdentificationFailed(_))
        ));
    }

    #[test]
    fn request_body_shape() {
        let image = ImagePayload::from_bytes(b"leaf".to_vec(), "image/jpeg").unwrap();
        let request = IdentifyRequest {
            api_key: "key",
            images: vec![image.to_base64()],
            plant_details: PLANT_DETAILS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["api_key"], "key");
        assert_eq!(json["images"][0], "bGVhZg==");
        assert_eq!(json["plant_details"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn endpoint_joins_paths() {
        let client = PlantIdClient::new(PlantIdConfig {
            api_key: "k".into(),
            endpoint: "https://api.plant.id/v2/".into(),
        });
        assert_eq!(client.endpoint("identify"), "https://api.plant.id/v2/identify");
    }
}
