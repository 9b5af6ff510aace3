use crate::error::{LeafLensError, Result};
use crate::models::ImageRef;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    File,
    Url(String),
    Memory,
}

/// Raw photo bytes handed to the identification service.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub origin: ImageOrigin,
}

impl ImagePayload {
    pub fn from_bytes(bytes: Vec<u8>, mime: impl Into<String>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(LeafLensError::InvalidData("image is empty".into()));
        }
        Ok(Self {
            bytes,
            mime: mime.into(),
            origin: ImageOrigin::Memory,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        let mut payload = Self::from_bytes(bytes, mime)?;
        payload.origin = ImageOrigin::File;
        tracing::debug!(path = %path.display(), mime = %payload.mime, size = payload.bytes.len(), "Loaded image");
        Ok(payload)
    }

    pub async fn from_url(client: &reqwest::Client, url: &str) -> Result<Self> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| LeafLensError::DataSourceUnavailable(format!("Image download: {}", e)))?;

        if !response.status().is_success() {
            return Err(LeafLensError::DataSourceUnavailable(format!(
                "Image download returned {}",
                response.status()
            )));
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| {
                mime_guess::from_path(url)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        let bytes = response.bytes().await?.to_vec();
        let mut payload = Self::from_bytes(bytes, mime)?;
        payload.origin = ImageOrigin::Url(url.to_string());
        Ok(payload)
    }

    /// Load from an `http(s)` URL or a local path.
    pub async fn load(client: &reqwest::Client, source: &str) -> Result<Self> {
        if is_remote(source) {
            Self::from_url(client, source).await
        } else {
            Self::from_path(Path::new(source))
        }
    }

    /// Bare base64, without a `data:` prefix.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }

    /// Remote images are referenced by URL, everything else is inlined.
    pub fn image_ref(&self) -> ImageRef {
        match &self.origin {
            ImageOrigin::Url(url) => ImageRef::Url { url: url.clone() },
            ImageOrigin::File | ImageOrigin::Memory => ImageRef::Inline {
                data_url: self.data_url(),
            },
        }
    }
}

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
