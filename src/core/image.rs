//! Image sources for catalog records
//!
//! A record's image is either embedded as a `data:` URL built from a local
//! file or referenced by an absolute http(s) URL.

use crate::domain::record::DATA_URL_PREFIX;
use crate::domain::{CoupeError, Result};
use base64::{engine::general_purpose, Engine as _};
use std::path::{Path, PathBuf};

/// File name recorded for images supplied as a URL
pub const URL_FILE_NAME: &str = "image_from_url";

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A local image file to embed
    File(PathBuf),
    /// An http(s) URL or an existing `data:image/...` URL
    Url(String),
}

/// Image fields ready to be stored on a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Value for the record's `imageUrl`
    pub image_url: String,
    /// Value for the record's `fileName`
    pub file_name: String,
}

impl ImageSource {
    /// Resolve the source into record fields
    ///
    /// Files larger than `max_file_bytes` or without an `image/*` MIME type
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::Image` if the file cannot be read or is not an
    /// acceptable image, or if the URL is not usable.
    pub async fn resolve(&self, max_file_bytes: u64) -> Result<ResolvedImage> {
        match self {
            ImageSource::File(path) => resolve_file(path, max_file_bytes).await,
            ImageSource::Url(text) => resolve_url(text),
        }
    }
}

/// True when `image_url` carries its payload inline
pub fn is_embedded(image_url: &str) -> bool {
    image_url.starts_with(DATA_URL_PREFIX)
}

async fn resolve_file(path: &Path, max_file_bytes: u64) -> Result<ResolvedImage> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        CoupeError::Image(format!("Cannot read image {}: {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(CoupeError::Image(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if metadata.len() > max_file_bytes {
        return Err(CoupeError::Image(format!(
            "Image {} is {} bytes, larger than the {} byte limit",
            path.display(),
            metadata.len(),
            max_file_bytes
        )));
    }

    let mime = mime_guess::from_path(path).first().ok_or_else(|| {
        CoupeError::Image(format!(
            "Cannot determine the image type of {}",
            path.display()
        ))
    })?;

    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(CoupeError::Image(format!(
            "{} is {}, not an image",
            path.display(),
            mime.essence_str()
        )));
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        CoupeError::Image(format!("Cannot read image {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| URL_FILE_NAME.to_string());

    tracing::debug!(
        path = %path.display(),
        mime = %mime.essence_str(),
        bytes = bytes.len(),
        "Embedding image file"
    );

    Ok(ResolvedImage {
        image_url: format!(
            "{}{};base64,{}",
            DATA_URL_PREFIX,
            mime.essence_str(),
            general_purpose::STANDARD.encode(&bytes)
        ),
        file_name,
    })
}

fn resolve_url(text: &str) -> Result<ResolvedImage> {
    let text = text.trim();

    if text.starts_with("data:image/") {
        return Ok(ResolvedImage {
            image_url: text.to_string(),
            file_name: URL_FILE_NAME.to_string(),
        });
    }

    let parsed = url::Url::parse(text)
        .map_err(|e| CoupeError::Image(format!("Invalid image URL '{}': {}", text, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(ResolvedImage {
            image_url: parsed.to_string(),
            file_name: URL_FILE_NAME.to_string(),
        }),
        scheme => Err(CoupeError::Image(format!(
            "Unsupported image URL scheme '{}'. Must be http or https",
            scheme
        ))),
    }
}
