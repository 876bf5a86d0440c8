//! Image acquisition and validation.
//!
//! Turns user-supplied files and URL strings into validated [`ImageSource`]
//! values. File handling is a declared-type check over the extension plus a
//! full read into a base64 data URL; no content sniffing happens here, so a
//! mislabeled file is passed through as-is.

use crate::models::ImageSource;
use crate::{Error, Result};
use std::path::Path;

/// Media types accepted for uploads. `image/jpg` is nonstandard but shows up
/// in browser-reported types, so it stays on the list.
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

pub const UNSUPPORTED_FILE_MESSAGE: &str = "Only .jpg, .jpeg, and .png files are supported.";
pub const UNSUPPORTED_URL_MESSAGE: &str =
    "Only image URLs ending in .jpg, .jpeg, or .png are allowed.";

/// Declared-type check against the upload allow-list.
pub fn validate_media_type(media_type: &str) -> Result<()> {
    if ALLOWED_MEDIA_TYPES.contains(&media_type) {
        Ok(())
    } else {
        Err(Error::Validation(UNSUPPORTED_FILE_MESSAGE.to_string()))
    }
}

/// Suffix check on the URL string, case-insensitive.
///
/// Does not verify the resource exists or is actually an image. A query
/// string after the extension fails the check (`...jpg?size=400` is
/// rejected even when it would resolve to a valid image).
pub fn validate_url(input: &str) -> Result<()> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(UNSUPPORTED_URL_MESSAGE.to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") || lower.ends_with(".png") {
        Ok(())
    } else {
        Err(Error::Validation(UNSUPPORTED_URL_MESSAGE.to_string()))
    }
}

/// Declared media type for a local file, taken from its extension.
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// Read the full file content and encode it as `data:<mime>;base64,<payload>`.
///
/// The single asynchronous operation in acquisition: it suspends until the
/// read completes and yields exactly one encoded string. It is not
/// cancellable and is not retried.
pub async fn encode_file_to_data_url(path: &Path, media_type: &str) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;

    use base64::Engine as _;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

    Ok(format!("data:{};base64,{}", media_type, encoded))
}

/// Validate a local file and produce an uploaded image source.
///
/// Validation happens before the file is read; an unsupported extension
/// never touches the filesystem.
pub async fn uploaded_image(path: &Path) -> Result<ImageSource> {
    let media_type = media_type_for_path(path)
        .ok_or_else(|| Error::Validation(UNSUPPORTED_FILE_MESSAGE.to_string()))?;
    validate_media_type(media_type)?;

    let data_url = encode_file_to_data_url(path, media_type).await?;
    Ok(ImageSource::Uploaded { data_url })
}

/// Validate a URL string and wrap it as a remote image source.
pub fn remote_image(input: &str) -> Result<ImageSource> {
    validate_url(input)?;
    Ok(ImageSource::Remote {
        url: input.trim().to_string(),
    })
}
