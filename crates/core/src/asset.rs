//! Upload ingestion guard for cover images.
//!
//! Validation happens before any bytes reach the asset store; a storage
//! failure after a successful validation surfaces as a storage error,
//! never as a rejection.

use thiserror::Error;

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Media types accepted for cover images.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("file is too large: {size_bytes} bytes (max 10 MiB)")]
    TooLarge { size_bytes: u64 },
    #[error("unsupported media type: {media_type} (use JPEG, PNG, WebP, or GIF)")]
    UnsupportedType { media_type: String },
}

/// Validate a candidate upload before it reaches the asset store.
/// Checks run in order; the first failure wins.
pub fn validate_upload(size_bytes: u64, media_type: &str) -> Result<(), UploadRejection> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge { size_bytes });
    }
    if !ALLOWED_IMAGE_TYPES.contains(&media_type) {
        return Err(UploadRejection::UnsupportedType {
            media_type: media_type.to_string(),
        });
    }
    Ok(())
}

/// File extension used to name a stored asset of an accepted media type.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
