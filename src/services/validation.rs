use crate::error::AppError;
use crate::models::upload_types::{ImageMime, SelectedFile};

pub const INVALID_TYPE_MESSAGE: &str = "Only PNG, JPG, or JPEG images are allowed.";
pub const TOO_LARGE_MESSAGE: &str = "File size must be less than 2MB.";

/// Type first, then size. Nothing about the bytes themselves is inspected.
pub fn validate_image_file(file: &SelectedFile, max_size: u64) -> Result<ImageMime, AppError> {
    validate_declared(&file.mime_type, file.size(), max_size)
}

/// The same checks on a declared type and size, for callers that have not
/// read the bytes yet.
pub fn validate_declared(mime_type: &str, size: u64, max_size: u64) -> Result<ImageMime, AppError> {
    let mime = ImageMime::parse(mime_type)
        .ok_or_else(|| AppError::Validation(INVALID_TYPE_MESSAGE.to_string()))?;

    if size > max_size {
        return Err(AppError::Validation(TOO_LARGE_MESSAGE.to_string()));
    }

    Ok(mime)
}
