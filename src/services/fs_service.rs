use crate::error::AppError;
use crate::models::upload_types::SelectedFile;
use crate::services::validation;
use image::ImageFormat;
use std::path::Path;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// The MIME type a file picker would declare for this path: derived from the
/// extension only.
pub fn declared_mime(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Reads a file the way the picker hands it over. A file whose declared type
/// or on-disk size already fails validation comes back as that validation
/// error without its bytes being read.
pub async fn load_selected_file(path: &Path, max_size: u64) -> Result<SelectedFile, AppError> {
    let io_error = |e: std::io::Error| AppError::Io(format!("Failed to read {}: {}", path.display(), e));

    let mime = declared_mime(path);
    let len = tokio::fs::metadata(path).await.map_err(io_error)?.len();
    validation::validate_declared(mime, len, max_size)?;

    let bytes = tokio::fs::read(path).await.map_err(io_error)?;

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(SelectedFile::new(file_name, mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_UPLOAD_BYTES;
    use crate::services::validation::{INVALID_TYPE_MESSAGE, TOO_LARGE_MESSAGE};
    use pretty_assertions::assert_eq;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(declared_mime(Path::new("leaf.png")), "image/png");
        assert_eq!(declared_mime(Path::new("leaf.JPG")), "image/jpeg");
        assert_eq!(declared_mime(Path::new("leaf.jpeg")), "image/jpeg");
        assert_eq!(declared_mime(Path::new("leaf.gif")), "image/gif");
        assert_eq!(declared_mime(Path::new("notes.txt")), UNKNOWN_MIME);
        assert_eq!(declared_mime(Path::new("no_extension")), UNKNOWN_MIME);
    }

    #[tokio::test]
    async fn loads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = load_selected_file(&path, MAX_UPLOAD_BYTES).await.unwrap();
        assert_eq!(file.file_name, "leaf.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_selected_file(&dir.path().join("gone.png"), MAX_UPLOAD_BYTES)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "io");
        assert!(err.message().starts_with("Failed to read "));
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_from_its_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let err = load_selected_file(&path, 8).await.unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.message(), TOO_LARGE_MESSAGE);
    }

    #[tokio::test]
    async fn wrong_type_wins_over_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.gif");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let err = load_selected_file(&path, 8).await.unwrap_err();
        assert_eq!(err.message(), INVALID_TYPE_MESSAGE);
    }
}
