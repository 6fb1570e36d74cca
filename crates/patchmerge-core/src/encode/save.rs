//! Saving images to disk.
//!
//! The path must name both a directory and a file. `merged.jpg` on its own is
//! rejected; write `./merged.jpg` instead. Nothing is written when the path is
//! rejected or encoding fails.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{encode_jpeg, encode_png, EncodeError, DEFAULT_JPEG_QUALITY};
use crate::decode::RasterImage;

/// Output container, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    /// `.png` (any case) selects PNG; everything else, including no
    /// extension, falls back to JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }
}

/// Check that `path` has a non-empty directory and file name.
pub fn validate_save_path(path: &Path) -> Result<(), EncodeError> {
    let display = path.display().to_string();

    let has_dir = path
        .parent()
        .map(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(false);
    if !has_dir {
        return Err(EncodeError::MissingDirectory(display));
    }

    // `Path::file_name` is None for paths ending in `..`; a trailing
    // separator is caught by checking the raw string.
    let ends_with_separator = display.ends_with('/') || display.ends_with(std::path::MAIN_SEPARATOR);
    if path.file_name().is_none() || ends_with_separator {
        return Err(EncodeError::MissingFileName(display));
    }

    Ok(())
}

/// Encode `image` in the format implied by `path`, without touching the disk.
pub fn encode_for_path(image: &RasterImage, path: &Path) -> Result<Vec<u8>, EncodeError> {
    match ImageFormat::from_path(path) {
        ImageFormat::Jpeg => encode_jpeg(image, DEFAULT_JPEG_QUALITY),
        ImageFormat::Png => encode_png(image),
    }
}

/// Encode and write `image` to `path`.
///
/// # Errors
///
/// - [`EncodeError::MissingDirectory`] / [`EncodeError::MissingFileName`] for
///   malformed paths
/// - encoding errors from the chosen codec
/// - [`EncodeError::Io`] when the file cannot be written
pub fn save_image(image: &RasterImage, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    validate_save_path(path)?;

    let bytes = encode_for_path(image, path)?;
    std::fs::write(path, &bytes).map_err(|e| EncodeError::Io(e.to_string()))?;

    debug!(
        path = %path.display(),
        format = ?ImageFormat::from_path(path),
        bytes = bytes.len(),
        "saved image"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_image, PixelLayout};

    fn sample() -> RasterImage {
        RasterImage::filled(8, 6, PixelLayout::Rgba, [20, 200, 40, 255])
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a/b.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.PNG")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.jpg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.jpeg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b.bmp")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("a/b")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_rejects_bare_file_name() {
        assert!(matches!(
            validate_save_path(Path::new("merged_image.jpg")),
            Err(EncodeError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_rejects_directory_only() {
        assert!(matches!(
            validate_save_path(Path::new("./out/")),
            Err(EncodeError::MissingFileName(_))
        ));
    }

    #[test]
    fn test_accepts_relative_and_absolute() {
        assert!(validate_save_path(Path::new("./merged_image.jpg")).is_ok());
        assert!(validate_save_path(Path::new("/tmp/merged.png")).is_ok());
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.png");

        save_image(&sample(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(decode_image(&bytes).unwrap(), sample());
    }

    #[test]
    fn test_save_jpeg_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_image.jpg");

        save_image(&sample(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(decode_image(&bytes).unwrap().dimensions(), (8, 6));
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist").join("merged.jpg");

        assert!(matches!(save_image(&sample(), &path), Err(EncodeError::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_nothing_written_on_encode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let empty = RasterImage::new(0, 0, PixelLayout::Rgba, vec![]);

        assert!(matches!(
            save_image(&empty, &path),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(!path.exists());
    }
}
