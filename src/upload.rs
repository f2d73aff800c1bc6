/// Upload guard
///
/// Turns an image file into the data URL the pipeline consumes, applying the
/// same checks as the upload form: it must be an image and it must be small.

use image::ImageFormat;
use std::path::Path;
use tokio::fs;

use crate::error::UploadError;
use crate::raster::data_url::encode_data_url;

/// Extensions treated as images when walking folders
pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// Whether a path looks like an image file by extension
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Media type for image bytes, sniffed from the content, then the extension
pub fn image_mime(bytes: &[u8], path: &Path) -> Option<&'static str> {
    let format = image::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_path(path).ok())?;

    let mime = format.to_mime_type();
    mime.starts_with("image/").then_some(mime)
}

/// Build a data URL from in-memory bytes
pub fn bytes_to_data_url(bytes: &[u8], path: &Path, max_bytes: u64) -> Result<String, UploadError> {
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(UploadError::TooLarge { size, limit: max_bytes });
    }

    let mime = image_mime(bytes, path).ok_or(UploadError::NotAnImage)?;
    Ok(encode_data_url(bytes, mime))
}

/// Read an image file and return it as a data URL
pub async fn read_image_as_data_url(path: &Path, max_bytes: u64) -> Result<String, UploadError> {
    let size = fs::metadata(path).await?.len();
    if size > max_bytes {
        return Err(UploadError::TooLarge { size, limit: max_bytes });
    }

    let bytes = fs::read(path).await?;
    bytes_to_data_url(&bytes, path, max_bytes)
}
