//! PNG export for rendered lens images.

use std::path::Path;

use image::RgbImage;

/// Errors that can occur during export
#[derive(Debug)]
pub enum ExportError {
    /// Failed to save image file
    SaveError(String),
    /// Invalid dimensions
    InvalidDimensions { width: u32, height: u32 },
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::SaveError(msg) => write!(f, "Failed to save image: {}", msg),
            ExportError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ExportError {}

/// Save an RGB image to a PNG file.
///
/// # Arguments
/// * `path` - Output file path
/// * `image` - The rendered image buffer
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(ExportError)` on empty dimensions or a failed write
pub fn save_png<P: AsRef<Path>>(path: P, image: &RgbImage) -> Result<(), ExportError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions { width, height });
    }

    image
        .save(path.as_ref())
        .map_err(|e| ExportError::SaveError(e.to_string()))
}
