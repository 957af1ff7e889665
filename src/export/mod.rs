//! Image export functionality

pub mod image_export;

pub use image_export::{save_png, ExportError};
