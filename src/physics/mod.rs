//! Physics and geometry modules
//!
//! Contains the optical and geometric models for the lens simulation:
//! - Wavelength: constructive thin-film interference vs. incidence angle
//! - Geometry: lens curvature, grid rotation, surface normals, light vectors
//! - Sampling: angle sweep generation for the 1D view

pub mod wavelength;
pub mod geometry;
pub mod sampling;

pub use wavelength::WavelengthCalculator;
pub use geometry::{LensGeometry, LightSource};
