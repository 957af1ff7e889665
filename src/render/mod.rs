//! Presentation modules
//!
//! Turns computed grids and scalars into renderable artifacts:
//! - Spectral: wavelength-to-RGB conversion and colorscale generation
//! - Flat map: 2D lens color image construction
//! - Curve: 1D wavelength-vs-angle chart
//! - Surface: 3D curved-lens chart

pub mod spectral;
pub mod flat_map;
pub mod curve;
pub mod surface;

pub use flat_map::flat_lens_image;
pub use curve::render_sweep_chart;
pub use surface::render_surface_chart;

/// Error raised while drawing a chart.
#[derive(Debug)]
pub enum RenderError {
    /// The charting backend failed to draw or flush the output file
    Backend(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Backend(message) => {
                write!(formatter, "Failed to render chart: {}", message)
            }
        }
    }
}

impl std::error::Error for RenderError {}
