//! 3D chart: the curved lens surface colored by reflected wavelength.

use std::path::Path;

use glam::DVec3;
use plotters::element::Polygon;
use plotters::prelude::*;

use crate::render::spectral::colorscale_color;
use crate::render::RenderError;
use crate::simulation::CurvedLensSurface;

/// Chart output size in pixels.
const CHART_SIZE: (u32, u32) = (900, 700);

/// Background matching the 2D renderer's out-of-aperture gray.
const CHART_BACKGROUND: RGBColor = RGBColor(20, 20, 20);

/// Plot-space extent in millimeters on every axis.
const AXIS_RANGE_MM: f64 = 30.0;

/// Fixed view orientation (radians) and zoom.
const VIEW_YAW: f64 = 0.7;
const VIEW_PITCH: f64 = 0.42;
const VIEW_SCALE: f64 = 0.8;

/// One renderable grid cell: projected depth key, corner coordinates in
/// plot space, and fill color.
struct SurfaceCell {
    depth: f64,
    corners: [(f64, f64, f64); 4],
    color: RGBColor,
}

/// Render the curved-lens surface to a PNG chart.
///
/// Each grid cell becomes a quad colored through the spectral colorscale
/// by the mean wavelength of its corners. Cells touching an invalid
/// (out-of-aperture) point or carrying no defined wavelength are not drawn,
/// leaving the background visible. Cells are painter-ordered: the farthest
/// from the viewpoint draw first.
pub fn render_surface_chart(
    surface: &CurvedLensSurface,
    path: &Path,
) -> Result<(), RenderError> {
    let backend_error = |error: &dyn std::fmt::Display| RenderError::Backend(error.to_string());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&CHART_BACKGROUND).map_err(|e| backend_error(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_3d(
            -AXIS_RANGE_MM..AXIS_RANGE_MM,
            -AXIS_RANGE_MM..AXIS_RANGE_MM,
            -AXIS_RANGE_MM..AXIS_RANGE_MM,
        )
        .map_err(|e| backend_error(&e))?;

    chart.with_projection(|mut projection| {
        projection.yaw = VIEW_YAW;
        projection.pitch = VIEW_PITCH;
        projection.scale = VIEW_SCALE;
        projection.into_matrix()
    });

    let mut cells = collect_cells(surface);
    // Painter order: farthest from the viewpoint first
    cells.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    chart
        .draw_series(
            cells
                .into_iter()
                .map(|cell| Polygon::new(cell.corners.to_vec(), cell.color.filled())),
        )
        .map_err(|e| backend_error(&e))?;

    root.present().map_err(|e| backend_error(&e))?;
    Ok(())
}

/// Gather the drawable cells of the surface grid.
fn collect_cells(surface: &CurvedLensSurface) -> Vec<SurfaceCell> {
    let (rows, cols) = surface.wavelengths_nm.dim();
    let view_direction = DVec3::new(VIEW_YAW.sin(), VIEW_PITCH.sin(), VIEW_YAW.cos()).normalize();

    let mut cells = Vec::with_capacity((rows - 1) * (cols - 1));

    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let corner_indices = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];

            let mut corners = [(0.0, 0.0, 0.0); 4];
            let mut centroid = DVec3::ZERO;
            let mut valid = true;

            for (slot, &(ci, cj)) in corner_indices.iter().enumerate() {
                let x = surface.x_mm[[ci, cj]];
                let y = surface.y_mm[[ci, cj]];
                let z = surface.z_mm[[ci, cj]];
                if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                    valid = false;
                    break;
                }
                // Plot space puts the lens sag on the vertical axis
                corners[slot] = (x, z, y);
                centroid += DVec3::new(x, z, y);
            }
            if !valid {
                continue;
            }

            let wavelength_sum: f64 = corner_indices
                .iter()
                .map(|&(ci, cj)| surface.wavelengths_nm[[ci, cj]])
                .filter(|w| w.is_finite())
                .sum();
            let wavelength_count = corner_indices
                .iter()
                .filter(|&&(ci, cj)| surface.wavelengths_nm[[ci, cj]].is_finite())
                .count();
            if wavelength_count == 0 {
                continue;
            }

            let (red, green, blue) = colorscale_color(wavelength_sum / wavelength_count as f64);

            centroid /= 4.0;
            cells.push(SurfaceCell {
                depth: centroid.dot(view_direction),
                corners,
                color: RGBColor(red, green, blue),
            });
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilmParameters, LensParameters};
    use crate::physics::geometry::LightSource;
    use crate::simulation::SimulationEngine;

    fn small_surface(diopter: f64) -> CurvedLensSurface {
        let film = FilmParameters::default();
        let lens = LensParameters {
            diopter,
            resolution: 24,
            ..LensParameters::default()
        };
        SimulationEngine::new(&film, &lens).simulate_3d(1.5, &LightSource::distant())
    }

    #[test]
    fn test_curved_surface_skips_corner_cells() {
        let cells = collect_cells(&small_surface(5.0));
        // Cells exist, but fewer than the full grid: corners are masked
        assert!(!cells.is_empty());
        assert!(cells.len() < 23 * 23);
    }

    #[test]
    fn test_flat_surface_keeps_full_grid() {
        let cells = collect_cells(&small_surface(0.0));
        assert_eq!(cells.len(), 23 * 23);
    }

    #[test]
    fn test_surface_chart_writes_file() {
        let path = std::env::temp_dir().join("lens_film_sim_surface_chart_test.png");
        render_surface_chart(&small_surface(5.0), &path).expect("chart rendering failed");
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }
}
