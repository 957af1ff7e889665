//! 1D chart: reflected wavelength as a function of incidence angle.

use std::path::Path;

use plotters::prelude::*;

use crate::render::RenderError;
use crate::simulation::SweepResult;

/// Chart output size in pixels.
const CHART_SIZE: (u32, u32) = (960, 640);

/// Dark chart background matching the image renderer's styling.
const CHART_BACKGROUND: RGBColor = RGBColor(17, 17, 17);

/// Visible-spectrum reference bands drawn behind the curve, as
/// (start nm, end nm, band color).
const SPECTRUM_BANDS: [(f64, f64, RGBColor); 5] = [
    (380.0, 450.0, RGBColor(148, 0, 211)), // violet
    (450.0, 495.0, RGBColor(0, 0, 255)),   // blue
    (495.0, 570.0, RGBColor(0, 160, 0)),   // green
    (570.0, 590.0, RGBColor(255, 214, 0)), // yellow
    (590.0, 750.0, RGBColor(220, 0, 0)),   // red
];

/// Render the angle-vs-wavelength sweep to a PNG chart.
///
/// A white curve over shaded spectral reference bands, with the y axis
/// focused on the visible spectrum plus the near-UV edge (350-750nm).
/// Undefined sweep samples are dropped from the curve rather than drawn.
pub fn render_sweep_chart(sweep: &SweepResult, path: &Path) -> Result<(), RenderError> {
    let backend_error = |error: &dyn std::fmt::Display| RenderError::Backend(error.to_string());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&CHART_BACKGROUND).map_err(|e| backend_error(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Reflected color vs. incidence angle",
            ("sans-serif", 28).into_font().color(&WHITE),
        )
        .margin(14)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..90.0, 350.0..750.0)
        .map_err(|e| backend_error(&e))?;

    chart
        .configure_mesh()
        .x_desc("Incidence angle (deg)")
        .y_desc("Wavelength (nm)")
        .label_style(("sans-serif", 15).into_font().color(&WHITE))
        .axis_style(&WHITE.mix(0.5))
        .light_line_style(&WHITE.mix(0.08))
        .bold_line_style(&WHITE.mix(0.15))
        .draw()
        .map_err(|e| backend_error(&e))?;

    // Reference bands first so the curve draws on top of them
    for (start_nm, end_nm, color) in SPECTRUM_BANDS {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, start_nm), (90.0, end_nm)],
                color.mix(0.2).filled(),
            )))
            .map_err(|e| backend_error(&e))?;
    }

    let curve_points = sweep
        .angles_deg
        .iter()
        .zip(sweep.wavelengths_nm.iter())
        .filter(|(_, wavelength)| wavelength.is_finite())
        .map(|(&angle, &wavelength)| (angle, wavelength));

    chart
        .draw_series(LineSeries::new(curve_points, WHITE.stroke_width(3)))
        .map_err(|e| backend_error(&e))?;

    root.present().map_err(|e| backend_error(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::wavelength::WavelengthCalculator;
    use crate::physics::sampling::angle_sweep;

    #[test]
    fn test_sweep_chart_writes_file() {
        let calculator = WavelengthCalculator::default();
        let (angles_deg, wavelengths_nm) = angle_sweep(&calculator);
        let sweep = SweepResult {
            angles_deg,
            wavelengths_nm,
        };

        let path = std::env::temp_dir().join("lens_film_sim_sweep_chart_test.png");
        render_sweep_chart(&sweep, &path).expect("chart rendering failed");
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_sweep_chart_tolerates_undefined_samples() {
        let sweep = SweepResult {
            angles_deg: vec![0.0, 30.0, 60.0, 90.0],
            wavelengths_nm: vec![565.2, f64::NAN, 500.0, 450.0],
        };

        let path = std::env::temp_dir().join("lens_film_sim_sweep_nan_test.png");
        render_sweep_chart(&sweep, &path).expect("chart rendering failed");

        let _ = std::fs::remove_file(&path);
    }
}
