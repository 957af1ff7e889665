//! Wavelength-to-RGB conversion for rendering the visible spectrum.
//!
//! Implements Dan Bruton's piecewise-linear approximation of the visible
//! spectrum: each band interpolates one or two channels linearly, the
//! extremes fade out through an attenuation ramp, and a gamma correction
//! compensates the eye's nonlinear brightness response.

/// Lower edge of the visible spectrum in nanometers.
pub const VISIBLE_MIN_NM: f64 = 380.0;
/// Upper edge of the visible spectrum in nanometers.
pub const VISIBLE_MAX_NM: f64 = 750.0;

/// Colorscale domain, slightly wider than the visible band so near-UV
/// samples map onto the scale instead of clipping at its edge.
pub const COLORSCALE_MIN_NM: f64 = 350.0;
/// Upper edge of the colorscale domain.
pub const COLORSCALE_MAX_NM: f64 = 750.0;

/// Gamma applied to the interpolated channel intensities.
pub const SPECTRUM_GAMMA: f64 = 0.8;

/// Convert a wavelength in nanometers to an approximate RGB color.
///
/// Deterministic for any input: wavelengths outside [380, 750]nm, and NaN
/// (the "no color" marker), map to black (0, 0, 0), which rendering treats
/// as the absence of a reflected color.
pub fn wavelength_to_rgb(wavelength_nm: f64) -> (u8, u8, u8) {
    wavelength_to_rgb_gamma(wavelength_nm, SPECTRUM_GAMMA)
}

/// [`wavelength_to_rgb`] with an explicit gamma.
pub fn wavelength_to_rgb_gamma(wavelength_nm: f64, gamma: f64) -> (u8, u8, u8) {
    let w = wavelength_nm;

    // NaN fails every range test and falls through to black.
    let (red, green, blue) = if (380.0..=440.0).contains(&w) {
        let attenuation = 0.3 + 0.7 * (w - 380.0) / (440.0 - 380.0);
        (
            ((-(w - 440.0) / (440.0 - 380.0)) * attenuation).powf(gamma),
            0.0,
            (1.0 * attenuation).powf(gamma),
        )
    } else if (440.0..=490.0).contains(&w) {
        (0.0, ((w - 440.0) / (490.0 - 440.0)).powf(gamma), 1.0)
    } else if (490.0..=510.0).contains(&w) {
        (0.0, 1.0, (-(w - 510.0) / (510.0 - 490.0)).powf(gamma))
    } else if (510.0..=580.0).contains(&w) {
        (((w - 510.0) / (580.0 - 510.0)).powf(gamma), 1.0, 0.0)
    } else if (580.0..=645.0).contains(&w) {
        (1.0, (-(w - 645.0) / (645.0 - 580.0)).powf(gamma), 0.0)
    } else if (645.0..=750.0).contains(&w) {
        let attenuation = 0.3 + 0.7 * (750.0 - w) / (750.0 - 645.0);
        ((1.0 * attenuation).powf(gamma), 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    ((red * 255.0) as u8, (green * 255.0) as u8, (blue * 255.0) as u8)
}

/// Generate a visible-spectrum colorscale over [350, 750]nm.
///
/// Returns `steps + 1` stops of (normalized position, RGB), evenly spaced
/// across the colorscale domain. Used to color the 3D surface the same way
/// the 2D image colors its pixels.
pub fn spectral_colorscale(steps: usize) -> Vec<(f64, (u8, u8, u8))> {
    (0..=steps)
        .map(|step| {
            let position = step as f64 / steps as f64;
            let wavelength_nm =
                COLORSCALE_MIN_NM + position * (COLORSCALE_MAX_NM - COLORSCALE_MIN_NM);
            (position, wavelength_to_rgb(wavelength_nm))
        })
        .collect()
}

/// Look a wavelength up on the colorscale domain, clamped to its ends.
///
/// Equivalent to coloring through [`spectral_colorscale`] with its domain
/// bounds: values below 350nm or above 750nm clamp instead of going black,
/// which keeps near-UV surface regions visibly violet on the 3D view.
pub fn colorscale_color(wavelength_nm: f64) -> (u8, u8, u8) {
    let clamped = wavelength_nm.clamp(COLORSCALE_MIN_NM, COLORSCALE_MAX_NM);
    wavelength_to_rgb(clamped)
}
