//! 2D flat-lens color image construction.

use image::{Rgb, RgbImage};

use crate::render::spectral::wavelength_to_rgb;
use crate::simulation::FlatLensMap;

/// Background color for pixels outside the lens aperture: dark gray,
/// distinguishable from the black that marks an undefined wavelength.
pub const BACKGROUND_RGB: [u8; 3] = [20, 20, 20];

/// Build the RGB image of a flat-projection simulation.
///
/// Every in-aperture pixel gets its spectral color; pixels outside the
/// circular mask get the background. The conversion is a per-pixel map
/// with no ordering dependency.
pub fn flat_lens_image(map: &FlatLensMap) -> RgbImage {
    let (rows, cols) = map.wavelengths_nm.dim();

    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        let index = [y as usize, x as usize];
        if map.mask[index] {
            let (red, green, blue) = wavelength_to_rgb(map.wavelengths_nm[index]);
            Rgb([red, green, blue])
        } else {
            Rgb(BACKGROUND_RGB)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn map_with_uniform_wavelength(wavelength_nm: f64, resolution: usize) -> FlatLensMap {
        let wavelengths_nm = Array2::from_elem((resolution, resolution), wavelength_nm);
        let center = (resolution as f64 - 1.0) / 2.0;
        let mask = Array2::from_shape_fn((resolution, resolution), |(i, j)| {
            let x = (j as f64 - center) / center;
            let y = (i as f64 - center) / center;
            x * x + y * y <= 1.0
        });
        FlatLensMap {
            wavelengths_nm,
            mask,
            max_edge_angle_deg: 30.0,
        }
    }

    #[test]
    fn test_background_outside_aperture() {
        let image = flat_lens_image(&map_with_uniform_wavelength(550.0, 32));
        assert_eq!(image.get_pixel(0, 0).0, BACKGROUND_RGB);
        assert_eq!(image.get_pixel(31, 0).0, BACKGROUND_RGB);
    }

    #[test]
    fn test_interior_gets_spectral_color() {
        let image = flat_lens_image(&map_with_uniform_wavelength(550.0, 32));
        let (red, green, blue) = wavelength_to_rgb(550.0);
        assert_eq!(image.get_pixel(16, 16).0, [red, green, blue]);
    }

    #[test]
    fn test_undefined_wavelength_is_black_not_background() {
        let image = flat_lens_image(&map_with_uniform_wavelength(f64::NAN, 16));
        // In-aperture NaN renders black; the background stays dark gray
        assert_eq!(image.get_pixel(8, 8).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(0, 0).0, BACKGROUND_RGB);
    }

    #[test]
    fn test_image_dimensions_match_grid() {
        let image = flat_lens_image(&map_with_uniform_wavelength(600.0, 48));
        assert_eq!(image.dimensions(), (48, 48));
    }
}
