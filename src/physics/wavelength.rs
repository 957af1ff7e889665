//! Constructive thin-film interference wavelength calculation.
//!
//! An anti-reflective coating is a thin transparent film deposited on the
//! lens glass. Light reflecting from the top and bottom of the film travels
//! different optical path lengths, and the wavelength that interferes
//! constructively at a given viewing angle is:
//!
//! ```text
//! lambda = (2 * n_film * d * cos(theta_r)) / m
//! ```
//!
//! where `theta_r` is the refraction angle inside the film, obtained from
//! the incidence angle via Snell's law against air (n = 1.0). As the
//! incidence angle grows, `cos(theta_r)` shrinks and the reflected color
//! shifts toward shorter wavelengths (the "blue shift" seen when tilting
//! coated glasses under a lamp).

use ndarray::Array2;

/// Physical constants for the interference calculation.
pub mod constants {
    /// Refractive index of air
    pub const REFRACTIVE_INDEX_AIR: f64 = 1.0;
    /// Refractive index of magnesium fluoride, the common single-layer
    /// anti-reflective coating material
    pub const REFRACTIVE_INDEX_MGF2: f64 = 1.413;
    /// Refractive index of standard spectacle glass/resin
    pub const REFRACTIVE_INDEX_GLASS: f64 = 1.50;
}

/// Calculator for the constructive-interference wavelength of a coated lens.
///
/// Parameterized by the film's refractive index, its thickness in
/// nanometers, and the interference order. All three are fixed at
/// construction; the calculator itself is a pure function of the incidence
/// angle.
///
/// Where Snell's law has no real solution (total internal reflection) the
/// result is `f64::NAN` rather than an error: callers evaluate this over
/// full grids, and a single invalid sample must not invalidate the rest.
///
/// # Example
///
/// ```
/// use lens_film_sim::physics::WavelengthCalculator;
///
/// let calculator = WavelengthCalculator::new(1.413, 200.0, 1);
///
/// // Head-on view: lambda = 2 * n * d / m
/// let head_on = calculator.wavelength_at(0.0);
/// assert!((head_on - 565.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct WavelengthCalculator {
    /// Refractive index of the coating film
    refractive_index_film: f64,
    /// Film thickness in nanometers
    thickness_nm: f64,
    /// Interference order (m >= 1); m = 1 selects the dominant color
    order: u32,
}

impl WavelengthCalculator {
    /// Create a new calculator for the given film parameters.
    ///
    /// # Arguments
    /// * `refractive_index_film` - Refractive index of the coating (>= 1.0)
    /// * `thickness_nm` - Film thickness in nanometers (positive)
    /// * `order` - Interference order m (>= 1)
    pub fn new(refractive_index_film: f64, thickness_nm: f64, order: u32) -> Self {
        Self {
            refractive_index_film,
            thickness_nm,
            order,
        }
    }

    /// Create a calculator for a standard MgF2 coating (n = 1.413, 200nm, m = 1).
    pub fn magnesium_fluoride() -> Self {
        Self::new(constants::REFRACTIVE_INDEX_MGF2, 200.0, 1)
    }

    /// Get the film refractive index.
    pub fn refractive_index_film(&self) -> f64 {
        self.refractive_index_film
    }

    /// Get the film thickness in nanometers.
    pub fn thickness_nm(&self) -> f64 {
        self.thickness_nm
    }

    /// Get the interference order.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Calculate the constructive-interference wavelength for one incidence angle.
    ///
    /// # Arguments
    /// * `theta_incident_deg` - Incidence angle in degrees, [0, 90]
    ///
    /// # Returns
    /// Wavelength in nanometers, or `f64::NAN` when Snell's law has no real
    /// solution at this angle (total internal reflection). For films with
    /// n >= 1 viewed from air this never happens, since
    /// sin(theta_r) = sin(theta_i) / n <= 1.
    pub fn wavelength_at(&self, theta_incident_deg: f64) -> f64 {
        let theta_i = theta_incident_deg.to_radians();

        // Snell's law against air: n_air * sin(theta_i) = n_film * sin(theta_r)
        let sin_theta_r =
            (constants::REFRACTIVE_INDEX_AIR / self.refractive_index_film) * theta_i.sin();

        // No real refraction angle at this sample
        if sin_theta_r > 1.0 {
            return f64::NAN;
        }

        let cos_theta_r = (1.0 - sin_theta_r * sin_theta_r).sqrt();

        (2.0 * self.refractive_index_film * self.thickness_nm * cos_theta_r) / self.order as f64
    }

    /// Calculate the wavelength for every element of an incidence-angle grid.
    ///
    /// Identical per-element semantics to [`wavelength_at`](Self::wavelength_at):
    /// invalid samples become NaN without affecting their neighbors.
    pub fn wavelength_grid(&self, theta_incident_deg: &Array2<f64>) -> Array2<f64> {
        theta_incident_deg.mapv(|theta| self.wavelength_at(theta))
    }
}

impl Default for WavelengthCalculator {
    fn default() -> Self {
        Self::magnesium_fluoride()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_head_on_wavelength() {
        // At theta = 0, cos(theta_r) = 1, so lambda = 2 * n * d / m
        let calculator = WavelengthCalculator::new(1.413, 200.0, 1);
        assert!((calculator.wavelength_at(0.0) - 565.2).abs() < EPSILON);
    }

    #[test]
    fn test_order_divides_wavelength() {
        let first = WavelengthCalculator::new(1.413, 200.0, 1);
        let second = WavelengthCalculator::new(1.413, 200.0, 2);
        assert!((first.wavelength_at(0.0) / 2.0 - second.wavelength_at(0.0)).abs() < EPSILON);
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let calculator = WavelengthCalculator::default();
        let mut previous = calculator.wavelength_at(0.0);
        for step in 1..90 {
            let current = calculator.wavelength_at(step as f64);
            assert!(
                current <= previous + EPSILON,
                "wavelength increased between {} and {} degrees",
                step - 1,
                step
            );
            previous = current;
        }
    }

    #[test]
    fn test_defined_over_full_domain_for_dense_films() {
        // With n >= 1 total internal reflection cannot trigger from air
        let calculator = WavelengthCalculator::new(1.0, 300.0, 1);
        for step in 0..=90 {
            assert!(
                calculator.wavelength_at(step as f64).is_finite(),
                "undefined wavelength at {} degrees",
                step
            );
        }
    }

    #[test]
    fn test_grazing_incidence_does_not_panic() {
        let calculator = WavelengthCalculator::default();
        let grazing = calculator.wavelength_at(90.0);
        assert!(grazing.is_finite());
        assert!(grazing < calculator.wavelength_at(0.0));
    }

    #[test]
    fn test_snells_law_consistency() {
        let calculator = WavelengthCalculator::new(1.5, 400.0, 1);
        let theta_i: f64 = 45.0;
        let wavelength = calculator.wavelength_at(theta_i);

        let sin_theta_r = theta_i.to_radians().sin() / 1.5;
        let expected = 2.0 * 1.5 * 400.0 * (1.0 - sin_theta_r * sin_theta_r).sqrt();
        assert!((wavelength - expected).abs() < EPSILON);
    }

    #[test]
    fn test_grid_matches_scalar() {
        let calculator = WavelengthCalculator::default();
        let angles = array![[0.0, 30.0], [60.0, 90.0]];
        let grid = calculator.wavelength_grid(&angles);

        for (index, &theta) in angles.indexed_iter() {
            assert!((grid[index] - calculator.wavelength_at(theta)).abs() < EPSILON);
        }
    }

    #[test]
    fn test_nan_input_propagates_per_element() {
        let calculator = WavelengthCalculator::default();
        let angles = array![[f64::NAN, 10.0]];
        let grid = calculator.wavelength_grid(&angles);

        assert!(grid[[0, 0]].is_nan());
        assert!(grid[[0, 1]].is_finite());
    }
}
