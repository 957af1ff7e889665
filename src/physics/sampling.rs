//! Angle sweep generation for the 1D wavelength-vs-angle view.

use ndarray::Array1;

use crate::physics::wavelength::WavelengthCalculator;

/// Number of samples in the incidence-angle sweep.
pub const SWEEP_SAMPLES: usize = 100;

/// Generate the incidence-angle sweep and its co-indexed wavelengths.
///
/// 100 angles evenly spaced over [0, 90] degrees, each evaluated through
/// the calculator with no aggregation or smoothing.
pub fn angle_sweep(calculator: &WavelengthCalculator) -> (Vec<f64>, Vec<f64>) {
    let angles = Array1::linspace(0.0, 90.0, SWEEP_SAMPLES).to_vec();
    let wavelengths = angles
        .iter()
        .map(|&angle| calculator.wavelength_at(angle))
        .collect();

    (angles, wavelengths)
}
