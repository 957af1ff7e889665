//! Simulation engine composing the physics and geometry models.
//!
//! Each entry point is a pure computation over the parameters captured at
//! construction: the 1D sweep relates incidence angle to wavelength, the 2D
//! map projects the color pattern of a flat-mounted lens, and the 3D
//! surface evaluates the tilted curved lens under a chosen light source.
//! Nothing persists between invocations.

use glam::DVec3;
use ndarray::{Array1, Array2};

use crate::config::{FilmParameters, LensParameters, SimulationConfig};
use crate::physics::geometry::{component_grids, LensGeometry, LightSource, APERTURE_RADIUS_MM};
use crate::physics::sampling;
use crate::physics::wavelength::WavelengthCalculator;

/// Result of the 1D incidence-angle sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Incidence angles in degrees, evenly spaced over [0, 90]
    pub angles_deg: Vec<f64>,
    /// Co-indexed reflected wavelengths in nanometers (NaN = undefined)
    pub wavelengths_nm: Vec<f64>,
}

impl SweepResult {
    /// Reflected wavelength when looking straight at the lens.
    pub fn wavelength_head_on(&self) -> f64 {
        self.wavelengths_nm[0]
    }

    /// Reflected wavelength at the sweep sample nearest the given angle.
    pub fn wavelength_near(&self, angle_deg: f64) -> f64 {
        let step = self.angles_deg[1] - self.angles_deg[0];
        let index = ((angle_deg / step).round() as usize).min(self.angles_deg.len() - 1);
        self.wavelengths_nm[index]
    }
}

/// Result of the 2D flat-projection simulation.
#[derive(Debug, Clone)]
pub struct FlatLensMap {
    /// Per-pixel reflected wavelength in nanometers
    pub wavelengths_nm: Array2<f64>,
    /// True inside the circular lens aperture; false pixels are background
    pub mask: Array2<bool>,
    /// Incidence angle at the lens rim, degrees
    pub max_edge_angle_deg: f64,
}

/// Result of the 3D curved-surface simulation.
#[derive(Debug, Clone)]
pub struct CurvedLensSurface {
    /// Per-point reflected wavelength in nanometers (NaN = no color)
    pub wavelengths_nm: Array2<f64>,
    /// Rotated surface X coordinates, millimeters
    pub x_mm: Array2<f64>,
    /// Rotated surface Y coordinates, millimeters
    pub y_mm: Array2<f64>,
    /// Rotated surface Z coordinates, millimeters (NaN = outside aperture)
    pub z_mm: Array2<f64>,
}

/// Orchestrates one simulation request from film and lens parameters.
///
/// # Example
///
/// ```
/// use lens_film_sim::config::SimulationConfig;
/// use lens_film_sim::SimulationEngine;
///
/// let config = SimulationConfig::default();
/// let engine = SimulationEngine::new(&config.film, &config.lens);
///
/// let sweep = engine.simulate_1d();
/// assert!((sweep.wavelength_head_on() - 565.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    calculator: WavelengthCalculator,
    geometry: LensGeometry,
}

impl SimulationEngine {
    /// Build an engine from film and lens parameters.
    pub fn new(film: &FilmParameters, lens: &LensParameters) -> Self {
        Self {
            calculator: WavelengthCalculator::new(
                film.refractive_index,
                film.thickness_nm,
                film.interference_order,
            ),
            geometry: LensGeometry::new(
                lens.tilt_x_deg,
                lens.pan_y_deg,
                lens.diopter,
                lens.resolution,
            ),
        }
    }

    /// Build an engine from a complete configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(&config.film, &config.lens)
    }

    /// Access the wavelength calculator.
    pub fn calculator(&self) -> &WavelengthCalculator {
        &self.calculator
    }

    /// Access the lens geometry.
    pub fn geometry(&self) -> &LensGeometry {
        &self.geometry
    }

    /// 1D simulation: reflected wavelength across the incidence-angle sweep.
    pub fn simulate_1d(&self) -> SweepResult {
        let (angles_deg, wavelengths_nm) = sampling::angle_sweep(&self.calculator);
        SweepResult {
            angles_deg,
            wavelengths_nm,
        }
    }

    /// 2D simulation: the color pattern of the lens seen face-on.
    ///
    /// Builds a normalized unit-disk grid, maps radial distance linearly to
    /// incidence angle in [0, max_edge_angle], and evaluates the wavelength
    /// elementwise. Pixels outside the unit circle are masked out as
    /// background; their (meaningless) wavelengths are still present in the
    /// grid but excluded from rendering by the mask.
    pub fn simulate_2d(&self, lens_diameter_mm: f64, glass_index: f64) -> FlatLensMap {
        let resolution = self.geometry.resolution();
        let coords: Array1<f64> = Array1::linspace(-1.0, 1.0, resolution);

        // Radial distance from the lens center, in unit-disk coordinates
        let radial: Array2<f64> = Array2::from_shape_fn((resolution, resolution), |(i, j)| {
            let x = coords[j];
            let y = coords[i];
            (x * x + y * y).sqrt()
        });

        let mask = radial.mapv(|r| r <= 1.0);

        // The further from center, the steeper the surface meets the light
        let max_edge_angle_deg = self.geometry.max_edge_angle_2d(lens_diameter_mm, glass_index);
        let theta_grid = radial.mapv(|r| r * max_edge_angle_deg);

        let wavelengths_nm = self.calculator.wavelength_grid(&theta_grid);

        FlatLensMap {
            wavelengths_nm,
            mask,
            max_edge_angle_deg,
        }
    }

    /// 3D simulation: the tilted curved lens under the given light source.
    ///
    /// Builds a physical grid over the +-25mm aperture, evaluates the
    /// spherical sag `z = sqrt(r^2 - x^2 - y^2) - r` (a flat plane for
    /// powers below the flat-lens threshold), rotates the grid, derives
    /// normals and incidence angles, and evaluates the wavelength over the
    /// incidence-angle field. Curved-lens points outside the circular
    /// aperture carry NaN coordinates so they are dropped from rendering
    /// rather than drawn at z = 0.
    pub fn simulate_3d(&self, glass_index: f64, light: &LightSource) -> CurvedLensSurface {
        let resolution = self.geometry.resolution();
        let coords = Array1::linspace(-APERTURE_RADIUS_MM, APERTURE_RADIUS_MM, resolution);

        let radius_mm = self.geometry.curvature_radius_mm(glass_index);
        let flat = self.geometry.is_flat();
        let aperture_sq = APERTURE_RADIUS_MM * APERTURE_RADIUS_MM;

        let points = Array2::from_shape_fn((resolution, resolution), |(i, j)| {
            let x = coords[j];
            let y = coords[i];
            let z = if flat {
                0.0
            } else if x * x + y * y > aperture_sq {
                f64::NAN
            } else {
                // Sphere equation, shifted so the lens apex sits at z = 0
                let term = (radius_mm * radius_mm - x * x - y * y).max(0.0);
                term.sqrt() - radius_mm
            };
            DVec3::new(x, y, z)
        });

        let rotated = self.geometry.rotate_grid(&points);
        let (_normals, theta_deg) = self.geometry.vectorize_surface(&rotated, radius_mm, light);
        let wavelengths_nm = self.calculator.wavelength_grid(&theta_deg);

        let (x_mm, y_mm, z_mm) = component_grids(&rotated);

        CurvedLensSurface {
            wavelengths_nm,
            x_mm,
            y_mm,
            z_mm,
        }
    }
}
