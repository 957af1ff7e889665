//! Configuration module for the lens interference simulation.
//!
//! Defines the parameter structures for the simulation: the anti-reflective
//! film, the lens geometry, and the light source. Defaults model a standard
//! MgF2-coated crown glass lens of 5 diopters under distant sunlight.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::physics::geometry::LightSource;

/// Parameters of the anti-reflective coating film.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmParameters {
    /// Refractive index of the film (~1.413 for MgF2), >= 1.0
    pub refractive_index: f64,

    /// Film thickness in nanometers
    pub thickness_nm: f64,

    /// Interference order m; m = 1 selects the dominant reflected color
    #[serde(default = "default_order")]
    pub interference_order: u32,
}

fn default_order() -> u32 {
    1
}

impl Default for FilmParameters {
    fn default() -> Self {
        Self {
            refractive_index: 1.413, // MgF2
            thickness_nm: 200.0,
            interference_order: 1,
        }
    }
}

/// Parameters of the lens the film is deposited on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensParameters {
    /// Lens power in diopters, >= 0
    pub diopter: f64,

    /// Refractive index of the lens glass/resin
    pub glass_index: f64,

    /// Lens diameter in millimeters (the frame rim size)
    pub diameter_mm: f64,

    /// Simulation grid side length in points
    pub resolution: usize,

    /// Vertical tilt: rotation about the X axis, degrees
    #[serde(default)]
    pub tilt_x_deg: f64,

    /// Lateral pan: rotation about the Y axis, degrees
    #[serde(default)]
    pub pan_y_deg: f64,
}

impl Default for LensParameters {
    fn default() -> Self {
        Self {
            diopter: 5.0,
            glass_index: 1.50, // standard glass/resin
            diameter_mm: 50.0,
            resolution: 200,
            tilt_x_deg: 0.0,
            pan_y_deg: 0.0,
        }
    }
}

/// Light source selection for the curved-lens simulation.
///
/// Absent distance means a distant collimated source (the sun); a distance
/// in millimeters places a point source (a lamp) on the optical axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightParameters {
    /// Point-source distance along +Z in millimeters; None = distant source
    #[serde(default)]
    pub point_distance_mm: Option<f64>,
}

impl LightParameters {
    /// Resolve these parameters into the explicit light source variant.
    pub fn source(&self) -> LightSource {
        match self.point_distance_mm {
            Some(distance_mm) => LightSource::point_at_distance(distance_mm),
            None => LightSource::distant(),
        }
    }
}

/// Complete simulation configuration combining all parameter groups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Anti-reflective film optical properties
    pub film: FilmParameters,

    /// Lens curvature, size, and orientation
    pub lens: LensParameters,

    /// Light source geometry
    #[serde(default)]
    pub light: LightParameters,
}

impl SimulationConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Returns
    /// * `Ok(SimulationConfig)` - Parsed configuration
    /// * `Err` - If file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Save configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Check every parameter against its physically meaningful range.
    ///
    /// The ranges mirror what the simulation supports: film indices below
    /// 1.0 or non-positive thicknesses have no optical meaning, and grid
    /// resolutions outside 100-500 are either too coarse to render or
    /// larger than the on-demand computation is sized for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        range_check("film.refractive_index", self.film.refractive_index, 1.0, 2.0)?;
        range_check("film.thickness_nm", self.film.thickness_nm, 50.0, 800.0)?;
        range_check(
            "film.interference_order",
            self.film.interference_order as f64,
            1.0,
            3.0,
        )?;
        range_check("lens.diopter", self.lens.diopter, 0.0, 20.0)?;
        range_check("lens.glass_index", self.lens.glass_index, 1.01, 2.0)?;
        range_check("lens.diameter_mm", self.lens.diameter_mm, 30.0, 80.0)?;
        range_check("lens.resolution", self.lens.resolution as f64, 100.0, 500.0)?;
        range_check("lens.tilt_x_deg", self.lens.tilt_x_deg, -45.0, 45.0)?;
        range_check("lens.pan_y_deg", self.lens.pan_y_deg, -45.0, 45.0)?;
        if let Some(distance_mm) = self.light.point_distance_mm {
            range_check("light.point_distance_mm", distance_mm, 50.0, 1000.0)?;
        }
        Ok(())
    }
}

fn range_check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: std::path::PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
    /// A parameter is outside its supported range
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    formatter,
                    "Parameter '{}' = {} is outside the supported range [{}, {}]",
                    field, value, min, max
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}
