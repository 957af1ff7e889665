//! Lens Thin-Film Interference Simulation Library
//!
//! Models the constructive-interference color produced by an anti-reflective
//! coating on a spectacle lens:
//! - Reflected wavelength as a function of incidence angle
//! - Flat-lens color map driven by lens curvature
//! - Curved-lens surface with adjustable tilt and light source geometry

pub mod config;
pub mod physics;
pub mod simulation;
pub mod render;
pub mod export;

pub use config::SimulationConfig;
pub use simulation::SimulationEngine;
