//! Lens Thin-Film Interference Simulator
//!
//! Computes the reflected color of an anti-reflective lens coating across
//! incidence angles and exports three views: a 1D wavelength curve, a 2D
//! flat-lens color map, and a 3D curved-lens surface.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use lens_film_sim::config::SimulationConfig;
use lens_film_sim::export::save_png;
use lens_film_sim::render::spectral::VISIBLE_MIN_NM;
use lens_film_sim::render::{flat_lens_image, render_surface_chart, render_sweep_chart};
use lens_film_sim::SimulationEngine;

/// Thin-film interference simulation for anti-reflective lens coatings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override film thickness (nanometers)
    #[arg(long)]
    thickness: Option<f64>,

    /// Override film refractive index
    #[arg(long)]
    index: Option<f64>,

    /// Override interference order
    #[arg(long)]
    order: Option<u32>,

    /// Override lens power (diopters)
    #[arg(long)]
    diopter: Option<f64>,

    /// Override grid resolution (points per side)
    #[arg(long)]
    resolution: Option<usize>,

    /// Override vertical tilt (degrees about X)
    #[arg(long)]
    tilt_x: Option<f64>,

    /// Override lateral pan (degrees about Y)
    #[arg(long)]
    pan_y: Option<f64>,

    /// Use a point light source at this distance (millimeters);
    /// omit for a distant collimated source
    #[arg(long)]
    light_distance: Option<f64>,

    /// Output directory for rendered images
    #[arg(short, long, default_value = "out")]
    output: PathBuf,
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config {
        match SimulationConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                SimulationConfig::default()
            }
        }
    } else {
        SimulationConfig::default()
    };

    apply_overrides(&mut config, &args);

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config, &args.output) {
        log::error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn apply_overrides(config: &mut SimulationConfig, args: &Args) {
    if let Some(thickness) = args.thickness {
        config.film.thickness_nm = thickness;
    }
    if let Some(index) = args.index {
        config.film.refractive_index = index;
    }
    if let Some(order) = args.order {
        config.film.interference_order = order;
    }
    if let Some(diopter) = args.diopter {
        config.lens.diopter = diopter;
    }
    if let Some(resolution) = args.resolution {
        config.lens.resolution = resolution;
    }
    if let Some(tilt_x) = args.tilt_x {
        config.lens.tilt_x_deg = tilt_x;
    }
    if let Some(pan_y) = args.pan_y {
        config.lens.pan_y_deg = pan_y;
    }
    if let Some(distance) = args.light_distance {
        config.light.point_distance_mm = Some(distance);
    }
}

fn run(config: &SimulationConfig, output: &PathBuf) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(output)?;

    log::info!(
        "Simulating {}nm film (n = {}, m = {}) on a {}D lens at {} points per side",
        config.film.thickness_nm,
        config.film.refractive_index,
        config.film.interference_order,
        config.lens.diopter,
        config.lens.resolution
    );

    let engine = SimulationEngine::from_config(config);

    // 1D: wavelength across the incidence-angle sweep
    let sweep = engine.simulate_1d();
    log::info!(
        "Head-on reflected wavelength: {:.0} nm; at 60 degrees: {:.0} nm",
        sweep.wavelength_head_on(),
        sweep.wavelength_near(60.0)
    );
    if sweep
        .wavelengths_nm
        .iter()
        .any(|w| w.is_finite() && *w < VISIBLE_MIN_NM)
    {
        log::warn!(
            "Part of the sweep falls below {} nm: those angles reflect in the ultraviolet, invisible to the eye",
            VISIBLE_MIN_NM
        );
    }
    let sweep_path = output.join("wavelength_vs_angle.png");
    render_sweep_chart(&sweep, &sweep_path)?;
    log::info!("Wrote {}", sweep_path.display());

    // 2D: flat-projection color map
    let map = engine.simulate_2d(config.lens.diameter_mm, config.lens.glass_index);
    log::info!(
        "Max edge angle for the {}mm rim: {:.1} degrees",
        config.lens.diameter_mm,
        map.max_edge_angle_deg
    );
    let map_path = output.join("flat_lens.png");
    save_png(&map_path, &flat_lens_image(&map))?;
    log::info!("Wrote {}", map_path.display());

    // 3D: curved surface under the configured light source
    let surface = engine.simulate_3d(config.lens.glass_index, &config.light.source());
    let surface_path = output.join("curved_lens.png");
    render_surface_chart(&surface, &surface_path)?;
    log::info!("Wrote {}", surface_path.display());

    Ok(())
}
