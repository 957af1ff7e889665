//! Lens curvature, grid rotation, and incidence-angle geometry.
//!
//! A spectacle lens of power `D` diopters ground from glass of index `n`
//! has a spherical front surface of radius `r = (n - 1) * 1000 / D`
//! millimeters. This module derives that radius, rotates surface point
//! grids through the lens tilt, builds per-point surface normals, and
//! computes the incidence angle between each normal and the light
//! direction for either a distant (collimated) or point light source.

use glam::{DMat3, DVec3};
use ndarray::{Array2, Zip};

/// Below this power the lens is treated as exactly flat. Callers branch on
/// the flat case instead of dividing by a near-zero diopter.
pub const FLAT_LENS_DIOPTER_EPSILON: f64 = 0.1;

/// Sentinel curvature radius standing in for an infinite (flat) surface.
pub const FLAT_RADIUS_SENTINEL_MM: f64 = 999_999.0;

/// Physical half-extent of the curved-lens grid in millimeters.
pub const APERTURE_RADIUS_MM: f64 = 25.0;

/// The light geometry illuminating the lens.
///
/// Passed explicitly to every incidence-angle computation; there is no
/// implicit default inferred from a missing argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    /// Collimated rays from a far-away source (the sun). Every surface
    /// point sees the same direction.
    Distant { direction: DVec3 },
    /// A nearby lamp at a fixed position; each surface point sees its own
    /// direction toward it.
    Point { position: DVec3 },
}

impl LightSource {
    /// Distant source shining along +Z.
    pub fn distant() -> Self {
        Self::Distant { direction: DVec3::Z }
    }

    /// Point source on the optical axis, `distance_mm` in front of the lens.
    pub fn point_at_distance(distance_mm: f64) -> Self {
        Self::Point {
            position: DVec3::new(0.0, 0.0, distance_mm),
        }
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::distant()
    }
}

/// Normalize a vector, substituting magnitude 1 for zero-length input so
/// the zero vector passes through unchanged instead of dividing by zero.
fn normalize_safe(vector: DVec3) -> DVec3 {
    let mut magnitude = vector.length();
    if magnitude == 0.0 {
        magnitude = 1.0;
    }
    vector / magnitude
}

/// Angle in degrees between a unit normal and a unit light vector.
///
/// The absolute value of the dot product treats the surface as reflective
/// from either face, folding angles beyond 90 degrees back by symmetry. A
/// NaN dot product (degenerate normal, e.g. from an out-of-aperture point)
/// defaults to 1.0, i.e. head-on incidence, instead of propagating.
fn incidence_angle_deg(normal: DVec3, light: DVec3) -> f64 {
    let mut dot = normal.dot(light);
    if dot.is_nan() {
        dot = 1.0;
    }
    dot.clamp(-1.0, 1.0).abs().acos().to_degrees()
}

/// Lens surface geometry: curvature, orientation, and grid resolution.
///
/// The rotation is composed at construction as `Ry * Rx` (right-hand
/// rotations about X, then Y) from the tilt and pan angles, matching the
/// order the engine applies when orienting the lens toward the light.
#[derive(Debug, Clone)]
pub struct LensGeometry {
    diopter: f64,
    resolution: usize,
    rotation: DMat3,
}

impl LensGeometry {
    /// Create the geometry for a lens of the given power and orientation.
    ///
    /// # Arguments
    /// * `tilt_x_deg` - Rotation about the X axis (vertical tilt), degrees
    /// * `pan_y_deg` - Rotation about the Y axis (lateral pan), degrees
    /// * `diopter` - Lens power in diopters (>= 0)
    /// * `resolution` - Grid side length for surface evaluation
    pub fn new(tilt_x_deg: f64, pan_y_deg: f64, diopter: f64, resolution: usize) -> Self {
        let rotation_x = DMat3::from_rotation_x(tilt_x_deg.to_radians());
        let rotation_y = DMat3::from_rotation_y(pan_y_deg.to_radians());

        Self {
            diopter,
            resolution,
            rotation: rotation_y * rotation_x,
        }
    }

    /// Get the lens power in diopters.
    pub fn diopter(&self) -> f64 {
        self.diopter
    }

    /// Get the grid side length.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Get the composed rotation matrix (Ry * Rx).
    pub fn rotation(&self) -> DMat3 {
        self.rotation
    }

    /// Whether the lens power is below [`FLAT_LENS_DIOPTER_EPSILON`].
    pub fn is_flat(&self) -> bool {
        self.diopter < FLAT_LENS_DIOPTER_EPSILON
    }

    /// Curvature radius of the front surface in millimeters.
    ///
    /// `r = (n_glass - 1) * 1000 / D`. A flat lens returns
    /// [`FLAT_RADIUS_SENTINEL_MM`] rather than dividing by its near-zero
    /// power.
    pub fn curvature_radius_mm(&self, glass_index: f64) -> f64 {
        if self.is_flat() {
            FLAT_RADIUS_SENTINEL_MM
        } else {
            (glass_index - 1.0) * 1000.0 / self.diopter
        }
    }

    /// Approximate incidence angle at the lens rim, in degrees.
    ///
    /// Uses `sin(theta) = (diameter / 2) / r`. When the half-diameter
    /// exceeds the curvature radius the rim geometrically outruns the
    /// sphere; the angle is clamped to 90 degrees instead of faulting.
    pub fn max_edge_angle_2d(&self, lens_diameter_mm: f64, glass_index: f64) -> f64 {
        let half_diameter = lens_diameter_mm / 2.0;
        let radius_mm = self.curvature_radius_mm(glass_index);

        if half_diameter > radius_mm {
            90.0
        } else {
            (half_diameter / radius_mm).asin().to_degrees()
        }
    }

    /// Apply the lens rotation to every point of a surface grid.
    ///
    /// Row/column ordering is preserved: element `[i, j]` of the output is
    /// the rotated element `[i, j]` of the input.
    pub fn rotate_grid(&self, points: &Array2<DVec3>) -> Array2<DVec3> {
        points.mapv(|point| self.rotation * point)
    }

    /// Build the per-point unit normal field of the (rotated) lens surface.
    ///
    /// A flat lens has one constant normal, the rotated +Z axis, shared by
    /// the whole grid. A curved lens takes each normal as the normalized
    /// vector from the rotated spherical center to the surface point.
    pub fn surface_normals(
        &self,
        rotated_center: DVec3,
        points: &Array2<DVec3>,
    ) -> Array2<DVec3> {
        if self.is_flat() {
            let normal = self.rotation * DVec3::Z;
            Array2::from_elem(points.raw_dim(), normal)
        } else {
            points.mapv(|point| normalize_safe(point - rotated_center))
        }
    }

    /// Incidence angle in degrees between each surface normal and the light.
    ///
    /// A distant source applies one direction to every point; a point
    /// source sees a per-point direction toward its position.
    pub fn incidence_angles(
        &self,
        normals: &Array2<DVec3>,
        points: &Array2<DVec3>,
        light: &LightSource,
    ) -> Array2<f64> {
        match light {
            LightSource::Distant { direction } => {
                normals.mapv(|normal| incidence_angle_deg(normal, *direction))
            }
            LightSource::Point { position } => Zip::from(normals)
                .and(points)
                .map_collect(|&normal, &point| {
                    let light_vector = normalize_safe(*position - point);
                    incidence_angle_deg(normal, light_vector)
                }),
        }
    }

    /// Derive normals and incidence angles for a rotated surface grid.
    ///
    /// Rotates the spherical center `[0, 0, -r]` through the lens
    /// orientation, builds the normal field, and evaluates the incidence
    /// angle of the given light source at every point.
    pub fn vectorize_surface(
        &self,
        points: &Array2<DVec3>,
        curvature_radius_mm: f64,
        light: &LightSource,
    ) -> (Array2<DVec3>, Array2<f64>) {
        let center = DVec3::new(0.0, 0.0, -curvature_radius_mm);
        let rotated_center = self.rotation * center;

        let normals = self.surface_normals(rotated_center, points);
        let angles = self.incidence_angles(&normals, points, light);

        (normals, angles)
    }
}

/// Split a point grid into co-indexed X, Y, Z component grids.
pub fn component_grids(points: &Array2<DVec3>) -> (Array2<f64>, Array2<f64>, Array2<f64>) {
    (
        points.mapv(|p| p.x),
        points.mapv(|p| p.y),
        points.mapv(|p| p.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_grid(resolution: usize) -> Array2<DVec3> {
        Array2::from_shape_fn((resolution, resolution), |(i, j)| {
            DVec3::new(j as f64, i as f64, 1.0)
        })
    }

    #[test]
    fn test_curvature_radius() {
        let geometry = LensGeometry::new(0.0, 0.0, 5.0, 10);
        // r = (1.5 - 1) * 1000 / 5 = 100 mm
        assert_relative_eq!(geometry.curvature_radius_mm(1.5), 100.0);
    }

    #[test]
    fn test_flat_lens_radius_sentinel() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.05, 10);
        assert!(geometry.is_flat());
        assert_relative_eq!(geometry.curvature_radius_mm(1.5), FLAT_RADIUS_SENTINEL_MM);
    }

    #[test]
    fn test_max_edge_angle() {
        let geometry = LensGeometry::new(0.0, 0.0, 5.0, 10);
        // r = 100mm, half-diameter 25mm -> asin(0.25)
        let expected = 0.25_f64.asin().to_degrees();
        assert_relative_eq!(geometry.max_edge_angle_2d(50.0, 1.5), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_max_edge_angle_clamps_degenerate_rim() {
        // 20 diopters of crown glass: r = 25mm, half-diameter 40mm > r
        let geometry = LensGeometry::new(0.0, 0.0, 20.0, 10);
        assert_relative_eq!(geometry.max_edge_angle_2d(80.0, 1.5), 90.0);
    }

    #[test]
    fn test_flat_lens_edge_angle_degenerates() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 10);
        assert!(geometry.max_edge_angle_2d(50.0, 1.5) < 0.01);
    }

    #[test]
    fn test_identity_rotation() {
        let geometry = LensGeometry::new(0.0, 0.0, 5.0, 4);
        let grid = unit_grid(4);
        let rotated = geometry.rotate_grid(&grid);

        for (index, point) in grid.indexed_iter() {
            assert_relative_eq!(rotated[index].x, point.x, epsilon = 1e-12);
            assert_relative_eq!(rotated[index].y, point.y, epsilon = 1e-12);
            assert_relative_eq!(rotated[index].z, point.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotation_composition_order() {
        // Ry * Rx applied to +Z: Rx(90) sends Z to -Y, then Ry(90) keeps -Y
        let geometry = LensGeometry::new(90.0, 90.0, 5.0, 2);
        let rotated = geometry.rotation() * DVec3::Z;
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_normals_share_rotated_axis() {
        let geometry = LensGeometry::new(30.0, 0.0, 0.0, 3);
        let grid = unit_grid(3);
        let normals = geometry.surface_normals(DVec3::ZERO, &grid);

        let expected = geometry.rotation() * DVec3::Z;
        for normal in normals.iter() {
            assert_relative_eq!(normal.x, expected.x, epsilon = 1e-12);
            assert_relative_eq!(normal.y, expected.y, epsilon = 1e-12);
            assert_relative_eq!(normal.z, expected.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_curved_normals_are_unit_length() {
        let geometry = LensGeometry::new(0.0, 0.0, 5.0, 4);
        let center = DVec3::new(0.0, 0.0, -100.0);
        let grid = unit_grid(4);
        let normals = geometry.surface_normals(center, &grid);

        for normal in normals.iter() {
            assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_zero_vector_unchanged() {
        let result = normalize_safe(DVec3::ZERO);
        assert_eq!(result, DVec3::ZERO);
    }

    #[test]
    fn test_head_on_incidence_is_zero() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 2);
        let grid = unit_grid(2);
        let normals = Array2::from_elem(grid.raw_dim(), DVec3::Z);

        let angles = geometry.incidence_angles(&normals, &grid, &LightSource::distant());
        for angle in angles.iter() {
            assert_relative_eq!(*angle, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_back_face_incidence_folds_by_symmetry() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 1);
        let grid = unit_grid(1);
        let normals = Array2::from_elem(grid.raw_dim(), -DVec3::Z);

        let angles = geometry.incidence_angles(&normals, &grid, &LightSource::distant());
        assert_relative_eq!(angles[[0, 0]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_normal_defaults_head_on() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 1);
        let grid = unit_grid(1);
        let normals = Array2::from_elem(grid.raw_dim(), DVec3::new(f64::NAN, 0.0, 0.0));

        let angles = geometry.incidence_angles(&normals, &grid, &LightSource::distant());
        assert_relative_eq!(angles[[0, 0]], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_point_source_sees_per_point_directions() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 1);
        // Surface point off-axis with a +Z normal
        let grid = Array2::from_elem((1, 1), DVec3::new(100.0, 0.0, 0.0));
        let normals = Array2::from_elem((1, 1), DVec3::Z);

        let light = LightSource::point_at_distance(100.0);
        let angles = geometry.incidence_angles(&normals, &grid, &light);

        // Light vector is (-100, 0, 100) normalized: 45 degrees off normal
        assert_relative_eq!(angles[[0, 0]], 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vectorize_surface_distant_flat() {
        let geometry = LensGeometry::new(0.0, 0.0, 0.0, 3);
        let grid = unit_grid(3);

        let (normals, angles) =
            geometry.vectorize_surface(&grid, FLAT_RADIUS_SENTINEL_MM, &LightSource::distant());

        for (normal, angle) in normals.iter().zip(angles.iter()) {
            assert_relative_eq!(normal.z, 1.0, epsilon = 1e-12);
            assert_relative_eq!(*angle, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_component_grids_preserve_ordering() {
        let grid = unit_grid(3);
        let (x, y, z) = component_grids(&grid);

        assert_relative_eq!(x[[1, 2]], 2.0);
        assert_relative_eq!(y[[1, 2]], 1.0);
        assert_relative_eq!(z[[1, 2]], 1.0);
    }
}
