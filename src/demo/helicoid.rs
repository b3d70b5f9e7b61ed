//! # Helicoid Surface Generation
//!
//! Evaluates the parametric helicoid over a regular (u, v) grid and
//! tessellates it into a triangle mesh. The surface is built once at
//! startup and never recomputed.

use std::f32::consts::PI;

use super::GeometryData;

/// Grid resolution: quads per parameter direction
pub const SLICES: u32 = 100;
pub const STACKS: u32 = 100;

/// Curvature parameter of the surface family
const CURL: f32 = 1.5;

/// Evaluates the helicoid at normalized parameters (u, v) in [0, 1]²
///
/// The dividend is at least 2 everywhere (cosh ≥ 1), so the function has
/// no singularities over its domain.
pub fn helicoid_point(u: f32, v: f32) -> [f32; 3] {
    let alpha = 2.0 * PI * (u - 0.5);
    let theta = 2.0 * PI * (v - 0.5);
    let dividend = 1.0 + alpha.cosh() * theta.cosh();

    let x = theta.sinh() * (CURL * alpha).cos() / dividend;
    let z = theta.sinh() * (CURL * alpha).sin() / dividend;
    let y = 1.5 * theta.cosh() * alpha.sinh() / dividend;

    [x, y, z]
}

/// Tessellates the helicoid into a grid mesh
///
/// Produces `(slices + 1) × (stacks + 1)` vertices and `2 · slices · stacks`
/// triangles with counter-clockwise winding. Normals are left empty; call
/// [`GeometryData::compute_smooth_normals`] on the result.
pub fn generate_helicoid(slices: u32, stacks: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let slices = slices.max(1);
    let stacks = stacks.max(1);

    for row in 0..=stacks {
        let v = row as f32 / stacks as f32;
        for col in 0..=slices {
            let u = col as f32 / slices as f32;
            data.positions.push(helicoid_point(u, v));
        }
    }

    for row in 0..stacks {
        for col in 0..slices {
            let i = row * (slices + 1) + col;
            let next_row = i + slices + 1;

            data.indices.push(i);
            data.indices.push(next_row);
            data.indices.push(i + 1);

            data.indices.push(next_row);
            data.indices.push(next_row + 1);
            data.indices.push(i + 1);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_samples_are_finite() {
        let steps = 100;
        for row in 0..=steps {
            let v = row as f32 / steps as f32;
            for col in 0..=steps {
                let u = col as f32 / steps as f32;
                let [x, y, z] = helicoid_point(u, v);
                assert!(
                    x.is_finite() && y.is_finite() && z.is_finite(),
                    "non-finite point at u={}, v={}",
                    u,
                    v
                );
            }
        }
    }

    #[test]
    fn test_center_maps_to_origin() {
        // u = v = 0.5 gives alpha = theta = 0, dividend = 2
        let [x, y, z] = helicoid_point(0.5, 0.5);
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn test_parity_under_parameter_reflection() {
        // Reflecting both parameters negates alpha and theta; sinh is odd
        // and cosh is even, so (x, y, z) maps to (-x, -y, z).
        for (u, v) in [(0.1, 0.3), (0.25, 0.8), (0.6, 0.45), (0.9, 0.9)] {
            let [x, y, z] = helicoid_point(u, v);
            let [rx, ry, rz] = helicoid_point(1.0 - u, 1.0 - v);

            assert!((rx + x).abs() < 1e-5, "x parity broken at ({}, {})", u, v);
            assert!((ry + y).abs() < 1e-5, "y parity broken at ({}, {})", u, v);
            assert!((rz - z).abs() < 1e-5, "z parity broken at ({}, {})", u, v);
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let data = generate_helicoid(100, 100);
        assert_eq!(data.vertex_count(), 101 * 101);
        assert_eq!(data.triangle_count(), 2 * 100 * 100);
    }

    #[test]
    fn test_smooth_normals_are_unit_length() {
        let mut data = generate_helicoid(16, 16);
        data.compute_smooth_normals();

        assert_eq!(data.normals.len(), data.positions.len());
        for normal in &data.normals {
            let length =
                (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-4, "normal length was {}", length);
        }
    }
}
