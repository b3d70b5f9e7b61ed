//! # Icosphere Generation
//!
//! Icosahedron subdivision sphere for the orbiting bodies: each level
//! splits every triangle into four, with the new vertices pushed out onto
//! the sphere. Subdivision keeps the triangle distribution even, which a
//! UV sphere's pole clustering would not.

use std::collections::HashMap;

use super::GeometryData;

/// Generates an icosphere of the given radius
///
/// `subdivisions` levels of refinement yield `10·4ⁿ + 2` vertices and
/// `20·4ⁿ` triangles. Normals are the normalized positions.
pub fn generate_icosphere(radius: f32, subdivisions: u32) -> GeometryData {
    // Golden-ratio icosahedron
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut positions: Vec<[f32; 3]> = vec![
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];

    #[rustfmt::skip]
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    for position in positions.iter_mut() {
        *position = normalize(*position);
    }

    for _ in 0..subdivisions {
        let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next_faces = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut positions, &mut midpoint_cache, a, b);
            let bc = midpoint(&mut positions, &mut midpoint_cache, b, c);
            let ca = midpoint(&mut positions, &mut midpoint_cache, c, a);

            next_faces.push([a, ab, ca]);
            next_faces.push([b, bc, ab]);
            next_faces.push([c, ca, bc]);
            next_faces.push([ab, bc, ca]);
        }

        faces = next_faces;
    }

    let mut data = GeometryData::new();
    for position in &positions {
        data.normals.push(*position);
        data.positions
            .push([position[0] * radius, position[1] * radius, position[2] * radius]);
    }
    for face in &faces {
        data.indices.extend_from_slice(face);
    }

    data
}

/// Returns the sphere vertex halfway between `a` and `b`, creating it once
fn midpoint(
    positions: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let pa = positions[a as usize];
    let pb = positions[b as usize];
    let mid = normalize([
        (pa[0] + pb[0]) / 2.0,
        (pa[1] + pb[1]) / 2.0,
        (pa[2] + pb[2]) / 2.0,
    ]);

    let index = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, index);
    index
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / length, v[1] / length, v[2] / length]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_index_counts() {
        for subdivisions in 0..=3 {
            let data = generate_icosphere(1.0, subdivisions);
            let expected_vertices = 10 * 4_usize.pow(subdivisions) + 2;
            let expected_triangles = 20 * 4_usize.pow(subdivisions);

            assert_eq!(data.vertex_count(), expected_vertices);
            assert_eq!(data.triangle_count(), expected_triangles);
        }
    }

    #[test]
    fn test_vertices_sit_on_the_sphere() {
        let radius = 0.23;
        let data = generate_icosphere(radius, 3);

        for position in &data.positions {
            let length = (position[0] * position[0]
                + position[1] * position[1]
                + position[2] * position[2])
                .sqrt();
            assert!(
                (length - radius).abs() < 1e-5,
                "vertex at distance {}",
                length
            );
        }
    }

    #[test]
    fn test_normals_match_directions() {
        let data = generate_icosphere(2.0, 2);

        for (position, normal) in data.positions.iter().zip(data.normals.iter()) {
            // normal should be position / radius
            assert!((position[0] / 2.0 - normal[0]).abs() < 1e-5);
            assert!((position[1] / 2.0 - normal[1]).abs() < 1e-5);
            assert!((position[2] / 2.0 - normal[2]).abs() < 1e-5);
        }
    }
}
