//! # Demo Content
//!
//! Everything specific to the whorl scene: the parametric helicoid surface,
//! the two orbiting icospheres, the shared animation clock driving their
//! motion and the color-cycle phase, and the shader patch that installs the
//! cosine palette into the lit shader.

pub mod animation;
pub mod helicoid;
pub mod icosphere;
pub mod palette;

use cgmath::Rad;

use crate::gfx::{
    resources::material::Material,
    scene::{object::Object, scene::Scene, vertex::Vertex3D, Mesh},
};

use self::animation::AnimationClock;

/// Sphere radius and subdivision depth for the orbiting bodies
pub const BALL_RADIUS: f32 = 0.23;
pub const BALL_DETAIL: u32 = 5;

/// The three animated materials, one per surface
pub const MATERIAL_IDS: [&str; 3] = ["helicoid", "ball1", "ball2"];

/// Procedurally generated geometry, ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Computes smooth vertex normals from the triangle faces
    ///
    /// Accumulates the unnormalized face cross products per vertex, so
    /// larger faces weigh more, then normalizes the sums.
    pub fn compute_smooth_normals(&mut self) {
        let mut normals = vec![[0.0f32; 3]; self.positions.len()];

        for triangle in self.indices.chunks(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let v0 = self.positions[i0];
            let v1 = self.positions[i1];
            let v2 = self.positions[i2];

            let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

            let face_normal = [
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ];

            for &vertex_idx in &[i0, i1, i2] {
                normals[vertex_idx][0] += face_normal[0];
                normals[vertex_idx][1] += face_normal[1];
                normals[vertex_idx][2] += face_normal[2];
            }
        }

        for normal in normals.iter_mut() {
            let length =
                (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
            if length > 0.0 {
                normal[0] /= length;
                normal[1] /= length;
                normal[2] /= length;
            }
        }

        self.normals = normals;
    }

    /// Converts into a renderable mesh
    pub fn into_mesh(self) -> Mesh {
        let vertices: Vec<Vertex3D> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        Mesh::new(vertices, self.indices)
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// The animated scene: object handles plus the shared clock
///
/// Geometry is built once here; afterwards every frame only rewrites
/// transforms and the material playheads.
pub struct Demo {
    clock: AnimationClock,
    helicoid: usize,
    ball1: usize,
    ball2: usize,
}

impl Demo {
    /// Builds the scene contents and resets the animation clock
    pub fn build(scene: &mut Scene) -> Self {
        for id in MATERIAL_IDS {
            scene.add_material(Material::new(id, [1.0, 1.0, 1.0, 1.0], 0.5, 0.05));
        }

        let mut surface = helicoid::generate_helicoid(helicoid::SLICES, helicoid::STACKS);
        surface.compute_smooth_normals();
        let helicoid = scene.add_object(
            Object::new("helicoid", vec![surface.into_mesh()]).with_material(MATERIAL_IDS[0]),
        );

        // Both balls share one tessellation
        let sphere = icosphere::generate_icosphere(BALL_RADIUS, BALL_DETAIL);
        let ball1 = scene.add_object(
            Object::new("ball1", vec![sphere.clone().into_mesh()]).with_material(MATERIAL_IDS[1]),
        );
        let ball2 = scene
            .add_object(Object::new("ball2", vec![sphere.into_mesh()]).with_material(MATERIAL_IDS[2]));

        let demo = Demo {
            clock: AnimationClock::new(),
            helicoid,
            ball1,
            ball2,
        };

        // Place everything at t = 0 so the first frame is consistent even
        // before the first update
        demo.apply(0.0, scene);
        demo
    }

    /// Advances the animation to the current clock time
    pub fn update(&mut self, scene: &mut Scene) {
        let t = self.clock.elapsed_seconds();
        self.apply(t, scene);
    }

    /// Writes the state for elapsed time `t` into the scene
    ///
    /// All animated attributes derive from this single `t`, which keeps the
    /// surface rotation, the orbit angles and the three color-cycle phases
    /// in lockstep within a frame.
    pub fn apply(&self, t: f32, scene: &mut Scene) {
        if let Some(object) = scene.object_mut(self.helicoid) {
            object.set_rotation_y(Rad(animation::surface_angle(t)));
        }

        let phase = animation::playhead(t);
        for id in MATERIAL_IDS {
            if let Some(material) = scene.material_manager.get_material_mut(id) {
                material.set_playhead(phase);
            }
        }

        let theta1 = animation::orbit_angle(t, 0.0);
        let theta2 = animation::orbit_angle(t, animation::ANTIPHASE);
        if let Some(object) = scene.object_mut(self.ball1) {
            object.set_translation(animation::orbit_position(theta1));
        }
        if let Some(object) = scene.object_mut(self.ball2) {
            object.set_translation(animation::orbit_position(theta2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::{Vector3, Zero};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(3.0, 0.2, 0.0, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_build_populates_scene() {
        let mut scene = test_scene();
        let _demo = Demo::build(&mut scene);

        assert_eq!(scene.objects.len(), 3);
        for id in MATERIAL_IDS {
            assert!(scene.material_manager.get_material(id).is_some());
        }
    }

    #[test]
    fn test_playheads_stay_bit_identical() {
        let mut scene = test_scene();
        let demo = Demo::build(&mut scene);

        for t in [0.0, 0.37, 1.0, 12.5, 3600.0] {
            demo.apply(t, &mut scene);
            let uniforms: Vec<_> = MATERIAL_IDS
                .iter()
                .map(|id| {
                    scene
                        .material_manager
                        .get_material(id)
                        .unwrap()
                        .uniform_content()
                })
                .collect();

            let reference = bytemuck::bytes_of(&uniforms[0]).to_vec();
            for uniform in &uniforms[1..] {
                assert_eq!(bytemuck::bytes_of(uniform), reference.as_slice());
            }
            assert_eq!(uniforms[0].playhead, animation::playhead(t));
        }
    }

    #[test]
    fn test_balls_stay_diametrically_opposite() {
        let mut scene = test_scene();
        let demo = Demo::build(&mut scene);

        for t in [0.0, 0.1, 1.0, 7.77, 100.0] {
            demo.apply(t, &mut scene);

            let p1 = scene.object(demo.ball1).unwrap().transform.w.truncate();
            let p2 = scene.object(demo.ball2).unwrap().transform.w.truncate();

            let sum = p1 + p2;
            assert!(sum.x.abs() < 1e-4 && sum.y.abs() < 1e-4 && sum.z.abs() < 1e-4);
        }
    }

    #[test]
    fn test_surface_rotation_tracks_elapsed_time() {
        let mut scene = test_scene();
        let demo = Demo::build(&mut scene);

        let t = 0.5;
        demo.apply(t, &mut scene);
        let transform = scene.object(demo.helicoid).unwrap().transform;

        // Rotation about Y: first column is (cos t, 0, -sin t)
        assert!((transform.x.x - t.cos()).abs() < 1e-6);
        assert!((transform.x.z + t.sin()).abs() < 1e-6);
        assert!((transform.z.x - t.sin()).abs() < 1e-6);
    }
}
