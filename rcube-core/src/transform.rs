/// In-place rotations of a mesh about its local axes
use nalgebra::{Rotation3, Unit, Vector3};

use crate::geometry::Mesh;

/// Accumulated rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

/// Rotation operators on a mesh's vertex buffer.
///
/// Each operator rotates every vertex independently about the cube's local
/// origin with a right-handed rotation matrix. The anchor is never touched.
pub struct Transform;

impl Transform {
    /// `y' = y·cosθ − z·sinθ`, `z' = y·sinθ + z·cosθ`
    pub fn rotate_x(mesh: &mut Mesh, theta: f32) {
        Self::rotate_about(mesh, Vector3::x_axis(), theta);
    }

    /// `x' = x·cosθ + z·sinθ`, `z' = −x·sinθ + z·cosθ`
    pub fn rotate_y(mesh: &mut Mesh, theta: f32) {
        Self::rotate_about(mesh, Vector3::y_axis(), theta);
    }

    /// `x' = x·cosθ − y·sinθ`, `y' = x·sinθ + y·cosθ`
    pub fn rotate_z(mesh: &mut Mesh, theta: f32) {
        Self::rotate_about(mesh, Vector3::z_axis(), theta);
    }

    /// One frame of tumbling: x, then y, then z, all by `theta`.
    ///
    /// The rotations do not commute, so the order is fixed.
    pub fn tumble(mesh: &mut Mesh, theta: f32) {
        Self::rotate_x(mesh, theta);
        Self::rotate_y(mesh, theta);
        Self::rotate_z(mesh, theta);
    }

    fn rotate_about(mesh: &mut Mesh, axis: Unit<Vector3<f32>>, theta: f32) {
        let rotation = Rotation3::from_axis_angle(&axis, theta);
        for vertex in mesh.vertices_mut().iter_mut() {
            *vertex = rotation * *vertex;
        }
    }
}
