//! Math utilities and types
//!
//! Thin aliases over nalgebra used by the camera, the graphics device and
//! scene layers.

pub use nalgebra::{Matrix4, Point3, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Extension helpers for building model matrices step by step
pub trait Mat4Ext {
    /// Post-multiply by a translation
    fn translated(&self, offset: &Vec3) -> Mat4;

    /// Post-multiply by a uniform scale
    fn scaled(&self, factor: f32) -> Mat4;

    /// Post-multiply by a rotation of `degrees` about `axis`
    fn rotated(&self, degrees: f32, axis: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn translated(&self, offset: &Vec3) -> Mat4 {
        self * Mat4::new_translation(offset)
    }

    fn scaled(&self, factor: f32) -> Mat4 {
        self * Mat4::new_scaling(factor)
    }

    fn rotated(&self, degrees: f32, axis: &Vec3) -> Mat4 {
        let axis = Unit::new_normalize(*axis);
        self * Mat4::from_axis_angle(&axis, degrees.to_radians())
    }
}
