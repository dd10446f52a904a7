//! Audio-reactive bar visualizers.
//!
//! Both variants own a fixed array of instance transforms that the renderer
//! turns into instanced boxes. A frame without a frequency source leaves every
//! transform and material untouched.

pub mod frame;
pub mod ring;

pub use frame::{frame_placements, BarPlacement, Edge, FrameVisualizer, ScaleAxis};
pub use ring::RingVisualizer;

use glam::{Mat4, Quat, Vec3};

/// Placement of one instanced bar. The bar's long side is its local Y axis,
/// stretched by `scale` and rotated about world Z by `rotation_z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarInstance {
    pub position: Vec3,
    pub rotation_z: f32,
    pub scale: f32,
    pub color: Vec3,
    pub emissive: f32,
}

impl Default for BarInstance {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_z: 0.0,
            scale: 1.0,
            color: Vec3::ONE,
            emissive: 0.0,
        }
    }
}

impl BarInstance {
    /// Model matrix for a unit box sized `width` x `scale` x `depth`.
    pub fn model_matrix(&self, width: f32, depth: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(width, self.scale, depth),
            Quat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }
}
