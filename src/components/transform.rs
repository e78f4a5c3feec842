use cgmath::{Matrix4, Vector3};

use super::marker::Rgb;

/// Placement of a marker-like object in the globe's local frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformComponent {
    pub translation: Vector3<f64>,
    pub base_scale: f64,
    pub pulse: f64,
}

impl TransformComponent {
    pub fn new(translation: Vector3<f64>, base_scale: f64) -> Self {
        Self {
            translation,
            base_scale,
            pulse: 1.0,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f64> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_scale(self.base_scale * self.pulse)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AppearanceComponent {
    pub color: Rgb,
    pub opacity: f32,
}

/// Per-instance data handed to the renderer for one marker sphere.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}
