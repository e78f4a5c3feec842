use image::RgbaImage;

use super::marker::Rgb;

#[derive(Debug, Clone, PartialEq)]
pub enum EarthAppearance {
    Textured { source: String, image: RgbaImage },
    Solid { color: Rgb },
}

impl EarthAppearance {
    /// Textured globes render white so the map colours come through untinted.
    pub fn base_color(&self) -> Rgb {
        match self {
            EarthAppearance::Textured { .. } => Rgb::WHITE,
            EarthAppearance::Solid { color } => *color,
        }
    }

    pub fn is_textured(&self) -> bool {
        matches!(self, EarthAppearance::Textured { .. })
    }
}

/// The rotating earth sphere. Markers are children of it and turn with it.
pub struct EarthComponent {
    pub radius: f64,
    pub rotation_y: f64,
    pub appearance: EarthAppearance,
    pub specular: Rgb,
    pub shininess: f32,
}

/// Optional textured cloud shell, only present when a cloud texture loaded.
pub struct CloudShellComponent {
    pub radius: f64,
    pub rotation_y: f64,
    pub opacity: f32,
    pub texture: RgbaImage,
}

/// Shader-driven cloud layer that needs no texture; only its clock advances.
pub struct ProceduralCloudsComponent {
    pub radius: f64,
    pub time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EarthMaterialUniform {
    pub color: [f32; 4],
    pub specular: [f32; 4],
    // x: shininess, y..w pad to a 16-byte row for WebGL2
    pub params: [f32; 4],
}

impl EarthComponent {
    pub fn material_uniform(&self) -> EarthMaterialUniform {
        EarthMaterialUniform {
            color: self.appearance.base_color().to_rgba_f32(1.0),
            specular: self.specular.to_rgba_f32(1.0),
            params: [self.shininess, 0.0, 0.0, 0.0],
        }
    }
}
