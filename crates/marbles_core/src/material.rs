//! Surface materials
//!
//! Meshes hold their material behind an `Arc` so that swapping a highlight in
//! and restoring the original is a pointer swap, and identity can be checked
//! with [`Arc::ptr_eq`].

use serde::{Deserialize, Serialize};

/// How a material reacts to scene lighting
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shading {
    /// Lit by ambient and directional lights
    Standard {
        /// Surface roughness (0.0 = mirror, 1.0 = fully diffuse)
        roughness: f32,
    },
    /// Flat base color, ignores lights
    Unlit,
}

/// A material with a base color and shading model
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
    /// Shading model
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            shading: Shading::Standard { roughness: 1.0 },
        }
    }
}

impl Material {
    /// Create a lit material with the given RGB color and roughness
    pub fn standard(r: f32, g: f32, b: f32, roughness: f32) -> Self {
        Self {
            base_color: [r, g, b, 1.0],
            shading: Shading::Standard { roughness },
        }
    }

    /// Create an unlit material with the given RGB color
    pub fn unlit(r: f32, g: f32, b: f32) -> Self {
        Self {
            base_color: [r, g, b, 1.0],
            shading: Shading::Unlit,
        }
    }

    /// Create a lit material from a `0xRRGGBB` color
    pub fn from_hex(hex: u32, roughness: f32) -> Self {
        let [r, g, b] = hex_to_rgb(hex);
        Self::standard(r, g, b, roughness)
    }

    /// Whether the material ignores lighting
    pub fn is_unlit(&self) -> bool {
        matches!(self.shading, Shading::Unlit)
    }

    /// Yellow flat-shaded material used to mark the held marble
    pub const HIGHLIGHT: Self = Self {
        base_color: [1.0, 1.0, 0.0, 1.0],
        shading: Shading::Unlit,
    };

    /// Grey floor material
    pub const FLOOR: Self = Self {
        base_color: [0.5019608, 0.5019608, 0.5019608, 1.0],
        shading: Shading::Standard { roughness: 1.0 },
    };

    /// Green marble material
    pub const GREEN_MARBLE: Self = Self {
        base_color: [0.0, 1.0, 0.0, 1.0],
        shading: Shading::Standard { roughness: 0.8 },
    };
}

/// Split a `0xRRGGBB` value into normalized RGB components
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(!m.is_unlit());
    }

    #[test]
    fn test_from_hex() {
        let m = Material::from_hex(0x00ff00, 0.8);
        assert_eq!(m, Material::GREEN_MARBLE);

        let sky = hex_to_rgb(0x87ceeb);
        assert!((sky[0] - 135.0 / 255.0).abs() < 1e-6);
        assert!((sky[2] - 235.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_floor_is_grey() {
        let [r, g, b] = hex_to_rgb(0x808080);
        assert!((Material::FLOOR.base_color[0] - r).abs() < 1e-6);
        assert_eq!(g, b);
    }

    #[test]
    fn test_highlight_is_unlit_yellow() {
        assert!(Material::HIGHLIGHT.is_unlit());
        assert_eq!(Material::HIGHLIGHT.base_color, [1.0, 1.0, 0.0, 1.0]);
    }
}
