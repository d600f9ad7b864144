//! Visual style for gizmos
//!
//! A [`Style`] holds the handle size, ring thickness, a global alpha and a
//! color table indexed by [`StyleColor`]. Three presets are provided.

use glam::Vec4;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Packed `0xAABBGGRR` color, the layout Dear ImGui draw lists consume
pub type ColorU32 = u32;

/// Entries of the style color table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StyleColor {
    Text = 0,
    TextShadow,
    Inactive,
    Hovered,
    SpecialMove,
    AxisX,
    AxisY,
    AxisZ,
    PlaneYZ,
    PlaneZX,
    PlaneXY,
    BoundAnchor,
}

impl StyleColor {
    pub const COUNT: usize = 12;

    pub const ALL: [StyleColor; Self::COUNT] = [
        StyleColor::Text,
        StyleColor::TextShadow,
        StyleColor::Inactive,
        StyleColor::Hovered,
        StyleColor::SpecialMove,
        StyleColor::AxisX,
        StyleColor::AxisY,
        StyleColor::AxisZ,
        StyleColor::PlaneYZ,
        StyleColor::PlaneZX,
        StyleColor::PlaneXY,
        StyleColor::BoundAnchor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleColor::Text => "Text",
            StyleColor::TextShadow => "TextShadow",
            StyleColor::Inactive => "Inactive",
            StyleColor::Hovered => "Hovered",
            StyleColor::SpecialMove => "SpecialMove",
            StyleColor::AxisX => "AxisX",
            StyleColor::AxisY => "AxisY",
            StyleColor::AxisZ => "AxisZ",
            StyleColor::PlaneYZ => "PlaneYZ",
            StyleColor::PlaneZX => "PlaneZX",
            StyleColor::PlaneXY => "PlaneXY",
            StyleColor::BoundAnchor => "BoundAnchor",
        }
    }

    /// Axis color by axis index
    pub fn axis(index: usize) -> StyleColor {
        Self::ALL[StyleColor::AxisX as usize + index % 3]
    }

    /// Plane color by plane (normal axis) index
    pub fn plane(index: usize) -> StyleColor {
        Self::ALL[StyleColor::PlaneYZ as usize + index % 3]
    }
}

/// Built-in color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StylePreset {
    #[default]
    Classic,
    Blender,
    Unreal,
}

impl StylePreset {
    pub const ALL: [StylePreset; 3] = [StylePreset::Classic, StylePreset::Blender, StylePreset::Unreal];

    pub fn name(self) -> &'static str {
        match self {
            StylePreset::Classic => "Classic",
            StylePreset::Blender => "Blender",
            StylePreset::Unreal => "Unreal",
        }
    }
}

/// Gizmo appearance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    /// Handle length as a fraction of the viewport in clip space
    pub gizmo_scale: f32,
    /// Thickness of the screen-space rotation ring in pixels
    pub rotation_ring_thickness: f32,
    /// Global alpha multiplier
    pub alpha: f32,
    pub colors: [[f32; 4]; StyleColor::COUNT],
}

impl Default for Style {
    fn default() -> Self {
        Self::classic()
    }
}

impl Style {
    fn with_colors(colors: [[f32; 4]; StyleColor::COUNT]) -> Self {
        Self {
            gizmo_scale: 0.1,
            rotation_ring_thickness: 3.5,
            alpha: 1.0,
            colors,
        }
    }

    pub fn classic() -> Self {
        Self::with_colors([
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.6, 0.6, 0.6, 0.6],
            [1.0, 0.5, 0.06, 0.54],
            [1.0, 1.0, 1.0, 1.0],
            [0.66, 0.0, 0.0, 1.0],
            [0.0, 0.66, 0.0, 1.0],
            [0.0, 0.0, 0.66, 1.0],
            [0.66, 0.0, 0.0, 0.38],
            [0.0, 0.66, 0.0, 0.38],
            [0.0, 0.0, 0.66, 0.38],
            [0.66, 0.66, 0.66, 1.0],
        ])
    }

    pub fn blender() -> Self {
        Self::with_colors([
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.6, 0.6, 0.6, 0.6],
            [1.0, 0.5, 0.06, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [1.0, 0.2, 0.321, 1.0],
            [0.545, 0.862, 0.0, 1.0],
            [0.156, 0.564, 1.0, 1.0],
            [1.0, 0.2, 0.321, 0.6],
            [0.545, 0.862, 0.0, 0.6],
            [0.156, 0.564, 1.0, 0.6],
            [0.66, 0.66, 0.66, 1.0],
        ])
    }

    /// Linear colors gamma-encoded for an sRGB target
    pub fn unreal() -> Self {
        let mut style = Self::with_colors([
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.7, 0.7, 0.7, 0.7],
            [1.0, 1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.594, 0.0197, 0.0, 1.0],
            [0.1349, 0.3959, 0.0, 1.0],
            [0.0251, 0.207, 0.85, 1.0],
            [0.594, 0.0197, 0.0, 0.6],
            [0.1349, 0.3959, 0.0, 0.6],
            [0.0251, 0.207, 0.85, 0.6],
            [0.66, 0.66, 0.66, 1.0],
        ]);
        let gamma = 1.0 / 2.2;
        for color in &mut style.colors {
            for channel in &mut color[..3] {
                *channel = channel.powf(gamma);
            }
        }
        style
    }

    pub fn preset(preset: StylePreset) -> Self {
        match preset {
            StylePreset::Classic => Self::classic(),
            StylePreset::Blender => Self::blender(),
            StylePreset::Unreal => Self::unreal(),
        }
    }

    /// Replace the colors with a preset's, keeping sizes and alpha
    pub fn apply_preset(&mut self, preset: StylePreset) {
        self.colors = Self::preset(preset).colors;
    }

    pub fn color(&self, color: StyleColor) -> Vec4 {
        Vec4::from_array(self.colors[color as usize])
    }

    pub fn set_color(&mut self, color: StyleColor, value: [f32; 4]) {
        self.colors[color as usize] = value;
    }

    /// Packed color with alpha scaled by the style alpha and `alpha_mul`
    pub fn color_u32(&self, color: StyleColor, alpha_mul: f32) -> ColorU32 {
        let mut c = self.color(color);
        c.w *= self.alpha * alpha_mul;
        pack_color(c)
    }
}

/// Pack RGBA floats into `0xAABBGGRR`, saturating each channel
pub fn pack_color(color: Vec4) -> ColorU32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    channel(color.x) | channel(color.y) << 8 | channel(color.z) << 16 | channel(color.w) << 24
}
