//! Core types for dear-gizmo
//!
//! Modes, operations, axis and config flags, screen rectangles and
//! widget identities.

use bitflags::bitflags;
use glam::Vec2;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate space the gizmo handles are aligned to
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Handles follow the world axes
    #[default]
    World = 0,
    /// Handles follow the model rotation
    Local = 1,
}

/// Manipulation performed by a gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    Translate,
    Rotate,
    Scale,
    /// Scale by dragging the anchors of a local bounding box
    BoundsScale,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Translate => "Translate",
            Operation::Rotate => "Rotate",
            Operation::Scale => "Scale",
            Operation::BoundsScale => "BoundsScale",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Axes a handle acts on
    ///
    /// One axis selects an arrow or a ring, two select a plane, all three
    /// select the core (screen-space move, uniform scale, or screen ring).
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct AxisFlags: u32 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const YZ = Self::Y.bits() | Self::Z.bits();
        const ZX = Self::Z.bits() | Self::X.bits();
        const XY = Self::X.bits() | Self::Y.bits();
        const ALL = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl AxisFlags {
    /// The axis when exactly one is set
    pub fn single_axis(self) -> Option<Axis> {
        match self {
            AxisFlags::X => Some(Axis::X),
            AxisFlags::Y => Some(Axis::Y),
            AxisFlags::Z => Some(Axis::Z),
            _ => None,
        }
    }

    /// The plane when exactly two axes are set
    pub fn plane(self) -> Option<Plane> {
        match self {
            AxisFlags::YZ => Some(Plane::YZ),
            AxisFlags::ZX => Some(Plane::ZX),
            AxisFlags::XY => Some(Plane::XY),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.bits() {
            0 => "None",
            1 => "X",
            2 => "Y",
            4 => "Z",
            6 => "YZ",
            5 => "ZX",
            3 => "XY",
            _ => "XYZ",
        }
    }
}

bitflags! {
    /// Behaviour switches shared by every gizmo of a context
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ConfigFlags: u32 {
        /// Render only the handle being dragged
        const CLOAK_ON_MANIPULATE = 1 << 0;
        /// Skip locked handles instead of drawing them inactive
        const HIDE_LOCKED = 1 << 1;
        /// Right click during a drag restores the matrix from before the drag
        const HAS_REVERSING = 1 << 2;
    }
}

/// A single model axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Axis {
        Self::ALL[index % 3]
    }

    pub fn flag(self) -> AxisFlags {
        AxisFlags::from_bits_truncate(1 << self as u32)
    }
}

/// A plane spanned by two axes, indexed by its normal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    YZ = 0,
    ZX = 1,
    XY = 2,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::YZ, Plane::ZX, Plane::XY];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Plane {
        Self::ALL[index % 3]
    }

    pub fn normal(self) -> Axis {
        Axis::from_index(self.index())
    }

    /// The two in-plane axes, in cyclic order after the normal
    pub fn axes(self) -> (Axis, Axis) {
        let i = self.index();
        (Axis::from_index(i + 1), Axis::from_index(i + 2))
    }

    pub fn flags(self) -> AxisFlags {
        let (a, b) = self.axes();
        a.flag() | b.flag()
    }
}

/// Screen-space rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: impl Into<Vec2>, size: impl Into<Vec2>) -> Self {
        let min = pos.into();
        Self {
            min,
            max: min + size.into(),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive on all edges
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() / self.height()
    }
}

/// Stable identity of a gizmo across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GizmoId(pub u64);

impl GizmoId {
    /// Identity derived from the address of the manipulated value
    pub fn of<T>(value: &T) -> Self {
        Self(value as *const T as usize as u64)
    }
}

impl From<u64> for GizmoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<usize> for GizmoId {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl From<&str> for GizmoId {
    fn from(label: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        label.hash(&mut hasher);
        Self(hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_flags_shapes() {
        assert_eq!(AxisFlags::X.single_axis(), Some(Axis::X));
        assert_eq!(AxisFlags::XY.single_axis(), None);
        assert_eq!(AxisFlags::ZX.plane(), Some(Plane::ZX));
        assert_eq!(AxisFlags::ALL.plane(), None);
        assert_eq!(AxisFlags::empty().plane(), None);
        assert_eq!(AxisFlags::ALL.name(), "XYZ");
        assert_eq!(AxisFlags::ZX.name(), "ZX");
    }

    #[test]
    fn test_plane_axes() {
        assert_eq!(Plane::YZ.axes(), (Axis::Y, Axis::Z));
        assert_eq!(Plane::ZX.axes(), (Axis::Z, Axis::X));
        assert_eq!(Plane::XY.axes(), (Axis::X, Axis::Y));
        assert_eq!(Plane::XY.normal(), Axis::Z);
        assert_eq!(Plane::YZ.flags(), AxisFlags::YZ);
        assert_eq!(Plane::ZX.flags(), AxisFlags::ZX);
    }

    #[test]
    fn test_rect() {
        let rect = Rect::from_pos_size([10.0, 20.0], [100.0, 50.0]);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 45.0));
        assert!(rect.contains(Vec2::new(10.0, 70.0)));
        assert!(!rect.contains(Vec2::new(9.9, 30.0)));
        assert!(!rect.is_empty());
        assert!(Rect::from_pos_size([0.0, 0.0], [0.0, 10.0]).is_empty());
    }

    #[test]
    fn test_gizmo_id() {
        assert_eq!(GizmoId::from("cube"), GizmoId::from("cube"));
        assert_ne!(GizmoId::from("cube"), GizmoId::from("sphere"));

        let a = [0u8; 4];
        let b = [0u8; 4];
        assert_ne!(GizmoId::of(&a), GizmoId::of(&b));
    }
}
