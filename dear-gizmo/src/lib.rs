//! # dear-gizmo
//!
//! Immediate-mode 3D transform gizmos for Rust: translate, rotate, scale
//! and bounding-box scale handles bound to a `glam::Mat4`, plus a view cube
//! that re-orients a camera.
//!
//! The engine is host-agnostic. A host supplies a [`FrameInput`] snapshot
//! every frame and a [`DrawList`] to receive screen-space primitives. The
//! `imgui` feature implements both for `dear-imgui-rs`.
//!
//! ## Features
//!
//! - Axis, plane and screen-space translation with per-axis snapping
//! - Axis and screen rotation rings with angle snapping
//! - Axis and uniform scaling
//! - Bounds scaling from corner and edge anchors
//! - View cube with click-to-snap animation and orbit dragging
//! - Locked axes, cloak-on-manipulate and right-click reversal
//! - Classic, Blender and Unreal color presets
//!
//! ## Quick Start
//!
//! ```
//! use dear_gizmo::{AxisFlags, DrawCommands, FrameInput, GizmoContext, Mode, Rect};
//! use glam::{Mat4, Vec3};
//!
//! let mut ctx = GizmoContext::new();
//! ctx.set_camera(
//!     Mat4::look_at_rh(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y),
//!     Mat4::perspective_rh_gl(45f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
//!     false,
//! )?;
//!
//! let mut model = Mat4::IDENTITY;
//! let mut draw = DrawCommands::new();
//!
//! // Once per frame
//! ctx.new_frame(FrameInput::new(Rect::from_pos_size([0.0, 0.0], [1280.0, 720.0])));
//! let mut gizmo = ctx.begin("model", Mode::Local, &mut model, AxisFlags::empty(), &mut draw)?;
//! gizmo.translate(None);
//! gizmo.rotate(Some([15.0, 0.0, 0.0]));
//! let changed = gizmo.end();
//! # assert!(!changed);
//! # Ok::<(), dear_gizmo::GizmoError>(())
//! ```

#![deny(rust_2018_idioms)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod camera;
pub mod context;
pub mod draw;
pub mod error;
mod gizmo;
pub mod input;
#[cfg(feature = "tracing")]
pub mod logging;
pub mod math;
pub mod style;
pub mod types;
mod view_cube;

#[cfg(feature = "imgui")]
pub mod imgui;

pub use camera::Camera;
pub use context::{ContextSnapshot, GizmoContext, WidgetSnapshot};
pub use draw::{DrawCmd, DrawCommands, DrawList};
pub use error::{GizmoError, GizmoResult};
pub use gizmo::GizmoScope;
pub use input::{FrameInput, InputTracker, MouseButton};
pub use math::{decompose_matrix, recompose_matrix, Ray, Transform};
pub use style::{ColorU32, Style, StyleColor, StylePreset};
pub use types::{Axis, AxisFlags, ConfigFlags, GizmoId, Mode, Operation, Plane, Rect};

#[cfg(feature = "imgui")]
pub use dear_imgui_rs;
pub use glam;
pub use mint;
