#![allow(dead_code)]

use dear_gizmo::math::world_to_screen;
use dear_gizmo::{FrameInput, GizmoContext, MouseButton, Rect};
use glam::{Mat4, Vec2, Vec3};

pub const SIZE: f32 = 800.0;

pub fn viewport() -> Rect {
    Rect::from_pos_size([0.0, 0.0], [SIZE, SIZE])
}

pub fn view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
}

pub fn projection() -> Mat4 {
    Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0)
}

/// Camera on +Z looking at the origin; the origin lands on (400, 400)
pub fn context() -> GizmoContext {
    #[cfg(feature = "tracing")]
    let _ = dear_gizmo::logging::init_test_tracing();
    let mut ctx = GizmoContext::new();
    ctx.set_camera(view(), projection(), false).unwrap();
    ctx
}

/// Screen position of a world point under the test camera
pub fn screen(point: Vec3) -> Vec2 {
    world_to_screen(point, &(projection() * view()), &viewport())
}

pub fn idle(pos: impl Into<Vec2>) -> FrameInput {
    FrameInput::new(viewport()).with_mouse(pos)
}

pub fn press(pos: impl Into<Vec2>) -> FrameInput {
    idle(pos).pressed(MouseButton::Left)
}

pub fn drag(pos: impl Into<Vec2>) -> FrameInput {
    idle(pos).held(MouseButton::Left)
}
