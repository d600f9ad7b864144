//! View cube
//!
//! A small orientation cube drawn into its own rectangle. Clicking one of
//! its 26 face, edge or corner panels animates the camera to look from that
//! direction; dragging with the right mouse button orbits the camera around
//! its target.

use glam::{Mat4, Vec2, Vec3};

use crate::context::GizmoContext;
use crate::draw::DrawList;
use crate::error::{GizmoError, GizmoResult, MatrixCheck};
use crate::gizmo::HOVER_ALPHA;
use crate::input::MouseButton;
use crate::math::{self, build_plane, intersect_ray_plane, try_inverse, world_to_screen, Ray};
use crate::style::{ColorU32, StyleColor};
use crate::types::Rect;

const REFERENCE_UP: Vec3 = Vec3::Y;
/// Distance of the cube camera from the cube center
const CUBE_CAMERA_DISTANCE: f32 = 2.0;
const ANIMATION_SPEED: f32 = 10.0;
/// Orbit radians per dragged pixel
const DRAG_SENSITIVITY: f32 = 0.01;

/// Panel origins on a face, in face units
const PANEL_POSITIONS: [Vec2; 9] = [
    Vec2::new(0.75, 0.75),
    Vec2::new(0.25, 0.75),
    Vec2::new(0.00, 0.75),
    Vec2::new(0.75, 0.25),
    Vec2::new(0.25, 0.25),
    Vec2::new(0.00, 0.25),
    Vec2::new(0.75, 0.00),
    Vec2::new(0.25, 0.00),
    Vec2::new(0.00, 0.00),
];
const PANEL_SIZES: [Vec2; 9] = [
    Vec2::new(0.25, 0.25),
    Vec2::new(0.50, 0.25),
    Vec2::new(0.25, 0.25),
    Vec2::new(0.25, 0.50),
    Vec2::new(0.50, 0.50),
    Vec2::new(0.25, 0.50),
    Vec2::new(0.25, 0.25),
    Vec2::new(0.50, 0.25),
    Vec2::new(0.25, 0.25),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ViewCubeState {
    /// Set by a click inside the cube, kept while the right button is held
    pub active: bool,
    pub hovered: bool,
    pub animating: bool,
    pub target_forward: Vec3,
    pub target_up: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    /// Index of the sub-cube in the 3x3x3 grid
    cube: usize,
    corners: [Vec2; 4],
    hovered: bool,
}

#[derive(Debug, Clone, Copy)]
struct Face {
    normal_index: usize,
    panels: [Panel; 9],
}

impl GizmoContext {
    /// Draw the view cube in `position`/`size` and update `view`
    ///
    /// `length` is the distance from the eye to the orbit target. Returns
    /// `true` when `view` was modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has no area or `view` is not
    /// invertible.
    pub fn view_manipulate<D: DrawList + ?Sized>(
        &mut self,
        view: &mut Mat4,
        length: f32,
        position: impl Into<Vec2>,
        size: impl Into<Vec2>,
        background: ColorU32,
        draw: &mut D,
    ) -> GizmoResult<bool> {
        let rect = Rect::from_pos_size(position, size);
        if rect.is_empty() {
            return Err(GizmoError::invalid_viewport(format!(
                "view cube rect {}x{} has no area",
                rect.width(),
                rect.height()
            )));
        }
        view.check_finite("view")?;
        let inverse = try_inverse(view, "view")?;

        draw.add_rect_filled(rect.min, rect.max, background);

        let right = inverse.x_axis.truncate();
        let up = inverse.y_axis.truncate();
        let forward = inverse.z_axis.truncate();

        let cube_view = Mat4::look_at_rh(forward * CUBE_CAMERA_DISTANCE, Vec3::ZERO, up);
        let cube_projection =
            Mat4::perspective_rh_gl(60f32.to_radians(), rect.aspect_ratio(), 0.1, 10.0);
        let cube_view_proj = cube_projection * cube_view;
        let ray = math::ray_cast(&cube_view_proj, &rect, self.input.mouse_pos);

        let hovered = self.is_enabled()
            && self.input.window_hovered
            && rect.contains(self.input.mouse_pos);
        self.view_cube.hovered = hovered;
        let (mut pressed, held) = self.view_cube_behavior(hovered);
        if held {
            self.view_cube.animating = false;
        }

        let faces: Vec<Face> = (0..6)
            .filter_map(|face| build_face(face, &cube_view, &cube_view_proj, &ray, &rect))
            .collect();

        let mut cubes = [false; 27];
        for panel in faces.iter().flat_map(|face| face.panels.iter()) {
            cubes[panel.cube] |= panel.hovered && !held;
        }

        let hover_color = self.style.color_u32(StyleColor::Hovered, HOVER_ALPHA);
        for face in &faces {
            let face_color = self.style.color_u32(StyleColor::axis(face.normal_index), 1.0)
                | 0xFF1F1F1F
                | if hovered { 0x080808 } else { 0 };
            for panel in &face.panels {
                draw.add_convex_poly_filled(&panel.corners, face_color);
                if !cubes[panel.cube] {
                    continue;
                }
                draw.add_convex_poly_filled(&panel.corners, hover_color);
                if pressed {
                    self.start_view_animation(panel.cube, right);
                    pressed = false;
                }
            }
        }

        let target = inverse.w_axis.truncate() - forward * length;
        let mut changed = false;

        if self.view_cube.animating {
            let state = &mut self.view_cube;
            let amount = (ANIMATION_SPEED * self.input.delta_time).min(1.0);
            let mut interpolated = forward.lerp(state.target_forward, amount).normalize_or_zero();
            if interpolated == Vec3::ZERO {
                interpolated = state.target_forward;
            }
            if interpolated.distance(state.target_forward) < 0.001 {
                state.animating = false;
            }

            *view = Mat4::look_at_rh(target + interpolated * length, target, state.target_up);
            changed = true;
        }

        let delta = self.mouse_delta;
        if held && delta != Vec2::ZERO {
            let angles = -delta * DRAG_SENSITIVITY;
            let yaw = Mat4::from_axis_angle(REFERENCE_UP, angles.x);
            let pitch = Mat4::from_axis_angle(right.normalize_or_zero(), angles.y);
            let new_forward = (pitch * yaw).transform_vector3(forward).normalize_or_zero();

            let mut plane_dir = right.cross(REFERENCE_UP);
            plane_dir.y = 0.0;
            let plane_dir = plane_dir.normalize_or_zero();

            // Stop short of looking straight up or down
            if plane_dir.dot(new_forward) > 0.05 {
                *view = Mat4::look_at_rh(target + new_forward * length, target, REFERENCE_UP);
                changed = true;
            }
        }

        Ok(changed)
    }

    /// [`view_manipulate`](Self::view_manipulate) over the whole viewport
    pub fn view_manipulate_in_viewport<D: DrawList + ?Sized>(
        &mut self,
        view: &mut Mat4,
        length: f32,
        background: ColorU32,
        draw: &mut D,
    ) -> GizmoResult<bool> {
        let rect = self.effective_viewport();
        self.view_manipulate(view, length, rect.min, rect.size(), background, draw)
    }

    fn view_cube_behavior(&mut self, hovered: bool) -> (bool, bool) {
        let input = &self.input;
        let state = &mut self.view_cube;
        if !input.is_down(MouseButton::Right) {
            state.active = false;
        }

        let pressed = hovered
            && (input.is_clicked(MouseButton::Left) || input.is_clicked(MouseButton::Right));
        if pressed {
            state.active = true;
        }

        let held = state.active && input.is_down(MouseButton::Right);
        (pressed, held)
    }

    fn start_view_animation(&mut self, cube: usize, camera_right: Vec3) {
        let coords = Vec3::new((cube / 9) as f32, ((cube % 9) / 3) as f32, (cube % 3) as f32);
        let target_forward = (Vec3::ONE - coords).normalize_or_zero();
        if target_forward == Vec3::ZERO {
            return;
        }

        let target_up = if target_forward.dot(REFERENCE_UP).abs() > 1.0 - 0.01 {
            let mut right = camera_right;
            if right.x.abs() > right.z.abs() {
                right.z = 0.0;
            } else {
                right.x = 0.0;
            }
            target_forward.cross(right.normalize_or_zero()).normalize_or_zero()
        } else {
            REFERENCE_UP
        };

        crate::gizmo_debug!("View cube snapping to {:?}", target_forward);
        let state = &mut self.view_cube;
        state.target_forward = target_forward;
        state.target_up = target_up;
        state.animating = true;
    }
}

/// Screen panels of one cube face, or `None` when it faces away
fn build_face(face: usize, cube_view: &Mat4, view_proj: &Mat4, ray: &Ray, rect: &Rect) -> Option<Face> {
    let normal_index = face % 3;
    let perp_x = (normal_index + 1) % 3;
    let perp_y = (normal_index + 2) % 3;
    let invert = if face > 2 { -1.0 } else { 1.0 };

    let index_x = Vec3::AXES[perp_x] * invert;
    let index_y = Vec3::AXES[perp_y] * invert;
    let box_origin = Vec3::AXES[normal_index] * -invert - index_x - index_y;

    let n = Vec3::AXES[normal_index] * invert;
    let view_normal = cube_view.transform_vector3(n).normalize_or_zero();
    let view_point = cube_view.transform_point3(n * 0.5);
    if build_plane(view_point, view_normal).w > 0.0 {
        return None;
    }

    let length = intersect_ray_plane(ray, build_plane(n * 0.5, n));
    let on_plane = ray.at(length) - n * 0.5;
    let local_x = Vec3::AXES[perp_x].dot(on_plane) * invert + 0.5;
    let local_y = Vec3::AXES[perp_y].dot(on_plane) * invert + 0.5;

    let dx = Vec3::AXES[perp_x];
    let dy = Vec3::AXES[perp_y];
    let origin = Vec3::AXES[normal_index] - dx - dy;

    let panels = std::array::from_fn(|panel| {
        let p = PANEL_POSITIONS[panel] * 2.0;
        let s = PANEL_SIZES[panel] * 2.0;
        let quad = [
            dx * p.x + dy * p.y,
            dx * p.x + dy * (p.y + s.y),
            dx * (p.x + s.x) + dy * (p.y + s.y),
            dx * (p.x + s.x) + dy * p.y,
        ];
        let corners = quad.map(|q| world_to_screen((q + origin) * 0.5 * invert, view_proj, rect));

        let min = PANEL_POSITIONS[panel];
        let max = min + PANEL_SIZES[panel];
        let hovered = local_x > min.x && local_x < max.x && local_y > min.y && local_y < max.y;

        let coord = box_origin
            + index_x * (panel % 3) as f32
            + index_y * (panel / 3) as f32
            + Vec3::ONE;
        let cube = (coord.x * 9.0 + coord.y * 3.0 + coord.z).round() as usize;
        debug_assert!(cube < 27);

        Panel {
            cube: cube.min(26),
            corners,
            hovered,
        }
    });

    Some(Face {
        normal_index,
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_view() -> (Mat4, Mat4) {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let cube_view = Mat4::look_at_rh(Vec3::Z * CUBE_CAMERA_DISTANCE, Vec3::ZERO, Vec3::Y);
        (view, cube_view)
    }

    #[test]
    fn test_front_faces_only() {
        let (_, cube_view) = front_view();
        let rect = Rect::from_pos_size([0.0, 0.0], [100.0, 100.0]);
        let view_proj = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 10.0) * cube_view;
        let ray = math::ray_cast(&view_proj, &rect, rect.center());

        let faces: Vec<usize> = (0..6)
            .filter_map(|face| build_face(face, &cube_view, &view_proj, &ray, &rect))
            .map(|face| face.normal_index)
            .collect();
        assert_eq!(faces, vec![2]);
    }

    #[test]
    fn test_center_panel_hovered() {
        let (_, cube_view) = front_view();
        let rect = Rect::from_pos_size([0.0, 0.0], [100.0, 100.0]);
        let view_proj = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 10.0) * cube_view;
        let ray = math::ray_cast(&view_proj, &rect, rect.center());

        let face = build_face(2, &cube_view, &view_proj, &ray, &rect).unwrap();
        let hovered: Vec<usize> = face
            .panels
            .iter()
            .filter(|panel| panel.hovered)
            .map(|panel| panel.cube)
            .collect();
        // Sub-cube (1, 1, 0) looks from +Z
        assert_eq!(hovered, vec![12]);
    }
}
