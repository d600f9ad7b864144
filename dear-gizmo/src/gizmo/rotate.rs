use super::{Frame, GizmoScope, CIRCLE_SEGMENTS, LINE_THICKNESS};
use crate::draw::DrawList;
use crate::math::{build_plane, snap};
use crate::style::StyleColor;
use crate::types::{Axis, AxisFlags, Mode, Operation};
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::PI;

impl<D: DrawList + ?Sized> GizmoScope<'_, D> {
    /// Rotate around an axis or around the view direction
    ///
    /// `snap[0]` is the angle increment in degrees.
    pub fn rotate(&mut self, snap: Option<[f32; 3]>) {
        if !self.visible {
            return;
        }
        let frame = *self.widget.mode_frame();

        let mut hover = self.find_rotation_hover(&frame);
        let (pressed, held) = self.behavior(Operation::Rotate, &mut hover);
        if pressed {
            self.begin_rotation(&frame);
        }
        if held {
            self.continue_rotation(&frame, snap);
        }

        if self.is_cloaked() {
            if let Some(axis) = hover.single_axis() {
                self.render_rotation_axis(&frame, axis, true, hover);
            } else if hover == AxisFlags::ALL {
                self.render_rotation_ring(&frame, hover);
            }
        } else {
            for axis in Axis::ALL {
                self.render_rotation_axis(&frame, axis, false, hover);
            }
            self.render_rotation_ring(&frame, hover);
        }

        if self.widget.is_active(Operation::Rotate) {
            self.render_rotation_trail(&frame);
            let text = super::rotation_info(self.widget.active_flags, self.widget.rotation_angle);
            self.render_text(frame.origin, &text);
        }
    }

    fn find_rotation_hover(&self, frame: &Frame) -> AxisFlags {
        if !self.can_activate() {
            return AxisFlags::empty();
        }
        if self.is_rotation_ring_hovered(frame) {
            return AxisFlags::ALL;
        }
        Axis::ALL
            .into_iter()
            .find(|&axis| self.is_rotation_axis_hovered(frame, axis))
            .map_or(AxisFlags::empty(), Axis::flag)
    }

    fn build_rotation_plane(&self, frame: &Frame) -> Vec4 {
        let source_position = self.widget.source.w_axis.truncate();
        match self.widget.active_flags.single_axis() {
            Some(axis) => {
                let point = match self.widget.mode {
                    Mode::Local => frame.position(),
                    Mode::World => source_position,
                };
                build_plane(point, frame.axis(axis))
            }
            None => build_plane(source_position, -self.ctx.camera.forward),
        }
    }

    fn begin_rotation(&mut self, frame: &Frame) {
        self.begin_drag();
        self.widget.translation_plane = self.build_rotation_plane(frame);
        let hit = self.drag_plane_hit();
        self.widget.rotation_vector_source = (hit - frame.position()).normalize_or_zero();
        self.widget.rotation_angle = 0.0;
        self.widget.rotation_angle_origin = self.angle_on_plane(frame);
    }

    /// Signed angle between the drag start direction and the current hit
    fn angle_on_plane(&self, frame: &Frame) -> f32 {
        let local = (self.drag_plane_hit() - frame.position()).normalize_or_zero();
        let source = self.widget.rotation_vector_source;
        let perpendicular = source
            .cross(self.widget.translation_plane.truncate())
            .normalize_or_zero();

        let angle = local.dot(source).clamp(-1.0, 1.0).acos();
        if local.dot(perpendicular) < 0.0 {
            angle
        } else {
            -angle
        }
    }

    fn continue_rotation(&mut self, frame: &Frame, snap_deg: Option<[f32; 3]>) {
        let mut angle = self.angle_on_plane(frame);
        if let Some(step) = snap_deg {
            angle = snap(angle, step[0].to_radians());
        }
        self.widget.rotation_angle = angle;

        let axis_local = frame
            .inverse
            .transform_vector3(self.widget.translation_plane.truncate())
            .normalize_or_zero();

        let origin = self.widget.rotation_angle_origin;
        if angle != origin {
            let delta = Mat4::from_axis_angle(axis_local, angle - origin);
            let source = self.widget.source;
            self.widget.result = match self.widget.mode {
                Mode::Local => {
                    frame.matrix * delta * Mat4::from_scale(self.widget.model_scale_origin)
                }
                Mode::World => {
                    let mut rotated = source;
                    rotated.w_axis = Vec4::W;
                    let mut result = delta * rotated;
                    result.w_axis = source.w_axis;
                    result
                }
            };
            self.widget.dirty = true;
        }
        self.widget.rotation_angle_origin = angle;
    }

    /// Ring around `axis`; only the half facing the camera unless `full`
    fn render_rotation_axis(&mut self, frame: &Frame, axis: Axis, full: bool, hover: AxisFlags) {
        if self.hides_locked() && self.widget.locked.intersects(axis.flag()) {
            return;
        }

        let to_model = self.ctx.camera.direction_to(frame.position());
        let to_model = frame.inverse.transform_vector3(to_model);

        // Circle coordinates live on the two axes after `axis`
        let u = (axis.index() + 1) % 3;
        let v = (axis.index() + 2) % 3;
        let start = to_model[v].atan2(to_model[u]) + PI * 0.5;
        let arc = if full { 2.0 * PI } else { PI };

        let points: Vec<Vec2> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let ng = start + arc * (i as f32 / CIRCLE_SEGMENTS as f32);
                let mut p = Vec3::ZERO;
                p[u] = ng.cos();
                p[v] = ng.sin();
                self.local_to_screen(frame, p * frame.screen_factor)
            })
            .collect();

        let color = self.axis_color(axis, hover);
        self.draw.add_polyline(&points, color, full, LINE_THICKNESS);
    }

    fn render_rotation_ring(&mut self, frame: &Frame, hover: AxisFlags) {
        if self.hides_locked() && self.all_locked() {
            return;
        }
        let color = self.special_move_color(hover);
        self.draw.add_circle(
            frame.origin,
            self.widget.ring_radius,
            color,
            CIRCLE_SEGMENTS as u32,
            self.ctx.style.rotation_ring_thickness,
        );
    }

    /// Filled fan sweeping from the drag start to the current angle
    fn render_rotation_trail(&mut self, frame: &Frame) {
        let border = self.color(StyleColor::Hovered);
        let fill = self.hovered_color();

        let normal = self.widget.translation_plane.truncate();
        let source = self.widget.rotation_vector_source;
        let position = self.widget.result.w_axis.truncate();
        let angle = self.widget.rotation_angle;

        let mut points = Vec::with_capacity(CIRCLE_SEGMENTS);
        points.push(frame.origin);
        for i in 1..CIRCLE_SEGMENTS {
            let ng = angle * ((i - 1) as f32 / (CIRCLE_SEGMENTS - 1) as f32);
            let dir = Mat4::from_axis_angle(normal, ng).transform_vector3(source);
            points.push(self.world_to_screen(dir * frame.screen_factor + position));
        }

        self.draw.add_convex_poly_filled(&points, fill);
        self.draw.add_polyline(&points, border, true, LINE_THICKNESS);
    }
}
