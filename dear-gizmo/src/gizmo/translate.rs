use super::{Frame, GizmoScope, CIRCLE_RADIUS, LINE_THICKNESS, TRAIL_COLOR, UNIT_QUAD};
use crate::draw::DrawList;
use crate::math::{self, build_plane, snap_vec3};
use crate::types::{Axis, AxisFlags, Mode, Operation, Plane};
use glam::{Mat4, Vec2, Vec3, Vec4};

impl<D: DrawList + ?Sized> GizmoScope<'_, D> {
    /// Move along an axis, in a plane, or in screen space
    ///
    /// `snap` holds per-axis increments in world units.
    pub fn translate(&mut self, snap: Option<[f32; 3]>) {
        if !self.visible {
            return;
        }
        let frame = *self.widget.mode_frame();

        let mut hover = self.find_translation_hover(&frame);
        let (pressed, held) = self.behavior(Operation::Translate, &mut hover);
        if pressed {
            self.begin_translation(&frame);
        }
        if held {
            self.continue_translation(&frame, snap);
        }

        let active = self.widget.is_active(Operation::Translate);
        if active {
            self.render_translation_trail();
        }
        if !self.is_cloaked() {
            for axis in Axis::ALL {
                self.render_translate_axis(&frame, axis, hover);
            }
            for plane in Plane::ALL {
                self.render_plane(&frame, plane, hover);
            }
            self.render_core(&frame, hover);
        }
        if active {
            let delta = self.widget.result.w_axis.truncate() - self.widget.drag_translation_origin;
            let text = super::translation_info(self.widget.active_flags, delta);
            self.render_text(frame.origin, &text);
        }
    }

    fn find_translation_hover(&self, frame: &Frame) -> AxisFlags {
        if !self.can_activate() {
            return AxisFlags::empty();
        }
        if self.is_core_hovered(frame) {
            return AxisFlags::ALL;
        }
        if let Some(plane) = Plane::ALL
            .into_iter()
            .find(|&plane| self.is_plane_hovered(frame, plane))
        {
            return plane.flags();
        }
        Axis::ALL
            .into_iter()
            .find(|&axis| self.is_axis_hovered(frame, axis))
            .map_or(AxisFlags::empty(), Axis::flag)
    }

    /// Drag plane through the gizmo for the active handle
    fn build_translate_plane(&self, frame: &Frame) -> Vec4 {
        let flags = self.widget.active_flags;
        let normal = if let Some(plane) = flags.plane() {
            frame.axis(plane.normal())
        } else if let Some(axis) = flags.single_axis() {
            self.axis_facing_plane_normal(frame, axis)
        } else {
            -self.ctx.camera.forward
        };
        build_plane(frame.position(), normal)
    }

    /// Normal of the plane containing `axis` that best faces the camera
    pub(crate) fn axis_facing_plane_normal(&self, frame: &Frame, axis: Axis) -> Vec3 {
        let dir = frame.axis(axis);
        let to_model = self.ctx.camera.direction_to(frame.position());
        let ortho = dir.cross(to_model);
        let normal = dir.cross(ortho).normalize_or_zero();
        if normal == Vec3::ZERO {
            -self.ctx.camera.forward
        } else {
            normal
        }
    }

    fn begin_translation(&mut self, frame: &Frame) {
        self.begin_drag();
        self.widget.drag_translation_origin = frame.position();
        self.widget.translation_plane = self.build_translate_plane(frame);
        let hit = self.drag_plane_hit();
        self.widget.translation_plane_origin = hit;
        self.widget.model_relative_origin = (hit - frame.position()) / frame.screen_factor;
    }

    fn continue_translation(&mut self, frame: &Frame, snap: Option<[f32; 3]>) {
        let flags = self.widget.active_flags;
        let ray = self.ctx.ray;
        let length = math::intersect_ray_plane(&ray, self.widget.translation_plane).abs();
        let target = ray.at(length);
        let new_position = target - self.widget.model_relative_origin * frame.screen_factor;

        let position = frame.position();
        let mut delta = new_position - position;
        if let Some(axis) = flags.single_axis() {
            let dir = frame.axis(axis);
            delta = dir * dir.dot(delta);
        }

        if let Some(snap) = snap {
            let origin = self.widget.drag_translation_origin;
            let mut cumulative = position + delta - origin;
            if self.widget.mode == Mode::Local || flags == AxisFlags::ALL {
                let basis = self.widget.local;
                let local = basis.inverse.transform_vector3(cumulative);
                cumulative = basis.matrix.transform_vector3(snap_vec3(local, snap));
            } else {
                cumulative = snap_vec3(cumulative, snap);
            }
            delta = origin + cumulative - position;
        }

        if delta != self.widget.last_translation_delta {
            let mut result = Mat4::from_translation(delta) * self.widget.source;
            for axis in Axis::ALL {
                if self.widget.locked.intersects(axis.flag()) {
                    result.w_axis[axis.index()] = self.widget.drag_translation_origin[axis.index()];
                }
            }
            self.widget.result = result;
            self.widget.dirty = true;
        }
        self.widget.last_translation_delta = delta;
    }

    fn render_translate_axis(&mut self, frame: &Frame, axis: Axis, hover: AxisFlags) {
        if !self.is_axis_visible(frame, axis)
            || (self.hides_locked() && self.widget.locked.intersects(axis.flag()))
        {
            return;
        }
        let color = self.axis_color(axis, hover);
        let head = self.render_axis_line(frame, axis, color);
        self.render_arrowhead(frame.origin, head, color);
    }

    fn render_arrowhead(&mut self, origin: Vec2, head: Vec2, color: u32) {
        let dir = (origin - head).normalize_or_zero() * (LINE_THICKNESS * 2.0);
        let ortho = Vec2::new(dir.y, -dir.x);
        let base = head + dir;
        self.draw
            .add_triangle_filled(head - dir, base + ortho, base - ortho, color);
    }

    fn render_plane(&mut self, frame: &Frame, plane: Plane, hover: AxisFlags) {
        const BORDER: f32 = 1.5;
        if !self.is_plane_visible(plane)
            || (self.hides_locked() && self.widget.locked.intersects(plane.flags()))
        {
            return;
        }

        let (a, b) = plane.axes();
        let points: [Vec2; 4] = std::array::from_fn(|i| {
            let corner = (Vec3::AXES[a.index()] * UNIT_QUAD[i * 2]
                + Vec3::AXES[b.index()] * UNIT_QUAD[i * 2 + 1])
                * frame.screen_factor;
            self.local_to_screen(frame, corner)
        });

        let color = self.plane_color(plane, hover);
        self.draw.add_convex_poly_filled(&points, color);
        self.draw
            .add_polyline(&points, color | 0x60000000, true, BORDER);
    }

    fn render_translation_trail(&mut self) {
        let tail = self.world_to_screen(self.widget.drag_translation_origin);
        let head = self.world_to_screen(self.widget.result.w_axis.truncate());
        let diff = (head - tail).normalize_or_zero() * (CIRCLE_RADIUS - 1.0);

        const MARGIN: f32 = 1.5;
        self.draw
            .add_circle(tail, CIRCLE_RADIUS + MARGIN, TRAIL_COLOR, 0, 1.0);
        self.draw
            .add_circle(head, CIRCLE_RADIUS + MARGIN, TRAIL_COLOR, 0, 1.0);
        self.draw
            .add_line(tail + diff, head - diff, TRAIL_COLOR, LINE_THICKNESS / 2.0);
    }
}
