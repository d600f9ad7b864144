use super::{Frame, GizmoScope, CIRCLE_RADIUS};
use crate::draw::DrawList;
use crate::math::{self, build_plane};
use crate::types::{Axis, AxisFlags, Operation};
use glam::{Mat4, Vec3, Vec4};

const MIN_SCALE: f32 = 0.001;

impl<D: DrawList + ?Sized> GizmoScope<'_, D> {
    /// Scale along a model axis, or uniformly from the core
    ///
    /// Scaling always uses the model's local axes. `snap[0]` is the scale
    /// factor increment.
    pub fn scale(&mut self, snap: Option<[f32; 3]>) {
        if !self.visible {
            return;
        }
        let frame = self.widget.local;

        let mut hover = self.find_scale_hover(&frame);
        let (pressed, held) = self.behavior(Operation::Scale, &mut hover);
        if pressed {
            self.begin_scale(&frame);
        }
        if held {
            self.continue_scale(&frame, snap);
        }

        if !self.is_cloaked() {
            for axis in Axis::ALL {
                self.render_scale_axis(&frame, axis, hover);
            }
            self.render_core(&frame, hover);
        }

        if self.widget.is_active(Operation::Scale) {
            match hover.single_axis() {
                Some(axis) => self.render_scale_trail(&frame, axis),
                None => {
                    for axis in Axis::ALL {
                        self.render_scale_trail(&frame, axis);
                    }
                }
            }
            let text = super::scale_info(self.widget.active_flags, self.widget.scale);
            self.render_text(frame.origin, &text);
        }
    }

    fn find_scale_hover(&self, frame: &Frame) -> AxisFlags {
        if !self.can_activate() {
            return AxisFlags::empty();
        }
        if self.is_core_hovered(frame) {
            return AxisFlags::ALL;
        }
        Axis::ALL
            .into_iter()
            .find(|&axis| self.is_axis_hovered(frame, axis))
            .map_or(AxisFlags::empty(), Axis::flag)
    }

    fn build_scale_plane(&self, frame: &Frame) -> Vec4 {
        let normal = match self.widget.active_flags.single_axis() {
            Some(axis) => self.axis_facing_plane_normal(frame, axis),
            None => -self.ctx.camera.forward,
        };
        build_plane(frame.position(), normal)
    }

    fn begin_scale(&mut self, frame: &Frame) {
        self.begin_drag();
        self.widget.scale = Vec3::ONE;
        self.widget.last_scale = Vec3::ONE;
        self.widget.drag_translation_origin = frame.position();
        self.widget.translation_plane = self.build_scale_plane(frame);
        let hit = self.drag_plane_hit();
        self.widget.translation_plane_origin = hit;
        self.widget.model_relative_origin = (hit - frame.position()) / frame.screen_factor;
        self.widget.scale_value_origin = math::axis_lengths(&self.widget.source);
    }

    fn continue_scale(&mut self, frame: &Frame, snap: Option<[f32; 3]>) {
        let flags = self.widget.active_flags;
        let mut scale = self.widget.scale;

        if let Some(axis) = flags.single_axis() {
            let target = self.drag_plane_hit();
            let new_position = target - self.widget.model_relative_origin * frame.screen_factor;
            let dir = frame.axis(axis);
            let delta = dir * dir.dot(new_position - frame.position());

            let base = self.widget.translation_plane_origin - frame.position();
            let denominator = dir.dot(base);
            if denominator.abs() > math::EPSILON {
                let ratio = dir.dot(base + delta) / denominator;
                scale[axis.index()] = ratio.max(MIN_SCALE);
            }
        } else {
            let delta = (self.mouse().x - self.ctx.drag_origin.x) * 0.01;
            scale = Vec3::splat((1.0 + delta).max(MIN_SCALE));
        }

        if let Some(snap) = snap {
            scale = math::snap_vec3(scale, [snap[0]; 3]);
        }

        for axis in Axis::ALL {
            let i = axis.index();
            scale[i] = scale[i].max(MIN_SCALE);
            if self.widget.locked.intersects(axis.flag()) {
                scale[i] = 1.0;
            }
        }

        self.widget.scale = scale;
        if scale != self.widget.last_scale {
            self.widget.result =
                frame.matrix * Mat4::from_scale(scale * self.widget.scale_value_origin);
            self.widget.dirty = true;
        }
        self.widget.last_scale = scale;
    }

    fn render_scale_axis(&mut self, frame: &Frame, axis: Axis, hover: AxisFlags) {
        if !self.is_axis_visible(frame, axis)
            || (self.hides_locked() && self.widget.locked.intersects(axis.flag()))
        {
            return;
        }
        let color = self.axis_color(axis, hover);
        let head = self.render_axis_line(frame, axis, color);
        self.draw.add_circle_filled(head, CIRCLE_RADIUS, color, 0);
    }

    fn render_scale_trail(&mut self, frame: &Frame, axis: Axis) {
        let i = axis.index();
        let head = self.local_to_screen(
            frame,
            Vec3::AXES[i] * self.widget.scale[i] * frame.screen_factor,
        );
        self.draw.add_circle_filled(head, CIRCLE_RADIUS, 0xFFFFFFFF, 0);
    }
}
