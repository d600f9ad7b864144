//! Gizmo widgets
//!
//! A gizmo is processed between [`GizmoContext::begin`](crate::GizmoContext::begin)
//! and [`GizmoScope::end`]. Each operation module adds one method to
//! [`GizmoScope`] that finds the hovered handle, runs the press/drag state
//! machine and renders the handles.

mod bounds;
mod rotate;
mod scale;
mod translate;

pub(crate) use bounds::BoundsState;

use crate::camera::Camera;
use crate::context::GizmoContext;
use crate::draw::DrawList;
use crate::error::GizmoResult;
use crate::input::MouseButton;
use crate::math::{
    self, point_on_segment, segment_length_clip_space, try_inverse, world_to_screen, EPSILON,
};
use crate::style::{ColorU32, StyleColor};
use crate::types::{Axis, AxisFlags, ConfigFlags, GizmoId, Mode, Operation, Plane, Rect};
use glam::{Mat4, Vec2, Vec3, Vec4};

pub(crate) const QUAD_MIN: f32 = 0.3;
pub(crate) const QUAD_MAX: f32 = 0.5;
pub(crate) const UNIT_QUAD: [f32; 8] = [
    QUAD_MIN, QUAD_MIN, QUAD_MIN, QUAD_MAX, QUAD_MAX, QUAD_MAX, QUAD_MAX, QUAD_MIN,
];
pub(crate) const CIRCLE_RADIUS: f32 = 6.0;
pub(crate) const LINE_THICKNESS: f32 = 3.0;
pub(crate) const CIRCLE_SEGMENTS: usize = 128;
pub(crate) const OUTER_ANCHOR_SIZE: f32 = 6.0;
pub(crate) const MID_ANCHOR_SIZE: f32 = 4.0;
/// Alpha multiplier for hovered handles
pub(crate) const HOVER_ALPHA: f32 = 0.541;
pub(crate) const TRAIL_COLOR: ColorU32 = 0xAAAAAAAA;

/// Coordinate frame the handles of one operation are laid out in
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Frame {
    pub matrix: Mat4,
    pub inverse: Mat4,
    pub mvp: Mat4,
    /// Frame origin in screen pixels
    pub origin: Vec2,
    /// World length of a full handle
    pub screen_factor: f32,
}

impl Frame {
    fn new(matrix: Mat4, camera: &Camera, viewport: &Rect, gizmo_scale: f32) -> GizmoResult<Self> {
        let inverse = try_inverse(&matrix, "model")?;
        let mvp = camera.view_projection * matrix;
        let right = inverse.transform_vector3(camera.right);
        let right_length =
            segment_length_clip_space(Vec3::ZERO, right, &mvp, viewport.aspect_ratio());
        let screen_factor = if right_length > EPSILON {
            gizmo_scale / right_length
        } else {
            gizmo_scale
        };

        Ok(Self {
            matrix,
            inverse,
            mvp,
            origin: world_to_screen(Vec3::ZERO, &mvp, viewport),
            screen_factor,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn axis(&self, axis: Axis) -> Vec3 {
        self.matrix.col(axis.index()).truncate()
    }
}

/// Per-gizmo state that survives between frames
#[derive(Debug, Clone, Default)]
pub(crate) struct Widget {
    pub id: GizmoId,
    pub mode: Mode,
    /// Caller's matrix as loaded this frame
    pub source: Mat4,
    /// Matrix written back when dirty
    pub result: Mat4,
    /// Source with normalized axes
    pub local: Frame,
    /// Source translation only
    pub world: Frame,
    pub ring_radius: f32,
    pub model_scale_origin: Vec3,
    pub locked: AxisFlags,
    pub dirty: bool,
    /// Union of the hover flags seen this frame
    pub hover: AxisFlags,

    pub active_operation: Option<Operation>,
    pub active_flags: AxisFlags,

    pub translation_plane: Vec4,
    pub translation_plane_origin: Vec3,
    pub model_relative_origin: Vec3,
    pub drag_translation_origin: Vec3,
    pub last_translation_delta: Vec3,

    pub rotation_vector_source: Vec3,
    pub rotation_angle: f32,
    pub rotation_angle_origin: f32,

    pub scale: Vec3,
    pub last_scale: Vec3,
    pub scale_value_origin: Vec3,
}

impl Widget {
    pub fn new(id: GizmoId) -> Self {
        Self {
            id,
            scale: Vec3::ONE,
            last_scale: Vec3::ONE,
            scale_value_origin: Vec3::ONE,
            ..Default::default()
        }
    }

    pub fn load(
        &mut self,
        source: Mat4,
        mode: Mode,
        camera: &Camera,
        viewport: &Rect,
        gizmo_scale: f32,
    ) -> GizmoResult<()> {
        let local = Frame::new(math::normalize_axes(&source), camera, viewport, gizmo_scale)?;
        let world = Frame::new(
            Mat4::from_translation(source.w_axis.truncate()),
            camera,
            viewport,
            gizmo_scale,
        )?;

        self.mode = mode;
        self.source = source;
        self.result = source;
        self.local = local;
        self.world = world;
        self.model_scale_origin = math::axis_lengths(&source);
        self.ring_radius = gizmo_scale * viewport.width() * 0.55;
        self.hover = AxisFlags::empty();
        Ok(())
    }

    pub fn frame(&self, mode: Mode) -> &Frame {
        match mode {
            Mode::Local => &self.local,
            Mode::World => &self.world,
        }
    }

    /// Frame of the gizmo's own mode
    pub fn mode_frame(&self) -> &Frame {
        self.frame(self.mode)
    }

    pub fn is_active(&self, operation: Operation) -> bool {
        self.active_operation == Some(operation)
    }
}

/// A gizmo being processed this frame
///
/// Created by [`GizmoContext::begin`]. Call any of the operation methods
/// (several can be combined), then [`end`](Self::end). Dropping the scope
/// ends it as well.
pub struct GizmoScope<'a, D: DrawList + ?Sized> {
    pub(crate) ctx: &'a mut GizmoContext,
    pub(crate) widget: Widget,
    pub(crate) model: &'a mut Mat4,
    pub(crate) draw: &'a mut D,
    pub(crate) visible: bool,
    pub(crate) finished: bool,
}

impl<D: DrawList + ?Sized> GizmoScope<'_, D> {
    pub fn id(&self) -> GizmoId {
        self.widget.id
    }

    /// Whether the gizmo origin is in front of the camera
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether this gizmo is being dragged
    pub fn is_using(&self) -> bool {
        !self.widget.active_flags.is_empty()
    }

    /// Handles hovered by the operations processed so far
    pub fn hovered(&self) -> AxisFlags {
        self.widget.hover
    }

    /// The matrix as it will be written back
    pub fn matrix(&self) -> Mat4 {
        self.widget.result
    }

    /// Finish the gizmo and write the result back
    ///
    /// Returns `true` when the caller's matrix was modified.
    pub fn end(mut self) -> bool {
        self.finish()
    }

    fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;

        let ctx = &mut *self.ctx;
        let widget = &mut self.widget;
        if ctx.config_flags.contains(ConfigFlags::HAS_REVERSING)
            && ctx.input.is_clicked(MouseButton::Right)
            && !widget.active_flags.is_empty()
        {
            crate::gizmo_debug!("Reverting manipulation of gizmo {:?}", widget.id);
            widget.result = ctx.backup_model;
            widget.dirty = true;
            widget.active_flags = AxisFlags::empty();
            ctx.active_gizmo = None;
        }

        ctx.hovered_gizmo = (!widget.hover.is_empty()).then_some(widget.id);

        let updated = widget.dirty;
        if updated {
            *self.model = widget.result;
            widget.dirty = false;
        }

        let widget = std::mem::take(&mut self.widget);
        ctx.widgets.insert(widget.id, widget);
        updated
    }

    // Shared state machine

    pub(crate) fn behavior(&mut self, operation: Operation, hover: &mut AxisFlags) -> (bool, bool) {
        let id = self.widget.id;
        if self.ctx.active_gizmo.is_some_and(|active| active != id) {
            *hover = AxisFlags::empty();
        } else if self
            .widget
            .active_operation
            .is_some_and(|active| active != operation)
        {
            *hover = AxisFlags::empty();
        } else if !self.widget.active_flags.is_empty() {
            *hover = self.widget.active_flags;
        }

        let pressed = !hover.is_empty() && self.ctx.input.is_clicked(MouseButton::Left);
        if pressed {
            crate::gizmo_debug!(
                "Begin {} on gizmo {:?} ({})",
                operation,
                id,
                hover.name()
            );
            self.ctx.active_gizmo = Some(id);
            self.widget.active_operation = Some(operation);
            self.widget.active_flags = *hover;
        }

        let mut held = false;
        if !self.widget.active_flags.is_empty() && self.widget.active_flags == *hover {
            if self.ctx.input.is_down(MouseButton::Left) {
                held = true;
            } else {
                crate::gizmo_debug!("End {} on gizmo {:?}", operation, id);
                self.ctx.active_gizmo = None;
                self.widget.active_flags = AxisFlags::empty();
            }
        }

        self.widget.hover |= *hover;
        (pressed, held)
    }

    /// Record the drag start shared by every operation
    pub(crate) fn begin_drag(&mut self) {
        self.ctx.backup_model = self.widget.source;
        self.ctx.drag_origin = self.ctx.input.mouse_pos;
    }

    pub(crate) fn is_cloaked(&self) -> bool {
        !self.widget.active_flags.is_empty()
            && self.ctx.config_flags.contains(ConfigFlags::CLOAK_ON_MANIPULATE)
    }

    pub(crate) fn hides_locked(&self) -> bool {
        self.ctx.config_flags.contains(ConfigFlags::HIDE_LOCKED)
    }

    // Hover queries

    pub(crate) fn mouse(&self) -> Vec2 {
        self.ctx.input.mouse_pos
    }

    pub(crate) fn can_activate(&self) -> bool {
        self.ctx.is_enabled()
            && self.ctx.input.window_hovered
            && self.ctx.viewport.contains(self.mouse())
    }

    pub(crate) fn all_locked(&self) -> bool {
        self.widget.locked == AxisFlags::ALL
    }

    pub(crate) fn is_core_hovered(&self, frame: &Frame) -> bool {
        const TOLERANCE: f32 = 3.0;
        if self.all_locked() {
            return false;
        }
        self.mouse().distance(frame.origin) <= CIRCLE_RADIUS + TOLERANCE
    }

    /// Mouse within a few pixels of the projected arrow
    pub(crate) fn is_axis_hovered(&self, frame: &Frame, axis: Axis) -> bool {
        const TOLERANCE: f32 = 6.0;
        if self.widget.locked.intersects(axis.flag()) || !self.is_axis_visible(frame, axis) {
            return false;
        }

        let dir = Vec3::AXES[axis.index()] * frame.screen_factor;
        let start = self.local_to_screen(frame, dir * 0.1);
        let end = self.local_to_screen(frame, dir);
        let mouse = self.mouse();
        point_on_segment(mouse, start, end).distance(mouse) < TOLERANCE
    }

    pub(crate) fn is_plane_hovered(&self, frame: &Frame, plane: Plane) -> bool {
        if self.widget.locked.intersects(plane.flags()) || !self.is_plane_visible(plane) {
            return false;
        }

        let origin = frame.position();
        let ray = &self.ctx.ray;
        let t = math::intersect_ray_plane(ray, math::build_plane(origin, frame.axis(plane.normal())));
        if t < 0.0 {
            return false;
        }
        let offset = (ray.at(t) - origin) / frame.screen_factor;

        let (a, b) = plane.axes();
        let dx = frame.axis(a).dot(offset);
        let dy = frame.axis(b).dot(offset);
        dx >= UNIT_QUAD[0] && dx <= UNIT_QUAD[4] && dy >= UNIT_QUAD[1] && dy <= UNIT_QUAD[3]
    }

    /// Mouse near the front half of the ring around `axis`
    pub(crate) fn is_rotation_axis_hovered(&self, frame: &Frame, axis: Axis) -> bool {
        const TOLERANCE: f32 = 8.0;
        if self.widget.locked.intersects(axis.flag()) {
            return false;
        }

        let origin = frame.position();
        let ray = &self.ctx.ray;
        let t = math::intersect_ray_plane(ray, math::build_plane(origin, frame.axis(axis)));
        let local_dir = (ray.at(t) - origin).normalize_or_zero();
        if local_dir.dot(ray.direction) > EPSILON {
            return false;
        }

        let ideal = frame.inverse.transform_vector3(local_dir) * frame.screen_factor;
        self.local_to_screen(frame, ideal).distance(self.mouse()) < TOLERANCE
    }

    pub(crate) fn is_rotation_ring_hovered(&self, frame: &Frame) -> bool {
        const TOLERANCE: f32 = 1.0;
        if self.all_locked() {
            return false;
        }
        let thickness = self.ctx.style.rotation_ring_thickness + TOLERANCE;
        let distance = self.mouse().distance(frame.origin);
        distance >= self.widget.ring_radius - thickness
            && distance < self.widget.ring_radius + thickness
    }

    pub(crate) fn is_axis_visible(&self, frame: &Frame, axis: Axis) -> bool {
        const THRESHOLD: f32 = 0.03;
        let length = segment_length_clip_space(
            Vec3::ZERO,
            Vec3::AXES[axis.index()] * frame.screen_factor,
            &frame.mvp,
            self.ctx.viewport.aspect_ratio(),
        );
        length >= THRESHOLD
    }

    pub(crate) fn is_plane_visible(&self, plane: Plane) -> bool {
        const THRESHOLD: f32 = 0.1;
        self.ctx.planes_visibility[plane.index()] >= THRESHOLD
    }

    // Projection

    pub(crate) fn local_to_screen(&self, frame: &Frame, point: Vec3) -> Vec2 {
        world_to_screen(point, &frame.mvp, &self.ctx.viewport)
    }

    pub(crate) fn world_to_screen(&self, point: Vec3) -> Vec2 {
        world_to_screen(point, &self.ctx.camera.view_projection, &self.ctx.viewport)
    }

    /// Ray hit on the current drag plane
    pub(crate) fn drag_plane_hit(&self) -> Vec3 {
        let ray = &self.ctx.ray;
        ray.at(math::intersect_ray_plane(ray, self.widget.translation_plane))
    }

    // Colors

    pub(crate) fn color(&self, color: StyleColor) -> ColorU32 {
        self.ctx.style.color_u32(color, 1.0)
    }

    pub(crate) fn hovered_color(&self) -> ColorU32 {
        self.ctx.style.color_u32(StyleColor::Hovered, HOVER_ALPHA)
    }

    pub(crate) fn special_move_color(&self, hover: AxisFlags) -> ColorU32 {
        if self.all_locked() {
            self.color(StyleColor::Inactive)
        } else if hover == AxisFlags::ALL {
            self.hovered_color()
        } else {
            self.color(StyleColor::SpecialMove)
        }
    }

    pub(crate) fn axis_color(&self, axis: Axis, hover: AxisFlags) -> ColorU32 {
        if self.widget.locked.intersects(axis.flag()) {
            self.color(StyleColor::Inactive)
        } else if hover.single_axis() == Some(axis) {
            self.hovered_color()
        } else {
            self.color(StyleColor::axis(axis.index()))
        }
    }

    pub(crate) fn plane_color(&self, plane: Plane, hover: AxisFlags) -> ColorU32 {
        if self.widget.locked.intersects(plane.flags()) {
            self.color(StyleColor::Inactive)
        } else if hover.plane() == Some(plane) {
            self.hovered_color()
        } else {
            self.color(StyleColor::plane(plane.index()))
        }
    }

    pub(crate) fn bound_color(&self, hovered: bool) -> ColorU32 {
        if hovered {
            self.hovered_color()
        } else {
            self.color(StyleColor::BoundAnchor)
        }
    }

    // Shared rendering

    pub(crate) fn render_core(&mut self, frame: &Frame, hover: AxisFlags) {
        if self.hides_locked() && self.all_locked() {
            return;
        }
        let color = self.special_move_color(hover);
        self.draw
            .add_circle_filled(frame.origin, CIRCLE_RADIUS, color, CIRCLE_SEGMENTS as u32);
    }

    /// Axis line from 10% to 100% of the handle length
    pub(crate) fn render_axis_line(&mut self, frame: &Frame, axis: Axis, color: ColorU32) -> Vec2 {
        let dir = Vec3::AXES[axis.index()] * frame.screen_factor;
        let tail = self.local_to_screen(frame, dir * 0.1);
        let head = self.local_to_screen(frame, dir);
        self.draw.add_line(tail, head, color, LINE_THICKNESS);
        head
    }

    pub(crate) fn render_text(&mut self, position: Vec2, text: &str) {
        let shadow = self.color(StyleColor::TextShadow);
        let color = self.color(StyleColor::Text);
        self.draw.add_text(position + 15.0, shadow, text);
        self.draw.add_text(position + 14.0, color, text);
    }

    pub(crate) fn render_dotted_line(&mut self, a: Vec2, b: Vec2, color: ColorU32) {
        let steps = ((a.distance(b) / 15.0) as usize).min(1000);
        if steps == 0 {
            return;
        }
        let step = 1.0 / steps as f32;
        for i in 0..steps {
            let t = i as f32 * step;
            self.draw
                .add_line(a.lerp(b, t), a.lerp(b, t + step * 0.5), color, 1.0);
        }
    }

    pub(crate) fn render_anchor(&mut self, position: Vec2, radius: f32, color: ColorU32) {
        const BORDER: f32 = 1.2;
        self.draw.add_circle_filled(position, radius, 0xFF000000, 0);
        self.draw.add_circle_filled(position, radius - BORDER, color, 0);
    }
}

impl<D: DrawList + ?Sized> Drop for GizmoScope<'_, D> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Info line for a translation delta
pub(crate) fn translation_info(flags: AxisFlags, delta: Vec3) -> String {
    if let Some(axis) = flags.single_axis() {
        format!("{} : {:5.3}", axis_name(axis), delta[axis.index()])
    } else if let Some(plane) = flags.plane() {
        let (a, b) = plane.axes();
        let (a, b) = if a.index() < b.index() { (a, b) } else { (b, a) };
        format!(
            "{} : {:5.3} {} : {:5.3}",
            axis_name(a),
            delta[a.index()],
            axis_name(b),
            delta[b.index()]
        )
    } else {
        format!("X : {:5.3} Y : {:5.3} Z : {:5.3}", delta.x, delta.y, delta.z)
    }
}

/// Info line for a rotation angle in radians
pub(crate) fn rotation_info(flags: AxisFlags, angle: f32) -> String {
    let label = flags.single_axis().map_or("Screen", axis_name);
    format!("{} : {:5.2} deg {:5.2} rad", label, angle.to_degrees(), angle)
}

/// Info line for scale factors
pub(crate) fn scale_info(flags: AxisFlags, scale: Vec3) -> String {
    if let Some(axis) = flags.single_axis() {
        format!("{} : {:5.3}", axis_name(axis), scale[axis.index()])
    } else if scale.x == scale.y && scale.y == scale.z {
        format!("XYZ : {:5.2}", scale.x)
    } else {
        format!("X : {:5.3} Y : {:5.3} Z : {:5.3}", scale.x, scale.y, scale.z)
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "X",
        Axis::Y => "Y",
        Axis::Z => "Z",
    }
}
