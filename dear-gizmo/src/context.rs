//! Gizmo context
//!
//! [`GizmoContext`] owns everything a gizmo needs between frames: the
//! camera, the input snapshot, the per-id widget table, and the state of
//! the manipulation in progress. A host keeps one context per viewport it
//! renders gizmos into.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;
use crate::draw::DrawList;
use crate::error::{GizmoError, GizmoResult, MatrixCheck};
use crate::gizmo::{BoundsState, GizmoScope, Widget};
use crate::input::{FrameInput, MouseButton};
use crate::math::{self, Ray};
use crate::style::Style;
use crate::types::{AxisFlags, ConfigFlags, GizmoId, Mode, Operation, Plane, Rect};
use crate::view_cube::ViewCubeState;

/// State shared by every gizmo drawn into one viewport
///
/// # Examples
///
/// ```
/// use dear_gizmo::{DrawCommands, FrameInput, GizmoContext, Mode, Operation, Rect};
/// use glam::{Mat4, Vec3};
///
/// let mut ctx = GizmoContext::new();
/// let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
/// let projection = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
/// ctx.set_camera(view, projection, false)?;
///
/// ctx.new_frame(FrameInput::new(Rect::from_pos_size([0.0, 0.0], [800.0, 800.0])));
/// let mut model = Mat4::IDENTITY;
/// let mut draw = DrawCommands::new();
/// let changed = ctx.manipulate("cube", Mode::World, Operation::Translate, &mut model, None, &mut draw)?;
/// assert!(!changed);
/// assert!(!draw.is_empty());
/// # Ok::<(), dear_gizmo::GizmoError>(())
/// ```
#[derive(Debug)]
pub struct GizmoContext {
    pub style: Style,
    pub config_flags: ConfigFlags,
    enabled: bool,
    viewport_override: Option<Rect>,

    pub(crate) viewport: Rect,
    pub(crate) input: FrameInput,
    pub(crate) mouse_delta: Vec2,
    previous_mouse: Option<Vec2>,

    pub(crate) camera: Camera,
    pub(crate) ray: Ray,
    pub(crate) drag_origin: Vec2,

    pub(crate) widgets: HashMap<GizmoId, Widget>,
    pub(crate) current_gizmo: Option<GizmoId>,
    pub(crate) hovered_gizmo: Option<GizmoId>,
    pub(crate) active_gizmo: Option<GizmoId>,

    pub(crate) bounds: BoundsState,
    /// Visibility of each plane, indexed by its normal axis
    pub(crate) planes_visibility: [f32; 3],
    /// Planes sorted from most to least visible
    pub(crate) most_visible_planes: [Plane; 3],
    /// Source matrix at the start of the current drag
    pub(crate) backup_model: Mat4,

    pub(crate) view_cube: ViewCubeState,
}

impl Default for GizmoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GizmoContext {
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            config_flags: ConfigFlags::empty(),
            enabled: true,
            viewport_override: None,
            viewport: Rect::default(),
            input: FrameInput::default(),
            mouse_delta: Vec2::ZERO,
            previous_mouse: None,
            camera: Camera::default(),
            ray: Ray::default(),
            drag_origin: Vec2::ZERO,
            widgets: HashMap::new(),
            current_gizmo: None,
            hovered_gizmo: None,
            active_gizmo: None,
            bounds: BoundsState::default(),
            planes_visibility: [0.0; 3],
            most_visible_planes: Plane::ALL,
            backup_model: Mat4::IDENTITY,
            view_cube: ViewCubeState::default(),
        }
    }

    /// Store the host input for this frame
    ///
    /// Call once per frame before any gizmo or view cube.
    pub fn new_frame(&mut self, input: FrameInput) {
        self.mouse_delta = self
            .previous_mouse
            .map_or(Vec2::ZERO, |previous| input.mouse_pos - previous);
        self.previous_mouse = Some(input.mouse_pos);
        self.input = input;
        self.hovered_gizmo = None;
        self.viewport = self.effective_viewport();
    }

    /// Set the camera used by all following gizmos
    ///
    /// Accepts any matrix convertible to `mint::ColumnMatrix4<f32>`.
    pub fn set_camera(
        &mut self,
        view: impl Into<mint::ColumnMatrix4<f32>>,
        projection: impl Into<mint::ColumnMatrix4<f32>>,
        is_ortho: bool,
    ) -> GizmoResult<()> {
        let view = Mat4::from(view.into());
        let projection = Mat4::from(projection.into());
        self.camera = Camera::new(view, projection, is_ortho)?;
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Override the viewport; `None` falls back to the input's content rect
    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport_override = viewport;
        self.viewport = self.effective_viewport();
    }

    pub fn clear_viewport(&mut self) {
        self.set_viewport(None);
    }

    pub fn effective_viewport(&self) -> Rect {
        self.viewport_override.unwrap_or(self.input.content_rect)
    }

    /// A disabled context draws gizmos but ignores the mouse
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_config_flags(&mut self, flags: ConfigFlags) {
        self.config_flags = flags;
    }

    /// Start processing a gizmo bound to `model`
    ///
    /// `locked_axes` disables the handles of those axes for every operation
    /// run on the returned scope.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The effective viewport has no area
    /// - `model` holds non-finite values or cannot be inverted
    pub fn begin<'a, D: DrawList + ?Sized>(
        &'a mut self,
        id: impl Into<GizmoId>,
        mode: Mode,
        model: &'a mut Mat4,
        locked_axes: AxisFlags,
        draw: &'a mut D,
    ) -> GizmoResult<GizmoScope<'a, D>> {
        let id = id.into();
        let viewport = self.effective_viewport();
        if viewport.is_empty() {
            return Err(GizmoError::invalid_viewport(format!(
                "{}x{} has no area",
                viewport.width(),
                viewport.height()
            )));
        }
        model.check_finite("model")?;

        self.viewport = viewport;
        self.current_gizmo = Some(id);

        let mut widget = self.widgets.remove(&id).unwrap_or_else(|| Widget::new(id));
        if let Err(err) = widget.load(*model, mode, &self.camera, &viewport, self.style.gizmo_scale) {
            self.widgets.insert(id, widget);
            return Err(err);
        }
        widget.locked = locked_axes;

        self.ray = math::ray_cast(&self.camera.view_projection, &viewport, self.input.mouse_pos);
        self.compute_planes_visibility(&widget.source);

        if !self.input.is_down(MouseButton::Left) {
            self.drag_origin = Vec2::ZERO;
            self.active_gizmo = None;
            widget.active_flags = AxisFlags::empty();
        }
        if widget.active_flags.is_empty() {
            widget.active_operation = None;
            if self.active_gizmo.is_none() {
                self.bounds.active_plane = None;
                self.bounds.active_index = None;
            }
        }

        let visible = self.camera.is_ortho
            || !widget.active_flags.is_empty()
            || (self.camera.view_projection * widget.source.w_axis).z >= 0.001;
        if !visible {
            crate::gizmo_trace!("Gizmo {:?} is behind the camera", id);
        }

        Ok(GizmoScope {
            ctx: self,
            widget,
            model,
            draw,
            visible,
            finished: false,
        })
    }

    /// Run a single operation on `model`
    ///
    /// Returns `true` when `model` was modified.
    ///
    /// # Errors
    ///
    /// Same as [`begin`](Self::begin). [`Operation::BoundsScale`] needs a
    /// box and is rejected; use [`GizmoScope::bounds_scale`] instead.
    pub fn manipulate<D: DrawList + ?Sized>(
        &mut self,
        id: impl Into<GizmoId>,
        mode: Mode,
        operation: Operation,
        model: &mut Mat4,
        snap: Option<[f32; 3]>,
        draw: &mut D,
    ) -> GizmoResult<bool> {
        if operation == Operation::BoundsScale {
            return Err(GizmoError::invalid_operation(
                "BoundsScale needs bounds, use GizmoScope::bounds_scale",
            ));
        }

        let mut scope = self.begin(id, mode, model, AxisFlags::empty(), draw)?;
        match operation {
            Operation::Translate => scope.translate(snap),
            Operation::Rotate => scope.rotate(snap),
            Operation::Scale => scope.scale(snap),
            Operation::BoundsScale => {}
        }
        Ok(scope.end())
    }

    fn compute_planes_visibility(&mut self, source: &Mat4) {
        let position = source.w_axis.truncate();
        let to_camera = -self.camera.direction_to(position);
        for plane in Plane::ALL {
            let normal = source.col(plane.index()).truncate().normalize_or_zero();
            self.planes_visibility[plane.index()] = to_camera.dot(normal).abs();
        }

        let visibility = self.planes_visibility;
        self.most_visible_planes
            .sort_by(|a, b| visibility[b.index()].total_cmp(&visibility[a.index()]));
    }

    /// Whether any gizmo is being dragged
    pub fn is_using(&self) -> bool {
        self.active_gizmo.is_some()
    }

    pub fn is_using_id(&self, id: impl Into<GizmoId>) -> bool {
        self.active_gizmo == Some(id.into())
    }

    /// Whether the last processed gizmo is hovered, or any gizmo is dragged
    pub fn is_over(&self) -> bool {
        self.hovered_gizmo.is_some() || self.is_using()
    }

    /// Drop the state kept for `id`
    ///
    /// Call when an object is deleted so its gizmo state does not linger.
    /// Returns `false` if nothing was stored for `id`.
    pub fn forget(&mut self, id: impl Into<GizmoId>) -> bool {
        let id = id.into();
        for slot in [
            &mut self.current_gizmo,
            &mut self.hovered_gizmo,
            &mut self.active_gizmo,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        self.widgets.remove(&id).is_some()
    }

    /// Number of gizmos with stored state
    pub fn gizmo_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_view_manipulate_hovered(&self) -> bool {
        self.view_cube.hovered
    }

    pub fn is_using_view_manipulate(&self) -> bool {
        self.view_cube.active
    }

    /// Debug dump of the interaction state
    pub fn snapshot(&self) -> ContextSnapshot {
        let widget = self
            .current_gizmo
            .and_then(|id| self.widgets.get(&id))
            .map(|widget| WidgetSnapshot {
                id: widget.id,
                mode: widget.mode,
                locked: widget.locked,
                hover: widget.hover,
                active_operation: widget.active_operation,
                active_flags: widget.active_flags,
                screen_factor: widget.mode_frame().screen_factor,
                ring_radius: widget.ring_radius,
                translation_plane: widget.translation_plane.to_array(),
                drag_translation_origin: widget.drag_translation_origin,
                rotation_angle: widget.rotation_angle,
                scale: widget.scale,
            });

        ContextSnapshot {
            viewport: self.viewport,
            enabled: self.enabled,
            mouse_pos: self.input.mouse_pos,
            mouse_delta: self.mouse_delta,
            drag_origin: self.drag_origin,
            camera: self.camera,
            ray: self.ray,
            current_gizmo: self.current_gizmo,
            hovered_gizmo: self.hovered_gizmo,
            active_gizmo: self.active_gizmo,
            widget,
            planes_visibility: self.planes_visibility,
            bounds_plane: self.bounds.active_plane,
            bounds_index: self.bounds.active_index,
            bounds_anchor: self.bounds.anchor,
            bounds_pivot: self.bounds.pivot,
            view_cube_active: self.view_cube.active,
            view_cube_animating: self.view_cube.animating,
        }
    }
}

/// Context state captured by [`GizmoContext::snapshot`]
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    pub viewport: Rect,
    pub enabled: bool,
    pub mouse_pos: Vec2,
    pub mouse_delta: Vec2,
    pub drag_origin: Vec2,
    pub camera: Camera,
    pub ray: Ray,
    pub current_gizmo: Option<GizmoId>,
    pub hovered_gizmo: Option<GizmoId>,
    pub active_gizmo: Option<GizmoId>,
    /// State of the most recently processed gizmo
    pub widget: Option<WidgetSnapshot>,
    pub planes_visibility: [f32; 3],
    pub bounds_plane: Option<Plane>,
    pub bounds_index: Option<usize>,
    pub bounds_anchor: Vec3,
    pub bounds_pivot: Vec3,
    pub view_cube_active: bool,
    pub view_cube_animating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub id: GizmoId,
    pub mode: Mode,
    pub locked: AxisFlags,
    pub hover: AxisFlags,
    pub active_operation: Option<Operation>,
    pub active_flags: AxisFlags,
    pub screen_factor: f32,
    pub ring_radius: f32,
    pub translation_plane: [f32; 4],
    pub drag_translation_origin: Vec3,
    pub rotation_angle: f32,
    pub scale: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawCommands;
    use pretty_assertions::assert_eq;

    fn context() -> GizmoContext {
        let mut ctx = GizmoContext::new();
        ctx.set_camera(
            Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
            Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0),
            false,
        )
        .unwrap();
        ctx.new_frame(FrameInput::new(Rect::from_pos_size([0.0, 0.0], [800.0, 800.0])));
        ctx
    }

    #[test]
    fn test_viewport_override() {
        let mut ctx = context();
        assert_eq!(ctx.effective_viewport().width(), 800.0);

        let custom = Rect::from_pos_size([10.0, 10.0], [200.0, 100.0]);
        ctx.set_viewport(Some(custom));
        ctx.new_frame(FrameInput::new(Rect::default()));
        assert_eq!(ctx.effective_viewport(), custom);

        ctx.clear_viewport();
        assert!(ctx.effective_viewport().is_empty());
    }

    #[test]
    fn test_mouse_delta() {
        let mut ctx = context();
        assert_eq!(ctx.mouse_delta, Vec2::ZERO);
        ctx.new_frame(FrameInput::new(Rect::default()).with_mouse([3.0, -2.0]));
        assert_eq!(ctx.mouse_delta, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_planes_visibility_order() {
        let mut ctx = context();
        let mut model = Mat4::IDENTITY;
        let mut draw = DrawCommands::new();
        ctx.begin(1u64, Mode::World, &mut model, AxisFlags::empty(), &mut draw)
            .unwrap()
            .end();

        assert_eq!(ctx.most_visible_planes[0], Plane::XY);
        assert!((ctx.planes_visibility[Plane::XY.index()] - 1.0).abs() < 1e-5);
        assert!(ctx.planes_visibility[Plane::YZ.index()].abs() < 1e-5);
    }

    #[test]
    fn test_behind_camera_is_hidden() {
        let mut ctx = context();
        let mut model = Mat4::from_translation(Vec3::new(0.0, 0.0, 10.0));
        let mut draw = DrawCommands::new();
        let scope = ctx
            .begin(1u64, Mode::World, &mut model, AxisFlags::empty(), &mut draw)
            .unwrap();
        assert!(!scope.is_visible());
    }

    #[test]
    fn test_begin_errors() {
        let mut ctx = context();
        let mut draw = DrawCommands::new();

        let mut model = Mat4::IDENTITY;
        model.x_axis.x = f32::NAN;
        let err = ctx
            .begin(1u64, Mode::World, &mut model, AxisFlags::empty(), &mut draw)
            .err();
        assert_eq!(err, Some(GizmoError::NonFinite { what: "model" }));

        ctx.new_frame(FrameInput::new(Rect::default()));
        let mut model = Mat4::IDENTITY;
        let err = ctx
            .begin(1u64, Mode::World, &mut model, AxisFlags::empty(), &mut draw)
            .err();
        assert!(matches!(err, Some(GizmoError::InvalidViewport { .. })));
    }

    #[test]
    fn test_snapshot_tracks_current_gizmo() {
        let mut ctx = context();
        let mut model = Mat4::IDENTITY;
        let mut draw = DrawCommands::new();
        ctx.manipulate("a", Mode::Local, Operation::Rotate, &mut model, None, &mut draw)
            .unwrap();

        let snapshot = ctx.snapshot();
        assert_eq!(snapshot.current_gizmo, Some(GizmoId::from("a")));
        assert!(format!("{snapshot:?}").contains("ring_radius"));
        let widget = snapshot.widget.unwrap();
        assert_eq!(widget.mode, Mode::Local);
        assert_eq!(widget.active_operation, None);
    }

    #[test]
    fn test_forget() {
        let mut ctx = context();
        let mut draw = DrawCommands::new();
        for id in ["a", "b"] {
            let mut model = Mat4::IDENTITY;
            ctx.manipulate(id, Mode::World, Operation::Scale, &mut model, None, &mut draw)
                .unwrap();
        }
        assert_eq!(ctx.gizmo_count(), 2);
        assert_eq!(ctx.current_gizmo, Some(GizmoId::from("b")));

        assert!(ctx.forget("b"));
        assert_eq!(ctx.current_gizmo, None);
        assert!(ctx.snapshot().widget.is_none());
        assert_eq!(ctx.gizmo_count(), 1);
    }
}
