use super::{GizmoScope, MID_ANCHOR_SIZE, OUTER_ANCHOR_SIZE, TRAIL_COLOR};
use crate::draw::DrawList;
use crate::error::{GizmoError, GizmoResult};
use crate::math::{self, build_plane, world_to_screen, EPSILON};
use crate::types::{Axis, AxisFlags, Operation, Plane};
use glam::{Mat4, Vec3};

/// Bounding-box anchors and the drag state of the bounds tool
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BoundsState {
    /// Corners of the box face through the origin, per plane
    pub outer_points: [[Vec3; 4]; 3],
    /// Edge midpoints, per plane
    pub mid_points: [[Vec3; 4]; 3],
    pub anchor: Vec3,
    pub local_pivot: Vec3,
    pub pivot: Vec3,
    pub active_plane: Option<Plane>,
    pub active_index: Option<usize>,
}

impl BoundsState {
    /// `bounds` is `[min_x, min_y, min_z, max_x, max_y, max_z]` in model space
    pub fn build_points(&mut self, bounds: &[f32; 6]) {
        for plane in Plane::ALL {
            let p = plane.index();
            let (a, b) = plane.axes();
            let (a, b) = (a.index(), b.index());
            for i in 0..4 {
                let mut point = Vec3::ZERO;
                point[a] = bounds[a + 3 * (i >> 1)];
                point[b] = bounds[b + 3 * ((i >> 1) ^ (i & 1))];
                self.outer_points[p][i] = point;
            }
            for i in 0..4 {
                self.mid_points[p][i] =
                    (self.outer_points[p][i] + self.outer_points[p][(i + 1) % 4]) * 0.5;
            }
        }
    }
}

impl<D: DrawList + ?Sized> GizmoScope<'_, D> {
    /// Scale by dragging corner or edge anchors of a local bounding box
    ///
    /// `bounds` is `[min_x, min_y, min_z, max_x, max_y, max_z]` in model
    /// space. `snap` holds per-axis increments for the scaled box extent.
    pub fn bounds_scale(&mut self, bounds: [f32; 6], snap: Option<[f32; 3]>) -> GizmoResult<()> {
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(GizmoError::non_finite("bounds"));
        }
        if !self.visible {
            return Ok(());
        }

        self.ctx.bounds.build_points(&bounds);
        let mvp = self.ctx.camera.view_projection * self.widget.source;

        let (mut hover, mut plane, mut index) = self.find_hovered_bound(&mvp);
        let (pressed, held) = self.behavior(Operation::BoundsScale, &mut hover);
        if pressed {
            self.ctx.bounds.active_plane = plane;
            self.ctx.bounds.active_index = index;
            self.begin_bounds_scale();
        }
        if held {
            plane = self.ctx.bounds.active_plane;
            index = self.ctx.bounds.active_index;
        }

        let mut info = Vec3::ZERO;
        if held {
            info = self.continue_bounds_scale(&bounds, snap);
        }

        let active = self.widget.is_active(Operation::BoundsScale);
        if self.widget.active_flags.is_empty() || active {
            self.render_bounds(&mvp, hover, plane, index);
        }
        if active {
            let origin = self.widget.mode_frame().origin;
            let text = super::scale_info(self.widget.active_flags, info);
            self.render_text(origin, &text);
        }
        Ok(())
    }

    fn find_hovered_bound(&self, mvp: &Mat4) -> (AxisFlags, Option<Plane>, Option<usize>) {
        if !self.can_activate() {
            return (AxisFlags::empty(), None, None);
        }

        let mouse = self.mouse();
        let bounds = &self.ctx.bounds;
        for plane in self.ctx.most_visible_planes {
            if !self.is_plane_visible(plane) {
                continue;
            }
            let (a, b) = plane.axes();
            for i in 0..4 {
                let outer = world_to_screen(bounds.outer_points[plane.index()][i], mvp, &self.ctx.viewport);
                if outer.distance(mouse) <= OUTER_ANCHOR_SIZE {
                    return (plane.flags(), Some(plane), Some(i));
                }
                let mid = world_to_screen(bounds.mid_points[plane.index()][i], mvp, &self.ctx.viewport);
                if mid.distance(mouse) <= MID_ANCHOR_SIZE {
                    let axis = if i % 2 == 1 { b } else { a };
                    return (axis.flag(), Some(plane), Some(i));
                }
            }
        }
        (AxisFlags::empty(), None, None)
    }

    fn begin_bounds_scale(&mut self) {
        self.begin_drag();
        let (Some(plane), Some(index)) = (self.ctx.bounds.active_plane, self.ctx.bounds.active_index)
        else {
            return;
        };

        let source = self.widget.source;
        let bounds = &mut self.ctx.bounds;
        let points = if self.widget.active_flags.plane().is_some() {
            bounds.outer_points[plane.index()]
        } else {
            bounds.mid_points[plane.index()]
        };
        bounds.anchor = source.transform_point3(points[index]);
        bounds.local_pivot = points[(index + 2) % 4];
        bounds.pivot = source.transform_point3(bounds.local_pivot);

        let normal = source
            .transform_vector3(Vec3::AXES[plane.index()])
            .normalize_or_zero();
        self.widget.translation_plane = build_plane(bounds.anchor, normal);
    }

    /// Returns the scaled box extent in world units
    fn continue_bounds_scale(&mut self, bounds: &[f32; 6], snap: Option<[f32; 3]>) -> Vec3 {
        let state = self.ctx.bounds;
        let reference = (state.anchor - state.pivot).abs();
        let delta = (self.drag_plane_hit() - state.pivot).abs();

        let flags = self.widget.active_flags;
        let axes: [Option<Axis>; 2] = match (flags.plane(), state.active_plane) {
            (Some(_), Some(plane)) => {
                let (a, b) = plane.axes();
                [Some(a), Some(b)]
            }
            _ => [flags.single_axis(), None],
        };

        let backup = self.ctx.backup_model;
        let mut scale = Mat4::IDENTITY;
        for axis in axes.into_iter().flatten() {
            let i = axis.index();
            let axis_dir = backup.col(i).truncate().abs();
            let dt = axis_dir.dot(reference);
            let mut ratio = 1.0;
            if dt > EPSILON {
                ratio = axis_dir.dot(delta) / dt;
            }

            if let Some(snap) = snap {
                let size = bounds[i + 3] - bounds[i];
                let length = math::snap(size * ratio, snap[i]);
                if size > EPSILON {
                    ratio = length / size;
                }
            }
            scale.col_mut(i)[i] *= ratio;
        }

        self.widget.result = backup
            * Mat4::from_translation(state.local_pivot)
            * scale
            * Mat4::from_translation(-state.local_pivot);
        self.widget.dirty = true;

        Vec3::from_array(std::array::from_fn(|i| {
            (bounds[i + 3] - bounds[i])
                * backup.col(i).truncate().length()
                * scale.col(i).truncate().length()
        }))
    }

    fn render_bounds(
        &mut self,
        mvp: &Mat4,
        hover: AxisFlags,
        hovered_plane: Option<Plane>,
        hovered_index: Option<usize>,
    ) {
        let state = self.ctx.bounds;
        let dragging = self.widget.is_active(Operation::BoundsScale) && !self.widget.active_flags.is_empty();

        // Least visible first so shared midpoints of the active plane end on top
        for plane in self.ctx.most_visible_planes.into_iter().rev() {
            if dragging && hovered_plane != Some(plane) {
                continue;
            }
            if !self.is_plane_visible(plane) {
                continue;
            }

            let p = plane.index();
            for i in 0..4 {
                let point = world_to_screen(state.outer_points[p][i], mvp, &self.ctx.viewport);
                let next = world_to_screen(state.outer_points[p][(i + 1) % 4], mvp, &self.ctx.viewport);
                self.render_dotted_line(point, next, TRAIL_COLOR);

                let pre_match = hovered_plane == Some(plane) && hovered_index == Some(i);
                let color = self.bound_color(pre_match && hover.plane().is_some());
                self.render_anchor(point, OUTER_ANCHOR_SIZE, color);

                let mid = world_to_screen(state.mid_points[p][i], mvp, &self.ctx.viewport);
                let color = self.bound_color(pre_match && hover.single_axis().is_some());
                self.render_anchor(mid, MID_ANCHOR_SIZE, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_points_xy() {
        let mut state = BoundsState::default();
        state.build_points(&[-1.0, -2.0, -3.0, 1.0, 2.0, 3.0]);

        let xy = state.outer_points[Plane::XY.index()];
        assert_eq!(
            xy,
            [
                Vec3::new(-1.0, -2.0, 0.0),
                Vec3::new(-1.0, 2.0, 0.0),
                Vec3::new(1.0, 2.0, 0.0),
                Vec3::new(1.0, -2.0, 0.0),
            ]
        );
        assert_eq!(state.mid_points[Plane::XY.index()][0], Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(state.mid_points[Plane::XY.index()][1], Vec3::new(0.0, 2.0, 0.0));

        let yz = state.outer_points[Plane::YZ.index()];
        assert_eq!(yz[0], Vec3::new(0.0, -2.0, -3.0));
        assert_eq!(yz[2], Vec3::new(0.0, 2.0, 3.0));
    }
}
