//! Geometry helpers for gizmo hit testing and matrix editing
//!
//! Everything works on glam types in an OpenGL-style clip space: a
//! right-handed view, NDC z in [-1, 1], and screen pixels with the origin
//! at the top left.

use crate::error::{GizmoError, GizmoResult, MatrixCheck};
use crate::types::{Axis, Rect};
use glam::{Mat4, Vec2, Vec3, Vec4};

pub const EPSILON: f32 = f32::EPSILON;

/// Picking ray in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ray {
    pub origin: Vec3,
    pub end: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Translation, rotation (degrees) and scale of a matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_deg: Vec3,
    pub scale: Vec3,
}

/// Cast a ray from the camera through a screen position
///
/// # Arguments
/// * `view_projection` - Camera projection times view
/// * `rect` - Screen rectangle the projection maps to
/// * `mouse` - Screen position in pixels
pub fn ray_cast(view_projection: &Mat4, rect: &Rect, mouse: Vec2) -> Ray {
    let inverse = view_projection.inverse();
    let local = (mouse - rect.min) / rect.size();
    let ndc = Vec2::new(local.x * 2.0 - 1.0, (1.0 - local.y) * 2.0 - 1.0);

    let unproject = |z: f32| {
        let p = inverse * Vec4::new(ndc.x, ndc.y, z, 1.0);
        p.truncate() / p.w
    };
    let origin = unproject(0.0);
    let end = unproject(1.0 - EPSILON);

    Ray {
        origin,
        end,
        direction: (end - origin).normalize_or_zero(),
    }
}

/// Plane through `point` with the given normal, as `(n, n . point)`
pub fn build_plane(point: Vec3, normal: Vec3) -> Vec4 {
    let n = normal.normalize_or_zero();
    n.extend(n.dot(point))
}

/// Distance of `point` above `plane`, positive on the normal side
pub fn signed_distance_to_plane(point: Vec3, plane: Vec4) -> f32 {
    plane.truncate().dot(point) - plane.w
}

/// Ray parameter of the ray/plane intersection, `-1.0` when parallel
pub fn intersect_ray_plane(ray: &Ray, plane: Vec4) -> f32 {
    let numerator = signed_distance_to_plane(ray.origin, plane);
    let denominator = plane.truncate().dot(ray.direction);
    if denominator.abs() < EPSILON {
        return -1.0;
    }
    -(numerator / denominator)
}

/// Closest point to `point` on the segment `a`-`b`
pub fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let segment = b - a;
    let length = segment.length();
    if length < EPSILON {
        return a;
    }
    let direction = segment / length;
    let t = direction.dot(point - a);
    if t < 0.0 {
        a
    } else if t > length {
        b
    } else {
        a + direction * t
    }
}

/// Project a world point to screen pixels
///
/// # Arguments
/// * `point` - Point in the space `matrix` transforms from
/// * `matrix` - Model-view-projection (or view-projection) matrix
/// * `rect` - Screen rectangle of the viewport
///
/// # Returns
/// Screen position. Points on the camera plane yield non-finite values.
pub fn world_to_screen(point: Vec3, matrix: &Mat4, rect: &Rect) -> Vec2 {
    let clip = *matrix * point.extend(1.0);
    let ndc = clip.truncate() * (0.5 / clip.w);
    let mut screen = Vec2::new(ndc.x + 0.5, 0.5 - ndc.y);
    screen *= rect.size();
    screen + rect.min
}

/// Length of a segment after projection, in aspect-corrected clip units
pub fn segment_length_clip_space(start: Vec3, end: Vec3, mvp: &Mat4, aspect: f32) -> f32 {
    let project = |p: Vec3| {
        let clip = *mvp * p.extend(1.0);
        let mut xy = Vec2::new(clip.x, clip.y);
        if clip.w.abs() > EPSILON {
            xy /= clip.w;
        }
        xy
    };
    let mut axis = project(end) - project(start);
    if aspect.abs() > EPSILON {
        axis.y /= aspect;
    }
    axis.length()
}

/// Snap to the nearest multiple of `step`
///
/// A step at or below epsilon disables snapping.
pub fn snap(value: f32, step: f32) -> f32 {
    if step <= EPSILON {
        return value;
    }
    let modulo = value % step;
    let ratio = modulo.abs() / step;
    if ratio < 0.5 {
        value - modulo
    } else if ratio > 0.5 {
        value - modulo + step * value.signum()
    } else {
        value
    }
}

pub fn snap_vec3(value: Vec3, steps: [f32; 3]) -> Vec3 {
    Vec3::new(
        snap(value.x, steps[0]),
        snap(value.y, steps[1]),
        snap(value.z, steps[2]),
    )
}

/// Split a matrix into translation, Euler rotation in degrees and scale
///
/// The rotation angles are the inverse of [`recompose_matrix`], which
/// applies Z, then Y, then X.
pub fn decompose_matrix(matrix: &Mat4) -> GizmoResult<Transform> {
    matrix.check_finite("matrix")?;

    let scale = axis_lengths(matrix);
    if let Some(axis) = (0..3).find(|&i| scale[i] < EPSILON) {
        return Err(GizmoError::invalid_matrix(format!(
            "{} axis has zero length",
            Axis::from_index(axis).flag().name()
        )));
    }
    let x = matrix.x_axis.truncate().normalize_or_zero();
    let y = matrix.y_axis.truncate().normalize_or_zero();
    let z = matrix.z_axis.truncate().normalize_or_zero();

    let rotation = Vec3::new(
        y.z.atan2(z.z),
        (-x.z).atan2((y.z * y.z + z.z * z.z).sqrt()),
        x.y.atan2(x.x),
    );

    Ok(Transform {
        translation: matrix.w_axis.truncate(),
        rotation_deg: Vec3::new(
            rotation.x.to_degrees(),
            rotation.y.to_degrees(),
            rotation.z.to_degrees(),
        ),
        scale,
    })
}

/// Build a matrix from translation, Euler rotation in degrees and scale
///
/// Scales too close to zero are replaced by 0.001 so the result stays
/// invertible.
pub fn recompose_matrix(translation: Vec3, rotation_deg: Vec3, scale: Vec3) -> Mat4 {
    let mut matrix = Mat4::IDENTITY;
    for axis in (0..3).rev() {
        matrix *= Mat4::from_axis_angle(Vec3::AXES[axis], rotation_deg[axis].to_radians());
    }

    let fix = |s: f32| if s.abs() < EPSILON { 0.001 } else { s };
    matrix.x_axis *= fix(scale.x);
    matrix.y_axis *= fix(scale.y);
    matrix.z_axis *= fix(scale.z);
    matrix.w_axis = translation.extend(1.0);
    matrix
}

/// Matrix with each of the first three columns normalized
pub(crate) fn normalize_axes(matrix: &Mat4) -> Mat4 {
    let mut m = *matrix;
    m.x_axis = m.x_axis.truncate().normalize_or_zero().extend(m.x_axis.w);
    m.y_axis = m.y_axis.truncate().normalize_or_zero().extend(m.y_axis.w);
    m.z_axis = m.z_axis.truncate().normalize_or_zero().extend(m.z_axis.w);
    m
}

pub(crate) fn axis_lengths(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        matrix.x_axis.truncate().length(),
        matrix.y_axis.truncate().length(),
        matrix.z_axis.truncate().length(),
    )
}

/// Invert a matrix, rejecting singular input
pub(crate) fn try_inverse(matrix: &Mat4, what: &'static str) -> GizmoResult<Mat4> {
    let det = matrix.determinant();
    if !det.is_finite() || det.abs() < EPSILON * EPSILON {
        return Err(GizmoError::singular_matrix(what));
    }
    Ok(matrix.inverse())
}
