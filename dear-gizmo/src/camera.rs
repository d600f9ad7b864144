//! Camera state shared by all gizmos of a context

use crate::error::{GizmoResult, MatrixCheck};
use crate::math::try_inverse;
use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub is_ortho: bool,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    /// World-space camera right
    pub right: Vec3,
    pub up: Vec3,
    /// World-space backward vector (the camera looks down -forward)
    pub forward: Vec3,
    pub eye: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            is_ortho: false,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            right: Vec3::X,
            up: Vec3::Y,
            forward: Vec3::Z,
            eye: Vec3::ZERO,
        }
    }
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4, is_ortho: bool) -> GizmoResult<Self> {
        view.check_finite("view")?;
        projection.check_finite("projection")?;
        let inverse = try_inverse(&view, "view")?;

        Ok(Self {
            is_ortho,
            view,
            projection,
            view_projection: projection * view,
            right: inverse.x_axis.truncate(),
            up: inverse.y_axis.truncate(),
            forward: inverse.z_axis.truncate(),
            eye: inverse.w_axis.truncate(),
        })
    }

    /// Direction from the camera toward `point`
    pub fn direction_to(&self, point: Vec3) -> Vec3 {
        if self.is_ortho {
            -self.forward
        } else {
            (point - self.eye).normalize_or_zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_basis() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 100.0);
        let camera = Camera::new(view, proj, false).unwrap();

        assert_relative_eq!(camera.eye.z, 5.0, epsilon = 1e-5);
        assert_relative_eq!(camera.forward.z, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.direction_to(Vec3::ZERO).z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_singular_view() {
        assert!(Camera::new(Mat4::ZERO, Mat4::IDENTITY, false).is_err());
    }
}
