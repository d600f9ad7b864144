//! Error handling for dear-gizmo
//!
//! Errors are reported for inputs the gizmo cannot work with: empty
//! viewports, singular or non-finite matrices, and operations that need
//! extra data. Interaction itself never fails; a gizmo that cannot be
//! hovered simply stays idle.

use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Result type for gizmo operations
pub type GizmoResult<T> = Result<T, GizmoError>;

/// Errors that can occur in gizmo operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GizmoError {
    /// Viewport rectangle has no area
    #[error("Invalid viewport: {reason}")]
    InvalidViewport {
        /// The reason why the viewport is invalid
        reason: String,
    },

    /// Matrix data is unusable
    #[error("Invalid matrix data: {reason}")]
    InvalidMatrix {
        /// The reason why the matrix is invalid
        reason: String,
    },

    /// A matrix that must be inverted has a zero determinant
    #[error("Singular {what} matrix")]
    SingularMatrix {
        /// Which matrix was singular
        what: &'static str,
    },

    /// NaN or infinity in an input
    #[error("Non-finite values in {what}")]
    NonFinite {
        /// Which input held the non-finite value
        what: &'static str,
    },

    /// Invalid operation attempted
    #[error("Invalid operation: {operation}")]
    InvalidOperation {
        /// The invalid operation that was attempted
        operation: String,
    },
}

impl GizmoError {
    /// Create an invalid viewport error
    pub fn invalid_viewport(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid viewport: {}", reason);
        Self::InvalidViewport { reason }
    }

    /// Create an invalid matrix error
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid matrix data: {}", reason);
        Self::InvalidMatrix { reason }
    }

    /// Create a singular matrix error
    pub fn singular_matrix(what: &'static str) -> Self {
        #[cfg(feature = "tracing")]
        warn!("Singular {} matrix", what);
        Self::SingularMatrix { what }
    }

    /// Create a non-finite input error
    pub fn non_finite(what: &'static str) -> Self {
        #[cfg(feature = "tracing")]
        debug!("Non-finite values in {}", what);
        Self::NonFinite { what }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        #[cfg(feature = "tracing")]
        warn!("Invalid operation: {}", operation);
        Self::InvalidOperation { operation }
    }
}

/// Validation helpers for matrix inputs
pub(crate) trait MatrixCheck {
    fn check_finite(&self, what: &'static str) -> GizmoResult<()>;
}

impl MatrixCheck for glam::Mat4 {
    fn check_finite(&self, what: &'static str) -> GizmoResult<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GizmoError::non_finite(what))
        }
    }
}

/// Macro for trace-level logging (only when tracing feature is enabled)
#[macro_export]
#[doc(hidden)]
macro_rules! gizmo_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)*);
    };
}

/// Macro for debug-level logging (only when tracing feature is enabled)
#[macro_export]
#[doc(hidden)]
macro_rules! gizmo_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn test_error_display() {
        let err = GizmoError::invalid_viewport("zero width");
        assert_eq!(err.to_string(), "Invalid viewport: zero width");

        let err = GizmoError::singular_matrix("view");
        assert_eq!(err.to_string(), "Singular view matrix");

        let err = GizmoError::non_finite("model");
        assert_eq!(err.to_string(), "Non-finite values in model");

        let err = GizmoError::invalid_matrix("X axis has zero length");
        assert_eq!(err.to_string(), "Invalid matrix data: X axis has zero length");
    }

    #[test]
    fn test_matrix_check() {
        assert!(Mat4::IDENTITY.check_finite("model").is_ok());

        let mut m = Mat4::IDENTITY;
        m.w_axis.x = f32::NAN;
        assert_eq!(
            m.check_finite("model"),
            Err(GizmoError::NonFinite { what: "model" })
        );
    }
}
