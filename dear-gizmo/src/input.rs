//! Per-frame input snapshot
//!
//! The host fills a [`FrameInput`] once per frame from its own input state
//! and hands it to [`GizmoContext::new_frame`](crate::GizmoContext::new_frame).

use crate::types::Rect;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
}

/// Host input state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Mouse position in screen pixels
    pub mouse_pos: Vec2,
    /// Button held, indexed by [`MouseButton`]
    pub mouse_down: [bool; 2],
    /// Button went down this frame
    pub mouse_clicked: [bool; 2],
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Whether the window owning the draw list is hovered
    pub window_hovered: bool,
    /// Window content region, used as the viewport unless overridden
    pub content_rect: Rect,
}

impl FrameInput {
    pub fn new(content_rect: Rect) -> Self {
        Self {
            delta_time: 1.0 / 60.0,
            window_hovered: true,
            content_rect,
            ..Default::default()
        }
    }

    pub fn with_mouse(mut self, pos: impl Into<Vec2>) -> Self {
        self.mouse_pos = pos.into();
        self
    }

    /// Press `button` this frame (down and clicked)
    pub fn pressed(mut self, button: MouseButton) -> Self {
        self.mouse_down[button as usize] = true;
        self.mouse_clicked[button as usize] = true;
        self
    }

    /// Keep `button` held without a new click
    pub fn held(mut self, button: MouseButton) -> Self {
        self.mouse_down[button as usize] = true;
        self.mouse_clicked[button as usize] = false;
        self
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.mouse_down[button as usize]
    }

    pub fn is_clicked(&self, button: MouseButton) -> bool {
        self.mouse_clicked[button as usize]
    }
}

/// Derives click transitions for hosts that only report held buttons
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous_down: [bool; 2],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(
        &mut self,
        content_rect: Rect,
        mouse_pos: Vec2,
        mouse_down: [bool; 2],
        delta_time: f32,
        window_hovered: bool,
    ) -> FrameInput {
        let mouse_clicked = [
            mouse_down[0] && !self.previous_down[0],
            mouse_down[1] && !self.previous_down[1],
        ];
        self.previous_down = mouse_down;
        FrameInput {
            mouse_pos,
            mouse_down,
            mouse_clicked,
            delta_time,
            window_hovered,
            content_rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_clicks_once() {
        let rect = Rect::from_pos_size([0.0, 0.0], [100.0, 100.0]);
        let mut tracker = InputTracker::new();

        let first = tracker.next(rect, Vec2::ZERO, [true, false], 0.016, true);
        assert!(first.is_clicked(MouseButton::Left));

        let second = tracker.next(rect, Vec2::ZERO, [true, false], 0.016, true);
        assert!(!second.is_clicked(MouseButton::Left));
        assert!(second.is_down(MouseButton::Left));

        tracker.next(rect, Vec2::ZERO, [false, false], 0.016, true);
        let again = tracker.next(rect, Vec2::ZERO, [true, true], 0.016, true);
        assert!(again.is_clicked(MouseButton::Left));
        assert!(again.is_clicked(MouseButton::Right));
    }

    #[test]
    fn test_builders() {
        let input = FrameInput::new(Rect::default())
            .with_mouse([3.0, 4.0])
            .pressed(MouseButton::Right);
        assert_eq!(input.mouse_pos, Vec2::new(3.0, 4.0));
        assert!(input.is_down(MouseButton::Right));
        assert!(input.is_clicked(MouseButton::Right));
        assert!(!input.is_down(MouseButton::Left));
        assert!(!input.held(MouseButton::Right).is_clicked(MouseButton::Right));
    }
}
