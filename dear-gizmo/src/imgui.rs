//! Dear ImGui integration
//!
//! Implements [`DrawList`] for the window draw list, fills [`FrameInput`]
//! from a `Ui`, and provides small editors for [`Style`].
//!
//! ```no_run
//! # fn frame(ui: &dear_imgui_rs::Ui, ctx: &mut dear_gizmo::GizmoContext, model: &mut glam::Mat4) -> dear_gizmo::GizmoResult<()> {
//! use dear_gizmo::{FrameInput, Mode, Operation};
//!
//! ctx.new_frame(FrameInput::from_ui(ui));
//! let mut draw_list = ui.get_window_draw_list();
//! ctx.manipulate("model", Mode::Local, Operation::Translate, model, None, &mut draw_list)?;
//! # Ok(())
//! # }
//! ```

use dear_imgui_rs::{DrawListMut, MouseButton as ImMouseButton, Ui};
use glam::Vec2;

use crate::context::GizmoContext;
use crate::draw::DrawList;
use crate::input::FrameInput;
use crate::style::{ColorU32, Style, StyleColor, StylePreset};
use crate::types::Rect;

impl DrawList for DrawListMut<'_> {
    fn add_line(&mut self, p1: Vec2, p2: Vec2, color: ColorU32, thickness: f32) {
        DrawListMut::add_line(self, p1.to_array(), p2.to_array(), color)
            .thickness(thickness)
            .build();
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32, thickness: f32) {
        DrawListMut::add_circle(self, center.to_array(), radius, color)
            .num_segments(segments as i32)
            .thickness(thickness)
            .build();
    }

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32) {
        DrawListMut::add_circle(self, center.to_array(), radius, color)
            .num_segments(segments as i32)
            .filled(true)
            .build();
    }

    fn add_triangle_filled(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: ColorU32) {
        DrawListMut::add_triangle(self, p1.to_array(), p2.to_array(), p3.to_array(), color)
            .filled(true)
            .build();
    }

    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: ColorU32) {
        if points.len() < 3 {
            return;
        }
        let points: Vec<[f32; 2]> = points.iter().map(|p| p.to_array()).collect();
        DrawListMut::add_polyline(self, points, color).filled(true).build();
    }

    fn add_polyline(&mut self, points: &[Vec2], color: ColorU32, closed: bool, thickness: f32) {
        if points.len() < 2 {
            return;
        }
        let mut points: Vec<[f32; 2]> = points.iter().map(|p| p.to_array()).collect();
        if closed {
            points.push(points[0]);
        }
        DrawListMut::add_polyline(self, points, color)
            .thickness(thickness)
            .build();
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorU32) {
        DrawListMut::add_rect(self, min.to_array(), max.to_array(), color)
            .filled(true)
            .build();
    }

    fn add_text(&mut self, pos: Vec2, color: ColorU32, text: &str) {
        DrawListMut::add_text(self, pos.to_array(), color, text);
    }
}

impl FrameInput {
    /// Snapshot the mouse and the current window from `ui`
    ///
    /// The content rect starts at the cursor and spans the available
    /// region, so call this where the 3D view is laid out.
    pub fn from_ui(ui: &Ui) -> Self {
        let io = ui.io();
        Self {
            mouse_pos: Vec2::from(io.mouse_pos()),
            mouse_down: [
                ui.is_mouse_down(ImMouseButton::Left),
                ui.is_mouse_down(ImMouseButton::Right),
            ],
            mouse_clicked: [
                ui.is_mouse_clicked(ImMouseButton::Left),
                ui.is_mouse_clicked(ImMouseButton::Right),
            ],
            delta_time: io.delta_time(),
            window_hovered: ui.is_window_hovered(),
            content_rect: Rect::from_pos_size(ui.cursor_screen_pos(), ui.content_region_avail()),
        }
    }
}

/// Preset combo; returns `true` when a preset was applied
pub fn show_style_selector(ui: &Ui, label: &str, current: &mut usize, style: &mut Style) -> bool {
    let names: Vec<&str> = StylePreset::ALL.iter().map(|preset| preset.name()).collect();
    if !ui.combo_simple_string(label, current, &names) {
        return false;
    }
    match StylePreset::ALL.get(*current) {
        Some(&preset) => {
            style.apply_preset(preset);
            true
        }
        None => false,
    }
}

/// Editor for every field of `style`; returns `true` on any change
pub fn show_style_editor(ui: &Ui, style: &mut Style) -> bool {
    let mut changed = false;

    let mut preset = StylePreset::ALL
        .iter()
        .position(|&preset| Style::preset(preset).colors == style.colors)
        .unwrap_or_default();
    changed |= show_style_selector(ui, "Preset", &mut preset, style);

    changed |= ui
        .drag_float_config("Alpha")
        .range(0.0, 1.0)
        .speed(0.005)
        .build(ui, &mut style.alpha);
    changed |= ui
        .drag_float_config("Gizmo scale")
        .range(0.01, 1.0)
        .speed(0.001)
        .build(ui, &mut style.gizmo_scale);
    changed |= ui
        .drag_float_config("Ring thickness")
        .range(0.5, 10.0)
        .speed(0.05)
        .build(ui, &mut style.rotation_ring_thickness);

    ui.separator();
    for color in StyleColor::ALL {
        changed |= ui.color_edit4(color.name(), &mut style.colors[color as usize]);
    }
    changed
}

/// Interaction state as plain text, for debugging
pub fn show_context_info(ui: &Ui, ctx: &GizmoContext) {
    let snapshot = format!("{:#?}", ctx.snapshot());
    for line in snapshot.lines() {
        ui.text(line);
    }
}
