//! Draw-list seam
//!
//! Gizmos emit 2D primitives in screen pixels through [`DrawList`]. The
//! `imgui` feature implements it for `dear_imgui_rs::DrawListMut`;
//! [`DrawCommands`] records primitives for headless use and tests.

use crate::style::ColorU32;
use glam::Vec2;

/// Sink for screen-space primitives
pub trait DrawList {
    fn add_line(&mut self, p1: Vec2, p2: Vec2, color: ColorU32, thickness: f32);

    fn add_circle(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32, thickness: f32);

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32);

    fn add_triangle_filled(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: ColorU32);

    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: ColorU32);

    fn add_polyline(&mut self, points: &[Vec2], color: ColorU32, closed: bool, thickness: f32);

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorU32);

    fn add_text(&mut self, pos: Vec2, color: ColorU32, text: &str);
}

impl<D: DrawList + ?Sized> DrawList for &mut D {
    fn add_line(&mut self, p1: Vec2, p2: Vec2, color: ColorU32, thickness: f32) {
        (**self).add_line(p1, p2, color, thickness)
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32, thickness: f32) {
        (**self).add_circle(center, radius, color, segments, thickness)
    }

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32) {
        (**self).add_circle_filled(center, radius, color, segments)
    }

    fn add_triangle_filled(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: ColorU32) {
        (**self).add_triangle_filled(p1, p2, p3, color)
    }

    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: ColorU32) {
        (**self).add_convex_poly_filled(points, color)
    }

    fn add_polyline(&mut self, points: &[Vec2], color: ColorU32, closed: bool, thickness: f32) {
        (**self).add_polyline(points, color, closed, thickness)
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorU32) {
        (**self).add_rect_filled(min, max, color)
    }

    fn add_text(&mut self, pos: Vec2, color: ColorU32, text: &str) {
        (**self).add_text(pos, color, text)
    }
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Line {
        p1: Vec2,
        p2: Vec2,
        color: ColorU32,
        thickness: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: ColorU32,
        segments: u32,
        thickness: f32,
        filled: bool,
    },
    Triangle {
        points: [Vec2; 3],
        color: ColorU32,
    },
    ConvexPoly {
        points: Vec<Vec2>,
        color: ColorU32,
    },
    Polyline {
        points: Vec<Vec2>,
        color: ColorU32,
        closed: bool,
        thickness: f32,
    },
    RectFilled {
        min: Vec2,
        max: Vec2,
        color: ColorU32,
    },
    Text {
        pos: Vec2,
        color: ColorU32,
        text: String,
    },
}

/// Recording [`DrawList`]
#[derive(Debug, Clone, Default)]
pub struct DrawCommands {
    pub commands: Vec<DrawCmd>,
}

impl DrawCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.commands.iter()
    }

    /// Recorded text strings in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Replay the recording into another draw list
    pub fn replay(&self, target: &mut impl DrawList) {
        for cmd in &self.commands {
            match cmd {
                DrawCmd::Line {
                    p1,
                    p2,
                    color,
                    thickness,
                } => target.add_line(*p1, *p2, *color, *thickness),
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                    segments,
                    thickness,
                    filled,
                } => {
                    if *filled {
                        target.add_circle_filled(*center, *radius, *color, *segments)
                    } else {
                        target.add_circle(*center, *radius, *color, *segments, *thickness)
                    }
                }
                DrawCmd::Triangle { points, color } => {
                    target.add_triangle_filled(points[0], points[1], points[2], *color)
                }
                DrawCmd::ConvexPoly { points, color } => target.add_convex_poly_filled(points, *color),
                DrawCmd::Polyline {
                    points,
                    color,
                    closed,
                    thickness,
                } => target.add_polyline(points, *color, *closed, *thickness),
                DrawCmd::RectFilled { min, max, color } => target.add_rect_filled(*min, *max, *color),
                DrawCmd::Text { pos, color, text } => target.add_text(*pos, *color, text),
            }
        }
    }
}

impl DrawList for DrawCommands {
    fn add_line(&mut self, p1: Vec2, p2: Vec2, color: ColorU32, thickness: f32) {
        self.commands.push(DrawCmd::Line {
            p1,
            p2,
            color,
            thickness,
        });
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32, thickness: f32) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            segments,
            thickness,
            filled: false,
        });
    }

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: ColorU32, segments: u32) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            segments,
            thickness: 0.0,
            filled: true,
        });
    }

    fn add_triangle_filled(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: ColorU32) {
        self.commands.push(DrawCmd::Triangle {
            points: [p1, p2, p3],
            color,
        });
    }

    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: ColorU32) {
        self.commands.push(DrawCmd::ConvexPoly {
            points: points.to_vec(),
            color,
        });
    }

    fn add_polyline(&mut self, points: &[Vec2], color: ColorU32, closed: bool, thickness: f32) {
        self.commands.push(DrawCmd::Polyline {
            points: points.to_vec(),
            color,
            closed,
            thickness,
        });
    }

    fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: ColorU32) {
        self.commands.push(DrawCmd::RectFilled { min, max, color });
    }

    fn add_text(&mut self, pos: Vec2, color: ColorU32, text: &str) {
        self.commands.push(DrawCmd::Text {
            pos,
            color,
            text: text.to_owned(),
        });
    }
}
