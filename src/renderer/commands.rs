//! Draw-command model
//!
//! The scene builders emit a flat list of these in paint order. Hosts map
//! them onto whatever 2D surface they have (canvas, wgpu quads, a terminal).

use glam::Vec2;
use serde::Serialize;

use crate::Color;
use crate::sim::collision::Rect;

/// Horizontal anchoring of a text command's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One paint operation in field coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCmd {
    FillRect {
        rect: Rect,
        color: Color,
        /// Blur radius of the colored glow, 0 for none
        glow: f32,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
    /// Rectangle rotated by `angle` radians about its center
    RotatedRect {
        rect: Rect,
        angle: f32,
        color: Color,
        glow: f32,
    },
}

/// Everything painted for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Translation applied to the whole frame (glitch shake)
    pub offset: Vec2,
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.glow_fill(rect, color, 0.0);
    }

    pub fn glow_fill(&mut self, rect: Rect, color: Color, glow: f32) {
        self.commands.push(DrawCmd::FillRect { rect, color, glow });
    }

    pub fn stroke(&mut self, rect: Rect, color: Color, line_width: f32) {
        self.commands.push(DrawCmd::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color, glow: f32) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
            glow,
        });
    }

    pub fn rotated(&mut self, rect: Rect, angle: f32, color: Color, glow: f32) {
        self.commands.push(DrawCmd::RotatedRect {
            rect,
            angle,
            color,
            glow,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size: style.size,
            bold: style.bold,
            align: style.align,
            color: style.color,
        });
    }

    /// All text strings in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// Font size, weight, anchoring and color for a text command
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub align: TextAlign,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            align: TextAlign::Center,
            color,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    #[test]
    fn test_text_style_builder() {
        let style = TextStyle::new(14.0, palette::TEXT)
            .bold()
            .align(TextAlign::Right);
        assert!(style.bold);
        assert_eq!(style.align, TextAlign::Right);
        assert_eq!(style.size, 14.0);
    }

    #[test]
    fn test_frame_collects_texts_in_order() {
        let mut frame = Frame::new();
        frame.fill(Rect::new(0.0, 0.0, 1.0, 1.0), palette::WALL);
        frame.text("first", Vec2::ZERO, TextStyle::new(12.0, palette::TEXT));
        frame.text("second", Vec2::ZERO, TextStyle::new(12.0, palette::TEXT));
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["first", "second"]);
        assert!(frame.contains_text("sec"));
        assert!(!frame.contains_text("third"));
    }

    #[test]
    fn test_commands_serialize_tagged() {
        let mut frame = Frame::new();
        frame.stroke(Rect::new(1.0, 2.0, 3.0, 4.0), palette::PLAYER, 2.0);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["commands"][0]["op"], "stroke_rect");
        assert_eq!(json["commands"][0]["line_width"], 2.0);
    }
}
