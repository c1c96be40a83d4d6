//! Drawing seam between the simulation and whatever displays it.
//!
//! [`Surface`] is the small set of primitives the field needs. Hosts with a
//! persistent canvas can implement it directly. Immediate-mode hosts, which
//! rebuild every frame from scratch, draw through a [`TrailCanvas`] instead:
//! it keeps what was painted and fades it the way a translucent overlay would
//! fade a real canvas, and the host replays it each frame.

use cgmath::Vector2;

use crate::color::Rgba;

/// Primitives below this alpha are no longer visible and get dropped.
const MIN_VISIBLE_ALPHA: f32 = 0.02;

pub trait Surface {
    /// Current drawable size in pixels.
    fn size(&self) -> Vector2<f32>;

    /// Covers the whole surface with black at the given opacity.
    fn fade(&mut self, opacity: f32);

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba);

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba, line_width: f32);

    /// Draws `text` with its baseline starting at `position`.
    fn draw_text(&mut self, position: Vector2<f32>, text: &str, color: Rgba, font_size: f32);

    fn set_cursor_visible(&mut self, visible: bool);
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    FilledCircle {
        center: Vector2<f32>,
        radius: f32,
        color: Rgba,
    },
    StrokedCircle {
        center: Vector2<f32>,
        radius: f32,
        color: Rgba,
        line_width: f32,
    },
    Text {
        position: Vector2<f32>,
        text: String,
        color: Rgba,
        font_size: f32,
    },
}

impl Primitive {
    pub fn color(&self) -> Rgba {
        match self {
            Primitive::FilledCircle { color, .. }
            | Primitive::StrokedCircle { color, .. }
            | Primitive::Text { color, .. } => *color,
        }
    }

    fn color_mut(&mut self) -> &mut Rgba {
        match self {
            Primitive::FilledCircle { color, .. }
            | Primitive::StrokedCircle { color, .. }
            | Primitive::Text { color, .. } => color,
        }
    }
}

/// Retained display list with trail fading.
#[derive(Clone, Debug)]
pub struct TrailCanvas {
    size: Vector2<f32>,
    primitives: Vec<Primitive>,
    cursor_visible: bool,
}

impl TrailCanvas {
    pub fn new(size: Vector2<f32>) -> Self {
        Self {
            size,
            primitives: Vec::new(),
            cursor_visible: true,
        }
    }

    pub fn resize(&mut self, size: Vector2<f32>) {
        self.size = size;
    }

    /// Painted primitives, oldest first.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl Surface for TrailCanvas {
    fn size(&self) -> Vector2<f32> {
        self.size
    }

    fn fade(&mut self, opacity: f32) {
        let keep = 1.0 - opacity.clamp(0.0, 1.0);
        for primitive in &mut self.primitives {
            primitive.color_mut().alpha *= keep;
        }
        self.primitives
            .retain(|primitive| primitive.color().alpha >= MIN_VISIBLE_ALPHA);
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba) {
        self.primitives.push(Primitive::FilledCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vector2<f32>, radius: f32, color: Rgba, line_width: f32) {
        self.primitives.push(Primitive::StrokedCircle {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn draw_text(&mut self, position: Vector2<f32>, text: &str, color: Rgba, font_size: f32) {
        self.primitives.push(Primitive::Text {
            position,
            text: text.to_owned(),
            color,
            font_size,
        });
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use cgmath::vec2;

    #[test]
    fn fade_attenuates_then_drops() {
        let mut canvas = TrailCanvas::new(vec2(100.0, 100.0));
        canvas.fill_circle(vec2(50.0, 50.0), 5.0, Rgb::WHITE.into());

        canvas.fade(0.25);
        assert_eq!(canvas.primitives().len(), 1);
        assert!((canvas.primitives()[0].color().alpha - 0.75).abs() < 1e-6);

        // 0.75^14 is just under the visibility cutoff
        for _ in 0..13 {
            canvas.fade(0.25);
        }
        assert!(canvas.primitives().is_empty());
    }

    #[test]
    fn newer_primitives_outlive_older_ones() {
        let mut canvas = TrailCanvas::new(vec2(100.0, 100.0));
        canvas.draw_text(vec2(10.0, 20.0), "old", Rgb::WHITE.with_alpha(0.03), 16.0);
        canvas.fade(0.25);
        canvas.stroke_circle(vec2(1.0, 1.0), 3.0, Rgb::RED.into(), 2.0);
        canvas.fade(0.25);

        assert_eq!(canvas.primitives().len(), 1);
        assert!(matches!(canvas.primitives()[0], Primitive::StrokedCircle { .. }));
    }

    #[test]
    fn cursor_visibility_is_recorded() {
        let mut canvas = TrailCanvas::new(vec2(10.0, 10.0));
        assert!(canvas.cursor_visible());
        canvas.set_cursor_visible(false);
        assert!(!canvas.cursor_visible());
    }
}
