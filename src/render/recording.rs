use super::Canvas;
use super::Color;
use super::Segment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    StrokeColor(Color),
    Stroke,
    FillColor(Color),
    FillRect(Rect),
}

/// A canvas that only remembers what it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    ops: Vec<DrawOp>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Every segment that ended up stroked, in drawing order. Segments of a path that was
    /// abandoned by `begin_path` without a `stroke` are left out.
    pub fn stroked_segments(&self) -> Vec<Segment> {
        let mut stroked = Vec::new();
        let mut path = Vec::new();
        let mut cursor = None;

        for op in &self.ops {
            match *op {
                DrawOp::BeginPath => {
                    path.clear();
                    cursor = None;
                }
                DrawOp::MoveTo(x, y) => cursor = Some((x, y)),
                DrawOp::LineTo(x, y) => {
                    if let Some(from) = cursor {
                        path.push(Segment { from, to: (x, y) });
                    }
                    cursor = Some((x, y));
                }
                DrawOp::Stroke => stroked.extend(path.iter().copied()),
                _ => {}
            }
        }

        stroked
    }

    /// Every filled rectangle along with the fill color in effect when it was drawn.
    pub fn fills(&self) -> Vec<(Color, Rect)> {
        let mut color = Color::BLACK;

        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::FillColor(c) => {
                    color = c;
                    None
                }
                DrawOp::FillRect(rect) => Some((color, rect)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for Recording {
    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(DrawOp::FillColor(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(Rect { x, y, w, h }));
    }
}

#[cfg(test)]
mod test {
    use super::Recording;
    use crate::render::Canvas;
    use crate::render::Segment;

    #[test]
    fn unstroked_paths_are_dropped() {
        let mut rec = Recording::new();

        rec.begin_path();
        rec.move_to(0.0, 0.0);
        rec.line_to(1.0, 0.0);
        rec.begin_path();
        rec.move_to(2.0, 2.0);
        rec.line_to(2.0, 4.0);
        rec.line_to(3.0, 4.0);
        rec.stroke();

        assert_eq!(
            rec.stroked_segments(),
            vec![
                Segment { from: (2.0, 2.0), to: (2.0, 4.0) },
                Segment { from: (2.0, 4.0), to: (3.0, 4.0) },
            ]
        );
    }
}
