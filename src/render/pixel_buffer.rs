use super::Canvas;
use super::Color;
use super::Segment;

/// An RGB framebuffer that rasterizes canvas calls.
///
/// Coordinates follow the usual canvas convention: pixel (x, y) covers the square from (x, y) to
/// (x + 1, y + 1). A one pixel wide line along `x = k` is therefore centered on the boundary
/// between pixels `k - 1` and `k`, and is snapped to pixel `k - 1`.
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,

    stroke_color: Color,
    fill_color: Color,

    /// Segments added since the last `begin_path`
    path: Vec<Segment>,
    cursor: Option<(f64, f64)>,

    /// Set by anything that touches `pixels`
    dirty: bool,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            path: Vec::new(),
            cursor: None,
            dirty: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        self.pixels[y * self.width + x]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Whether the buffer changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }

        self.pixels[y as usize * self.width + x as usize] = color;
    }

    fn rasterize(&mut self, seg: Segment, color: Color) {
        let Segment {
            from: (x0, y0),
            to: (x1, y1),
        } = seg;

        if x0 == x1 {
            let x = (x0 - 0.5).floor() as i64;
            let (lo, hi) = (y0.min(y1).floor() as i64, y0.max(y1).ceil() as i64);

            for y in lo..hi {
                self.plot(x, y, color);
            }
        } else if y0 == y1 {
            let y = (y0 - 0.5).floor() as i64;
            let (lo, hi) = (x0.min(x1).floor() as i64, x0.max(x1).ceil() as i64);

            for x in lo..hi {
                self.plot(x, y, color);
            }
        } else {
            // diagonal: sample along the longer axis
            let (dx, dy) = (x1 - x0, y1 - y0);
            let steps = dx.abs().max(dy.abs()).ceil() as i64;

            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let (x, y) = (x0 + dx * t, y0 + dy * t);

                self.plot(x.floor() as i64, y.floor() as i64, color);
            }
        }
    }
}

impl Canvas for PixelBuffer {
    fn begin_path(&mut self) {
        self.path.clear();
        self.cursor = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(from) = self.cursor {
            self.path.push(Segment { from, to: (x, y) });
        }

        self.cursor = Some((x, y));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn stroke(&mut self) {
        let color = self.stroke_color;
        let path = std::mem::take(&mut self.path);

        for &seg in &path {
            self.rasterize(seg, color);
        }

        // a path can be stroked more than once
        self.path = path;
        self.dirty = true;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (x0, x1) = (x.min(x + w).round() as i64, x.max(x + w).round() as i64);
        let (y0, y1) = (y.min(y + h).round() as i64, y.max(y + h).round() as i64);

        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(self.width as i64);
        let y1 = y1.min(self.height as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                self.plot(px, py, self.fill_color);
            }
        }

        self.dirty = true;
    }
}

#[cfg(test)]
mod test {
    use super::PixelBuffer;
    use crate::render::CanvasRenderer;
    use crate::render::Color;
    use crate::render::RenderConfig;
    use crate::view::GridBufferView;

    const GRID: Color = Color::rgb(0xCC, 0xCC, 0xCC);
    const DEAD: Color = Color::WHITE;
    const ALIVE: Color = Color::BLACK;

    fn config(cell_size: u32) -> RenderConfig {
        RenderConfig {
            cell_size,
            grid_color: GRID,
            dead_color: DEAD,
            alive_color: ALIVE,
        }
    }

    fn ascii(fb: &PixelBuffer) -> String {
        let rows: Vec<String> = (0..fb.height())
            .map(|y| {
                (0..fb.width())
                    .map(|x| match fb.pixel(x, y) {
                        GRID => '+',
                        ALIVE => '#',
                        DEAD => '.',
                        _ => '?',
                    })
                    .collect()
            })
            .collect();

        rows.join("\n")
    }

    fn render(cell_size: u32, width: usize, height: usize, cells: &[u8]) -> PixelBuffer {
        let renderer = CanvasRenderer::new(config(cell_size), width, height);
        let (cw, ch) = renderer.canvas_size();
        let mut fb = PixelBuffer::new(cw, ch, Color::rgb(1, 2, 3));
        let view = GridBufferView::new(cells, width, height).unwrap();

        renderer.draw(&mut fb, &view);
        fb
    }

    #[test]
    fn small_grid() {
        let fb = render(1, 3, 2, &[0, 1, 0, 0, 0, 0]);

        insta::assert_snapshot!(ascii(&fb), @r"
        +++++++
        +.+#+.+
        +++++++
        +.+.+.+
        +++++++
        ");
    }

    #[test]
    fn larger_cells() {
        let fb = render(2, 2, 2, &[1, 0, 0, 1]);

        insta::assert_snapshot!(ascii(&fb), @r"
        +++++++
        +##+..+
        +##+..+
        +++++++
        +..+##+
        +..+##+
        +++++++
        ");
    }

    #[test]
    fn every_pixel_is_covered() {
        let fb = render(3, 5, 4, &[0; 20]);

        assert!(fb.pixels().iter().all(|&c| c == GRID || c == DEAD));
    }

    #[test]
    fn dirty_tracking() {
        let mut fb = render(1, 1, 1, &[1]);

        assert!(fb.take_dirty());
        assert!(!fb.take_dirty());
    }
}
