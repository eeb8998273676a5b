/// Software raster surface: an RGB pixel buffer with 2D drawing primitives
use nalgebra::Point2;
use rcube_core::Rgb;

/// A `width x height` grid of pixels. Pixel `(x, y)` covers the square from
/// `(x, y)` to `(x + 1, y + 1)`; shapes are sampled at pixel centres and
/// anything outside the grid is clipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fill a polygon with the even-odd rule.
    pub fn fill_polygon(&mut self, points: &[Point2<f32>], color: Rgb) {
        if points.len() < 3 || !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        let first_row = (min_y.floor().max(0.0)) as usize;
        let last_row = (max_y.ceil().min(self.height as f32)).max(0.0) as usize;

        let mut crossings = Vec::with_capacity(points.len());
        for row in first_row..last_row {
            let yc = row as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = &points[(i + 1) % points.len()];
                if (a.y > yc) != (b.y > yc) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                // Pixels whose centre lies in [span[0], span[1])
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).ceil() as i64;
                self.fill_span(row, start, end, color);
            }
        }
    }

    fn fill_span(&mut self, row: usize, start: i64, end: i64, color: Rgb) {
        let start = start.clamp(0, self.width as i64) as usize;
        let end = end.clamp(0, self.width as i64) as usize;
        if start < end {
            let offset = row * self.width;
            self.pixels[offset + start..offset + end].fill(color);
        }
    }

    /// Outline a closed polygon with one-pixel lines
    pub fn stroke_polygon(&mut self, points: &[Point2<f32>], color: Rgb) {
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.draw_line(*a, b, color, 1);
        }
    }

    /// Bresenham line stamped with a square pen `width` pixels wide
    pub fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Rgb, width: u32) {
        if ![from.x, from.y, to.x, to.y].iter().all(|c| c.is_finite()) {
            return;
        }
        let width = i64::from(width.max(1));
        let lo = -(width - 1) / 2;
        let hi = width / 2;

        // Only walk the part of the segment the pen can still reach
        let pad = (hi + 1) as f32;
        let bounds = (
            Point2::new(-pad, -pad),
            Point2::new(self.width as f32 + pad, self.height as f32 + pad),
        );
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };

        let (mut x, mut y) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            for py in y + lo..=y + hi {
                for px in x + lo..=x + hi {
                    self.set_pixel(px, py, color);
                }
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill every pixel whose centre lies within `radius` of `center`
    pub fn fill_circle(&mut self, center: Point2<f32>, radius: f32, color: Rgb) {
        if !(center.x.is_finite() && center.y.is_finite() && radius.is_finite()) || radius < 0.0 {
            return;
        }
        let r2 = radius * radius;
        let top = ((center.y - radius).floor() as i64).max(0);
        let bottom = ((center.y + radius).ceil() as i64).min(self.height as i64 - 1);
        let left = ((center.x - radius).floor() as i64).max(0);
        let right = ((center.x + radius).ceil() as i64).min(self.width as i64 - 1);
        for y in top..=bottom {
            let dy = y as f32 + 0.5 - center.y;
            for x in left..=right {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

/// Cohen-Sutherland: the part of `from -> to` inside the `(min, max)` box, if any.
///
/// Clipped ends land exactly on the box edge, so far-away endpoints do not
/// smear the visible part of the line.
fn clip_segment(
    from: Point2<f32>,
    to: Point2<f32>,
    (min, max): (Point2<f32>, Point2<f32>),
) -> Option<(Point2<f32>, Point2<f32>)> {
    let widen = |p: Point2<f32>| Point2::new(f64::from(p.x), f64::from(p.y));
    let narrow = |p: Point2<f64>| Point2::new(p.x as f32, p.y as f32);
    let (min, max) = (widen(min), widen(max));
    let (start, stop) = (widen(from), widen(to));
    let d = stop - start;
    let outcode = |p: &Point2<f64>| {
        let mut code = 0;
        if p.x < min.x {
            code |= LEFT;
        } else if p.x > max.x {
            code |= RIGHT;
        }
        if p.y < min.y {
            code |= ABOVE;
        } else if p.y > max.y {
            code |= BELOW;
        }
        code
    };

    let (mut a, mut b) = (start, stop);
    // Each pass pins one coordinate of one end to the box
    for _ in 0..8 {
        let (code_a, code_b) = (outcode(&a), outcode(&b));
        if code_a | code_b == 0 {
            return Some((narrow(a), narrow(b)));
        }
        if code_a & code_b != 0 {
            return None;
        }
        let (code, end) = if code_a != 0 {
            (code_a, &mut a)
        } else {
            (code_b, &mut b)
        };
        *end = if code & LEFT != 0 {
            Point2::new(min.x, start.y + d.y * (min.x - start.x) / d.x)
        } else if code & RIGHT != 0 {
            Point2::new(max.x, start.y + d.y * (max.x - start.x) / d.x)
        } else if code & ABOVE != 0 {
            Point2::new(start.x + d.x * (min.y - start.y) / d.y, min.y)
        } else {
            Point2::new(start.x + d.x * (max.y - start.y) / d.y, max.y)
        };
    }
    None
}
