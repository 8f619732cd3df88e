use super::{BlendMode, Rgba, Surface};

// Additive blend: dst = min(255, dst + src * alpha)
#[inline]
fn additive_blend(buf: &mut [u8], off: usize, c: Rgba) {
    buf[off] = (buf[off] as f64 + c.r as f64 * c.a).min(255.0) as u8;
    buf[off + 1] = (buf[off + 1] as f64 + c.g as f64 * c.a).min(255.0) as u8;
    buf[off + 2] = (buf[off + 2] as f64 + c.b as f64 * c.a).min(255.0) as u8;
}

// Source-over: dst = dst * (1 - alpha) + src * alpha
#[inline]
fn source_over_blend(buf: &mut [u8], off: usize, c: Rgba) {
    let inv = 1.0 - c.a;
    buf[off] = (buf[off] as f64 * inv + c.r as f64 * c.a).round().min(255.0) as u8;
    buf[off + 1] = (buf[off + 1] as f64 * inv + c.g as f64 * c.a).round().min(255.0) as u8;
    buf[off + 2] = (buf[off + 2] as f64 * inv + c.b as f64 * c.a).round().min(255.0) as u8;
}

/// RGBA8 framebuffer implementing [`Surface`].
pub struct Canvas {
    width: usize,
    height: usize,
    buf: Vec<u8>,
    blend: BlendMode,
    /// Subpaths of the path under construction.
    path: Vec<Vec<(f64, f64)>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buf: vec![0; width * height * 4],
            blend: BlendMode::SourceOver,
            path: Vec::new(),
        }
    }

    /// Change the pixel dimensions. Contents are cleared to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.buf.clear();
        self.buf.resize(width * height * 4, 0);
    }

    #[cfg(test)]
    pub fn rgba(&self) -> &[u8] {
        &self.buf
    }

    #[cfg(test)]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// RGB of one pixel, `None` outside the canvas.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y * self.width + x) * 4;
        Some([self.buf[off], self.buf[off + 1], self.buf[off + 2]])
    }

    /// Convert to the 0RGB `u32` layout minifb expects.
    pub fn write_argb(&self, out: &mut Vec<u32>) {
        out.resize(self.width * self.height, 0);
        for (i, pixel) in self.buf.chunks_exact(4).enumerate() {
            out[i] = (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32;
        }
    }

    #[inline]
    fn plot(&mut self, x: isize, y: isize, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let off = (y as usize * self.width + x as usize) * 4;
        match self.blend {
            BlendMode::SourceOver => source_over_blend(&mut self.buf, off, color),
            BlendMode::Lighter => additive_blend(&mut self.buf, off, color),
        }
    }

    fn plot_brush(&mut self, x: isize, y: isize, radius: isize, color: Rgba) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                self.plot(x + dx, y + dy, color);
            }
        }
    }

    /// Bresenham line. `skip_first` leaves the start pixel alone so joined
    /// segments do not double-blend their shared vertex.
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), radius: isize, color: Rgba, skip_first: bool) {
        let (x0, y0) = (from.0.floor() as isize, from.1.floor() as isize);
        let (x1, y1) = (to.0.floor() as isize, to.1.floor() as isize);
        let mut cx = x0;
        let mut cy = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut first = true;

        loop {
            if !(first && skip_first) {
                self.plot_brush(cx, cy, radius, color);
            }
            first = false;
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let x0 = x.max(0.0).floor() as usize;
        let y0 = y.max(0.0).floor() as usize;
        let x1 = ((x + w).max(0.0).ceil() as usize).min(self.width);
        let y1 = ((y + h).max(0.0).ceil() as usize).min(self.height);
        if color.a >= 1.0 && self.blend == BlendMode::SourceOver {
            for py in y0..y1 {
                for px in x0..x1 {
                    let off = (py * self.width + px) * 4;
                    self.buf[off..off + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
                }
            }
        } else {
            for py in y0..y1 {
                for px in x0..x1 {
                    self.plot(px as isize, py as isize, color);
                }
            }
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(sub) => sub.push((x, y)),
            // Canvas semantics: a leading line_to acts as move_to.
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self, color: Rgba, line_width: f64) {
        if color.a <= 0.0 || line_width <= 0.0 {
            return;
        }
        let radius = ((line_width - 1.0) / 2.0).round().max(0.0) as isize;
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for (k, seg) in sub.windows(2).enumerate() {
                self.draw_line(seg[0], seg[1], radius, color, k > 0);
            }
        }
        self.path = path;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }
}
