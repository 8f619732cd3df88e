mod canvas;
#[cfg(test)]
pub mod recording;

pub use canvas::Canvas;

/// Straight-alpha colour: 8-bit RGB plus alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self { r: rgb[0], g: rgb[1], b: rgb[2], a: 1.0 }
    }

    pub fn with_alpha(rgb: [u8; 3], a: f64) -> Self {
        Self { r: rgb[0], g: rgb[1], b: rgb[2], a: a.clamp(0.0, 1.0) }
    }
}

/// How stroked and filled pixels combine with what is already there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SourceOver,
    /// Additive: overlapping strokes brighten.
    Lighter,
}

/// A 2D drawing target with canvas-style path primitives.
///
/// Paths are built with `begin_path`/`move_to`/`line_to` and rendered by
/// `stroke`; a `move_to` after segments starts a new, disconnected subpath.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self, color: Rgba, line_width: f64);
    fn set_blend_mode(&mut self, mode: BlendMode);
}
