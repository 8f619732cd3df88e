//! Surface that records draw calls, for asserting on what the core drew.

use super::{BlendMode, Rgba, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Stroke { color: Rgba, line_width: f64 },
    Blend(BlendMode),
}

pub struct RecordingSurface {
    pub width: usize,
    pub height: usize,
    pub commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn strokes(&self) -> usize {
        self.count(|c| matches!(c, Command::Stroke { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.commands.push(Command::FillRect { x, y, w, h, color });
    }

    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::LineTo(x, y));
    }

    fn stroke(&mut self, color: Rgba, line_width: f64) {
        self.commands.push(Command::Stroke { color, line_width });
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(Command::Blend(mode));
    }
}
