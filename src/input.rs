/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    #[allow(dead_code)] // minifb has no touch input; kept for touch-capable hosts
    Touch,
}

/// Pointer event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub source: PointerSource,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn mouse(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, source: PointerSource::Mouse, x, y }
    }

    #[allow(dead_code)] // see PointerSource::Touch
    pub fn touch(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, source: PointerSource::Touch, x, y }
    }
}

/// Impulse to inject at one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    pub cell_x: i32,
    pub cell_y: i32,
    pub dx: f64,
    pub dy: f64,
}

/// Map a surface pixel position to a grid cell: `floor(pos / size * n)`.
/// Out-of-range results are left for the grid to clamp.
pub fn pixel_to_cell(x: f64, y: f64, width: f64, height: f64, n: usize) -> (i32, i32) {
    let cx = (x / width * n as f64).floor() as i32;
    let cy = (y / height * n as f64).floor() as i32;
    (cx, cy)
}

/// Drag state for the single active pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    dragging: bool,
    last: (f64, f64),
}

impl DragState {
    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Fold one event into the drag state and return the force it causes,
    /// if any. `multiplier` scales the pixel delta since the last position.
    pub fn handle(
        &mut self,
        ev: &PointerEvent,
        width: f64,
        height: f64,
        n: usize,
        multiplier: f64,
    ) -> Option<Force> {
        match ev.kind {
            PointerKind::Press => {
                self.dragging = true;
                self.last = (ev.x, ev.y);
                match ev.source {
                    // Mouse press pushes a zero-delta impulse at the cell
                    PointerSource::Mouse => Some(self.force_to(ev.x, ev.y, width, height, n, multiplier)),
                    PointerSource::Touch => None,
                }
            }
            PointerKind::Move if self.dragging => Some(self.force_to(ev.x, ev.y, width, height, n, multiplier)),
            PointerKind::Move => None,
            PointerKind::Release => {
                self.dragging = false;
                None
            }
        }
    }

    fn force_to(&mut self, x: f64, y: f64, width: f64, height: f64, n: usize, multiplier: f64) -> Force {
        let (cell_x, cell_y) = pixel_to_cell(x, y, width, height, n);
        let dx = (x - self.last.0) * multiplier;
        let dy = (y - self.last.1) * multiplier;
        self.last = (x, y);
        Force { cell_x, cell_y, dx, dy }
    }
}

/// Turns polled mouse state (position + left button) into pointer events.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    last_pos: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare this poll against the previous one and append the resulting
    /// events to `out`. `pos` is `None` when the cursor is outside the window.
    pub fn poll(&mut self, pos: Option<(f64, f64)>, down: bool, out: &mut Vec<PointerEvent>) {
        let moved = pos.is_some() && pos != self.last_pos;

        if down && !self.was_down {
            if let Some((x, y)) = pos {
                out.push(PointerEvent::mouse(PointerKind::Press, x, y));
            }
        } else if moved {
            if let Some((x, y)) = pos {
                out.push(PointerEvent::mouse(PointerKind::Move, x, y));
            }
        }

        if !down && self.was_down {
            if let Some((x, y)) = pos.or(self.last_pos) {
                out.push(PointerEvent::mouse(PointerKind::Release, x, y));
            }
        }

        // A press seen while the cursor is outside does not count as down
        self.was_down = down && (pos.is_some() || self.was_down);
        if pos.is_some() {
            self.last_pos = pos;
        }
    }
}
