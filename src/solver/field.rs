/// Convert 2D cell coordinates to a 1D index, clamping both axes into `[0, n-1]`.
#[inline]
pub fn idx(x: i32, y: i32, n: usize) -> usize {
    let max = n as i32 - 1;
    let x = x.clamp(0, max) as usize;
    let y = y.clamp(0, max) as usize;
    y * n + x
}

/// Fast index for cells known to be in bounds.
#[inline(always)]
pub const fn idx_inner(x: usize, y: usize, n: usize) -> usize {
    y * n + x
}

/// Bilinear blend of the four nodes around `(x, y)`.
/// Callers must pass coordinates whose floor lies in `[0, n-1]`; the upper
/// corner is clamped by `idx`.
#[inline]
pub fn bilinear(field: &[f64], x: f64, y: f64, n: usize) -> f64 {
    let i0 = x.floor() as i32;
    let j0 = y.floor() as i32;
    let i1 = i0 + 1;
    let j1 = j0 + 1;

    let s1 = x - i0 as f64;
    let s0 = 1.0 - s1;
    let t1 = y - j0 as f64;
    let t0 = 1.0 - t1;

    s0 * (t0 * field[idx(i0, j0, n)] + t1 * field[idx(i0, j1, n)])
        + s1 * (t0 * field[idx(i1, j0, n)] + t1 * field[idx(i1, j1, n)])
}

/// A square 2D velocity field stored as two flat component arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityField {
    pub n: usize,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
}

impl VelocityField {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            vx: vec![0.0; n * n],
            vy: vec![0.0; n * n],
        }
    }

    pub fn clear(&mut self) {
        self.vx.fill(0.0);
        self.vy.fill(0.0);
    }

    /// Velocity stored at a grid node (indices clamped).
    #[cfg(test)]
    pub fn at(&self, x: i32, y: i32) -> (f64, f64) {
        let ii = idx(x, y, self.n);
        (self.vx[ii], self.vy[ii])
    }

    /// Sample the velocity at continuous grid coordinates.
    ///
    /// Coordinates are clamped into `[0, n - 1.001]` so positions on or past
    /// the edge read the boundary nodes instead of failing.
    pub fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        let hi = self.n as f64 - 1.001;
        let x = x.min(hi).max(0.0);
        let y = y.min(hi).max(0.0);
        (
            bilinear(&self.vx, x, y, self.n),
            bilinear(&self.vy, x, y, self.n),
        )
    }
}
