mod boundary;
mod core;
pub mod diagnostics;
pub mod field;
mod params;

// Re-export public API
pub use boundary::FieldType;
pub use field::VelocityField;
pub use params::SolverParams;

use self::core::{advect, diffuse, project};

/// Fixed-size square velocity grid advanced one step per frame.
///
/// `current` holds the field between steps; `scratch` receives the
/// diffused field and is the source for self-advection. Neither is ever
/// resized after construction.
pub struct FluidGrid {
    params: SolverParams,
    current: VelocityField,
    scratch: VelocityField,
    /// Pressure-like scalar solved during projection.
    pressure: Vec<f64>,
    /// Divergence of the field being projected.
    divergence: Vec<f64>,
}

impl FluidGrid {
    pub fn new(params: SolverParams) -> Self {
        let n = params.size;
        Self {
            current: VelocityField::new(n),
            scratch: VelocityField::new(n),
            pressure: vec![0.0; n * n],
            divergence: vec![0.0; n * n],
            params,
        }
    }

    /// Grid side length N.
    pub fn size(&self) -> usize {
        self.params.size
    }

    /// The field as of the last completed step (plus any forces since).
    pub fn velocity(&self) -> &VelocityField {
        &self.current
    }

    /// Advance the field by one timestep:
    /// diffuse -> project -> self-advect -> project.
    pub fn step(&mut self) {
        let p = &self.params;

        diffuse(FieldType::Vx, &mut self.scratch.vx, &self.current.vx, p.visc, p.dt, p.diffuse_iter, p.size);
        diffuse(FieldType::Vy, &mut self.scratch.vy, &self.current.vy, p.visc, p.dt, p.diffuse_iter, p.size);

        project(&mut self.scratch, &mut self.pressure, &mut self.divergence, p.project_iter);

        advect(FieldType::Vx, &mut self.current.vx, &self.scratch.vx, &self.scratch, p.dt);
        advect(FieldType::Vy, &mut self.current.vy, &self.scratch.vy, &self.scratch, p.dt);

        project(&mut self.current, &mut self.pressure, &mut self.divergence, p.project_iter);
    }

    /// Additive impulse at one cell; the cell is clamped into the grid.
    pub fn add_force(&mut self, cell_x: i32, cell_y: i32, dx: f64, dy: f64) {
        let ii = field::idx(cell_x, cell_y, self.params.size);
        self.current.vx[ii] += dx;
        self.current.vy[ii] += dy;
    }

    /// Bilinear velocity at continuous grid coordinates (clamped).
    pub fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        self.current.sample(x, y)
    }

    /// Zero every buffer, keeping the allocation.
    pub fn reset(&mut self) {
        self.current.clear();
        self.scratch.clear();
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
    }
}
