use rand::Rng;
use rand::rngs::StdRng;

use crate::config::{Config, FlowConfig};
use crate::input::{DragState, Force, PointerEvent};
use crate::particle::ParticlePool;
use crate::renderer::{BlendMode, Rgba, Surface};
use crate::solver::{FluidGrid, SolverParams, diagnostics};

/// Field statistics for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub energy: f64,
    pub max_divergence: f64,
    pub max_speed: f64,
}

/// Everything one frame touches: grid, particles, drag state and the RNG.
pub struct Scene {
    grid: FluidGrid,
    pool: ParticlePool,
    drag: DragState,
    flow: FlowConfig,
    background: [u8; 3],
    /// Surface size as of the last frame or resize.
    size: (usize, usize),
    rng: StdRng,
    frames: u64,
}

impl Scene {
    pub fn new(config: &Config, width: usize, height: usize, mut rng: StdRng) -> Self {
        let grid = FluidGrid::new(SolverParams::from(&config.solver));
        let pool = ParticlePool::new(config.particles.clone(), width as f64, height as f64, &mut rng);
        log::debug!(
            "scene: grid {}x{}, {} particles on {}x{}",
            grid.size(),
            grid.size(),
            pool.len(),
            width,
            height
        );
        Self {
            grid,
            pool,
            drag: DragState::default(),
            flow: config.flow.clone(),
            background: config.display.background,
            size: (width, height),
            rng,
            frames: 0,
        }
    }

    #[cfg(test)]
    pub fn grid(&self) -> &FluidGrid {
        &self.grid
    }

    #[cfg(test)]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Render one frame into `surface`.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let (w, h) = (surface.width(), surface.height());
        self.size = (w, h);

        surface.fill_rect(0.0, 0.0, w as f64, h as f64, Rgba::opaque(self.background));

        if let Some(f) = self.ambient_force() {
            log::trace!("ambient force at ({}, {}): ({:.3}, {:.3})", f.cell_x, f.cell_y, f.dx, f.dy);
            self.grid.add_force(f.cell_x, f.cell_y, f.dx, f.dy);
        }
        self.grid.step();

        self.pool.update_all(&self.grid, w as f64, h as f64, &mut self.rng);
        surface.set_blend_mode(BlendMode::Lighter);
        self.pool.draw_all(surface);
        surface.set_blend_mode(BlendMode::SourceOver);

        self.frames += 1;
    }

    /// Random impulse with probability `ambient_chance`.
    fn ambient_force(&mut self) -> Option<Force> {
        if self.rng.gen_range(0.0..1.0) >= self.flow.ambient_chance {
            return None;
        }
        let n = self.grid.size() as i32;
        let strength = self.flow.ambient_strength;
        Some(Force {
            cell_x: self.rng.gen_range(0..n),
            cell_y: self.rng.gen_range(0..n),
            dx: (self.rng.gen_range(0.0..1.0) - 0.5) * strength,
            dy: (self.rng.gen_range(0.0..1.0) - 0.5) * strength,
        })
    }

    /// Apply a pointer event. Only the drag state and the grid are touched.
    pub fn handle_pointer(&mut self, ev: &PointerEvent) {
        let (w, h) = self.size;
        let force = self.drag.handle(ev, w as f64, h as f64, self.grid.size(), self.flow.drag_multiplier);
        if let Some(f) = force {
            self.grid.add_force(f.cell_x, f.cell_y, f.dx, f.dy);
        }
    }

    /// New surface size. The grid resolution is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != self.size {
            log::debug!("resize {}x{} -> {}x{}", self.size.0, self.size.1, width, height);
            self.size = (width, height);
        }
    }

    /// Zero the field and reseed every particle.
    pub fn reset(&mut self) {
        self.grid.reset();
        let (w, h) = self.size;
        self.pool.seed(w as f64, h as f64, &mut self.rng);
        self.drag = DragState::default();
    }

    pub fn stats(&self) -> FieldStats {
        let vel = self.grid.velocity();
        FieldStats {
            energy: diagnostics::kinetic_energy(vel),
            max_divergence: diagnostics::max_divergence(vel),
            max_speed: diagnostics::max_speed(vel),
        }
    }
}
