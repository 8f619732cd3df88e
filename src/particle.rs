use std::collections::VecDeque;

use rand::Rng;

use crate::config::ParticleConfig;
use crate::renderer::{Rgba, Surface};
use crate::solver::FluidGrid;

/// Fixed-capacity FIFO of recent positions, oldest first.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once full.
    pub fn push(&mut self, p: (f64, f64)) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.points.iter()
    }
}

/// A point particle carried by the fluid, living in surface pixel space.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub life: f64,
    trail: Trail,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(cfg: &ParticleConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let mut p = Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            age: 0.0,
            life: 0.0,
            trail: Trail::new(cfg.trail_len),
        };
        p.reset(cfg, width, height, true, rng);
        p
    }

    #[cfg(test)]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Re-initialize in place at a random position with a fresh lifespan.
    /// `randomize_age` is only used when seeding the initial population so
    /// particles do not expire in lockstep.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        cfg: &ParticleConfig,
        width: f64,
        height: f64,
        randomize_age: bool,
        rng: &mut R,
    ) {
        self.x = rng.gen_range(0.0..1.0) * width;
        self.y = rng.gen_range(0.0..1.0) * height;
        self.vx = 0.0;
        self.vy = 0.0;
        self.life = cfg.life_min + rng.gen_range(0.0..1.0) * cfg.life_span;
        self.age = if randomize_age { rng.gen_range(0.0..1.0) * self.life } else { 0.0 };
        self.trail.clear();
    }

    /// Advance one step through the grid's velocity field.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        grid: &FluidGrid,
        cfg: &ParticleConfig,
        width: f64,
        height: f64,
        rng: &mut R,
    ) {
        let n = grid.size() as f64;
        let gx = self.x / width * n;
        let gy = self.y / height * n;

        let (vx, vy) = grid.sample(gx, gy);
        self.vx = vx * cfg.speed_scale;
        self.vy = vy * cfg.speed_scale;

        self.x += self.vx;
        self.y += self.vy;

        // Toroidal wrap
        if self.x < 0.0 {
            self.x = width;
        }
        if self.x > width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = height;
        }
        if self.y > height {
            self.y = 0.0;
        }

        self.trail.push((self.x, self.y));

        self.age += 1.0;
        if self.age > self.life {
            self.reset(cfg, width, height, false, rng);
        }
    }

    /// Stroke opacity: faster particles are more opaque, up to `max_alpha`.
    pub fn alpha(&self, cfg: &ParticleConfig) -> f64 {
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        (speed * cfg.alpha_per_speed).min(cfg.max_alpha)
    }

    /// Stroke the trail. Consecutive points farther apart than the wrap
    /// threshold on either axis start a new subpath instead of a segment.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, cfg: &ParticleConfig) {
        if self.trail.len() < 2 {
            return;
        }

        let mut points = self.trail.iter();
        let Some(&(x0, y0)) = points.next() else {
            return;
        };
        surface.begin_path();
        surface.move_to(x0, y0);

        let mut prev = (x0, y0);
        for &(x, y) in points {
            let dx = (x - prev.0).abs();
            let dy = (y - prev.1).abs();
            if dx < cfg.wrap_threshold && dy < cfg.wrap_threshold {
                surface.line_to(x, y);
            } else {
                surface.move_to(x, y);
            }
            prev = (x, y);
        }

        surface.stroke(Rgba::with_alpha(cfg.color, self.alpha(cfg)), cfg.line_width);
    }
}

/// Preallocated particle population. Particles are recycled in place and
/// the pool never grows or shrinks.
pub struct ParticlePool {
    particles: Vec<Particle>,
    cfg: ParticleConfig,
}

impl ParticlePool {
    pub fn new<R: Rng + ?Sized>(cfg: ParticleConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let particles = (0..cfg.count).map(|_| Particle::new(&cfg, width, height, rng)).collect();
        Self { particles, cfg }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Re-initialize every particle in place with staggered ages.
    pub fn seed<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        for p in &mut self.particles {
            p.reset(&self.cfg, width, height, true, rng);
        }
    }

    /// Advance every particle one step, in pool order.
    pub fn update_all<R: Rng + ?Sized>(&mut self, grid: &FluidGrid, width: f64, height: f64, rng: &mut R) {
        for p in &mut self.particles {
            p.update(grid, &self.cfg, width, height, rng);
        }
    }

    /// Stroke every trail. Drawing reads particle state only, so running
    /// it after `update_all` matches an interleaved update/draw pass.
    pub fn draw_all<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            p.draw(surface, &self.cfg);
        }
    }
}
