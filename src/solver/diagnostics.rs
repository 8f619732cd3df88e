use super::core::divergence_at;
use super::field::{VelocityField, idx_inner};

/// Total kinetic energy over interior cells: sum of vx² + vy².
pub fn kinetic_energy(vel: &VelocityField) -> f64 {
    let n = vel.n;
    let mut sum = 0.0;
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            let ii = idx_inner(i, j, n);
            sum += vel.vx[ii] * vel.vx[ii] + vel.vy[ii] * vel.vy[ii];
        }
    }
    sum
}

/// Largest absolute discrete divergence over interior cells.
pub fn max_divergence(vel: &VelocityField) -> f64 {
    let n = vel.n;
    let mut max = 0.0_f64;
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            max = max.max(divergence_at(vel, i, j).abs());
        }
    }
    max
}

/// Sum of absolute discrete divergence over interior cells.
#[cfg(test)]
pub fn total_divergence(vel: &VelocityField) -> f64 {
    let n = vel.n;
    let mut sum = 0.0;
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            sum += divergence_at(vel, i, j).abs();
        }
    }
    sum
}

/// Largest speed found anywhere in the field.
pub fn max_speed(vel: &VelocityField) -> f64 {
    vel.vx
        .iter()
        .zip(&vel.vy)
        .map(|(x, y)| (x * x + y * y).sqrt())
        .fold(0.0_f64, f64::max)
}
