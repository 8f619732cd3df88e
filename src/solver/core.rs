use super::boundary::{FieldType, set_bnd};
use super::field::{VelocityField, bilinear, idx_inner};

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
pub fn lin_solve(field_type: FieldType, x: &mut [f64], x0: &[f64], a: f64, c: f64, iter: usize, n: usize) {
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        for j in 1..n.saturating_sub(1) {
            for i in 1..(n - 1) {
                let neighbors = x[idx_inner(i + 1, j, n)]
                    + x[idx_inner(i - 1, j, n)]
                    + x[idx_inner(i, j + 1, n)]
                    + x[idx_inner(i, j - 1, n)];
                x[idx_inner(i, j, n)] = (x0[idx_inner(i, j, n)] + a * neighbors) * c_inv;
            }
        }
        // Boundary values feed the next pass's neighbour sums.
        set_bnd(field_type, x, n);
    }
}

/// Diffusion step: spreads the field over time.
/// a = dt * diff * (N-2)^2, c = 1 + 6a
///
/// `x` is seeded from `x0` before relaxing instead of starting from
/// whatever the scratch buffer held after the previous step, so the
/// result depends only on the current field.
pub fn diffuse(field_type: FieldType, x: &mut [f64], x0: &[f64], diff: f64, dt: f64, iter: usize, n: usize) {
    let inner = n.saturating_sub(2) as f64;
    let a = dt * diff * inner * inner;
    let c = 1.0 + 6.0 * a;
    x.copy_from_slice(x0);
    lin_solve(field_type, x, x0, a, c, iter, n);
}

/// Semi-Lagrangian advection: traces each cell backwards through `vel`
/// and samples `d0` at the source point.
pub fn advect(field_type: FieldType, d: &mut [f64], d0: &[f64], vel: &VelocityField, dt: f64) {
    let n = vel.n;
    let dt0 = dt * n.saturating_sub(2) as f64;
    let n_f = n as f64;

    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            let ii = idx_inner(i, j, n);
            // Trace backwards
            let x = (i as f64 - dt0 * vel.vx[ii]).clamp(0.5, n_f + 0.5);
            let y = (j as f64 - dt0 * vel.vy[ii]).clamp(0.5, n_f + 0.5);
            d[ii] = bilinear(d0, x, y, n);
        }
    }
    set_bnd(field_type, d, n);
}

/// Discrete divergence of `vel` at interior cell (i, j), scaled the way the
/// pressure solve consumes it.
#[inline]
pub fn divergence_at(vel: &VelocityField, i: usize, j: usize) -> f64 {
    let n = vel.n;
    -0.5 * (vel.vx[idx_inner(i + 1, j, n)] - vel.vx[idx_inner(i - 1, j, n)]
        + vel.vy[idx_inner(i, j + 1, n)]
        - vel.vy[idx_inner(i, j - 1, n)])
        / n as f64
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
pub fn project(vel: &mut VelocityField, p: &mut [f64], div: &mut [f64], iter: usize) {
    let n = vel.n;
    let n_f = n as f64;

    // Calculate divergence
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            div[idx_inner(i, j, n)] = divergence_at(vel, i, j);
            p[idx_inner(i, j, n)] = 0.0;
        }
    }
    set_bnd(FieldType::Scalar, div, n);
    set_bnd(FieldType::Scalar, p, n);

    // Solve for pressure
    lin_solve(FieldType::Scalar, p, div, 1.0, 4.0, iter, n);

    // Subtract pressure gradient from velocity
    for j in 1..n.saturating_sub(1) {
        for i in 1..(n - 1) {
            vel.vx[idx_inner(i, j, n)] -= 0.5 * (p[idx_inner(i + 1, j, n)] - p[idx_inner(i - 1, j, n)]) * n_f;
            vel.vy[idx_inner(i, j, n)] -= 0.5 * (p[idx_inner(i, j + 1, n)] - p[idx_inner(i, j - 1, n)]) * n_f;
        }
    }
    set_bnd(FieldType::Vx, &mut vel.vx, n);
    set_bnd(FieldType::Vy, &mut vel.vy, n);
}
