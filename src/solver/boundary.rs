use super::field::idx_inner;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar,
    Vx,
    Vy,
}

/// Closed-box boundary rule.
///   - edges copy their interior neighbour
///   - `FieldType::Vx`: negated on the left/right walls (no flow through them)
///   - `FieldType::Vy`: negated on the top/bottom walls
///   - corners: mean of the two adjacent edge cells
pub fn set_bnd(field_type: FieldType, x: &mut [f64], n: usize) {
    if n < 2 {
        return;
    }
    let last = n - 1;

    let sign_y = if field_type == FieldType::Vy { -1.0 } else { 1.0 };
    for i in 1..last {
        x[idx_inner(i, 0, n)] = sign_y * x[idx_inner(i, 1, n)];
        x[idx_inner(i, last, n)] = sign_y * x[idx_inner(i, last - 1, n)];
    }

    let sign_x = if field_type == FieldType::Vx { -1.0 } else { 1.0 };
    for j in 1..last {
        x[idx_inner(0, j, n)] = sign_x * x[idx_inner(1, j, n)];
        x[idx_inner(last, j, n)] = sign_x * x[idx_inner(last - 1, j, n)];
    }

    x[idx_inner(0, 0, n)] = 0.5 * (x[idx_inner(1, 0, n)] + x[idx_inner(0, 1, n)]);
    x[idx_inner(0, last, n)] = 0.5 * (x[idx_inner(1, last, n)] + x[idx_inner(0, last - 1, n)]);
    x[idx_inner(last, 0, n)] = 0.5 * (x[idx_inner(last - 1, 0, n)] + x[idx_inner(last, 1, n)]);
    x[idx_inner(last, last, n)] =
        0.5 * (x[idx_inner(last - 1, last, n)] + x[idx_inner(last, last - 1, n)]);
}
