//! Small numeric helpers shared by the simulation and render layers

/// Locate `value` among items sorted by `key`
///
/// Returns `(lo, hi, t)` so the interpolated result is `lerp(items[lo], items[hi], t)`.
/// Values outside the covered range clamp to the first/last item (`lo == hi`).
/// Returns `None` for an empty slice.
pub fn bracket<T>(value: f64, items: &[T], key: impl Fn(&T) -> f64) -> Option<(usize, usize, f64)> {
    let last = items.len().checked_sub(1)?;

    for (i, item) in items.iter().enumerate() {
        let x = key(item);
        if x == value {
            return Some((i, i, 0.0));
        }
        if x > value {
            if i == 0 {
                return Some((0, 0, 0.0));
            }
            let prev_x = key(&items[i - 1]);
            return Some((i - 1, i, (value - prev_x) / (x - prev_x)));
        }
    }

    Some((last, last, 0.0))
}

/// Piecewise-linear interpolation over `(x, y)` points sorted by `x`
///
/// Values outside the covered range clamp to the first/last `y`.
/// Returns 0 for an empty point list.
pub fn lerp_points(value: f64, points: &[(f64, f64)]) -> f64 {
    match bracket(value, points, |p| p.0) {
        Some((lo, hi, t)) => points[lo].1 + (points[hi].1 - points[lo].1) * t,
        None => 0.0,
    }
}

/// Pick an index from non-negative weights given a uniform `draw` in `[0, 1)`
///
/// The draw is scaled by the total weight and the first index whose
/// cumulative weight reaches it wins. Returns `None` when there is nothing
/// to pick from.
pub fn weighted_index(weights: &[f64], draw: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return None;
    }

    let target = draw * total;
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if *weight > 0.0 && cumulative >= target {
            return Some(i);
        }
    }

    // Rounding can leave the final cumulative sum a hair below target
    weights.iter().rposition(|w| *w > 0.0)
}
