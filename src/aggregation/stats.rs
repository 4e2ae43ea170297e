// file: src/aggregation/stats.rs
// description: descriptive statistics over salary samples
// reference: linear-interpolated quantiles, Pearson correlation and least-squares slope

/// Arithmetic mean, or `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile `q` in `[0, 1]` with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// First and third quartiles.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    Some((quantile(values, 0.25)?, quantile(values, 0.75)?))
}

struct Moments {
    sxx: f64,
    syy: f64,
    sxy: f64,
}

/// `None` when fewer than two distinct `x` values exist. Compared exactly, since a
/// constant non-dyadic `x` leaves a rounding residue in `sxx`.
fn moments(pairs: &[(f64, f64)]) -> Option<Moments> {
    let (first_x, _) = pairs.first()?;
    if pairs.iter().all(|(x, _)| x == first_x) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    Some(Moments {
        sxx,
        syy,
        sxy,
    })
}

/// Pearson correlation of `(x, y)` pairs.
///
/// Undefined when there are fewer than two distinct `x` values or `y` has zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let m = moments(pairs)?;
    let first_y = pairs[0].1;
    if m.syy <= 0.0 || pairs.iter().all(|(_, y)| *y == first_y) {
        return None;
    }
    Some(m.sxy / (m.sxx.sqrt() * m.syy.sqrt()))
}

/// Ordinary least-squares slope of `y` on `x`.
pub fn slope(pairs: &[(f64, f64)]) -> Option<f64> {
    let m = moments(pairs)?;
    Some(m.sxy / m.sxx)
}

/// Relative difference of `a` over `b`, in percent.
pub fn gap_percent(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    Some((a - b) / b * 100.0)
}

/// Same formula as [`gap_percent`], reported as a premium of `a` over `b`.
pub fn premium_percent(a: f64, b: f64) -> Option<f64> {
    gap_percent(a, b)
}
