//! Return and correlation computations.
//!
//! Both functions are pure so the pipeline math is testable without any
//! network access. Correlation follows pairwise-complete semantics: the
//! caller passes only the pairs where both returns are defined, and we
//! answer NaN rather than guessing when the input is degenerate (fewer
//! than two pairs, or a zero-variance column).

/// Simple day-over-day returns: `(v[i] - v[i-1]) / v[i-1]`.
///
/// The first element has no prior observation and is `None`. Output length
/// always equals input length.
pub fn simple_returns(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            out.push(None);
        } else {
            let prev = values[i - 1];
            out.push(Some((v - prev) / prev));
        }
    }
    out
}

/// Pearson correlation coefficient over paired observations.
///
/// Returns NaN when fewer than two pairs are given or when either column
/// has zero variance; otherwise the result is in `[-1, 1]`.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_a = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }

    // Clamp against floating-point drift so callers can rely on [-1, 1].
    (cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0)
}
