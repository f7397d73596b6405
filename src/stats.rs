/// Compute the arithmetic mean, `NaN` for an empty series.
pub fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Compute the mean of consecutive differences, `NaN` for fewer than two values.
///
/// Used as the sample spacing of nearly uniform series.
pub fn compute_mean_diff(vals: &[f64]) -> f64 {
    let diffs: Vec<_> = vals.windows(2).map(|pair| pair[1] - pair[0]).collect();
    compute_mean(&diffs)
}

/// Compute `n_vals` equally spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n_vals: usize) -> Vec<f64> {
    match n_vals {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n_vals - 1) as f64;
            (0..n_vals).map(|idx| start + idx as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_series_is_nan() {
        assert!(compute_mean(&[]).is_nan());
        assert!(compute_mean_diff(&[1.0]).is_nan());
    }

    #[test]
    fn mean_diff_averages_irregular_spacing() {
        let dt = compute_mean_diff(&[0.0, 0.1, 0.3, 0.4]);
        assert!((dt - 0.4 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let vals = linspace(0.0, 50.0, 6);
        assert_eq!(vals.len(), 6);
        assert_eq!(vals[0], 0.0);
        assert!((vals[5] - 50.0).abs() < 1e-12);
        assert!((vals[1] - 10.0).abs() < 1e-12);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }
}
