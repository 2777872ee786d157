//! Contamination Threshold
//!
//! Turns raw forest scores into a decision function: the offset is the
//! contamination-quantile of the batch's raw scores, and anything scoring
//! below it is an outlier.

/// Linear-interpolated percentile (`q` in [0, 100]) of unsorted values
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Offset separating the `contamination` fraction of lowest raw scores
pub fn contamination_offset(raw_scores: &[f64], contamination: f64) -> Option<f64> {
    percentile(raw_scores, contamination * 100.0)
}
