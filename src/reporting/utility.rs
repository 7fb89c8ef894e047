/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of the non-NaN values. NaN when every value is NaN or the slice is empty.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (total, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(total, count), v| (total + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        total / count as f64
    }
}

/// Median of the values, or `None` for empty input. Even-length input
/// averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median of the non-NaN values. NaN when nothing remains.
pub fn nan_median(values: &[f64]) -> f64 {
    let present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    median(&present).unwrap_or(f64::NAN)
}

/// Index of the largest non-NaN value; the first one wins on ties.
pub fn nan_argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_nan_mean_skips_missing() {
        assert_eq!(nan_mean(&[1.0, f64::NAN, 3.0]), 2.0);
        assert!(nan_mean(&[f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(&[]).is_nan());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_nan_median_skips_missing() {
        assert_eq!(nan_median(&[f64::NAN, 5.0, 1.0, f64::NAN, 3.0]), 3.0);
        assert_eq!(nan_median(&[f64::NAN, 4.0, 2.0]), 3.0);
        assert!(nan_median(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_nan_argmax_first_occurrence() {
        assert_eq!(nan_argmax(&[1.0, 5.0, f64::NAN, 5.0, 2.0]), Some(1));
        assert_eq!(nan_argmax(&[f64::NAN, 0.5]), Some(1));
        assert_eq!(nan_argmax(&[f64::NAN]), None);
        assert_eq!(nan_argmax(&[]), None);
    }
}
