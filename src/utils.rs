/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

/// Round a float to a given number of decimal places.
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}

/// Median of a slice, sorting the slice in place.
///
/// Returns NaN on an empty slice, callers are expected to have
/// rejected empty input already.
pub fn median(v: &mut [f64]) -> f64 {
    if v.is_empty() {
        return f64::NAN;
    }
    v.sort_unstable_by(|a, b| a.total_cmp(b));
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        (v[mid - 1] + v[mid]) / 2.0
    } else {
        v[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_round() {
        assert_eq!(0.3, precision_round(0.3333, 1));
        assert_eq!(0.2343, precision_round(0.2343123123123, 4));
    }

    #[test]
    fn test_median_odd() {
        let mut v = vec![9., 1., 5.];
        assert_eq!(median(&mut v), 5.);
    }

    #[test]
    fn test_median_even() {
        let mut v = vec![4., 1., 3., 2.];
        assert_eq!(median(&mut v), 2.5);
    }

    #[test]
    fn test_median_empty() {
        let mut v: Vec<f64> = vec![];
        assert!(median(&mut v).is_nan());
    }
}
