//! Axis tick generation for the overlay.

/// Round `step` to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let exponent = raw.log10().floor();
    let base = 10f64.powf(exponent);
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Roughly `target` evenly spaced round values within `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if !(lo.is_finite() && hi.is_finite()) || hi - lo <= 0.0 || target == 0 {
        return Vec::new();
    }
    let step = nice_step((hi - lo) / target as f64);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Label for a tick value, with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    // avoid "-0"
    let v = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{v:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_round() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert!((nice_step(0.03) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn ticks_cover_range() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(-1.2, 9.7, 5), vec![0.0, 5.0]);
        assert!(nice_ticks(3.0, 3.0, 5).is_empty());
    }

    #[test]
    fn labels() {
        assert_eq!(format_tick(2.0, 1.0), "2");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(-1e-17, 0.5), "0.0");
    }
}
