//! Value axis tick planning.

/// The number of ticks drawn on a value axis.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Returns `count` evenly spaced ticks spanning `[min, max]`, each rounded to
/// the nearest integer (halves round up).
///
/// A degenerate domain (`min == max`) yields `count` copies of `min`.
pub fn even_ticks(domain: [f64; 2], count: usize) -> Vec<f64> {
    let [min, max] = domain;

    match count {
        0 => Vec::new(),
        1 => vec![round_half_up(min)],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count)
                .map(|i| round_half_up(min + step * i as f64))
                .collect()
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();

    // Avoid emitting negative zero for ticks such as -0.4.
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_domain() {
        assert_eq!(even_ticks([0.0, 100.0], 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn score_domain_rounds_to_integers() {
        assert_eq!(even_ticks([0.0, 5.0], 5), vec![0.0, 1.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn degenerate_domain() {
        let ticks = even_ticks([42.0, 42.0], 5);

        assert_eq!(ticks, vec![42.0; 5]);
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn negative_domain_rounds_halves_up() {
        assert_eq!(even_ticks([-100.0, 100.0], 5), vec![-100.0, -50.0, 0.0, 50.0, 100.0]);
        assert_eq!(even_ticks([-5.0, 0.0], 5), vec![-5.0, -4.0, -2.0, -1.0, 0.0]);
    }

    #[test]
    fn small_counts() {
        assert!(even_ticks([0.0, 10.0], 0).is_empty());
        assert_eq!(even_ticks([0.4, 10.0], 1), vec![0.0]);
        assert_eq!(even_ticks([0.0, 10.0], 2), vec![0.0, 10.0]);
    }
}
