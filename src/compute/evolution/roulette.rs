//! Fitness-proportionate (roulette-wheel) selection.

use crate::schema::Direction;

use super::SearchRng;

/// Pick an index with probability proportional to a fitness-derived weight.
///
/// When minimizing, the weight of an agent is `max - fitness`, so the worst
/// agent never wins. When maximizing, fitness is used directly, shifted to be
/// non-negative if any value is negative. Equal fitness across the population,
/// or a non-positive total weight, falls back to a uniform choice.
pub fn roulette_index(fitness: &[f64], direction: Direction, rng: &mut SearchRng) -> usize {
    if fitness.len() <= 1 {
        return 0;
    }

    let (min, max) = fitness
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &f| {
            (lo.min(f), hi.max(f))
        });
    let spread = max - min;
    if !(spread.is_finite() && spread > 0.0) {
        return rng.index(fitness.len());
    }

    let weight = |f: f64| -> f64 {
        let w = match direction {
            Direction::Minimize => max - f,
            Direction::Maximize if min < 0.0 => f - min,
            Direction::Maximize => f,
        };
        if w.is_finite() { w.max(0.0) } else { 0.0 }
    };

    let total: f64 = fitness.iter().map(|&f| weight(f)).sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.index(fitness.len());
    }

    let target = rng.uniform() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, &f) in fitness.iter().enumerate() {
        let w = weight(f);
        if w > 0.0 {
            last_positive = i;
        }
        cumulative += w;
        if cumulative > target {
            return i;
        }
    }
    // Rounding can leave `cumulative` a hair below `target`.
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(fitness: &[f64], direction: Direction, draws: usize, seed: u64) -> Vec<usize> {
        let mut rng = SearchRng::new(seed);
        let mut counts = vec![0; fitness.len()];
        for _ in 0..draws {
            counts[roulette_index(fitness, direction, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_uniform_when_all_equal() {
        let counts = histogram(&[3.0; 5], Direction::Minimize, 10_000, 42);
        for &c in &counts {
            assert!((1700..=2300).contains(&c), "counts not uniform: {counts:?}");
        }
    }

    #[test]
    fn test_minimize_favors_small_fitness() {
        let fitness = [1.0, 2.0, 3.0, 4.0, 5.0];
        let counts = histogram(&fitness, Direction::Minimize, 10_000, 3);
        // Weights 4, 3, 2, 1, 0.
        assert_eq!(counts[4], 0);
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
    }

    #[test]
    fn test_maximize_proportional() {
        let fitness = [1.0, 3.0];
        let counts = histogram(&fitness, Direction::Maximize, 20_000, 9);
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!((2.6..3.4).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_maximize_with_negative_fitness() {
        let fitness = [-5.0, -1.0, -3.0];
        let counts = histogram(&fitness, Direction::Maximize, 5_000, 11);
        assert_eq!(counts[0], 0);
        assert!(counts[1] > counts[2]);
    }

    #[test]
    fn test_single_and_empty() {
        let mut rng = SearchRng::new(0);
        assert_eq!(roulette_index(&[1.0], Direction::Minimize, &mut rng), 0);
        assert_eq!(roulette_index(&[], Direction::Maximize, &mut rng), 0);
    }

    #[test]
    fn test_degenerate_weights_fall_back() {
        let mut rng = SearchRng::new(5);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let idx = roulette_index(&[0.0, 0.0, 0.0], Direction::Maximize, &mut rng);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));

        // Infinite spread cannot be weighted.
        for _ in 0..100 {
            let idx = roulette_index(&[f64::MAX, -f64::MAX], Direction::Minimize, &mut rng);
            assert!(idx < 2);
        }
    }
}
