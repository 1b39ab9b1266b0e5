//! Heading size thresholds derived from the font histogram.

use super::fonts::FontSizeHistogram;
use super::options::ThresholdDefaults;

/// Minimum font sizes for each heading level.
///
/// Always satisfies `h1 >= h2 >= h3 >= body_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub body_max: u32,
}

impl Thresholds {
    /// Derive thresholds from a histogram.
    ///
    /// The most used sizes above `body_max` become H1, H2 and H3, in rank
    /// order. With fewer than three such sizes the lower levels reuse the
    /// last one found; with none, `defaults` apply.
    pub fn compute(
        histogram: &FontSizeHistogram,
        body_max: u32,
        defaults: ThresholdDefaults,
    ) -> Self {
        let large: Vec<u32> = histogram
            .ranked_sizes()
            .into_iter()
            .filter(|size| *size > body_max)
            .collect();

        let (h1, h2, h3) = match large.as_slice() {
            [first, second, third, ..] => (*first, *second, *third),
            [first, second] => (*first, *second, *second),
            [only] => (*only, *only, *only),
            [] => (defaults.h1, defaults.h2, defaults.h3),
        };

        let h2 = h2.min(h1);
        let h3 = h3.min(h2);

        let thresholds = Self {
            h1: h1.max(body_max + 2),
            h2: h2.max(body_max + 1),
            h3: h3.max(body_max),
            body_max,
        };

        log::debug!(
            "Thresholds from {} large sizes: h1={} h2={} h3={} body_max={}",
            large.len(),
            thresholds.h1,
            thresholds.h2,
            thresholds.h3,
            thresholds.body_max
        );

        thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(entries: &[(u32, usize)]) -> Thresholds {
        let histogram: FontSizeHistogram = entries.iter().copied().collect();
        Thresholds::compute(&histogram, 12, ThresholdDefaults::default())
    }

    fn triple(t: Thresholds) -> (u32, u32, u32) {
        (t.h1, t.h2, t.h3)
    }

    #[test]
    fn test_three_large_sizes_use_rank_order() {
        // Weight ranks ahead of size: 16 is the most used large size.
        let t = compute(&[(10, 5000), (16, 300), (24, 50), (20, 120)]);
        assert_eq!(triple(t), (16, 16, 16));
    }

    #[test]
    fn test_three_large_sizes_descending_weights() {
        let t = compute(&[(10, 5000), (24, 300), (18, 200), (14, 100), (13, 10)]);
        assert_eq!(triple(t), (24, 18, 14));
        assert_eq!(t.body_max, 12);
    }

    #[test]
    fn test_two_large_sizes() {
        let t = compute(&[(11, 900), (20, 60), (16, 30)]);
        assert_eq!(triple(t), (20, 16, 16));
    }

    #[test]
    fn test_single_large_size_collapses() {
        let t = compute(&[(28, 40)]);
        assert_eq!(triple(t), (28, 28, 28));

        let t = compute(&[(28, 12), (10, 4000)]);
        assert_eq!(triple(t), (28, 28, 28));
    }

    #[test]
    fn test_no_large_sizes_fall_back_to_defaults() {
        assert_eq!(triple(compute(&[])), (24, 18, 14));
        assert_eq!(triple(compute(&[(10, 100), (12, 50)])), (24, 18, 14));
    }

    #[test]
    fn test_clamps_keep_distance_from_body() {
        // Only 13 is large: h1 is lifted to body_max + 2, h2 stays at 13.
        let t = compute(&[(13, 10)]);
        assert_eq!(triple(t), (14, 13, 13));
    }

    #[test]
    fn test_weight_ties_broken_by_size() {
        let t = compute(&[(14, 50), (20, 50), (16, 50)]);
        assert_eq!(triple(t), (20, 16, 14));
    }

    #[test]
    fn test_monotonic_for_many_histograms() {
        let sizes = [10u32, 13, 14, 16, 18, 20, 24, 28, 36];
        for a in 0..sizes.len() {
            for b in 0..sizes.len() {
                for w in [1usize, 7, 50] {
                    let t = compute(&[(sizes[a], w), (sizes[b], 60 - w), (sizes[(a + b) % 9], 30)]);
                    assert!(t.h1 >= t.h2 && t.h2 >= t.h3 && t.h3 >= 12, "{:?}", t);
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let entries = [(10, 700), (18, 35), (22, 35), (15, 35)];
        let first = compute(&entries);
        let mut reversed = entries;
        reversed.reverse();
        assert_eq!(first, compute(&reversed));
        assert_eq!(first, compute(&entries));
    }
}
