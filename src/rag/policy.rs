//! Retrieval selection policy.
//!
//! Pure function with no service dependency so it can be exercised against
//! canned similarity scores.

/// Selects which ranked results reach the answer generator.
///
/// `ranked` must already be ordered by non-increasing score. The top `k`
/// entries are kept, then filtered to those scoring strictly above
/// `threshold`. When the filter removes everything, the single best entry
/// is returned instead of an empty set, so a non-empty index always
/// contributes at least one chunk of context.
pub fn select_relevant(
    ranked: &[(usize, f32)],
    top_k: usize,
    threshold: f32,
) -> Vec<(usize, f32)> {
    let top: Vec<(usize, f32)> = ranked.iter().take(top_k).copied().collect();

    let kept: Vec<(usize, f32)> = top
        .iter()
        .copied()
        .filter(|(_, score)| *score > threshold)
        .collect();

    if kept.is_empty() {
        return top.first().map(|best| vec![*best]).unwrap_or_default();
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_results_above_the_threshold() {
        let ranked = [(0, 0.9), (1, 0.5), (2, 0.1)];
        let selected = select_relevant(&ranked, 5, 0.3);
        assert_eq!(selected, vec![(0, 0.9), (1, 0.5)]);
    }

    #[test]
    fn falls_back_to_the_single_best_when_everything_is_below_threshold() {
        let ranked = [(3, 0.25), (1, 0.2), (0, 0.05)];
        let selected = select_relevant(&ranked, 5, 0.3);
        assert_eq!(selected, vec![(3, 0.25)]);
    }

    #[test]
    fn threshold_is_strict() {
        let ranked = [(0, 0.3), (1, 0.3)];
        // Scores equal to the threshold do not pass; fallback kicks in.
        let selected = select_relevant(&ranked, 5, 0.3);
        assert_eq!(selected, vec![(0, 0.3)]);
    }

    #[test]
    fn truncates_to_top_k_before_filtering() {
        let ranked = [(0, 0.9), (1, 0.8), (2, 0.7), (3, 0.6)];
        let selected = select_relevant(&ranked, 2, 0.3);
        assert_eq!(selected, vec![(0, 0.9), (1, 0.8)]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(select_relevant(&[], 5, 0.3).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let ranked = [(4, 0.95), (2, 0.9), (7, 0.85)];
        let selected = select_relevant(&ranked, 5, 0.3);
        let scores: Vec<f32> = selected.iter().map(|(_, s)| *s).collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
