use std::collections::HashSet;

/// Coarse lexical overlap between two normalized strings.
///
/// Tokens are split on single spaces and kept only when longer than 2
/// characters; the ratio is `|intersection| / max(|a|, |b|)`. The denominator
/// is deliberately the larger side, not the union size, so this is not true
/// Jaccard; downstream thresholds are calibrated against this exact formula.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let words_a: Vec<&str> = a.split(' ').filter(|w| w.len() > 2).collect();
    let words_b: Vec<&str> = b.split(' ').filter(|w| w.len() > 2).collect();

    let total = words_a.len().max(words_b.len());
    if total == 0 {
        return 0.0;
    }

    let set_b: HashSet<&str> = words_b.iter().copied().collect();
    let mut counted: HashSet<&str> = HashSet::new();
    let common = words_a
        .iter()
        .filter(|w| set_b.contains(**w) && counted.insert(**w))
        .count();

    common as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overlap_is_strictly_between_zero_and_one() {
        let s = similarity("piele naturala", "piele sintetica");
        assert!(s > 0.0 && s < 1.0, "got {s}");
        assert!((s - 0.5).abs() < 1e-9);
    }

    #[test]
    fn identical_strings_score_one() {
        assert!((similarity("piele naturala premium", "piele naturala premium") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(similarity("", "x"), 0.0);
        assert_eq!(similarity("piele", ""), 0.0);
    }

    #[test]
    fn short_tokens_are_ignored_entirely() {
        // every token has length <= 2, so both sides tokenize to nothing
        assert_eq!(similarity("a de la", "el cu"), 0.0);
    }

    #[test]
    fn repeated_common_words_count_once() {
        // "piele piele piele" vs "piele talpa moale": intersection {piele},
        // denominator max(3, 3)
        let s = similarity("piele piele piele", "piele talpa moale");
        assert!((s - 1.0 / 3.0).abs() < 1e-9);
    }
}
