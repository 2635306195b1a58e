//! "Did you mean" suggestions by edit distance.

use crate::tui::settings;

/// Default relative threshold: a candidate matches when the edit distance is
/// at most a third of the candidate's length.
pub const DEFAULT_MAX_RATIO: f64 = 1.0 / 3.0;

/// Levenshtein distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest-match finder with a configurable relative threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionEngine {
    max_ratio: f64,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self {
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}

impl SuggestionEngine {
    /// Engine accepting `distance <= candidate_len * max_ratio`.
    pub fn with_max_ratio(max_ratio: f64) -> Self {
        Self {
            max_ratio: max_ratio.max(0.0),
        }
    }

    pub fn max_ratio(&self) -> f64 {
        self.max_ratio
    }

    /// The closest candidate within the threshold. Ties go to the earlier
    /// candidate; comparison ignores case but the original spelling is
    /// returned.
    pub fn suggest<'a, S: AsRef<str>>(&self, input: &str, candidates: &'a [S]) -> Option<&'a str> {
        let needle = input.to_lowercase();
        let mut best: Option<(&'a str, usize)> = None;
        for candidate in candidates {
            let candidate = candidate.as_ref();
            let Some(distance) = self.distance_within(&needle, candidate) else {
                continue;
            };
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((candidate, distance)),
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    /// Every candidate within the threshold, closest first, stable on ties.
    pub fn ranked<'a, S: AsRef<str>>(&self, input: &str, candidates: &'a [S]) -> Vec<(&'a str, usize)> {
        let needle = input.to_lowercase();
        let mut matches: Vec<(&'a str, usize)> = candidates
            .iter()
            .filter_map(|candidate| {
                let candidate = candidate.as_ref();
                self.distance_within(&needle, candidate)
                    .map(|distance| (candidate, distance))
            })
            .collect();
        matches.sort_by_key(|(_, distance)| *distance);
        matches
    }

    fn distance_within(&self, lowered_input: &str, candidate: &str) -> Option<usize> {
        let distance = levenshtein(lowered_input, &candidate.to_lowercase());
        let limit = candidate.chars().count() as f64 * self.max_ratio;
        (distance as f64 <= limit).then_some(distance)
    }
}

/// [`SuggestionEngine::suggest`] with the default threshold.
pub fn suggest<'a, S: AsRef<str>>(input: &str, candidates: &'a [S]) -> Option<&'a str> {
    SuggestionEngine::default().suggest(input, candidates)
}

/// Append `"\nDid you mean: <x>?"` to `message` when a close choice exists.
pub fn did_you_mean<S: AsRef<str>>(message: &str, input: &str, choices: &[S]) -> String {
    match suggest(input, choices) {
        Some(choice) => format!("{message}\n{} {choice}?", settings::LABEL_DID_YOU_MEAN),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_typo_is_suggested() {
        assert_eq!(suggest("aple", &["apple", "banana"]), Some("apple"));
    }

    #[test]
    fn distant_input_gets_nothing() {
        assert_eq!(suggest("zzz", &["apple", "banana"]), None);
    }

    #[test]
    fn empty_candidates_get_nothing() {
        let none: [&str; 0] = [];
        assert_eq!(suggest("", &none), None);
        assert_eq!(suggest("apple", &none), None);
    }

    #[test]
    fn comparison_ignores_case_but_keeps_spelling() {
        assert_eq!(suggest("APLE", &["Apple", "Banana"]), Some("Apple"));
    }

    #[test]
    fn first_minimal_match_wins_ties() {
        // "cat" is one edit from both.
        assert_eq!(suggest("cat", &["bat", "cab"]), Some("bat"));
        assert_eq!(suggest("cat", &["cab", "bat"]), Some("cab"));
    }

    #[test]
    fn closer_candidate_beats_earlier_one() {
        assert_eq!(suggest("banan", &["bandana", "banana"]), Some("banana"));
    }

    #[test]
    fn ratio_is_configurable() {
        let strict = SuggestionEngine::with_max_ratio(0.0);
        assert_eq!(strict.suggest("aple", &["apple"]), None);
        assert_eq!(strict.suggest("apple", &["apple"]), Some("apple"));

        let loose = SuggestionEngine::with_max_ratio(1.0);
        assert_eq!(loose.suggest("zzz", &["abc"]), Some("abc"));
    }

    #[test]
    fn ranked_orders_by_distance() {
        let engine = SuggestionEngine::with_max_ratio(0.5);
        let ranked = engine.ranked("stat", &["start", "stats", "status", "zzzz"]);
        assert_eq!(ranked, vec![("start", 1), ("stats", 1), ("status", 2)]);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("\u{e9}t\u{e9}", "ete"), 2);
    }

    #[test]
    fn did_you_mean_appends_hint() {
        let choices = ["install", "uninstall", "list"];
        assert_eq!(
            did_you_mean("Unknown command", "instal", &choices),
            "Unknown command\nDid you mean: install?"
        );
        assert_eq!(did_you_mean("Unknown command", "qqq", &choices), "Unknown command");
    }
}

#[cfg(all(test, feature = "fuzz-tests"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn distance_is_symmetric(a in "[a-c]{0,8}", b in "[a-c]{0,8}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn distance_is_bounded_by_longer_length(a in ".{0,10}", b in ".{0,10}") {
            let longest = a.chars().count().max(b.chars().count());
            prop_assert!(levenshtein(&a, &b) <= longest);
        }

        #[test]
        fn exact_candidate_is_always_suggested(words in prop::collection::vec("[a-z]{1,8}", 1..6), pick in any::<prop::sample::Index>()) {
            let target = pick.get(&words).clone();
            let suggested = suggest(&target, &words);
            prop_assert!(suggested.is_some());
            prop_assert_eq!(levenshtein(suggested.unwrap_or_default(), &target), 0);
        }
    }
}
