#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::similarity::{ratio, ratio_str, JunkPolicy, Match, SequenceMatcher};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_empty_sequences_are_identical() {
        assert_eq!(ratio_str("", "", &JunkPolicy::None), 1.0);
    }

    #[test]
    fn test_one_empty_sequence_scores_zero() {
        assert_eq!(ratio_str("abc", "", &JunkPolicy::None), 0.0);
        assert_eq!(ratio_str("", "abc", &JunkPolicy::None), 0.0);
    }

    #[test]
    fn test_identical_sequences() {
        assert_eq!(ratio_str("abcdef", "abcdef", &JunkPolicy::None), 1.0);
        assert_eq!(ratio_str("x", "x", &JunkPolicy::None), 1.0);
    }

    #[test]
    fn test_disjoint_sequences() {
        assert_eq!(ratio_str("abcdef", "zzzzzz", &JunkPolicy::None), 0.0);
        assert_eq!(ratio_str("a", "b", &JunkPolicy::None), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // "bcd" is the only block: 2 * 3 / 8
        assert_eq!(ratio_str("abcd", "bcde", &JunkPolicy::None), 0.75);
    }

    #[test]
    fn test_blocks_on_both_sides_of_insertion() {
        let a = chars("abcd");
        let b = chars("abxcd");
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);

        assert_eq!(
            matcher.matching_blocks(),
            vec![
                Match { a: 0, b: 0, size: 2 },
                Match { a: 2, b: 3, size: 2 },
            ]
        );
        assert_eq!(matcher.ratio(), 8.0 / 9.0);
    }

    #[test]
    fn test_longest_match_prefers_earliest_in_a() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);

        assert_eq!(
            matcher.find_longest_match(0, a.len(), 0, b.len()),
            Match { a: 0, b: 4, size: 5 }
        );
    }

    #[test]
    fn test_junk_cannot_seed_a_match() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::custom(|c| c == ' '));

        assert_eq!(
            matcher.find_longest_match(0, a.len(), 0, b.len()),
            Match { a: 1, b: 0, size: 4 }
        );
        assert!(matcher.junk().contains(&' '));
    }

    #[test]
    fn test_longest_match_respects_window() {
        let a = chars("abcabc");
        let b = chars("xxabcx");
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);

        assert_eq!(
            matcher.find_longest_match(3, 6, 0, 6),
            Match { a: 3, b: 2, size: 3 }
        );
        assert_eq!(matcher.find_longest_match(0, 3, 0, 2).size, 0);
    }

    #[test]
    fn test_adjacent_blocks_are_collapsed() {
        let a = chars("qabxcd");
        let b = chars("abycdf");
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);

        assert_eq!(
            matcher.matching_blocks(),
            vec![
                Match { a: 1, b: 0, size: 2 },
                Match { a: 4, b: 3, size: 2 },
            ]
        );
    }

    #[test]
    fn test_whitespace_junk_with_inserted_word() {
        let score = ratio_str(
            "private Thread currentThread;",
            "private volatile Thread currentThread;",
            &JunkPolicy::Whitespace,
        );
        assert_eq!(score, 2.0 * 29.0 / 67.0);
    }

    #[test]
    fn test_sequences_differing_only_in_junk() {
        // Every character of the shorter text is matched; only the extra
        // spaces count against the score.
        let score = ratio_str(
            "the quick brown fox",
            "the  quick   brown fox",
            &JunkPolicy::Whitespace,
        );
        assert_eq!(score, 38.0 / 41.0);
    }

    #[test]
    fn test_autojunk_marks_popular_characters() {
        let a = chars("xyz");
        let b = chars(&("ab".repeat(100) + "xyz"));
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);

        let mut popular: Vec<_> = matcher.popular().iter().copied().collect();
        popular.sort_unstable();
        assert_eq!(popular, vec!['a', 'b']);
        assert_eq!(matcher.ratio(), 6.0 / 206.0);
    }

    #[test]
    fn test_autojunk_needs_long_b() {
        let a = chars("ab");
        let b = chars(&"ab".repeat(99));
        let matcher = SequenceMatcher::new(&a, &b, &JunkPolicy::None);
        assert!(matcher.popular().is_empty());
    }

    #[test]
    fn test_autojunk_does_not_break_identity() {
        let text = chars(&"abcab".repeat(60));
        assert_eq!(ratio(&text, &text, &JunkPolicy::None), 1.0);
    }

    #[test]
    fn test_greedy_matching_is_made_symmetric() {
        // The raw matcher scores this pair 4/7 one way and 2/7 the other.
        let forward = ratio_str("aa ", " ab ", &JunkPolicy::None);
        let backward = ratio_str(" ab ", "aa ", &JunkPolicy::None);

        assert_eq!(forward, backward);
        assert_eq!(forward, 4.0 / 7.0);
    }

    #[test]
    fn test_raw_matcher_is_orientation_dependent() {
        let a = chars("aa ");
        let b = chars(" ab ");
        let forward = SequenceMatcher::new(&a, &b, &JunkPolicy::None).ratio();
        let backward = SequenceMatcher::new(&b, &a, &JunkPolicy::None).ratio();
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_junk_policy_from_mode() {
        use crate::config::JunkMode;

        assert!(!JunkPolicy::from(JunkMode::None).is_enabled());
        let whitespace = JunkPolicy::from(JunkMode::Whitespace);
        assert!(whitespace.is_junk('\t'));
        assert!(!whitespace.is_junk('a'));
    }
}
