use lscmp_common::{CompareSummary, Comparison, MatchStatus, NameEntry, Side};
use std::collections::HashSet;
use tracing::{debug, info};

/// Fold a name for membership testing under the active case policy
fn fold_case(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

/// Compare two name listings and classify every entry as matched or missing.
///
/// Each side is tested against a membership set built from the other side.
/// The right side is scanned independently instead of being derived from the
/// left pass, so duplicate names on one side each match the same opposite
/// entry. The summary counts matched pairs from the left entries only.
pub fn compare(left: &[String], right: &[String], case_sensitive: bool) -> Comparison {
    info!(
        "Comparing {} left names with {} right names (case sensitive: {})",
        left.len(),
        right.len(),
        case_sensitive
    );

    let left_set: HashSet<String> = left.iter().map(|n| fold_case(n, case_sensitive)).collect();
    let right_set: HashSet<String> = right.iter().map(|n| fold_case(n, case_sensitive)).collect();

    let left_entries: Vec<NameEntry> = left
        .iter()
        .map(|name| {
            let status = if right_set.contains(&fold_case(name, case_sensitive)) {
                MatchStatus::Matched
            } else {
                MatchStatus::Missing
            };
            NameEntry::new(name.clone(), Side::Left, status)
        })
        .collect();

    let right_entries: Vec<NameEntry> = right
        .iter()
        .map(|name| {
            let status = if left_set.contains(&fold_case(name, case_sensitive)) {
                MatchStatus::Matched
            } else {
                MatchStatus::Missing
            };
            NameEntry::new(name.clone(), Side::Right, status)
        })
        .collect();

    let summary = CompareSummary::from_entries(&left_entries, &right_entries);
    debug!(
        "Classified {} matched, {} left missing, {} right missing",
        summary.matched, summary.left_missing, summary.right_missing
    );

    Comparison {
        left: left_entries,
        right: right_entries,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn statuses(entries: &[NameEntry]) -> Vec<MatchStatus> {
        entries.iter().map(|e| e.status).collect()
    }

    #[test]
    fn test_compare_identical() {
        let left = names(&["a.txt", "b.txt"]);
        let right = names(&["a.txt", "b.txt"]);

        let result = compare(&left, &right, true);

        assert!(result
            .left
            .iter()
            .chain(result.right.iter())
            .all(|e| e.status == MatchStatus::Matched));
        assert_eq!(result.summary.matched, 2);
        assert_eq!(result.summary.left_missing, 0);
        assert_eq!(result.summary.right_missing, 0);
        assert!(!result.has_missing());
    }

    #[test]
    fn test_compare_disjoint() {
        let left = names(&["a.txt"]);
        let right = names(&["b.txt"]);

        let result = compare(&left, &right, true);

        assert_eq!(result.left[0].status, MatchStatus::Missing);
        assert_eq!(result.right[0].status, MatchStatus::Missing);
        assert_eq!(result.summary.matched, 0);
        assert_eq!(result.summary.left_missing, 1);
        assert_eq!(result.summary.right_missing, 1);
        assert!(result.has_missing());
    }

    #[test]
    fn test_compare_partial_overlap() {
        let left = names(&["shared.txt", "left_only.txt"]);
        let right = names(&["shared.txt", "right_only.txt"]);

        let result = compare(&left, &right, true);

        assert_eq!(
            statuses(&result.left),
            vec![MatchStatus::Matched, MatchStatus::Missing]
        );
        assert_eq!(
            statuses(&result.right),
            vec![MatchStatus::Matched, MatchStatus::Missing]
        );
        assert_eq!(result.summary.matched, 1);
        assert_eq!(result.summary.left_missing, 1);
        assert_eq!(result.summary.right_missing, 1);
    }

    #[test]
    fn test_case_insensitive_matches_across_case() {
        let left = names(&["File.TXT"]);
        let right = names(&["file.txt"]);

        let result = compare(&left, &right, false);

        assert_eq!(result.left[0].status, MatchStatus::Matched);
        assert_eq!(result.right[0].status, MatchStatus::Matched);
        assert_eq!(result.summary.matched, 1);
    }

    #[test]
    fn test_case_sensitive_distinguishes_case() {
        let left = names(&["File.TXT"]);
        let right = names(&["file.txt"]);

        let result = compare(&left, &right, true);

        assert_eq!(result.left[0].status, MatchStatus::Missing);
        assert_eq!(result.right[0].status, MatchStatus::Missing);
        assert_eq!(result.summary.matched, 0);
    }

    #[test]
    fn test_original_names_survive_case_folding() {
        let left = names(&["README.md"]);
        let right = names(&["readme.MD"]);

        let result = compare(&left, &right, false);

        // Folding is for membership only; the output carries the input names
        assert_eq!(result.left[0].name, "README.md");
        assert_eq!(result.right[0].name, "readme.MD");
    }

    #[test]
    fn test_unicode_case_folding() {
        let left = names(&["Übersicht.txt"]);
        let right = names(&["übersicht.TXT"]);

        let insensitive = compare(&left, &right, false);
        assert_eq!(insensitive.left[0].status, MatchStatus::Matched);

        let sensitive = compare(&left, &right, true);
        assert_eq!(sensitive.left[0].status, MatchStatus::Missing);
    }

    #[test]
    fn test_empty_left() {
        let result = compare(&[], &names(&["a", "b"]), true);

        assert!(result.left.is_empty());
        assert_eq!(
            statuses(&result.right),
            vec![MatchStatus::Missing, MatchStatus::Missing]
        );
        assert_eq!(result.summary.matched, 0);
        assert_eq!(result.summary.left_missing, 0);
        assert_eq!(result.summary.right_missing, 2);
    }

    #[test]
    fn test_both_empty() {
        let result = compare(&[], &[], false);

        assert!(result.left.is_empty());
        assert!(result.right.is_empty());
        assert_eq!(result.summary, CompareSummary::default());
        assert!(!result.has_missing());
    }

    #[test]
    fn test_duplicates_match_per_entry() {
        let left = names(&["a", "a"]);
        let right = names(&["a"]);

        let result = compare(&left, &right, true);

        // Both left duplicates match; matched is counted per left entry
        assert_eq!(
            statuses(&result.left),
            vec![MatchStatus::Matched, MatchStatus::Matched]
        );
        assert_eq!(statuses(&result.right), vec![MatchStatus::Matched]);
        assert_eq!(result.summary.matched, 2);
        assert_eq!(result.summary.left_missing, 0);
        assert_eq!(result.summary.right_missing, 0);
    }

    #[test]
    fn test_summary_totals_for_duplicate_free_inputs() {
        let left = names(&["a", "b", "c", "d"]);
        let right = names(&["b", "d", "e"]);

        let result = compare(&left, &right, true);

        assert_eq!(
            result.summary.matched + result.summary.left_missing,
            left.len()
        );
        assert_eq!(
            result.summary.matched + result.summary.right_missing,
            right.len()
        );
    }

    #[test]
    fn test_matched_count_symmetric_for_duplicate_free_inputs() {
        let a = names(&["x", "y", "z"]);
        let b = names(&["y", "z", "w"]);

        let forward = compare(&a, &b, true);
        let reverse = compare(&b, &a, true);

        assert_eq!(forward.summary.matched, reverse.summary.matched);
        assert_eq!(
            forward.summary.left_missing,
            reverse.summary.right_missing
        );
        assert_eq!(
            forward.summary.right_missing,
            reverse.summary.left_missing
        );
    }

    #[test]
    fn test_output_preserves_input_order() {
        let left = names(&["z", "a", "m"]);
        let right = names(&["m", "z"]);

        let result = compare(&left, &right, true);

        let left_names: Vec<&str> = result.left.iter().map(|e| e.name.as_str()).collect();
        let right_names: Vec<&str> = result.right.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(left_names, vec!["z", "a", "m"]);
        assert_eq!(right_names, vec!["m", "z"]);
    }

    #[test]
    fn test_idempotent() {
        let left = names(&["a", "B", "c"]);
        let right = names(&["b", "C"]);

        let first = compare(&left, &right, false);
        let second = compare(&left, &right, false);

        assert_eq!(first, second);
    }

    #[test]
    fn test_sides_assigned() {
        let result = compare(&names(&["a"]), &names(&["b"]), true);

        assert!(result.left.iter().all(|e| e.side == Side::Left));
        assert!(result.right.iter().all(|e| e.side == Side::Right));
    }
}
