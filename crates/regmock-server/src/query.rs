//! Query matching and pagination over the seeded dataset.
//!
//! Pure functions: nothing here touches the network or mutates shared
//! state. The route handlers translate HTTP parameters into these calls.

use regex::Regex;
use regmock_common::types::SearchRecord;

use crate::dataset::{ContinuationOverride, RegistryDataset};

/// Finds the first search record whose key matches the query.
///
/// A query containing `*` is treated as a glob and rewritten to a regex
/// (`*` becomes `.*`); any other query is used as a regex pattern
/// directly, so a bare term like `alpine` matches the key it names. The
/// match is unanchored. Keys are scanned in seeding order, which keeps
/// repeated calls for the same query stable.
///
/// Returns `None` when nothing matches or when the pattern does not
/// compile; both are normal outcomes, not errors.
#[must_use]
pub fn find_best_match<'a>(dataset: &'a RegistryDataset, query: &str) -> Option<&'a SearchRecord> {
    let pattern = if query.contains('*') {
        query.replace('*', ".*")
    } else {
        query.to_string()
    };
    let regex = Regex::new(&pattern).ok()?;
    dataset
        .search_entries()
        .iter()
        .find(|(key, _)| regex.is_match(key))
        .map(|(_, record)| record)
}

/// Truncates a record's results to at most `limit` entries.
///
/// Operates on a copy so the shared fixture is never mutated. After
/// truncation `num_results` is set to the returned length, even where
/// that disagrees with the fixture's advertised total. A `None` or zero
/// limit returns the record unchanged.
#[must_use]
pub fn apply_result_limit(record: &SearchRecord, limit: Option<usize>) -> SearchRecord {
    let mut copy = record.clone();
    if let Some(limit) = limit.filter(|l| *l > 0) {
        copy.results.truncate(limit);
        copy.num_results = copy.results.len();
    }
    copy
}

/// Permissive limit parsing: `Some` only for a positive integer.
///
/// Anything else — empty, non-numeric, zero, negative — is "no limit".
/// Routes that must reject malformed limits (the search route) do their
/// own strict check instead of calling this.
#[must_use]
pub fn parse_limit(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|limit| *limit > 0)
}

/// Slices one page out of a repository's tag list.
///
/// `last` is a resume-after cursor: the page starts strictly after the
/// first tag equal to it, or at the beginning when the cursor is empty
/// or not found. A registered continuation override for the exact
/// `(repository, limit, last)` triple wins over slicing and is returned
/// verbatim.
#[must_use]
pub fn paginate_tags<'a>(
    continuations: &'a [ContinuationOverride],
    repository: &str,
    tags: &'a [String],
    limit: Option<usize>,
    last: &str,
) -> &'a [String] {
    let limit = limit.filter(|l| *l > 0);

    if let Some(continuation) = continuations.iter().find(|c| {
        c.repository == repository && Some(c.limit) == limit && c.last == last
    }) {
        return &continuation.tags;
    }

    if limit.is_none() && last.is_empty() {
        return tags;
    }

    let start = if last.is_empty() {
        0
    } else {
        // Cursor not found falls back to the start; fixture data is
        // assumed internally consistent.
        tags.iter().position(|tag| tag == last).map_or(0, |i| i + 1)
    };

    match limit {
        Some(limit) => &tags[start..start.saturating_add(limit).min(tags.len())],
        None => &tags[start..],
    }
}

#[cfg(test)]
mod tests {
    use regmock_common::types::SearchRecord;

    use super::*;
    use crate::dataset::RegistryDataset;

    fn two_key_dataset() -> RegistryDataset {
        RegistryDataset::new()
            .with_search("alpine", SearchRecord::empty("alpine"))
            .with_search("alpine-extra", SearchRecord::empty("alpine-extra"))
    }

    #[test]
    fn find_best_match_literal_query_matches_its_key() {
        let dataset = RegistryDataset::seeded();
        let record = find_best_match(&dataset, "busybox").expect("no match for busybox");
        assert_eq!(record.query, "busybox");
    }

    #[test]
    fn find_best_match_glob_rewrites_star_to_regex() {
        let dataset = RegistryDataset::seeded();
        let record = find_best_match(&dataset, "busy*x").expect("no match for glob");
        assert_eq!(record.query, "busybox");
    }

    #[test]
    fn find_best_match_returns_first_key_in_seeding_order() {
        let dataset = two_key_dataset();
        let record = find_best_match(&dataset, "alpine").expect("no match");
        assert_eq!(record.query, "alpine");

        // Both keys match the pattern; the earlier seeded one wins.
        let record = find_best_match(&dataset, "alp.*").expect("no match");
        assert_eq!(record.query, "alpine");
    }

    #[test]
    fn find_best_match_is_stable_across_repeated_calls() {
        let dataset = RegistryDataset::seeded();
        let first = find_best_match(&dataset, "alpine").expect("no match");
        for _ in 0..10 {
            let again = find_best_match(&dataset, "alpine").expect("no match");
            assert_eq!(again.query, first.query);
        }
    }

    #[test]
    fn find_best_match_no_match_is_none() {
        let dataset = RegistryDataset::seeded();
        assert!(find_best_match(&dataset, "nosuchimage123").is_none());
    }

    #[test]
    fn find_best_match_invalid_pattern_matches_nothing() {
        let dataset = RegistryDataset::seeded();
        assert!(find_best_match(&dataset, "[unclosed").is_none());
    }

    #[test]
    fn apply_result_limit_truncates_and_rewrites_count() {
        let dataset = RegistryDataset::seeded();
        let record = find_best_match(&dataset, "alpine").expect("no match");
        let limited = apply_result_limit(record, Some(5));
        assert_eq!(limited.results.len(), 5);
        assert_eq!(limited.num_results, 5);
        // The shared fixture is untouched.
        assert_eq!(record.results.len(), 25);
        assert_eq!(record.num_results, 25);
    }

    #[test]
    fn apply_result_limit_larger_than_results_returns_everything() {
        let dataset = RegistryDataset::seeded();
        let record = find_best_match(&dataset, "busybox").expect("no match");
        let limited = apply_result_limit(record, Some(50));
        assert_eq!(limited.results.len(), 2);
        assert_eq!(limited.num_results, 2);
    }

    #[test]
    fn apply_result_limit_none_and_zero_leave_record_unchanged() {
        let dataset = RegistryDataset::seeded();
        let record = find_best_match(&dataset, "alpine").expect("no match");
        assert_eq!(apply_result_limit(record, None), *record);
        assert_eq!(apply_result_limit(record, Some(0)), *record);
    }

    #[test]
    fn parse_limit_accepts_only_positive_integers() {
        assert_eq!(parse_limit("3"), Some(3));
        assert_eq!(parse_limit("100"), Some(100));
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("-4"), None);
        assert_eq!(parse_limit(""), None);
        assert_eq!(parse_limit("bogus"), None);
    }

    fn alpine_tags() -> Vec<String> {
        ["3.10.2", "3.2", "latest", "withbogusseccomp", "withseccomp"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn paginate_identity_when_unbounded_and_no_cursor() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, None, "");
        assert_eq!(page, tags.as_slice());
    }

    #[test]
    fn paginate_first_page_respects_limit() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, Some(3), "");
        assert_eq!(page, ["3.10.2", "3.2", "latest"]);
    }

    #[test]
    fn paginate_resumes_strictly_after_cursor() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, Some(2), "3.2");
        assert_eq!(page, ["latest", "withbogusseccomp"]);
        assert!(!page.contains(&"3.2".to_string()));
    }

    #[test]
    fn paginate_cursor_at_final_tag_yields_empty_page() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, Some(10), "withseccomp");
        assert!(page.is_empty());

        let page = paginate_tags(&[], "libpod/alpine", &tags, None, "withseccomp");
        assert!(page.is_empty());
    }

    #[test]
    fn paginate_unknown_cursor_starts_from_beginning() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, Some(2), "not-a-tag");
        assert_eq!(page, ["3.10.2", "3.2"]);
    }

    #[test]
    fn paginate_limit_past_end_returns_remainder_without_padding() {
        let tags = alpine_tags();
        let page = paginate_tags(&[], "libpod/alpine", &tags, Some(100), "latest");
        assert_eq!(page, ["withbogusseccomp", "withseccomp"]);
    }

    #[test]
    fn paginate_maximum_limit_with_cursor_returns_remainder() {
        let tags = alpine_tags();
        let page = paginate_tags(
            &[],
            "libpod/alpine",
            &tags,
            parse_limit("18446744073709551615"),
            "3.10.2",
        );
        assert_eq!(page, ["3.2", "latest", "withbogusseccomp", "withseccomp"]);
    }

    #[test]
    fn paginate_empty_tag_list_yields_empty_page() {
        let tags: Vec<String> = Vec::new();
        assert!(paginate_tags(&[], "empty/repo", &tags, Some(5), "").is_empty());
        assert!(paginate_tags(&[], "empty/repo", &tags, None, "").is_empty());
    }

    #[test]
    fn paginate_exact_continuation_triple_returns_override_verbatim() {
        let dataset = RegistryDataset::seeded();
        let tags = dataset.tags("podman/stable").expect("podman/stable missing");
        let page = paginate_tags(
            dataset.continuations(),
            "podman/stable",
            tags,
            Some(100),
            "v5.4",
        );
        assert_eq!(page.len(), 24);
        assert_eq!(page[0], "v5.4.0");
        assert_eq!(page[23], "v5-immutable");
    }

    #[test]
    fn paginate_near_miss_of_continuation_triple_falls_back_to_slicing() {
        let dataset = RegistryDataset::seeded();
        let tags = dataset.tags("podman/stable").expect("podman/stable missing");

        // Same cursor, different limit: v5.4 is the final tag, so the
        // contiguous slice after it is empty.
        let page = paginate_tags(
            dataset.continuations(),
            "podman/stable",
            tags,
            Some(99),
            "v5.4",
        );
        assert!(page.is_empty());

        // Same limit, different cursor: plain slicing applies.
        let page = paginate_tags(
            dataset.continuations(),
            "podman/stable",
            tags,
            Some(100),
            "v5.3",
        );
        assert_eq!(page.first().map(String::as_str), Some("v5.3.0"));
    }
}
