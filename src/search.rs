//! In-memory search and pagination over the member list.
//!
//! Both views are recomputed from the full list on every frame; at this data
//! scale a linear scan per render is fine and keeps the state struct free of
//! cached derivations.

use crate::fetch::Member;

/// Fixed page size of the member table.
pub const PAGE_SIZE: usize = 10;

/// Members whose name, email or role starts with the query,
/// case-insensitively. An empty query matches everything. This is a prefix
/// match, not a substring match.
pub fn search_results(members: &[Member], query: &str) -> Vec<Member> {
    if query.is_empty() {
        return members.to_vec();
    }
    let q = query.to_lowercase();
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().starts_with(&q)
                || m.email.to_lowercase().starts_with(&q)
                || m.role.to_lowercase().starts_with(&q)
        })
        .cloned()
        .collect()
}

/// The window of `results` shown on the zero-based `page`. A partial tail
/// collapses into the last page; a page past the end is empty.
pub fn page_slice(results: &[Member], page: usize) -> &[Member] {
    let start = page.saturating_mul(PAGE_SIZE);
    if start >= results.len() {
        return &[];
    }
    let remaining = results.len() - start;
    if remaining <= PAGE_SIZE {
        &results[start..]
    } else {
        &results[start..start + PAGE_SIZE]
    }
}

/// Number of pages needed for `len` results. An empty result still has one
/// (empty) page so the pagination bar always has something to point at.
pub fn page_count(len: usize) -> usize {
    if len == 0 { 1 } else { len.div_ceil(PAGE_SIZE) }
}

/// Last valid zero-based page index for `len` results.
pub fn last_page(len: usize) -> usize {
    page_count(len) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_member(id: &str, name: &str, email: &str, role: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            is_checked: false,
        }
    }

    fn roster(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| {
                mk_member(
                    &i.to_string(),
                    &format!("user{i}"),
                    &format!("user{i}@mailinator.com"),
                    "member",
                )
            })
            .collect()
    }

    #[test]
    fn empty_query_returns_all_members() {
        let members = roster(23);
        let results = search_results(&members, "");
        assert_eq!(results.len(), 23);
        assert_eq!(results, members);
    }

    #[test]
    fn search_is_prefix_not_substring() {
        let members = vec![
            mk_member("1", "Ann", "ann@x.com", "member"),
            mk_member("2", "Bob", "bob@x.com", "member"),
        ];
        // "an" appears inside "Ann" only as a prefix of the name; a substring
        // query like the middle of a word must not match.
        assert_eq!(search_results(&members, "an").len(), 1);
        assert_eq!(search_results(&members, "nn").len(), 0);
    }

    #[test]
    fn search_single_letter_prefix() {
        let members = vec![
            mk_member("1", "Ann", "x1@y.com", "lead"),
            mk_member("2", "Bo", "x2@y.com", "lead"),
        ];
        let results = search_results(&members, "a");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Ann");
    }

    #[test]
    fn search_is_case_insensitive() {
        let members = vec![
            mk_member("1", "Alice", "alice@x.com", "Admin"),
            mk_member("2", "bob", "bob@x.com", "member"),
        ];
        assert_eq!(search_results(&members, "aLiCe").len(), 1);
        assert_eq!(search_results(&members, "BOB").len(), 1);
        assert_eq!(search_results(&members, "ADMIN").len(), 1);
    }

    #[test]
    fn search_matches_any_of_name_email_role() {
        let members = vec![
            mk_member("1", "Ann", "zeta@x.com", "member"),
            mk_member("2", "Bob", "ann@x.com", "member"),
            mk_member("3", "Cid", "cid@x.com", "annotator"),
            mk_member("4", "Dot", "dot@x.com", "member"),
        ];
        let results = search_results(&members, "ann");
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn search_preserves_collection_order() {
        let members = vec![
            mk_member("9", "amber", "amber@x.com", "member"),
            mk_member("3", "axel", "axel@x.com", "member"),
            mk_member("5", "aria", "aria@x.com", "member"),
        ];
        let results = search_results(&members, "a");
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "3", "5"]);
    }

    #[test]
    fn page_window_sizes() {
        let members = roster(23);
        assert_eq!(page_slice(&members, 0).len(), 10);
        assert_eq!(page_slice(&members, 1).len(), 10);
        assert_eq!(page_slice(&members, 2).len(), 3);
        assert_eq!(page_slice(&members, 3).len(), 0);
        assert_eq!(page_slice(&members, 100).len(), 0);
    }

    #[test]
    fn exact_multiple_of_page_size_has_no_trailing_page() {
        let members = roster(20);
        assert_eq!(page_count(20), 2);
        assert_eq!(page_slice(&members, 1).len(), 10);
        assert_eq!(page_slice(&members, 2).len(), 0);
    }

    #[test]
    fn concatenated_pages_reconstruct_results() {
        let members = roster(37);
        let mut rebuilt = Vec::new();
        for page in 0..page_count(members.len()) {
            rebuilt.extend_from_slice(page_slice(&members, page));
        }
        assert_eq!(rebuilt, members);
    }

    #[test]
    fn page_counts() {
        assert_eq!(page_count(0), 1);
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(last_page(0), 0);
        assert_eq!(last_page(25), 2);
    }

    #[test]
    fn empty_results_have_one_empty_page() {
        let members: Vec<Member> = Vec::new();
        assert_eq!(page_slice(&members, 0).len(), 0);
        assert_eq!(page_count(0), 1);
    }
}
