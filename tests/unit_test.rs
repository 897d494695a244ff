// Unit tests for member-admin
// These tests drive the public API the way the UI event loop does

#[cfg(test)]
mod search_api_tests {
    use member_admin::fetch::Member;
    use member_admin::search::{self, PAGE_SIZE};

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
                    if i % 2 == 0 { "member" } else { "admin" },
                )
            })
            .collect()
    }

    #[test]
    fn search_returns_exactly_the_prefix_matching_subset() {
        let members = vec![
            mk_member("1", "Aaron Miles", "aaron@mailinator.com", "member"),
            mk_member("2", "Mary Lawrence", "mary@mailinator.com", "admin"),
            mk_member("3", "Astor Kim", "astor@mailinator.com", "member"),
        ];
        for query in ["a", "aa", "mar", "admin", "MEMBER", ""] {
            let got = search::search_results(&members, query);
            let q = query.to_lowercase();
            let expected: Vec<Member> = members
                .iter()
                .filter(|m| {
                    q.is_empty()
                        || m.name.to_lowercase().starts_with(&q)
                        || m.email.to_lowercase().starts_with(&q)
                        || m.role.to_lowercase().starts_with(&q)
                })
                .cloned()
                .collect();
            assert_eq!(got, expected, "query {query:?}");
        }
    }

    #[test]
    fn mid_word_query_matches_nothing() {
        let members = vec![
            mk_member("1", "Ann", "ann@x.com", "member"),
            mk_member("2", "Bob", "bob@x.com", "member"),
        ];
        // "an" is a prefix of "Ann"/"ann@..." so it matches; "ob" only occurs
        // mid-word and must not.
        assert_eq!(search::search_results(&members, "an").len(), 1);
        assert!(search::search_results(&members, "ob").is_empty());
    }

    #[test]
    fn every_page_has_the_expected_size() {
        for len in [0usize, 1, 9, 10, 11, 19, 20, 21, 37] {
            let members = roster(len);
            for page in 0..search::page_count(len) + 2 {
                let expected = len.saturating_sub(page * PAGE_SIZE).min(PAGE_SIZE);
                assert_eq!(
                    search::page_slice(&members, page).len(),
                    expected,
                    "len={len} page={page}"
                );
            }
        }
    }

    #[test]
    fn pages_concatenate_back_to_the_filtered_result() {
        let members = roster(34);
        let results = search::search_results(&members, "user");
        let mut rebuilt = Vec::new();
        for page in 0..search::page_count(results.len()) {
            rebuilt.extend_from_slice(search::page_slice(&results, page));
        }
        assert_eq!(rebuilt, results);
    }
}

#[cfg(test)]
mod state_api_tests {
    use member_admin::app::{AppState, InputMode, RequestStatus, Theme, keymap::Keymap, update};
    use member_admin::fetch::Member;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mk_member(id: &str, name: &str, email: &str, role: &str) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            is_checked: false,
        }
    }

    fn mk_app(members: Vec<Member>) -> AppState {
        let mut app = AppState::new(Theme::dark(), Keymap::default());
        app.apply_fetch(Ok(members));
        app
    }

    fn roster(n: usize) -> Vec<Member> {
        (0..n)
            .map(|i| {
                mk_member(
                    &i.to_string(),
                    &format!("user{i}"),
                    &format!("user{i}@x.com"),
                    "member",
                )
            })
            .collect()
    }

    fn press(app: &mut AppState, code: KeyCode) {
        update::handle_key(app, &KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn apply_fetch_success_populates_the_roster() {
        let app = mk_app(roster(4));
        assert_eq!(app.request_status, RequestStatus::Success);
        assert_eq!(app.members.len(), 4);
        assert!(app.members.iter().all(|m| !m.is_checked));
    }

    #[test]
    fn single_toggle_affects_exactly_one_row() {
        let mut app = mk_app(roster(8));
        app.toggle_member("5");
        let checked: Vec<&str> = app
            .members
            .iter()
            .filter(|m| m.is_checked)
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(checked, vec!["5"]);
    }

    #[test]
    fn delete_keeps_other_rows_byte_identical() {
        let original = roster(6);
        let mut app = mk_app(original.clone());
        app.delete_member("3");
        let expected: Vec<Member> = original.into_iter().filter(|m| m.id != "3").collect();
        assert_eq!(app.members, expected);
    }

    #[test]
    fn save_edit_rewrites_only_the_target_record() {
        let original = roster(6);
        let mut app = mk_app(original.clone());
        app.cursor = 2;
        app.begin_edit();
        {
            let buf = app.edit.as_mut().unwrap();
            buf.name = "A".to_string();
            buf.email = "b@c.com".to_string();
            buf.role = "R".to_string();
        }
        app.save_edit();
        for (i, m) in app.members.iter().enumerate() {
            if i == 2 {
                assert_eq!((m.name.as_str(), m.email.as_str(), m.role.as_str()), ("A", "b@c.com", "R"));
                assert_eq!(m.id, "2");
            } else {
                assert_eq!(*m, original[i]);
            }
        }
    }

    #[test]
    fn keyboard_flow_search_page_and_bulk_delete() {
        let mut app = mk_app(roster(25));
        // Jump to the last page, check the page, and bulk delete.
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.page, 2);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('D'));
        assert_eq!(app.members.len(), 20);
        assert!(!app.select_all);
        // Page index is pulled back into range after the tail page vanished.
        assert_eq!(app.page, 1);
    }

    #[test]
    fn search_narrows_then_escape_restores() {
        let mut app = mk_app(vec![
            mk_member("1", "Ann", "ann@x.com", "member"),
            mk_member("2", "Bob", "bob@x.com", "member"),
        ]);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.input_mode, InputMode::Search);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.current_page().len(), 1);
        assert_eq!(app.current_page()[0].name, "Bob");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.current_page().len(), 2);
    }

    #[test]
    fn select_all_never_reaches_beyond_the_page() {
        let mut app = mk_app(roster(23));
        app.page = 2; // three rows: 20, 21, 22
        app.toggle_select_all();
        let checked: Vec<&str> = app
            .members
            .iter()
            .filter(|m| m.is_checked)
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(checked, vec!["20", "21", "22"]);
        app.toggle_select_all();
        assert!(app.members.iter().all(|m| !m.is_checked));
    }
}
