use super::*;
use shared::domain::{AccountId, PageNumber, ResultRow, SearchTerm};

fn row(index: i64, login: &str) -> ResultRow {
    ResultRow {
        id: AccountId(index),
        login: login.into(),
        avatar_url: format!("https://avatars.example/u/{index}"),
        profile_url: format!("https://github.example/{login}"),
    }
}

fn success(page: u32, total_pages: u32) -> SearchState {
    SearchState {
        term: SearchTerm::new("ada"),
        page: PageNumber::new(page).expect("page"),
        total_pages,
        rows: vec![row(1, "ada"), row(2, "adalovelace")],
        status: SearchStatus::Success,
    }
}

#[test]
fn idle_renders_nothing() {
    assert_eq!(render_state(&SearchState::default()), "");
}

#[test]
fn status_lines() {
    let mut state = SearchState {
        term: SearchTerm::new(" ada "),
        status: SearchStatus::Loading,
        ..SearchState::default()
    };
    assert_eq!(render_state(&state), "Searching for \"ada\"...\n");

    state.status = SearchStatus::Empty;
    assert_eq!(render_state(&state), "No results found\n");

    state.status = SearchStatus::Error("Error fetching data. Please try again.".into());
    assert_eq!(
        render_state(&state),
        "Error fetching data. Please try again.\n"
    );
}

#[test]
fn table_lists_rows_with_profile_links() {
    let frame = render_state(&success(2, 3));
    let lines: Vec<&str> = frame.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("  1  ada "));
    assert!(lines[1].ends_with("https://github.example/ada"));
    assert!(lines[2].ends_with("https://github.example/adalovelace"));
    assert_eq!(lines[3], ":prev  page 2 of 3  :next");
}

#[test]
fn pager_disables_controls_at_boundaries() {
    assert_eq!(
        render_state(&success(1, 3)).lines().last(),
        Some("[prev]  page 1 of 3  :next")
    );
    assert_eq!(
        render_state(&success(3, 3)).lines().last(),
        Some(":prev  page 3 of 3  [next]")
    );
}

#[test]
fn terminal_view_writes_frames() {
    let mut view = TerminalView::new(Vec::new());
    view.render(&SearchState::default());
    view.render(&success(1, 1));

    let written = String::from_utf8(view.out).expect("utf8");
    assert!(written.contains("adalovelace"));
    assert!(written.ends_with("[prev]  page 1 of 1  [next]\n"));
}
