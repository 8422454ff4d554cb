use crate::router::Route;
use crate::views::admin::{SELECT_PLACEHOLDER, UNREADABLE_CACHE_NOTICE};
use crate::views::{AdminView, Background, NavBar, Page, SessionLink, ViewBody};

use models::parse_user_list;

/// **VALUE**: A cached user renders as exactly one formatted row.
///
/// **BUG THIS CATCHES**: Would catch permissions rendered as a JSON array or a
/// stray separator after the last permission.
#[test]
fn given_cached_bob_when_rendered_then_exactly_one_formatted_row() {
    // GIVEN: The cache a dashboard fetch would leave behind
    let users = parse_user_list(
        r#"[{"username":"bob","role":"admin","permissions":["changeBackground"]}]"#,
    )
    .unwrap();

    // WHEN: Building the admin view
    let view = AdminView::new(users, "");

    // THEN: One row, in the dashboard's format
    assert_eq!(
        view.rows(),
        vec!["Username: bob, Role: admin, Permissions: changeBackground".to_string()]
    );
}

#[test]
fn given_users_when_options_built_then_placeholder_comes_first() {
    let users = parse_user_list(
        r#"[{"username":"bob","role":"admin","permissions":[]},
            {"username":"carol","role":"user","permissions":["a","b"]}]"#,
    )
    .unwrap();
    let view = AdminView::new(users, "carol");

    let options = view.options();

    assert_eq!(options.len(), 3);
    assert_eq!(options[0].value, "");
    assert_eq!(options[0].label, SELECT_PLACEHOLDER);
    assert_eq!(options[1].value, "bob");
    assert_eq!(options[2].value, "carol");
    assert_eq!(
        view.rows()[1],
        "Username: carol, Role: user, Permissions: a, b"
    );
}

#[test]
fn given_unreadable_cache_when_view_built_then_notice_and_no_rows() {
    let view = AdminView::unavailable("");

    assert!(view.rows().is_empty());
    assert_eq!(view.notice.as_deref(), Some(UNREADABLE_CACHE_NOTICE));
    assert_eq!(view.options().len(), 1);
}

#[test]
fn given_login_state_when_nav_built_then_session_link_follows_it() {
    assert_eq!(NavBar::new(true).session_link, SessionLink::Logout);
    assert_eq!(NavBar::new(false).session_link, SessionLink::Register);
    assert_eq!(NavBar::new(false).links.len(), 2);
}

#[test]
fn given_admin_page_when_displayed_then_rows_and_background_are_drawn() {
    let users = parse_user_list(
        r#"[{"username":"bob","role":"admin","permissions":["changeBackground"]}]"#,
    )
    .unwrap();
    let page = Page {
        route: Route::Admin,
        path: "/admin".to_string(),
        nav: NavBar::new(true),
        body: ViewBody::Admin(AdminView::new(users, "bob")),
        background: Background::Blue,
    };

    let rendered = page.to_string();

    assert!(rendered.contains("[Logout]"));
    assert!(rendered.contains("Username: bob, Role: admin, Permissions: changeBackground"));
    assert!(rendered.contains("options: Select a user | <bob>"));
    assert!(rendered.contains("selected: bob"));
    assert!(rendered.contains("background: blue"));
    assert!(page.admin_view().is_some());
}

#[test]
fn given_contact_page_when_displayed_then_shows_contact_text() {
    let page = Page {
        route: Route::Contact,
        path: "/contact".to_string(),
        nav: NavBar::new(false),
        body: ViewBody::Contact,
        background: Background::Default,
    };

    let rendered = page.to_string();

    assert!(rendered.contains("Contact us"));
    assert!(!rendered.contains("background"));
    assert!(page.admin_view().is_none());
}

#[test]
fn given_cached_users_when_checking_options_then_only_listed_names_and_placeholder_match() {
    let users = parse_user_list(
        r#"[{"username":"bob","role":"user","permissions":[]},{"username":"carol","role":"user","permissions":[]}]"#,
    )
    .unwrap();
    let view = AdminView::new(users, "");

    assert!(view.has_option(""));
    assert!(view.has_option("carol"));
    assert!(!view.has_option("mallory"));
    assert!(!view.has_option("Select a user"));
}
