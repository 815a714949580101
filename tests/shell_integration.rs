//! Shell Integration Tests
//!
//! End-to-end checks of routing, tab selection, history and the auth gate
//! across the app-state, app-ui and app-tui crates.

use app_state::{AuthState, LoginRequest, RequireFields, SessionError, UserSummary};
use app_tui::{App, TuiConfig};
use app_ui::{
    active_entry, select_active, AuthGate, GateView, LayoutShell, MatchKind, NavigationOutcome,
    NavigationRequest, Region, Route, RouteTable, Router, DEFAULT_PATH,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

const KNOWN_PATHS: [&str; 8] = [
    "/dashboard",
    "/tasks",
    "/task/TASK001",
    "/compliance/TASK001",
    "/lift-tracker",
    "/report-issue",
    "/notifications",
    "/profile",
];

fn signed_in_gate() -> AuthGate {
    let mut gate = AuthGate::new(UserSummary::default()).unwrap();
    gate.login();
    gate
}

/// Unknown paths resolve to the same screen as the default path
#[test]
fn test_unknown_paths_resolve_to_dashboard() {
    let router = Router::new();
    let home = router.resolve(DEFAULT_PATH);

    for path in [
        "/",
        "",
        "/nope",
        "/Dashboard",
        "/dashboard/extra",
        "/task",
        "/task/",
        "/task/A/B",
        "/compliance",
        "tasks",
    ] {
        let resolution = router.resolve(path);
        assert_eq!(resolution.route, home.route, "{path:?}");
        assert_eq!(resolution.path, "/dashboard");
        assert!(resolution.redirected, "{path:?}");
    }

    for path in KNOWN_PATHS {
        let resolution = router.resolve(path);
        assert!(!resolution.redirected, "{path}");
        assert_eq!(resolution.path, path);
    }
}

/// Default entry matches exactly; others match by prefix
#[test]
fn test_active_entry_rules() {
    let table = RouteTable::standard().unwrap();
    let entries = table.primary_entries();

    assert_eq!(active_entry("/dashboard", entries).unwrap().id, "dashboard");
    for suffix in ["", "/", "/anything", "/a/b/c", "-archive"] {
        let path = format!("/tasks{suffix}");
        assert_eq!(active_entry(&path, entries).unwrap().id, "tasks", "{path}");
    }

    // Shares a prefix with the default path but is not it
    let active = select_active("/dashboardX", entries).unwrap();
    assert_eq!(active.kind, MatchKind::Fallback);
    assert_ne!(active.kind, MatchKind::Matched(app_ui::TabRule::Exact));

    // Detail paths are not under any tab
    assert_eq!(select_active("/task/TASK001", entries).unwrap().kind, MatchKind::Fallback);
}

/// Every inserted id and path is retrievable, and nothing else is
#[test]
fn test_lookups_are_total_over_table() {
    let table = RouteTable::standard().unwrap();
    let entries: Vec<_> = table.all_entries().cloned().collect();
    assert_eq!(entries.len(), 6);

    for entry in &entries {
        assert_eq!(table.find_by_id(&entry.id), Some(entry));
        assert_eq!(table.find_by_path(&entry.path), Some(entry));
    }

    for missing in ["", "/", "home", "/task/TASK001", "/dashboard/", "DASHBOARD"] {
        assert!(table.find_by_id(missing).is_none(), "{missing}");
        assert!(table.find_by_path(missing).is_none(), "{missing}");
    }

    let ids: Vec<_> = table.primary_entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["dashboard", "tasks", "notifications", "profile"]);
    let secondary: Vec<_> = table.secondary_entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(secondary, ["/lift-tracker", "/report-issue"]);
}

/// Logging out discards ActivePath; the next login starts at the dashboard
#[test]
fn test_logout_discards_active_path() {
    let mut gate = signed_in_gate();
    gate.navigate(NavigationRequest::to("/notifications"));
    gate.navigate(NavigationRequest::to("/task/TASK002"));
    let first_mount = gate.shell().unwrap().mount_id();

    gate.logout();
    assert_eq!(gate.session().state(), AuthState::Unauthenticated);
    assert!(gate.active_path().is_none());
    assert!(matches!(gate.view(), GateView::Login));

    gate.login();
    let shell = gate.shell().unwrap();
    assert_eq!(shell.active_path(), "/dashboard");
    assert_eq!(shell.history().depth(), 1);
    assert_ne!(shell.mount_id(), first_mount);

    // Back has nowhere to go in a fresh mount
    assert_eq!(gate.navigate(NavigationRequest::Back), NavigationOutcome::Unchanged);
}

/// Detail path carries its task id, and back returns to the previous path
#[test]
fn test_task_detail_and_back() {
    let mut gate = signed_in_gate();
    gate.navigate(NavigationRequest::to("/tasks"));
    gate.navigate(NavigationRequest::to("/task/TASK001"));

    let ctx = gate.screen_context().unwrap();
    assert_eq!(
        ctx.route,
        &Route::TaskDetail {
            task_id: "TASK001".to_string()
        }
    );
    assert_eq!(ctx.task_id, Some("TASK001"));
    assert!(ctx.logout.is_none());

    let back = NavigationRequest::delta(-1).unwrap();
    assert_eq!(gate.navigate(back), NavigationOutcome::WentBack);
    assert_eq!(gate.active_path(), Some("/tasks"));
}

/// Navigation while signed out leaves the login view mounted
#[test]
fn test_navigation_before_login_has_no_effect() {
    let mut gate = AuthGate::new(UserSummary::default()).unwrap();
    assert_eq!(
        gate.navigate(NavigationRequest::to("/profile")),
        NavigationOutcome::Ignored
    );
    assert!(matches!(gate.view(), GateView::Login));
    assert!(gate.screen_context().is_none());

    gate.login();
    assert_eq!(gate.active_path(), Some("/dashboard"));
}

/// Re-navigating to the current path changes nothing
#[test]
fn test_repeat_navigation_is_noop() {
    let mut gate = signed_in_gate();
    assert_eq!(gate.navigate(NavigationRequest::to("/tasks")), NavigationOutcome::Navigated);
    for _ in 0..3 {
        assert_eq!(gate.navigate(NavigationRequest::to("/tasks")), NavigationOutcome::Unchanged);
    }
    assert_eq!(gate.shell().unwrap().history().depth(), 2);
}

/// The credential seam can replace the unconditional login
#[test]
fn test_strict_verifier_gates_login() {
    let mut gate = AuthGate::new(UserSummary::default())
        .unwrap()
        .with_verifier(Box::new(RequireFields));
    assert_eq!(
        gate.submit_login(&LoginRequest::QuickAccess),
        Err(SessionError::QuickAccessDisabled)
    );
    assert!(!gate.is_authenticated());

    gate.submit_login(&LoginRequest::credentials("john@eliteconstruct.com", "secret"))
        .unwrap();
    assert_eq!(gate.active_path(), Some("/dashboard"));
}

/// The tab bar keeps its rows at every terminal height
#[test]
fn test_layout_never_overlaps_tab_bar() {
    let layout = LayoutShell::default();
    for height in 0..40 {
        let regions = layout.split(Region::new(0, 0, 80, height));
        assert!(!regions.content.intersects(&regions.tab_bar));
        assert_eq!(regions.tab_bar.bottom(), height);
        if height >= layout.tab_bar_height {
            assert_eq!(regions.tab_bar.height, layout.tab_bar_height);
        }
    }
}

/// Full terminal session: quick access, tab switch, logout
#[test]
fn test_terminal_session() {
    let mut app = App::new(TuiConfig::default()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    let press = |app: &mut App, code: KeyCode, modifiers: KeyModifiers| {
        app.handle_key(KeyEvent::new(code, modifiers));
    };

    press(&mut app, KeyCode::Char('d'), KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Char('4'), KeyModifiers::NONE);
    terminal.draw(|frame| app.draw(frame)).unwrap();
    assert_eq!(app.gate().active_path(), Some("/profile"));

    press(&mut app, KeyCode::Char('o'), KeyModifiers::NONE);
    press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);
    terminal.draw(|frame| app.draw(frame)).unwrap();
    assert!(!app.gate().is_authenticated());

    let buffer = terminal.backend().buffer();
    let screen: String = (0..buffer.area.height)
        .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
        .map(|(x, y)| buffer[(x, y)].symbol().to_string())
        .collect();
    assert!(screen.contains("Technician Login"));
}
