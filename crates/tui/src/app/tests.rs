use fltr_engine::{
    CancelToken, CategoryItem, DrillDownMode, FilterLoader, FilterSession, FilterSetKind,
    FiltersResponse, LoadCompletion, LoadError, StaticLoader, ValueItem,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Session};
use crate::layout::LayoutState;

fn response() -> FiltersResponse {
    FiltersResponse {
        filters: vec![
            CategoryItem::new(
                "Region",
                vec![
                    ValueItem::total("All"),
                    ValueItem::usual("e", "East"),
                    ValueItem::usual("w", "West").with_children(vec![
                        ValueItem::total("All West"),
                        ValueItem::usual("n", "North"),
                        ValueItem::usual("s", "South"),
                    ]),
                ],
            ),
            CategoryItem::new(
                "Brand",
                vec![
                    ValueItem::total("Any"),
                    ValueItem::usual("b1", "Bolt"),
                    ValueItem::hidden("promo", "Promo"),
                    ValueItem::button("More brands"),
                ],
            ),
        ],
        image_mapping: Vec::new(),
    }
}

fn session(loader: Box<dyn FilterLoader + Send>) -> Session {
    FilterSession::new(
        loader,
        Vec::new(),
        FilterSetKind::new("cars"),
        DrillDownMode::RowPerDrillDown,
    )
}

fn ready_app() -> App {
    let mut app = App::new(session(Box::new(StaticLoader::new(response()))));
    app.pump_session();
    app
}

fn press(app: &mut App, code: KeyCode) -> Option<super::FilterOutcome> {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        .expect("key handled")
}

fn ctrl(app: &mut App, ch: char) -> Option<super::FilterOutcome> {
    app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
        .expect("key handled")
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).expect("terminal");
    terminal.draw(|frame| app.draw(frame)).expect("draw");
    terminal.backend().to_string()
}

struct FailingLoader;

impl FilterLoader for FailingLoader {
    fn load(&self, _kind: &FilterSetKind, _cancel: CancelToken, completion: LoadCompletion) {
        completion(Err(LoadError::Unavailable("offline".to_string())));
    }
}

#[test]
fn shows_skeleton_until_first_load_is_applied() {
    let mut app = App::new(session(Box::new(StaticLoader::new(response()))));
    let screen = render(&mut app);
    assert!(screen.contains("Loading filters"));
    assert!(!screen.contains("East"));

    app.pump_session();
    let screen = render(&mut app);
    assert!(!screen.contains("Loading filters"));
    assert!(screen.contains("Region"));
    assert!(screen.contains("East"));
    assert!(screen.contains("More brands"));
}

#[test]
fn selecting_value_with_children_inserts_drill_down_row() {
    let mut app = ready_app();
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    let catalog = app.session().engine().catalog();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.categories()[1].is_drill_down());

    let screen = render(&mut app);
    assert!(screen.contains("› West"));
    assert!(screen.contains("North"));
}

#[test]
fn button_opens_picker_and_confirm_applies_choice() {
    let mut app = ready_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    assert!(app.picker().is_some());

    let screen = render(&mut app);
    assert!(screen.contains("View All Brand"));
    assert!(screen.contains("Promo"));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.picker().map(|picker| picker.chosen_names()), Some(vec!["Bolt"]));
    ctrl(&mut app, 's');
    assert!(app.picker().is_none());

    let outcome = press(&mut app, KeyCode::Char('q')).expect("outcome");
    assert!(outcome.accepted);
    assert!(outcome.filters.contains("b1"));
}

#[test]
fn sparse_default_opens_picker_once_loaded() {
    let response = FiltersResponse {
        filters: vec![
            CategoryItem::new(
                "Brand",
                vec![
                    ValueItem::total("Any"),
                    ValueItem::usual("other", "Other").with_children(vec![
                        ValueItem::total("Any other"),
                        ValueItem::hidden("promo", "Promo"),
                    ]),
                ],
            )
            .with_defaults(["other"]),
        ],
        image_mapping: Vec::new(),
    };
    let mut app = App::new(session(Box::new(StaticLoader::new(response))));
    assert!(app.picker().is_none());
    app.pump_session();
    assert!(app.picker().is_some());
    assert!(render(&mut app).contains("Promo"));
}

#[test]
fn dismissing_picker_changes_nothing() {
    let mut app = ready_app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Esc);

    assert!(app.picker().is_none());
    assert!(app.session().engine().selected_filter_ids().is_empty());
}

#[test]
fn escape_cancels_and_q_accepts() {
    let mut app = ready_app();
    let cancelled = press(&mut app, KeyCode::Esc).expect("outcome");
    assert!(!cancelled.accepted);

    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);
    let accepted = press(&mut app, KeyCode::Char('q')).expect("outcome");
    assert!(accepted.accepted);
    assert_eq!(accepted.filters.iter().collect::<Vec<_>>(), ["e"]);
    assert!(
        accepted
            .selections
            .contains(&("Region".to_string(), "East".to_string()))
    );
}

#[test]
fn minimized_layout_lists_only_active_values() {
    let mut app = ready_app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.layout, LayoutState::Minimized);

    let screen = render(&mut app);
    assert!(screen.contains("REGION"));
    assert!(screen.contains("BRAND"));
    assert!(screen.contains("Any"));
    assert!(!screen.contains("East"));
}

#[test]
fn landscape_layout_lists_every_value_on_one_line() {
    let mut app = ready_app();
    app.layout = LayoutState::Landscape;
    let lines = app.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].len(), 6);
}

#[test]
fn failed_load_shows_empty_state() {
    let mut app = App::new(session(Box::new(FailingLoader)));
    app.pump_session();
    let screen = render(&mut app);
    assert!(screen.contains("No filters available"));
    assert!(screen.contains("offline"));
}

#[test]
fn log_pane_toggles_with_ctrl_l() {
    let mut app = ready_app();
    ctrl(&mut app, 'l');
    assert!(app.show_logs);
    ctrl(&mut app, 'l');
    assert!(!app.show_logs);
}
