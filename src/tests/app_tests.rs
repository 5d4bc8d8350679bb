use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    UiOptions,
    api::{Method, ScriptedTransport},
    app::App,
    form::FieldId,
    nav::{FORM_ID_PARAM, Navigation},
};

use super::support::{record_json, service, strings};

fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key_for_test(plain(KeyCode::Char(ch)));
    }
}

fn empty_app(transport: &ScriptedTransport) -> App {
    transport.respond(Method::Get, "/fields", 200, json!([]));
    let mut app = App::new(service(transport, ""), UiOptions::default());
    app.bootstrap();
    app
}

#[test]
fn bootstrap_opens_the_record_in_the_location() {
    let transport = ScriptedTransport::new();
    transport
        .respond(Method::Get, "/fields", 200, json!([record_json("1", "A", &["x"])]))
        .respond(Method::Get, "/fields/1", 200, record_json("1", "A", &["x"]));
    let mut app = App::new(service(&transport, "?formId=1"), UiOptions::default());
    app.bootstrap();

    assert_eq!(app.editor().record_id(), Some("1"));
    assert_eq!(app.list().active_id(), Some("1"));
    assert_eq!(app.editor().form().values().choices, strings(&["x"]));
}

#[test]
fn unknown_record_falls_back_to_a_new_form() {
    let transport = ScriptedTransport::new();
    transport
        .respond(Method::Get, "/fields", 200, json!([]))
        .respond(Method::Get, "/fields/9", 404, json!({}));
    let mut app = App::new(service(&transport, "?formId=9"), UiOptions::default());
    app.bootstrap();

    assert_eq!(app.editor().record_id(), None);
    assert_eq!(app.service().navigation().get(FORM_ID_PARAM), None);
    assert_eq!(app.list().active_id(), None);
    assert!(app.status_message().contains("404 - Not Found"));
}

#[test]
fn keyboard_flow_saves_a_new_field() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    transport
        .respond(Method::Post, "/fields", 201, record_json("7", "Colour", &["Red"]))
        .respond(Method::Get, "/fields", 200, json!([record_json("7", "Colour", &["Red"])]));

    type_text(&mut app, "Colour");
    for _ in 0..3 {
        app.handle_key_for_test(plain(KeyCode::Tab));
    }
    assert_eq!(app.editor().focus(), FieldId::Choices);
    type_text(&mut app, "Red");
    app.handle_key_for_test(plain(KeyCode::Enter));
    assert_eq!(app.editor().form().values().choices, strings(&["Red"]));

    app.handle_key_for_test(ctrl('s'));
    assert_eq!(app.status_message(), "Saved field 7");
    assert_eq!(app.editor().record_id(), Some("7"));
    assert_eq!(app.list().active_id(), Some("7"));
    assert_eq!(app.service().navigation().render(), "?formId=7");
}

#[test]
fn invalid_save_reports_issue_count() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    app.handle_key_for_test(plain(KeyCode::Char('x')));
    app.handle_key_for_test(plain(KeyCode::Backspace));
    app.handle_key_for_test(plain(KeyCode::Tab));
    app.handle_key_for_test(plain(KeyCode::Char(' ')));

    app.handle_key_for_test(ctrl('s'));
    assert_eq!(app.status_message(), "2 issue(s) remaining");
}

#[test]
fn duplicate_choice_shows_in_status() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    for _ in 0..3 {
        app.handle_key_for_test(plain(KeyCode::Tab));
    }
    type_text(&mut app, "a");
    app.handle_key_for_test(plain(KeyCode::Enter));
    type_text(&mut app, "a");
    app.handle_key_for_test(plain(KeyCode::Enter));

    assert_eq!(app.status_message(), "Duplicate Entries Not Allowed");
}

#[test]
fn paste_reaches_the_focused_choice_list() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    for _ in 0..3 {
        app.handle_key_for_test(plain(KeyCode::Tab));
    }
    app.handle_paste_for_test("aa\nbb\ncc\ndd\nee\n");

    assert_eq!(
        app.editor().form().values().choices,
        strings(&["aa", "bb", "cc", "dd", "ee"])
    );
}

#[test]
fn display_alpha_popup_applies_selection() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    app.handle_key_for_test(plain(KeyCode::BackTab));
    assert_eq!(app.editor().focus(), FieldId::DisplayAlpha);

    app.handle_key_for_test(plain(KeyCode::Enter));
    app.handle_key_for_test(plain(KeyCode::Down));
    app.handle_key_for_test(plain(KeyCode::Enter));
    assert!(app.editor().form().values().display_alpha);
}

#[test]
fn quitting_with_unsaved_changes_needs_confirmation() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    type_text(&mut app, "x");

    app.handle_key_for_test(ctrl('q'));
    assert!(!app.should_quit());
    assert!(app.status_message().starts_with("Unsaved changes"));

    app.handle_key_for_test(ctrl('q'));
    assert!(app.should_quit());
}

#[test]
fn quitting_a_clean_form_is_immediate() {
    let transport = ScriptedTransport::new();
    let mut app = empty_app(&transport);
    app.handle_key_for_test(ctrl('q'));
    assert!(app.should_quit());
}

#[test]
fn list_pane_opens_the_record_under_the_cursor() {
    let transport = ScriptedTransport::new();
    transport
        .respond(
            Method::Get,
            "/fields",
            200,
            json!([record_json("1", "A", &[]), record_json("2", "B", &["b"])]),
        )
        .respond(Method::Get, "/fields/2", 200, record_json("2", "B", &["b"]));
    let mut app = App::new(service(&transport, ""), UiOptions::default());
    app.bootstrap();

    app.handle_key_for_test(ctrl('l'));
    app.handle_key_for_test(plain(KeyCode::Down));
    app.handle_key_for_test(plain(KeyCode::Enter));

    assert_eq!(app.editor().record_id(), Some("2"));
    assert_eq!(app.editor().form().values().label, "B");
    assert_eq!(app.service().navigation().render(), "?formId=2");
}

#[test]
fn new_form_shortcut_leaves_the_current_record() {
    let transport = ScriptedTransport::new();
    transport
        .respond(Method::Get, "/fields", 200, json!([record_json("1", "A", &[])]))
        .respond(Method::Get, "/fields/1", 200, record_json("1", "A", &[]));
    let mut app = App::new(service(&transport, "?formId=1"), UiOptions::default());
    app.bootstrap();

    app.handle_key_for_test(ctrl('n'));
    assert_eq!(app.editor().record_id(), None);
    assert_eq!(app.service().navigation().render(), "");
    assert_eq!(app.status_message(), "New form");
}
