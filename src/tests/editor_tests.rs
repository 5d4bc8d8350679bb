use crossterm::event::{KeyCode, KeyEvent};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    api::{FieldsService, Method, QueryKey, ScriptedTransport},
    form::{
        ChoiceError, ChoiceLimits, EditOutcome, FieldId, LABEL_REQUIRED, RecordEditor,
        SubmitOutcome,
    },
    nav::{FORM_ID_PARAM, Navigation},
};

use super::support::{draft_store, record_json, service, service_with_store, strings};

fn editor() -> RecordEditor {
    RecordEditor::new(ChoiceLimits::default())
}

fn type_into(editor: &mut RecordEditor, service: &mut FieldsService, text: &str) {
    for ch in text.chars() {
        editor.handle_key(&KeyEvent::from(KeyCode::Char(ch)), service);
    }
}

fn press(editor: &mut RecordEditor, service: &mut FieldsService, code: KeyCode) -> EditOutcome {
    editor.handle_key(&KeyEvent::from(code), service)
}

/// Fills label and two choices on a fresh draft.
fn fill_new(editor: &mut RecordEditor, service: &mut FieldsService) {
    editor.load(None, service);
    type_into(editor, service, "Colour");
    editor.focus_field(FieldId::Choices, service);
    type_into(editor, service, "Red");
    press(editor, service, KeyCode::Enter);
    type_into(editor, service, "Blue");
    press(editor, service, KeyCode::Enter);
}

#[test]
fn new_record_starts_from_defaults() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);

    assert_eq!(editor.record_id(), None);
    assert_eq!(editor.form().values().label, "");
    assert!(editor.form().values().choices.is_empty());
    assert!(!editor.form().is_dirty());
    assert!(transport.requests().is_empty());
}

#[test]
fn draft_is_restored_for_new_records() {
    let transport = ScriptedTransport::new();
    let store = draft_store(&json!({"label": "Saved draft", "choices": ["x"]}));
    let mut service = service_with_store(&transport, "", store);
    let mut editor = editor();
    editor.load(None, &mut service);

    assert_eq!(editor.form().values().label, "Saved draft");
    assert_eq!(editor.form().values().choices, strings(&["x"]));
}

#[test]
fn corrupt_draft_falls_back_to_defaults() {
    let transport = ScriptedTransport::new();
    let store = crate::storage::MemoryStore::new()
        .with_entry(crate::storage::FIELD_DATA_KEY, "{not json");
    let mut service = service_with_store(&transport, "", store);
    let mut editor = editor();
    editor.load(None, &mut service);

    assert_eq!(editor.form().values().label, "");
    assert_eq!(editor.load_error(), None);
}

#[test]
fn edits_to_new_records_write_the_draft() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    fill_new(&mut editor, &mut service);

    let draft = service.drafts().read();
    let data = draft.data.expect("draft written");
    assert_eq!(data.label, "Colour");
    assert_eq!(data.choices, strings(&["Red", "Blue"]));
    assert!(editor.form().is_dirty());
}

#[test]
fn existing_record_loads_remotely_and_skips_drafts() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Get, "/fields/3", 200, record_json("3", "Size", &["S"]));
    let mut service = service(&transport, "?formId=3");
    let mut editor = editor();
    editor.load(Some("3"), &mut service);

    assert_eq!(editor.record_id(), Some("3"));
    assert_eq!(editor.form().values().label, "Size");

    type_into(&mut editor, &mut service, "s");
    assert_eq!(editor.form().values().label, "Sizes");
    assert!(service.drafts().read().data.is_none());
}

#[test]
fn failed_load_clears_navigation_and_shows_defaults() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Get, "/fields/9", 404, json!({}));
    let mut service = service(&transport, "?formId=9");
    let mut editor = editor();
    editor.load(Some("9"), &mut service);

    assert_eq!(editor.load_error(), Some("404 - Not Found"));
    assert_eq!(editor.record_id(), None);
    assert_eq!(service.navigation().get(FORM_ID_PARAM), None);
    assert_eq!(editor.form().values().label, "");
}

#[test]
fn rejected_choice_is_reported() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    fill_new(&mut editor, &mut service);

    type_into(&mut editor, &mut service, "Red");
    let outcome = press(&mut editor, &mut service, KeyCode::Enter);
    assert_eq!(outcome, EditOutcome::Rejected(ChoiceError::DuplicateEntry));
    assert_eq!(
        editor.form().error(FieldId::Choices),
        Some("Duplicate Entries Not Allowed")
    );
    assert_eq!(editor.choice_editor().pending(), "");
}

#[test]
fn leaving_choices_commits_pending_text() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Choices, &mut service);
    type_into(&mut editor, &mut service, "Green");

    let outcome = editor.focus_step(1, &mut service);
    assert_eq!(outcome, EditOutcome::Edited);
    assert_eq!(editor.focus(), FieldId::DisplayAlpha);
    assert_eq!(editor.form().values().choices, strings(&["Green"]));
}

#[test]
fn removing_every_choice_is_flagged_on_submit() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Choices, &mut service);
    type_into(&mut editor, &mut service, "Only");
    press(&mut editor, &mut service, KeyCode::Enter);
    press(&mut editor, &mut service, KeyCode::Backspace);

    assert!(editor.form().values().choices.is_empty());
    assert_eq!(editor.form().error(FieldId::Choices), None);

    assert_eq!(editor.submit(&mut service).expect("no request"), SubmitOutcome::Invalid);
    assert_eq!(
        editor.form().error(FieldId::Choices),
        Some("At lease one choice or default value is needed")
    );
    assert!(transport.requests().is_empty());
}

#[test]
fn valid_commit_clears_an_oversize_report() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = RecordEditor::new(ChoiceLimits::new(50, 5));
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Choices, &mut service);
    editor.paste("much too long\nok", &mut service);
    assert_eq!(editor.submit(&mut service).expect("no request"), SubmitOutcome::Invalid);
    assert_eq!(
        editor.form().error(FieldId::Choices),
        Some("1 choices are larger that permitted")
    );

    type_into(&mut editor, &mut service, "fine");
    press(&mut editor, &mut service, KeyCode::Enter);
    assert_eq!(editor.form().values().choices, strings(&["much too long", "ok", "fine"]));
    assert_eq!(editor.form().error(FieldId::Choices), None);
}

#[test]
fn paste_into_choices_splits_lines() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Choices, &mut service);

    assert_eq!(
        editor.paste("aa\nbb\ncc\ndd\nee\n", &mut service),
        EditOutcome::Edited
    );
    assert_eq!(
        editor.form().values().choices,
        strings(&["aa", "bb", "cc", "dd", "ee"])
    );
    assert_eq!(editor.paste("plain", &mut service), EditOutcome::Ignored);
    assert_eq!(editor.choice_editor().pending(), "plain");
}

#[test]
fn paste_into_label_stays_on_one_line() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);

    editor.paste("Favourite\ncolour", &mut service);
    assert!(!editor.form().values().label.contains('\n'));
    assert!(editor.form().values().label.starts_with("Favourite"));
}

#[test]
fn required_flag_toggles() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Required, &mut service);

    press(&mut editor, &mut service, KeyCode::Char(' '));
    assert!(editor.form().values().required);
    press(&mut editor, &mut service, KeyCode::Enter);
    assert!(!editor.form().values().required);
}

#[test]
fn display_alpha_ignores_non_boolean_values() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);

    editor.select_display_alpha("TRUE", &mut service);
    assert!(editor.form().values().display_alpha);
    editor.select_display_alpha("maybe", &mut service);
    assert!(editor.form().values().display_alpha);
    editor.select_display_alpha("false", &mut service);
    assert!(!editor.form().values().display_alpha);
}

#[test]
fn submit_creates_record_with_default_appended() {
    let transport = ScriptedTransport::new();
    transport.respond(
        Method::Post,
        "/fields",
        201,
        record_json("7", "Colour", &["Red", "Blue", "Other"]),
    );
    let mut service = service(&transport, "");
    let mut editor = editor();
    fill_new(&mut editor, &mut service);
    editor.focus_field(FieldId::Default, &mut service);
    type_into(&mut editor, &mut service, "Other");

    let outcome = editor.submit(&mut service).expect("save succeeds");
    let SubmitOutcome::Saved(saved) = outcome else {
        panic!("expected a saved record, got {outcome:?}");
    };
    assert_eq!(saved.id.as_deref(), Some("7"));
    assert_eq!(saved.choices, strings(&["Red", "Blue", "Other"]));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    let body = requests[0].body.clone().expect("json body");
    assert_eq!(body["choices"], json!(["Red", "Blue", "Other"]));
    assert_eq!(body["label"], json!("Colour"));
    assert!(body.get("id").is_none());

    assert_eq!(service.navigation().get(FORM_ID_PARAM).as_deref(), Some("7"));
    assert!(service.drafts().read().data.is_none());
    assert_eq!(editor.record_id(), Some("7"));
    assert!(!editor.form().is_dirty());
    assert!(!editor.is_saving());
}

#[test]
fn submit_updates_existing_record_with_put() {
    let transport = ScriptedTransport::new();
    transport
        .respond(Method::Get, "/fields/3", 200, record_json("3", "Size", &["S"]))
        .respond(Method::Put, "/fields/3", 200, record_json("3", "Sizes", &["S"]));
    let mut service = service(&transport, "?formId=3");
    let mut editor = editor();
    editor.load(Some("3"), &mut service);
    type_into(&mut editor, &mut service, "s");

    let outcome = editor.submit(&mut service).expect("save succeeds");
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    let requests = transport.requests();
    assert_eq!(requests[1].method, Method::Put);
    assert_eq!(requests[1].path, "/fields/3");
    assert_eq!(requests[1].body.as_ref().map(|b| b["id"].clone()), Some(json!("3")));
    assert!(!service.cache().contains(&QueryKey::Record("3".into())));
}

#[test]
fn submit_without_label_is_invalid() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    editor.focus_field(FieldId::Choices, &mut service);
    type_into(&mut editor, &mut service, "a");
    press(&mut editor, &mut service, KeyCode::Enter);

    assert_eq!(editor.submit(&mut service).ok(), Some(SubmitOutcome::Invalid));
    assert_eq!(editor.form().error(FieldId::Label), Some(LABEL_REQUIRED));
    assert!(transport.requests().is_empty());
}

#[test]
fn submit_without_changes_sends_nothing() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);

    assert_eq!(editor.submit(&mut service).ok(), Some(SubmitOutcome::Unchanged));
    assert!(transport.requests().is_empty());
}

#[test]
fn forbidden_save_keeps_form_and_draft() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Post, "/fields", 403, json!({"message": "nope"}));
    let mut service = service(&transport, "");
    let mut editor = editor();
    fill_new(&mut editor, &mut service);

    let err = editor.submit(&mut service).expect_err("save rejected");
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "403 - Forbidden");
    assert!(!editor.is_saving());
    assert!(editor.form().is_dirty());
    assert_eq!(editor.record_id(), None);
    assert_eq!(service.navigation().get(FORM_ID_PARAM), None);
    assert_eq!(
        service.drafts().read().data.map(|draft| draft.label),
        Some("Colour".to_string())
    );
}

#[test]
fn cancel_on_new_record_drops_the_draft() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    fill_new(&mut editor, &mut service);

    editor.cancel(&mut service);
    assert_eq!(editor.form().values().label, "");
    assert!(service.drafts().read().data.is_none());
}

#[test]
fn cancel_on_existing_record_restores_loaded_values() {
    let transport = ScriptedTransport::new();
    transport.respond(Method::Get, "/fields/3", 200, record_json("3", "Size", &["S"]));
    let mut service = service(&transport, "?formId=3");
    let mut editor = editor();
    editor.load(Some("3"), &mut service);
    type_into(&mut editor, &mut service, "zzz");

    editor.cancel(&mut service);
    assert_eq!(editor.form().values().label, "Size");
    assert!(!editor.form().is_dirty());
    assert_eq!(editor.record_id(), Some("3"));
}

#[test]
fn leaving_an_empty_choice_input_keeps_submit_errors() {
    let transport = ScriptedTransport::new();
    let mut service = service(&transport, "");
    let mut editor = editor();
    editor.load(None, &mut service);
    type_into(&mut editor, &mut service, "Colour");
    editor.focus_field(FieldId::Choices, &mut service);

    assert_eq!(editor.submit(&mut service).expect("no request"), SubmitOutcome::Invalid);
    assert_eq!(editor.focus_step(1, &mut service), EditOutcome::Ignored);
    assert_eq!(
        editor.form().error(FieldId::Choices),
        Some("At lease one choice or default value is needed")
    );
}
