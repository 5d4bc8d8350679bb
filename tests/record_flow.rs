use fieldsmith::{
    api::{FieldsClient, FieldsService, Method, ScriptedTransport},
    form::{ChoiceLimits, FieldId, RecordEditor, SubmitOutcome},
    nav::{FORM_ID_PARAM, Navigation, QueryLocation},
    storage::{DraftSlot, MemoryStore},
};
use serde_json::json;

fn service(transport: &ScriptedTransport, location: &str) -> FieldsService {
    FieldsService::new(
        FieldsClient::new(transport.clone()),
        QueryLocation::parse(location),
        DraftSlot::new(MemoryStore::new()),
    )
}

#[test]
fn draft_becomes_a_saved_record() {
    let transport = ScriptedTransport::new();
    transport.respond(
        Method::Post,
        "/fields",
        201,
        json!({"id": 11, "label": "Size", "choices": ["S", "M"], "required": "true"}),
    );
    let mut service = service(&transport, "/builder");
    let mut editor = RecordEditor::new(ChoiceLimits::default());
    editor.load(None, &mut service);

    editor.paste("Size", &mut service);
    editor.focus_field(FieldId::Choices, &mut service);
    editor.paste("S,M", &mut service);
    assert!(service.drafts().read().data.is_some());

    let outcome = editor.submit(&mut service).expect("saved");
    assert!(matches!(outcome, SubmitOutcome::Saved(ref record) if record.id.as_deref() == Some("11")));
    assert_eq!(service.navigation().render(), "/builder?formId=11");
    assert!(service.drafts().read().data.is_none());
}

#[test]
fn rejected_update_keeps_editing_state() {
    let transport = ScriptedTransport::new();
    transport
        .respond(
            Method::Get,
            "/fields/3",
            200,
            json!({"id": "3", "label": "Size", "choices": ["S"]}),
        )
        .respond(Method::Put, "/fields/3", 403, json!({}));
    let mut service = service(&transport, "?formId=3");
    let mut editor = RecordEditor::new(ChoiceLimits::default());
    editor.load(Some("3"), &mut service);
    editor.paste("s", &mut service);

    let err = editor.submit(&mut service).expect_err("forbidden");
    assert_eq!(err.status(), Some(403));
    assert_eq!(editor.form().values().label, "Sizes");
    assert_eq!(service.navigation().get(FORM_ID_PARAM).as_deref(), Some("3"));
}
