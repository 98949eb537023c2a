mod common;

use common::{created_body, valid_draft, FakeTransport, RecordingNavigator, RecordingSink};
use supamenu::draft::fields;
use supamenu::{
    ApiClient, Attachment, Destination, DraftEntity, DraftPatch, FormPart, Method, OwnerDetails,
    RequestBody, SessionContext, Severity, StepId, StepOutcome, SubmissionError, TransportError,
    WizardController, WizardError, WizardPhase, WizardSession,
};

type TestSession = WizardSession<FakeTransport, RecordingSink, RecordingNavigator>;

struct Harness {
    transport: FakeTransport,
    session: SessionContext,
    sink: RecordingSink,
    navigator: RecordingNavigator,
    wizard: TestSession,
}

/// Wizard on the menu step with `draft` loaded.
fn harness_on_last_step(draft: DraftEntity, session: SessionContext) -> Harness {
    let transport = FakeTransport::new();
    let sink = RecordingSink::default();
    let navigator = RecordingNavigator::default();
    let wizard = WizardSession::with_controller(
        WizardController::with_draft(draft),
        ApiClient::new(transport.clone(), session.clone()),
        sink.clone(),
        navigator.clone(),
    );
    wizard.next();
    wizard.next();
    assert_eq!(wizard.state().step(), StepId::Menu);
    Harness {
        transport,
        session,
        sink,
        navigator,
        wizard,
    }
}

fn signed_in() -> SessionContext {
    SessionContext::with_token("t0k3n")
}

#[tokio::test]
async fn successful_submit_completes_and_redirects_once() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(201, &created_body("r-1"));

    let restaurant = h.wizard.submit().await.unwrap();

    assert_eq!(restaurant.id, "r-1");
    assert_eq!(h.wizard.state().phase(), WizardPhase::Completed);
    assert_eq!(h.wizard.draft(), DraftEntity::default());
    assert_eq!(h.navigator.redirects(), vec![Destination::Dashboard]);
    assert_eq!(h.sink.count(Severity::Success), 1);
    assert_eq!(h.transport.request_count(), 1);

    let request = &h.transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/restaurants");
    assert_eq!(request.bearer.as_deref(), Some("t0k3n"));
}

#[tokio::test]
async fn completed_wizard_refuses_another_submit() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(201, &created_body("r-1"));
    h.wizard.submit().await.unwrap();

    assert_eq!(h.wizard.submit().await, Err(WizardError::Closed));
    assert_eq!(h.transport.request_count(), 1);
    assert_eq!(h.navigator.redirects().len(), 1);
}

#[tokio::test]
async fn expired_credential_discards_draft_and_redirects_to_login() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(401, r#"{"message":"Token expired"}"#);

    let result = h.wizard.submit().await;

    assert_eq!(
        result,
        Err(WizardError::Submission(SubmissionError::Unauthorized(
            "Token expired".to_string()
        )))
    );
    assert_eq!(h.wizard.state().phase(), WizardPhase::Failed);
    assert_eq!(h.wizard.draft(), DraftEntity::default());
    assert_eq!(h.navigator.redirects(), vec![Destination::Login]);
    assert!(!h.session.is_signed_in());
    assert_eq!(h.sink.count(Severity::Error), 1);
}

#[tokio::test]
async fn forbidden_is_treated_as_unauthorized() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(403, "");

    let result = h.wizard.submit().await;

    assert!(matches!(
        result,
        Err(WizardError::Submission(SubmissionError::Unauthorized(_)))
    ));
    assert_eq!(h.navigator.redirects(), vec![Destination::Login]);
}

#[tokio::test]
async fn missing_token_never_reaches_the_network() {
    let h = harness_on_last_step(valid_draft(), SessionContext::new());

    let result = h.wizard.submit().await;

    assert!(matches!(
        result,
        Err(WizardError::Submission(SubmissionError::Unauthorized(_)))
    ));
    assert_eq!(h.transport.request_count(), 0);
    assert_eq!(h.navigator.redirects(), vec![Destination::Login]);
    assert_eq!(h.wizard.state().phase(), WizardPhase::Failed);
}

#[tokio::test]
async fn concurrent_submit_is_busy_and_sends_one_request() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(201, &created_body("r-1"));

    let (first, second) = tokio::join!(h.wizard.submit(), h.wizard.submit());

    let results = [first, second];
    assert_eq!(
        results.iter().filter(|r| matches!(r, Err(WizardError::Busy))).count(),
        1
    );
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(h.transport.request_count(), 1);
    assert_eq!(h.navigator.redirects(), vec![Destination::Dashboard]);
    assert_eq!(h.sink.count(Severity::Info), 1);
}

#[tokio::test]
async fn busy_refusal_leaves_the_draft_untouched() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.fail(TransportError::Timeout);

    let (first, second) = tokio::join!(h.wizard.submit(), async {
        let refused = h.wizard.submit().await;
        // Observed while the first request is still pending.
        (refused, h.wizard.draft(), h.wizard.state().phase())
    });

    let (refused, draft_during, phase_during) = second;
    assert_eq!(refused, Err(WizardError::Busy));
    assert_eq!(draft_during, valid_draft());
    assert_eq!(phase_during, WizardPhase::Submitting);
    assert!(first.is_err());
    assert_eq!(h.wizard.draft(), valid_draft());
}

#[tokio::test]
async fn no_menu_items_is_refused_without_a_request() {
    let mut draft = valid_draft();
    draft.menu_items.clear();
    let transport = FakeTransport::new();
    let sink = RecordingSink::default();
    let wizard = WizardSession::with_controller(
        WizardController::with_draft(draft),
        ApiClient::new(transport.clone(), signed_in()),
        sink.clone(),
        RecordingNavigator::default(),
    );
    wizard.next();
    wizard.next();

    match wizard.submit().await {
        Err(WizardError::Invalid(errors)) => assert!(errors.contains_key(fields::MENU_ITEMS)),
        other => panic!("expected Invalid, got {:?}", other),
    }
    assert_eq!(transport.request_count(), 0);
    assert_eq!(wizard.state().error(fields::MENU_ITEMS), Some("Please add at least one menu item"));
    assert_eq!(sink.count(Severity::Warning), 1);
}

#[tokio::test]
async fn submit_before_last_step_is_refused() {
    let transport = FakeTransport::new();
    let wizard = WizardSession::with_controller(
        WizardController::with_draft(valid_draft()),
        ApiClient::new(transport.clone(), signed_in()),
        RecordingSink::default(),
        RecordingNavigator::default(),
    );

    assert_eq!(wizard.submit().await, Err(WizardError::NotOnLastStep(StepId::Profile)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn transient_failure_keeps_the_draft_for_a_manual_retry() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport
        .fail(TransportError::Network("offline".to_string()))
        .respond(201, &created_body("r-2"));

    let failed = h.wizard.submit().await;
    assert!(matches!(
        failed,
        Err(WizardError::Submission(SubmissionError::Transient(_)))
    ));
    assert_eq!(h.wizard.state().phase(), WizardPhase::Editing);
    assert_eq!(h.wizard.state().step(), StepId::Menu);
    assert_eq!(h.wizard.draft(), valid_draft());
    assert!(h.wizard.state().banner().is_some());
    assert!(h.navigator.redirects().is_empty());
    assert_eq!(h.transport.request_count(), 1);

    let retried = h.wizard.submit().await.unwrap();
    assert_eq!(retried.id, "r-2");
    assert_eq!(h.transport.request_count(), 2);
    assert_eq!(h.transport.requests()[0].body, h.transport.requests()[1].body);
}

#[tokio::test]
async fn server_error_uses_the_fallback_message() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(500, "<html>oops</html>");

    let result = h.wizard.submit().await;

    assert_eq!(
        result,
        Err(WizardError::Submission(SubmissionError::Transient(
            "Failed to create restaurant".to_string()
        )))
    );
    assert_eq!(h.sink.events(), vec![(Severity::Error, "Failed to create restaurant".to_string())]);
}

#[tokio::test]
async fn rejected_fields_are_mapped_into_the_error_map() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(
        422,
        r#"{"message":"Validation failed","details":{"menuItems[0].price":"Price too high","ownerEmail":"Email already registered"}}"#,
    );

    let result = h.wizard.submit().await;

    match result {
        Err(WizardError::Submission(SubmissionError::ValidationRejected { message, fields })) => {
            assert_eq!(message, "Validation failed");
            assert_eq!(fields.len(), 2);
        }
        other => panic!("expected ValidationRejected, got {:?}", other),
    }
    let state = h.wizard.state();
    assert_eq!(state.phase(), WizardPhase::Editing);
    // Back to the earliest step with a rejected field
    assert_eq!(state.step(), StepId::Profile);
    assert_eq!(state.step_errors().keys().collect::<Vec<_>>(), vec![fields::OWNER_EMAIL]);
    assert_eq!(state.error("menuItems[0].price"), Some("Price too high"));
    assert_eq!(state.error(fields::OWNER_EMAIL), Some("Email already registered"));
    assert_eq!(state.step_errors().len(), 1);
    assert_eq!(state.banner(), Some("Validation failed"));
    assert_eq!(h.wizard.draft(), valid_draft());
    assert_eq!(h.sink.count(Severity::Warning), 1);
}

#[tokio::test]
async fn rejected_fields_block_until_edited() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(
        422,
        r#"{"message":"Validation failed","details":{"ownerEmail":"Email already taken","menuItems[0].price":"Price too high"}}"#,
    );
    assert!(h.wizard.submit().await.is_err());
    assert_eq!(h.wizard.state().step(), StepId::Profile);
    assert!(h.wizard.state().is_server_error(fields::OWNER_EMAIL));
    assert!(!h.wizard.state().can_advance());

    // The draft still passes local validation, the server entry keeps it on Profile
    match h.wizard.next() {
        StepOutcome::Blocked(errors) => {
            assert_eq!(errors.get(fields::OWNER_EMAIL).map(String::as_str), Some("Email already taken"));
        }
        other => panic!("expected Blocked, got {:?}", other),
    }
    assert_eq!(h.wizard.state().step(), StepId::Profile);
    assert_eq!(h.wizard.state().error(fields::OWNER_EMAIL), Some("Email already taken"));

    h.wizard.edit(DraftPatch {
        owner: Some(OwnerDetails {
            email: "owner@joes.rw".to_string(),
            ..valid_draft().owner
        }),
        ..Default::default()
    });
    assert_eq!(h.wizard.state().error(fields::OWNER_EMAIL), None);
    assert!(matches!(h.wizard.next(), StepOutcome::Advanced { .. }));
    assert!(matches!(h.wizard.next(), StepOutcome::Advanced { .. }));
    assert_eq!(h.wizard.state().step(), StepId::Menu);

    // Going back and forth does not drop the menu entry either
    assert!(h.wizard.back());
    assert!(matches!(h.wizard.next(), StepOutcome::Advanced { .. }));
    assert_eq!(h.wizard.state().error("menuItems[0].price"), Some("Price too high"));
    assert!(matches!(h.wizard.submit().await, Err(WizardError::Invalid(_))));
    assert_eq!(h.transport.request_count(), 1);

    let mut items = h.wizard.draft().menu_items;
    items[0].price = "3000".to_string();
    h.wizard.edit(DraftPatch {
        menu_items: Some(items),
        ..Default::default()
    });
    assert!(h.wizard.state().errors().is_empty());

    h.transport.respond(201, &created_body("r-9"));
    assert_eq!(h.wizard.submit().await.unwrap().id, "r-9");
    assert_eq!(h.transport.request_count(), 2);
}

#[tokio::test]
async fn rejected_keys_without_an_input_go_to_the_banner() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(
        422,
        r#"{"message":"Validation failed","details":{"restaurant":"Duplicate restaurant"}}"#,
    );

    assert!(h.wizard.submit().await.is_err());
    let state = h.wizard.state();
    assert_eq!(state.step(), StepId::Menu);
    assert!(state.errors().is_empty());
    assert_eq!(state.banner(), Some("Validation failed (restaurant: Duplicate restaurant)"));
}

#[tokio::test]
async fn bad_request_without_details_is_transient() {
    let h = harness_on_last_step(valid_draft(), signed_in());
    h.transport.respond(400, r#"{"message":"Restaurant already exists"}"#);

    let result = h.wizard.submit().await;

    assert_eq!(
        result,
        Err(WizardError::Submission(SubmissionError::Transient(
            "Restaurant already exists".to_string()
        )))
    );
    assert_eq!(h.wizard.draft(), valid_draft());
}

#[tokio::test]
async fn payload_follows_the_multipart_contract() {
    let mut draft = valid_draft();
    draft.images = vec![Attachment::new("front.png", "image/png", vec![1, 2, 3])];
    draft.menu_items[0].image = Some(Attachment::new("dish.jpeg", "image/jpeg", vec![4, 5]));
    draft.extras.insert("promoCode".to_string(), "OPENING".to_string());
    draft.name = "  Joe's  ".to_string();

    let h = harness_on_last_step(draft, signed_in());
    h.transport.respond(201, &created_body("r-1"));
    h.wizard.submit().await.unwrap();

    let request = &h.transport.requests()[0];
    let form = match &request.body {
        RequestBody::Multipart(form) => form,
        other => panic!("expected multipart, got {:?}", other),
    };

    let names: Vec<&str> = form.parts().iter().map(FormPart::name).collect();
    assert_eq!(
        names,
        vec![
            "name",
            "location",
            "completeName",
            "contactNumber",
            "ownerName",
            "ownerEmail",
            "ownerPhone",
            "restaurantType",
            "cuisineType",
            "openingHours",
            "images",
            "menuItems[0][name]",
            "menuItems[0][price]",
            "menuItems[0][description]",
            "menuItems[0][category]",
            "menuItems[0][id]",
            "menuItems[0][image]",
        ]
    );

    assert_eq!(form.text_value("name"), Some("Joe's"));
    assert_eq!(form.text_value("restaurantType"), Some("RESTAURANT"));
    assert_eq!(form.text_value("menuItems[0][category]"), Some("MAIN"));
    assert_eq!(form.text_value("promoCode"), None);

    let hours: serde_json::Value =
        serde_json::from_str(form.text_value("openingHours").unwrap()).unwrap();
    assert_eq!(hours, serde_json::json!({ "from": "14:00", "to": "02:00" }));

    match form.file_part("images") {
        Some(FormPart::File { file_name, content_type, bytes, .. }) => {
            assert_eq!(file_name, "restaurant-image-0.png");
            assert_eq!(content_type, "image/png");
            assert_eq!(bytes, &vec![1, 2, 3]);
        }
        other => panic!("expected image part, got {:?}", other),
    }
    match form.file_part("menuItems[0][image]") {
        Some(FormPart::File { file_name, .. }) => assert_eq!(file_name, "menu-item-item-1.jpeg"),
        other => panic!("expected menu item image, got {:?}", other),
    }
}
