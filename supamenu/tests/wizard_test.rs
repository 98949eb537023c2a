mod common;

use common::valid_draft;
use supamenu::draft::fields;
use supamenu::{DraftPatch, OwnerDetails, StepId, StepOutcome, WizardController, WizardError, WizardPhase};

#[test]
fn empty_wizard_is_blocked_on_the_first_step() {
    let mut wizard = WizardController::new();
    match wizard.next() {
        StepOutcome::Blocked(errors) => {
            assert!(errors.contains_key(fields::NAME));
            assert!(errors.contains_key(fields::OWNER_EMAIL));
        }
        other => panic!("expected Blocked, got {:?}", other),
    }
    assert_eq!(wizard.state().step(), StepId::Profile);
    assert!(!wizard.state().can_advance());
}

#[test]
fn valid_draft_walks_to_the_last_step_and_stops() {
    let mut wizard = WizardController::with_draft(valid_draft());
    assert_eq!(
        wizard.next(),
        StepOutcome::Advanced {
            from: StepId::Profile,
            to: StepId::TypeAndTiming
        }
    );
    assert_eq!(
        wizard.next(),
        StepOutcome::Advanced {
            from: StepId::TypeAndTiming,
            to: StepId::Menu
        }
    );
    assert_eq!(wizard.next(), StepOutcome::AtLastStep);
    assert_eq!(wizard.state().step(), StepId::Menu);
}

#[test]
fn back_is_a_no_op_on_the_first_step() {
    let mut wizard = WizardController::with_draft(valid_draft());
    assert!(!wizard.back());
    assert_eq!(wizard.state().step(), StepId::Profile);

    wizard.next();
    assert!(wizard.back());
    assert_eq!(wizard.state().step(), StepId::Profile);
}

#[test]
fn back_drops_errors_of_the_step_being_left() {
    let mut draft = valid_draft();
    draft.restaurant_type = None;
    let mut wizard = WizardController::with_draft(draft);
    wizard.next();

    assert!(matches!(wizard.next(), StepOutcome::Blocked(_)));
    assert!(wizard.state().error(fields::RESTAURANT_TYPE).is_some());

    assert!(wizard.back());
    assert!(wizard.state().errors().is_empty());
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut wizard = WizardController::new();
    wizard.next();
    let before = wizard.state().errors().len();
    assert!(before > 1);

    wizard.edit(DraftPatch {
        name: Some("Joe's".to_string()),
        ..DraftPatch::default()
    });
    assert!(wizard.state().error(fields::NAME).is_none());
    assert!(wizard.state().error(fields::LOCATION).is_some());
    assert_eq!(wizard.state().errors().len(), before - 1);
}

#[test]
fn scenario_fixing_the_email_unblocks_step_one() {
    let mut draft = valid_draft();
    draft.owner.email = "not-an-email".to_string();
    let mut wizard = WizardController::with_draft(draft);

    match wizard.next() {
        StepOutcome::Blocked(errors) => {
            assert_eq!(errors.keys().collect::<Vec<_>>(), vec![fields::OWNER_EMAIL]);
        }
        other => panic!("expected Blocked, got {:?}", other),
    }

    // The owner record is replaced as a whole.
    let owner = OwnerDetails {
        email: "jp@example.com".to_string(),
        ..wizard.draft().owner.clone()
    };
    wizard.edit(DraftPatch {
        owner: Some(owner),
        ..DraftPatch::default()
    });
    assert!(wizard.state().errors().is_empty());
    assert!(matches!(wizard.next(), StepOutcome::Advanced { .. }));
}

#[test]
fn step_errors_only_include_the_current_step() {
    let mut draft = valid_draft();
    draft.menu_items.clear();
    let mut wizard = WizardController::with_draft(draft);
    wizard.next();
    wizard.next();
    assert!(matches!(wizard.next(), StepOutcome::Blocked(_)));

    assert!(wizard.state().step_errors().contains_key(fields::MENU_ITEMS));
    assert!(wizard.back());
    assert!(wizard.state().step_errors().is_empty());
}

#[test]
fn submit_is_refused_before_the_last_step() {
    let mut wizard = WizardController::with_draft(valid_draft());
    assert_eq!(wizard.begin_submit(), Err(WizardError::NotOnLastStep(StepId::Profile)));
    assert_eq!(wizard.state().phase(), WizardPhase::Editing);
}

#[test]
fn submit_with_no_menu_items_is_invalid() {
    let mut draft = valid_draft();
    draft.menu_items.clear();
    let mut wizard = WizardController::with_draft(draft);
    wizard.next();
    wizard.next();

    match wizard.begin_submit() {
        Err(WizardError::Invalid(errors)) => {
            assert_eq!(errors[fields::MENU_ITEMS], "Please add at least one menu item");
        }
        other => panic!("expected Invalid, got {:?}", other),
    }
    assert_eq!(wizard.state().phase(), WizardPhase::Editing);
}

#[test]
fn second_begin_submit_is_busy() {
    let mut wizard = WizardController::with_draft(valid_draft());
    wizard.next();
    wizard.next();

    let snapshot = wizard.begin_submit().unwrap();
    assert_eq!(snapshot, valid_draft());
    assert!(wizard.state().is_submitting());
    assert_eq!(wizard.begin_submit(), Err(WizardError::Busy));
    assert_eq!(wizard.next(), StepOutcome::Ignored);
    assert!(!wizard.back());
}

#[test]
fn navigation_clears_the_banner() {
    let mut wizard = WizardController::with_draft(valid_draft());
    wizard.next();
    wizard.next();
    wizard.begin_submit().unwrap();
    wizard.finish_submit(&Err(supamenu::SubmissionError::Transient("Network error: offline".to_string())));
    assert_eq!(wizard.state().banner(), Some("Network error: offline"));
    assert_eq!(wizard.state().phase(), WizardPhase::Editing);

    wizard.back();
    assert_eq!(wizard.state().banner(), None);
}

#[test]
fn busy_verdict_leaves_the_pending_submission_alone() {
    let mut wizard = WizardController::with_draft(valid_draft());
    wizard.next();
    wizard.next();
    wizard.begin_submit().unwrap();

    wizard.finish_submit(&Err(supamenu::SubmissionError::Busy));
    assert_eq!(wizard.state().phase(), WizardPhase::Submitting);
    assert_eq!(wizard.state().banner(), None);
    assert_eq!(wizard.begin_submit(), Err(WizardError::Busy));
}

#[test]
fn server_errors_survive_back_and_move_to_their_step() {
    let mut wizard = WizardController::with_draft(valid_draft());
    wizard.next();
    wizard.next();
    wizard.begin_submit().unwrap();

    let mut rejected = supamenu::FieldErrors::new();
    rejected.insert("openingHours".to_string(), "Closing time is invalid".to_string());
    wizard.finish_submit(&Err(supamenu::SubmissionError::ValidationRejected {
        message: "Validation failed".to_string(),
        fields: rejected,
    }));
    assert_eq!(wizard.state().step(), StepId::TypeAndTiming);
    assert_eq!(wizard.state().step_errors().len(), 1);

    wizard.back();
    assert!(matches!(wizard.next(), StepOutcome::Advanced { .. }));
    assert!(matches!(wizard.next(), StepOutcome::Blocked(_)));

    // Editing either end of the range clears the grouped key
    let mut hours = valid_draft().opening_hours;
    hours.to = "23:00".to_string();
    wizard.edit(DraftPatch {
        opening_hours: Some(hours),
        ..Default::default()
    });
    assert!(wizard.state().errors().is_empty());
    assert!(matches!(wizard.next(), StepOutcome::Advanced { .. }));
}
