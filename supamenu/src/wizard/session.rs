use std::cell::{Ref, RefCell};
use tracing::info;
use web_common::RestaurantDto;

use super::{StepOutcome, WizardController, WizardState};
use crate::api::ApiClient;
use crate::draft::{DraftEntity, DraftPatch};
use crate::errors::{SubmissionError, WizardError};
use crate::notify::{Destination, Navigator, NotificationSink, Severity};
use crate::submission::SubmissionCoordinator;
use crate::transport::HttpTransport;

pub const CORRECT_FIELDS: &str = "Please correct the highlighted fields";
pub const CREATED: &str = "Restaurant profile created successfully!";

/// One create-restaurant wizard wired to its collaborators.
///
/// All methods take `&self`: the controller is borrowed only for the
/// synchronous part of each operation and never across the network await,
/// so a second [`submit`](Self::submit) issued while the first is pending
/// is answered with [`WizardError::Busy`].
pub struct WizardSession<T, S, N> {
    controller: RefCell<WizardController>,
    coordinator: SubmissionCoordinator<T>,
    notifier: S,
    navigator: N,
}

impl<T, S, N> WizardSession<T, S, N>
where
    T: HttpTransport,
    S: NotificationSink,
    N: Navigator,
{
    pub fn new(client: ApiClient<T>, notifier: S, navigator: N) -> Self {
        Self::with_controller(WizardController::new(), client, notifier, navigator)
    }

    pub fn with_controller(controller: WizardController, client: ApiClient<T>, notifier: S, navigator: N) -> Self {
        Self {
            controller: RefCell::new(controller),
            coordinator: SubmissionCoordinator::new(client),
            notifier,
            navigator,
        }
    }

    pub fn controller(&self) -> Ref<'_, WizardController> {
        self.controller.borrow()
    }

    pub fn state(&self) -> WizardState {
        self.controller.borrow().state().clone()
    }

    pub fn draft(&self) -> DraftEntity {
        self.controller.borrow().draft().clone()
    }

    pub fn edit(&self, patch: DraftPatch) {
        self.controller.borrow_mut().edit(patch);
    }

    /// Runs `f` against the controller, for store helpers such as adding a menu item.
    pub fn update<R>(&self, f: impl FnOnce(&mut WizardController) -> R) -> R {
        f(&mut self.controller.borrow_mut())
    }

    pub fn next(&self) -> StepOutcome {
        let outcome = self.controller.borrow_mut().next();
        if let StepOutcome::Blocked(_) = outcome {
            self.notifier.notify(Severity::Warning, CORRECT_FIELDS);
        }
        outcome
    }

    pub fn back(&self) -> bool {
        self.controller.borrow_mut().back()
    }

    /// Validates the last step, sends the draft and applies the outcome:
    /// notifications, redirects and session teardown included.
    pub async fn submit(&self) -> Result<RestaurantDto, WizardError> {
        let draft = match self.controller.borrow_mut().begin_submit() {
            Ok(draft) => draft,
            Err(error) => {
                self.report_refusal(&error);
                return Err(error);
            }
        };

        let outcome = self.coordinator.submit(&draft).await;
        self.controller.borrow_mut().finish_submit(&outcome);

        match &outcome {
            Ok(restaurant) => {
                info!(id = %restaurant.id, "wizard completed");
                self.notifier.notify(Severity::Success, CREATED);
                self.navigator.redirect(Destination::Dashboard);
            }
            Err(SubmissionError::Unauthorized(message)) => {
                self.coordinator.client().session().sign_out();
                self.notifier.notify(Severity::Error, message);
                self.navigator.redirect(Destination::Login);
            }
            Err(SubmissionError::ValidationRejected { message, .. }) => {
                self.notifier.notify(Severity::Warning, message);
            }
            Err(SubmissionError::Transient(message)) => {
                self.notifier.notify(Severity::Error, message);
            }
            Err(SubmissionError::Busy) => {
                self.notifier.notify(Severity::Info, &SubmissionError::Busy.to_string());
            }
        }

        outcome.map_err(WizardError::from)
    }

    fn report_refusal(&self, error: &WizardError) {
        match error {
            WizardError::Invalid(_) => self.notifier.notify(Severity::Warning, CORRECT_FIELDS),
            other => self.notifier.notify(Severity::Info, &other.to_string()),
        }
    }
}
