//! Core of the SupaMenu admin console.
//!
//! The create-restaurant wizard is split the way its data flows:
//!
//! - [`draft`]: the in-progress record and its store (shallow merges only)
//! - [`validation`]: per-step field checks
//! - [`wizard`]: the step state machine and the session that wires it to
//!   the outside world
//! - [`submission`]: the versioned payload and the one-request-at-a-time
//!   coordinator
//!
//! Everything that leaves the process goes through [`transport::HttpTransport`]
//! (requests), [`notify::NotificationSink`] (toasts) and [`notify::Navigator`]
//! (redirects). [`api::ApiClient`] also exposes the login and dashboard
//! endpoints used by the rest of the console.

pub mod api;
pub mod client;
pub mod draft;
pub mod errors;
pub mod notify;
pub mod session;
pub mod submission;
pub mod transport;
pub mod validation;
pub mod wizard;

pub use api::ApiClient;
pub use draft::{Attachment, DraftEntity, DraftMenuItem, DraftPatch, FormStore, OwnerDetails};
pub use errors::*;
pub use notify::{Destination, LogSink, Navigator, NotificationSink, Severity};
pub use session::SessionContext;
pub use submission::SubmissionCoordinator;
pub use transport::{ApiRequest, ApiResponse, FormBody, FormPart, HttpTransport, Method, RequestBody};
pub use validation::{validate, FieldErrors, StepId, ValidationResult};
pub use wizard::{StepOutcome, WizardController, WizardPhase, WizardSession, WizardState};

pub use web_common::{CuisineType, MenuCategory, OpeningHours, RestaurantDto, RestaurantType};
