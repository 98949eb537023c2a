//! User-facing side effects: toasts and redirects.

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Fire-and-forget user feedback.
pub trait NotificationSink {
    fn notify(&self, severity: Severity, message: &str);
}

/// Views the wizard can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Dashboard,
    Login,
    Signup,
    CreateRestaurant,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Dashboard => "/restaurant-dashboard",
            Destination::Login => "/login",
            Destination::Signup => "/signup",
            Destination::CreateRestaurant => "/create-restaurant",
        }
    }
}

pub trait Navigator {
    fn redirect(&self, destination: Destination);
}

/// Sink that writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success | Severity::Info => info!(target: "supamenu::notify", "{}", message),
            Severity::Warning => warn!(target: "supamenu::notify", "{}", message),
            Severity::Error => error!(target: "supamenu::notify", "{}", message),
        }
    }
}
