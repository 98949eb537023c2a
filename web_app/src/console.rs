//! Console-wide state, shared through Leptos context.
//!
//! `ConsoleContext` is `Copy`: signals and stored values are arena handles,
//! so components grab it with `use_context` and move it into closures freely.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_router::hooks::use_navigate;
use serde::{Deserialize, Serialize};
use supamenu::client::{ApiClientConfig, ReqwestTransport};
use supamenu::{ApiClient, ApiError, ConfigError, Destination, Navigator, NotificationSink, SessionContext, Severity};
use web_common::UserDto;

const SESSION_KEY: &str = "supamenu.session";

/// Backend base URL, baked in at build time.
fn api_config() -> ApiClientConfig {
    match option_env!("SUPAMENU_API_BASE_URL") {
        Some(url) if !url.trim().is_empty() => ApiClientConfig::new(url.trim().to_string()),
        _ => ApiClientConfig::default(),
    }
}

/// One toast on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    #[serde(default)]
    user: Option<UserDto>,
}

#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    pub signed_in: ReadSignal<bool>,
    set_signed_in: WriteSignal<bool>,
    pub user: ReadSignal<Option<UserDto>>,
    set_user: WriteSignal<Option<UserDto>>,
    /// Restaurant the menu tab opens on. Not persisted.
    pub restaurant_id: ReadSignal<Option<String>>,
    set_restaurant_id: WriteSignal<Option<String>>,
    next_toast_id: StoredValue<u64>,
    session: StoredValue<SessionContext, LocalStorage>,
    config: StoredValue<ApiClientConfig>,
}

impl ConsoleContext {
    pub fn new() -> Self {
        let session = SessionContext::new();
        if let Some(stored) = load_session() {
            session.sign_in(stored.token, stored.user);
        }

        let (toasts, set_toasts) = signal(Vec::new());
        let (signed_in, set_signed_in) = signal(session.is_signed_in());
        let (user, set_user) = signal(session.user());
        let (restaurant_id, set_restaurant_id) = signal(None);

        Self {
            toasts,
            set_toasts,
            signed_in,
            set_signed_in,
            user,
            set_user,
            restaurant_id,
            set_restaurant_id,
            next_toast_id: StoredValue::new(0),
            session: StoredValue::new_local(session),
            config: StoredValue::new(api_config()),
        }
    }

    /// Handle on the tab's session. Clones share state.
    pub fn session(&self) -> SessionContext {
        self.session.with_value(SessionContext::clone)
    }

    /// API client bound to the configured backend and this tab's session.
    pub fn api(&self) -> Result<ApiClient<ReqwestTransport>, ConfigError> {
        let transport = ReqwestTransport::new(self.config.get_value())?;
        Ok(ApiClient::new(transport, self.session()))
    }

    /// Publishes the session after anything may have signed in or out.
    pub fn sync_session(&self) {
        let session = self.session();
        match session.bearer() {
            Some(token) => save_session(&StoredSession {
                token,
                user: session.user(),
            }),
            None => clear_session(),
        }
        self.set_signed_in.set(session.is_signed_in());
        self.set_user.set(session.user());
    }

    pub fn sign_out(&self) {
        self.session().sign_out();
        self.set_restaurant_id.set(None);
        self.sync_session();
    }

    pub fn remember_restaurant(&self, id: String) {
        let id = id.trim().to_string();
        self.set_restaurant_id.set((!id.is_empty()).then_some(id));
    }

    pub fn forget_restaurant(&self) {
        self.set_restaurant_id.set(None);
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);
        let toast = Toast {
            id,
            severity,
            message: message.into(),
        };
        log::debug!("toast {:?}: {}", toast.severity, toast.message);
        self.set_toasts.update(|toasts| toasts.push(toast));
    }

    /// Toasts a failed backend call; a rejected credential also signs out.
    pub fn report(&self, error: ApiError) {
        log::warn!("Request failed: {}", error);
        if error.is_unauthorized() {
            self.sign_out();
        }
        self.notify(Severity::Error, error.to_string());
    }

    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

/// Routes core notifications into the toast stack.
#[derive(Clone, Copy)]
pub struct ToastSink(ConsoleContext);

impl ToastSink {
    pub fn new(console: ConsoleContext) -> Self {
        Self(console)
    }
}

impl NotificationSink for ToastSink {
    fn notify(&self, severity: Severity, message: &str) {
        self.0.notify(severity, message);
    }
}

/// Navigator backed by the router. Must be created under `<Router>`.
#[derive(Clone)]
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str)>,
}

impl RouterNavigator {
    pub fn new() -> Self {
        let navigate = use_navigate();
        Self {
            navigate: Rc::new(move |path| navigate(path, Default::default())),
        }
    }
}

impl Navigator for RouterNavigator {
    fn redirect(&self, destination: Destination) {
        log::info!("redirecting to {}", destination.path());
        (self.navigate)(destination.path());
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_session() -> Option<StoredSession> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(stored) => Some(stored),
        Err(e) => {
            log::warn!("Discarding stored session: {}", e);
            clear_session();
            None
        }
    }
}

fn save_session(stored: &StoredSession) {
    let Some(storage) = local_storage() else {
        return;
    };
    match serde_json::to_string(stored) {
        Ok(raw) => {
            if storage.set_item(SESSION_KEY, &raw).is_err() {
                log::warn!("Could not persist session");
            }
        }
        Err(e) => log::error!("Failed to serialize session: {}", e),
    }
}

fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
