//! Explicit authentication session.
//!
//! The console keeps exactly one session per browser tab (or CLI process).
//! It is handed to whoever needs the credential instead of being read from
//! ambient storage. Clones share the same state.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use web_common::UserDto;

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserDto>,
}

#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Rc<RefCell<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already holds a token, e.g. one passed on the command line.
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token, None);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>, user: Option<UserDto>) {
        let mut state = self.inner.borrow_mut();
        state.token = Some(token.into());
        state.user = user;
    }

    /// Forgets the credential. Returns whether one was held.
    pub fn sign_out(&self) -> bool {
        let mut state = self.inner.borrow_mut();
        state.user = None;
        state.token.take().is_some()
    }

    /// Bearer credential, if signed in with a non-blank token.
    pub fn bearer(&self) -> Option<String> {
        self.inner
            .borrow()
            .token
            .as_ref()
            .filter(|token| !token.trim().is_empty())
            .cloned()
    }

    pub fn is_signed_in(&self) -> bool {
        self.bearer().is_some()
    }

    pub fn user(&self) -> Option<UserDto> {
        self.inner.borrow().user.clone()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("SessionContext")
            .field("signed_in", &state.token.is_some())
            .field("user", &state.user.as_ref().map(|u| u.email.as_str()))
            .finish()
    }
}
