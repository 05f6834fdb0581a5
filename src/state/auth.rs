//! Login/registration flow state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page drives this flow: field edits, mode toggles and submits.
//! On a successful login the credential is written to the session's token
//! store and the navigator is sent to the dashboard.
//!
//! DESIGN
//! ======
//! Phases run `Idle -> Submitting -> {Success, Failed}`. An explicit in-flight
//! flag enforces one outstanding submission, independent of how the page
//! renders its submit affordance. Every failure kind (transport, backend
//! rejection, missing token) resolves to a single message slot.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::net::api::{ApiClient, ApiError};
use crate::state::token_store::{SessionToken, StoreError};
use crate::util::error_message::{MessageExtractor, display_message, resolve_message};
use crate::util::navigate::{DASHBOARD_ROUTE, Navigator};

pub const LOGIN_FAILED_MESSAGE: &str = "login failed";
pub const REGISTER_FAILED_MESSAGE: &str = "registration failed";
pub const REGISTERED_NOTICE: &str = "Registration successful. You can now sign in.";

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Form state rendered by the login page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub mode: AuthMode,
    pub phase: AuthPhase,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthState {
    /// Whether the submit affordance should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase != AuthPhase::Submitting
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match (self.mode, self.phase == AuthPhase::Submitting) {
            (AuthMode::Login, true) => "Signing in...",
            (AuthMode::Register, true) => "Registering...",
            (AuthMode::Login, false) => "Sign in",
            (AuthMode::Register, false) => "Register",
        }
    }

    /// Switch login/registration mode, clearing the error and both fields.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
        self.notice = None;
        self.email.clear();
        self.password.clear();
        if self.phase != AuthPhase::Submitting {
            self.phase = AuthPhase::Idle;
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport succeeded but the body carried no usable `access_token`.
    #[error("token not received")]
    TokenNotReceived,

    #[error("failed to persist session: {0}")]
    Store(#[from] StoreError),
}

fn backend_detail(error: &AuthError) -> Option<String> {
    match error {
        AuthError::Api(api) => api.detail().map(str::to_owned),
        _ => None,
    }
}

/// Backend `detail`, then the error's own message; the caller supplies the default.
pub const AUTH_MESSAGE_EXTRACTORS: &[MessageExtractor<AuthError>] = &[backend_detail, display_message::<AuthError>];

/// Result of a single submit call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Token stored and navigation to the dashboard requested.
    Authenticated,
    /// Account created; mode switched back to login.
    Registered,
    /// Flow failed with the surfaced message.
    Failed(String),
    /// A submission was already in flight; nothing was dispatched.
    Ignored,
}

// =============================================================================
// FLOW
// =============================================================================

pub struct AuthFlow<N: Navigator> {
    api: ApiClient,
    navigator: N,
    state: Mutex<AuthState>,
    in_flight: AtomicBool,
}

impl<N: Navigator> AuthFlow<N> {
    #[must_use]
    pub fn new(api: ApiClient, navigator: N) -> Self {
        Self { api, navigator, state: Mutex::new(AuthState::default()), in_flight: AtomicBool::new(false) }
    }

    /// Snapshot of the current form state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.lock().clone()
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.lock().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.lock().password = password.into();
    }

    pub fn toggle_mode(&self) {
        self.lock().toggle_mode();
    }

    /// Submit the form in its current mode.
    ///
    /// Returns [`SubmitOutcome::Ignored`] without touching the network when a
    /// previous submission has not resolved yet.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(guard) = InFlightGuard::acquire(self) else {
            tracing::debug!("submit ignored; request already in flight");
            return SubmitOutcome::Ignored;
        };

        let (mode, email, password) = {
            let mut state = self.lock();
            state.phase = AuthPhase::Submitting;
            state.error = None;
            state.notice = None;
            (state.mode, state.email.clone(), state.password.clone())
        };

        let outcome = match mode {
            AuthMode::Login => self.run_login(&email, &password).await,
            AuthMode::Register => self.run_register(&email, &password).await,
        };

        drop(guard);

        if outcome == SubmitOutcome::Authenticated {
            self.navigator.navigate(DASHBOARD_ROUTE);
        }
        outcome
    }

    async fn run_login(&self, email: &str, password: &str) -> SubmitOutcome {
        tracing::info!(%email, "login submitted");
        match self.login(email, password).await {
            Ok(()) => {
                tracing::info!(%email, "login succeeded");
                self.lock().phase = AuthPhase::Success;
                SubmitOutcome::Authenticated
            }
            Err(e) => self.fail(&e, LOGIN_FAILED_MESSAGE),
        }
    }

    async fn run_register(&self, email: &str, password: &str) -> SubmitOutcome {
        tracing::info!(%email, "registration submitted");
        match self.api.register(email, password).await {
            Ok(()) => {
                tracing::info!(%email, "registration succeeded");
                let mut state = self.lock();
                state.phase = AuthPhase::Success;
                state.mode = AuthMode::Login;
                state.notice = Some(REGISTERED_NOTICE.to_owned());
                SubmitOutcome::Registered
            }
            Err(e) => self.fail(&AuthError::Api(e), REGISTER_FAILED_MESSAGE),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self.api.login(email, password).await?;
        let token = response
            .access_token
            .and_then(SessionToken::new)
            .ok_or(AuthError::TokenNotReceived)?;
        self.api.tokens().save(&token)?;
        Ok(())
    }

    fn fail(&self, error: &AuthError, fallback: &str) -> SubmitOutcome {
        let message = resolve_message(error, AUTH_MESSAGE_EXTRACTORS, fallback);
        tracing::warn!(error = %error, %message, "auth flow failed");
        let mut state = self.lock();
        state.phase = AuthPhase::Failed;
        state.error = Some(message.clone());
        SubmitOutcome::Failed(message)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AuthState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// =============================================================================
// IN-FLIGHT GUARD
// =============================================================================

/// Holds the single-submission slot. Released on drop, so a submit future
/// cancelled mid-request does not leave the form locked.
struct InFlightGuard<'a, N: Navigator> {
    flow: &'a AuthFlow<N>,
}

impl<'a, N: Navigator> InFlightGuard<'a, N> {
    fn acquire(flow: &'a AuthFlow<N>) -> Option<Self> {
        if flow
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        Some(Self { flow })
    }
}

impl<N: Navigator> Drop for InFlightGuard<'_, N> {
    fn drop(&mut self) {
        {
            let mut state = self.flow.lock();
            if state.phase == AuthPhase::Submitting {
                tracing::debug!("submit cancelled before completion");
                state.phase = AuthPhase::Idle;
            }
        }
        self.flow.in_flight.store(false, Ordering::Release);
    }
}
