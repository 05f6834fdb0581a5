//! Login page rendered as terminal text.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::state::auth::{AuthMode, AuthState};

const PASSWORD_MASK: char = '*';

#[must_use]
pub fn title(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "Sign in",
        AuthMode::Register => "Register",
    }
}

#[must_use]
pub fn toggle_hint(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "No account yet? Register",
        AuthMode::Register => "Already have an account? Sign in",
    }
}

/// Render the login form. The password is masked, never echoed.
#[must_use]
pub fn render_login(state: &AuthState) -> String {
    let mask: String = std::iter::repeat_n(PASSWORD_MASK, state.password.chars().count()).collect();
    let mut lines = vec![
        format!("== {} ==", title(state.mode)),
        format!("Email:    {}", state.email),
        format!("Password: {mask}"),
    ];
    if let Some(error) = &state.error {
        lines.push(format!("Error: {error}"));
    }
    if let Some(notice) = &state.notice {
        lines.push(notice.clone());
    }
    lines.push(if state.can_submit() {
        format!("[ {} ]", state.submit_label())
    } else {
        format!("( {} )", state.submit_label())
    });
    lines.push(toggle_hint(state.mode).to_owned());
    lines.join("\n") + "\n"
}
