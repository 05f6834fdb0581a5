//! Route names and the navigation seam used by flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Flows request navigation by path; the frontend decides what a path means
//! (the terminal binary renders the matching page).

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Receives navigation requests from flows.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}
