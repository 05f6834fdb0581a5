//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page renders one route's state as terminal text; orchestration lives
//! in `state` and the binary decides when a page is shown.

pub mod dashboard;
pub mod login;
