//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`token_store`, `auth`, `dashboard`) so each
//! page depends only on the small model it drives.

pub mod auth;
pub mod dashboard;
pub mod token_store;
