//! Utility helpers shared across flows and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep formatting and message/navigation plumbing out of the
//! state machines so each piece stays small and testable.

pub mod currency;
pub mod error_message;
pub mod navigate;
