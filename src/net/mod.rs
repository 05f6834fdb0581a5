//! Networking modules for the portfolio REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` owns the HTTP exchange, `api` layers credentials and endpoint
//! semantics on top, and `types` defines the wire schema.

pub mod api;
pub mod transport;
pub mod types;
