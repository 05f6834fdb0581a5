//! # portfolio
//!
//! Session client for the real-estate portfolio backend.
//!
//! This crate holds the credential store, the bearer-attaching API client,
//! the login/registration flow and the dashboard loader. The `portfolio`
//! binary renders the login screen and dashboard on a terminal on top of it.

pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
