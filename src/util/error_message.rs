//! Ordered user-facing message resolution for flow failures.
//!
//! DESIGN
//! ======
//! Each extractor inspects an error and may produce a message. Extractors run
//! in order and the first `Some` wins; when none apply the caller's fallback
//! string is used.

#[cfg(test)]
#[path = "error_message_test.rs"]
mod error_message_test;

/// Tries to produce a human-readable message for `E`.
pub type MessageExtractor<E> = fn(&E) -> Option<String>;

/// Return the first message any extractor yields, or `fallback`.
pub fn resolve_message<E>(error: &E, extractors: &[MessageExtractor<E>], fallback: &str) -> String {
    extractors
        .iter()
        .find_map(|extract| extract(error).filter(|message| !message.trim().is_empty()))
        .unwrap_or_else(|| fallback.to_owned())
}

/// Generic extractor: the error's own `Display` text, when non-blank.
pub fn display_message<E: std::fmt::Display>(error: &E) -> Option<String> {
    let message = error.to_string();
    if message.trim().is_empty() { None } else { Some(message) }
}
