//! rilow-bot - a small guild chat bot
//!
//! Prefixed commands routed to hot-swappable extensions, an owner/admin
//! permission gate with a restricted mode, JSON-file stores and line-based
//! translations.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod extensions;
