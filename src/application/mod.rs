//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Permissions: Owner/admin allow-list and restricted mode
//! - State: The stores and translator commands work on
//! - Messaging: Message parsing, checks, routing
//! - Services: Built-in commands and the transport-facing message service

pub mod errors;
pub mod permissions;
pub mod state;
pub mod messaging;
pub mod services;
