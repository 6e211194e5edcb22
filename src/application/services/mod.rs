//! Application services - Business logic orchestration

pub mod command_service;
pub mod message_service;

pub use command_service::{core_commands, get_help};
pub use message_service::{Flow, MessageService};
