//! Message handling - From inbound text to transport actions

pub mod context;
pub mod dispatcher;
pub mod middleware;
pub mod parser;

pub use context::CommandContext;
pub use dispatcher::{Action, CommandRouter, Dispatch, Status, GENERIC_FAILURE};
pub use middleware::{Check, CheckChain, CheckContext, Denial};
pub use parser::{Invocation, MessageParser};
