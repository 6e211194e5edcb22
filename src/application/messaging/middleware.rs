//! Checks run before a command's handler
//!
//! Every check in the chain must pass; the first failure decides the
//! [`Denial`].

use std::fmt;
use std::sync::Arc;

use crate::application::permissions::PermissionGate;
use crate::domain::entities::{Command, Message};

/// What a check gets to look at
pub struct CheckContext<'a> {
    pub message: &'a Message,
    pub command: &'a Command,
    pub gate: PermissionGate<'a>,
}

/// Why a command was not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// Restricted mode is on and the author is not authorized
    RestrictedMode,
    /// The command is admin-only and the author is not authorized
    AdminOnly,
    /// Rejected by a custom check
    Other(String),
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::RestrictedMode => write!(f, "restricted mode"),
            Denial::AdminOnly => write!(f, "admin only"),
            Denial::Other(reason) => write!(f, "{}", reason),
        }
    }
}

/// A predicate gating command invocation
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), Denial>;
}

/// Global gate: in restricted mode only the owner and admins get through
pub struct RestrictedModeCheck;

impl Check for RestrictedModeCheck {
    fn name(&self) -> &str {
        "restricted-mode"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), Denial> {
        if ctx.gate.global_check(ctx.message.author.id) {
            Ok(())
        } else {
            Err(Denial::RestrictedMode)
        }
    }
}

/// Per-command gate for commands marked admin-only
pub struct AdminOnlyCheck;

impl Check for AdminOnlyCheck {
    fn name(&self) -> &str {
        "admin-only"
    }

    fn check(&self, ctx: &CheckContext<'_>) -> Result<(), Denial> {
        if !ctx.command.admin_only || ctx.gate.is_authorized(ctx.message.author.id) {
            Ok(())
        } else {
            Err(Denial::AdminOnly)
        }
    }
}

/// Ordered list of checks
#[derive(Clone)]
pub struct CheckChain {
    checks: Vec<Arc<dyn Check>>,
}

impl CheckChain {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Restricted-mode gate, then the admin-only gate.
    pub fn standard() -> Self {
        Self::new().add(RestrictedModeCheck).add(AdminOnlyCheck)
    }

    pub fn add<C: Check + 'static>(mut self, check: C) -> Self {
        self.checks.push(Arc::new(check));
        self
    }

    pub fn run(&self, ctx: &CheckContext<'_>) -> Result<(), Denial> {
        for check in &self.checks {
            if let Err(denial) = check.check(ctx) {
                tracing::debug!("Check '{}' failed for {}: {}", check.name(), ctx.command.name, denial);
                return Err(denial);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckChain {
    fn default() -> Self {
        Self::standard()
    }
}
