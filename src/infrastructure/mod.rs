//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Launcher configuration loading
//! - Storage: JSON file stores
//! - Lang: Language files and translation
//! - Adapters: Platform integrations (console)

pub mod config;
pub mod storage;
pub mod lang;
pub mod adapters;
