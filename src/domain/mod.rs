//! Domain layer - Core business objects and the seams to the outside
//! 
//! This layer contains:
//! - Entities: Core business objects (User, Message, Command)
//! - Traits: Abstractions for infrastructure (Bot)

pub mod entities;
pub mod traits;
