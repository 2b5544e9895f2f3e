// src/models/mod.rs

//! Domain models for the backend.

mod machine;
mod site;

// Re-export all public types
pub use machine::{
    parse_leading_minutes, Machine, MachineKind, SiteMachines, BROKEN_STATUSES,
    COMPLETE_STATUSES, UNAVAILABLE_MINUTES,
};
pub use site::{Site, Village};
