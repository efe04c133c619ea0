//! Domain layer for the campus freelance marketplace.
//!
//! Holds the entity-independent building blocks shared by the persistence
//! and HTTP layers: error types, role constants, the project/applicant
//! state machines, the authorization gate, and field validation rules.

pub mod application;
pub mod authz;
pub mod error;
pub mod profile;
pub mod project;
pub mod roles;
pub mod types;
