pub mod auth;
pub mod project;
pub mod startup;
pub mod student;
