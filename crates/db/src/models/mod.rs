pub mod project;
pub mod startup;
pub mod student;
