//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod project_repo;
pub mod startup_repo;
pub mod student_repo;

pub use project_repo::ProjectRepo;
pub use startup_repo::StartupRepo;
pub use student_repo::StudentRepo;
