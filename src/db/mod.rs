pub mod connection;
pub mod migrations;
pub mod profile_repo;
pub mod section_repo;
pub mod snapshot;
pub mod subsection_repo;
pub mod task_repo;

pub use connection::*;
