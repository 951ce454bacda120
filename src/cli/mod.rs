pub mod commands;
pub mod init;
pub mod rewards;
pub mod section;
pub mod stats;
pub mod subsection;
pub mod task;

pub use commands::*;
