pub mod achievement;
pub mod section;
pub mod stats;
pub mod task;

pub use achievement::*;
pub use section::*;
pub use stats::*;
pub use task::*;
