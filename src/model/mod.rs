pub mod labels;
pub mod task;

pub use labels::*;
pub use task::*;
