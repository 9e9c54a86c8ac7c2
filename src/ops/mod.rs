pub mod status;
pub mod task_ops;

pub use status::{auto_update_status, compute_next_status, initialize_default_status};
pub use task_ops::*;
