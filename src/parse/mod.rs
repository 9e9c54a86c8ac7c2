pub mod quick_add;

pub use quick_add::{ParsedInput, parse_quick_add, parse_quick_add_at};
