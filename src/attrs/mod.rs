pub mod editor;
pub mod schema;

pub use editor::{AttributeDiffEditor, Row, RowFilter};
pub use schema::{FieldDescriptor, FieldKind, FieldValue, field_by_name, task_fields};
