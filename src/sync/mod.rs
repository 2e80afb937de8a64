//! Canvas edit buffers kept consistent with the shared store.
//!
//! An editor holds a local copy of one canvas. Keystrokes go to the copy and a
//! debounce timer writes the changed fields back; store changes are merged in
//! field by field, leaving whatever the user is typing alone.

mod bindings;
mod editor;
mod reconcile;
mod timer;

pub use bindings::{
    BusinessModelEditor, BusinessModelSource, ProblemCanvasEditor, ProblemCanvasSource,
    ValuePropositionEditor, ValuePropositionSource,
};
pub use editor::{CanvasEditor, CanvasSource, FieldOf};
pub use reconcile::{
    changed_fields, reconcile, BlockPart, BusinessModelField, Canvas, ProblemField, Reconciled,
    ValuePropositionField,
};
pub use timer::Debouncer;

const ENABLE_LOGS: bool = true;
