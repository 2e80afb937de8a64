use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::sync::watch;

use crate::log_debug;

use super::{
    reconcile::{changed_fields, reconcile, Canvas},
    timer::Debouncer,
    ENABLE_LOGS,
};

pub type FieldOf<S> = <<S as CanvasSource>::Record as Canvas>::Field;

/// Where a canvas editor reads its incoming record and writes changed fields.
pub trait CanvasSource: Send + Sync + 'static {
    type Record: Canvas;

    fn name(&self) -> &'static str;

    /// The store value as displayed, derivations included.
    fn incoming(&self) -> Self::Record;

    /// Persist the given field values. Other fields must be left as stored.
    fn write_fields(&self, changes: Vec<(<Self::Record as Canvas>::Field, String)>);
}

struct EditorState<T: Canvas> {
    buffer: T,
    /// Store value the buffer was last reconciled or written against.
    last_incoming: T,
    editing: HashSet<T::Field>,
}

/// Local edit buffer for one canvas, reconciled against the store on every
/// store change and written back after a quiet period.
pub struct CanvasEditor<S: CanvasSource> {
    source: Arc<S>,
    state: Arc<Mutex<EditorState<S::Record>>>,
    debouncer: Debouncer,
}

impl<S: CanvasSource> CanvasEditor<S> {
    pub fn new(source: S, delay: Duration) -> Self {
        let buffer = source.incoming();
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(EditorState {
                last_incoming: buffer.clone(),
                buffer,
                editing: HashSet::new(),
            })),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn buffer(&self) -> S::Record {
        lock(&self.state).buffer.clone()
    }

    pub fn value(&self, field: FieldOf<S>) -> String {
        lock(&self.state).buffer.field(field).to_string()
    }

    pub fn is_read_only(&self, field: FieldOf<S>) -> bool {
        lock(&self.state).buffer.is_read_only(field)
    }

    /// Mark `field` as holding keyboard focus.
    pub fn begin_editing(&self, field: FieldOf<S>) {
        lock(&self.state).editing.insert(field);
    }

    pub fn end_editing(&self, field: FieldOf<S>) {
        lock(&self.state).editing.remove(&field);
    }

    pub fn editing(&self) -> HashSet<FieldOf<S>> {
        lock(&self.state).editing.clone()
    }

    /// Apply one keystroke-level change to the buffer.
    ///
    /// Restarts the write-back timer while the buffer differs from the store,
    /// and cancels it once they agree again. Read-only fields are refused.
    pub fn edit(&self, field: FieldOf<S>, value: impl Into<String>) -> bool {
        let incoming = self.source.incoming();
        let dirty = {
            let mut state = lock(&self.state);
            if state.buffer.is_read_only(field) {
                log_debug!("Ignoring edit to read-only {:?} on {}", field, self.source.name());
                return false;
            }
            state.buffer.set_field(field, value.into());
            !changed_fields(&state.buffer, &incoming).is_empty()
        };

        if dirty {
            let source = Arc::clone(&self.source);
            let state = Arc::clone(&self.state);
            self.debouncer.schedule(move || {
                write_back(source.as_ref(), &state);
            });
        } else {
            self.debouncer.cancel();
        }
        true
    }

    /// Reconcile the buffer with the current store value. Returns whether the
    /// buffer changed.
    ///
    /// Nothing happens unless this canvas's store value moved since the last
    /// sync or write, so changes to other collections leave the buffer alone.
    pub fn sync_from_store(&self) -> bool {
        let incoming = self.source.incoming();
        let mut state = lock(&self.state);
        if incoming == state.last_incoming {
            return false;
        }
        let merged = reconcile(&state.buffer, &state.last_incoming, &incoming, &state.editing);
        state.last_incoming = incoming;
        if merged.changed {
            state.buffer = merged.record;
        }
        merged.changed
    }

    /// Reconcile on every store revision until the store goes away.
    pub async fn follow(&self, mut changes: watch::Receiver<u64>) {
        self.sync_from_store();
        while changes.changed().await.is_ok() {
            self.sync_from_store();
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Write pending changes now instead of waiting for the timer.
    /// Returns whether anything was written.
    pub fn flush(&self) -> bool {
        self.debouncer.cancel();
        write_back(self.source.as_ref(), &self.state)
    }
}

fn write_back<S: CanvasSource>(source: &S, state: &Mutex<EditorState<S::Record>>) -> bool {
    let buffer = lock(state).buffer.clone();
    let changes = changed_fields(&buffer, &source.incoming());
    if changes.is_empty() {
        return false;
    }
    log_debug!("Writing {} field(s) of {}", changes.len(), source.name());
    source.write_fields(changes.clone());

    // Only our own fields count as seen; other store changes wait for the next sync.
    let mut state = lock(state);
    for (field, value) in changes {
        state.last_incoming.set_field(field, value);
    }
    true
}

fn lock<T: Canvas>(state: &Mutex<EditorState<T>>) -> MutexGuard<'_, EditorState<T>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
