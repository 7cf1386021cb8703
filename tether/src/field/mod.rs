//! The field capability and the concrete fields that implement it.
//!
//! A [`Field`] is anything the binder can read, write, observe and flag with
//! an error. Concrete widgets (`TextField`, `Checkbox`, `NumberField`) are
//! cheap-clone handles over shared state, so the binder and the host that
//! renders the widget can both hold the same field.

mod checkbox;
mod error_display;
mod listeners;
mod number_field;
mod text_field;

use std::sync::atomic::{AtomicUsize, Ordering};

pub use checkbox::Checkbox;
pub use error_display::ErrorDisplay;
pub use listeners::{ListenerId, Listeners, ValueChangeEvent, ValueChangeListener};
pub use number_field::NumberField;
pub use text_field::TextField;

/// Capability contract between the binder and a UI field.
///
/// Implementations must deliver value-change events synchronously, on the
/// thread that called [`Field::set_value`], and must not hold internal locks
/// while listeners run.
pub trait Field: Send + Sync {
    /// The value type presented by the field.
    type Value: Clone + PartialEq + Send + Sync + 'static;

    /// Current displayed value.
    fn value(&self) -> Self::Value;

    /// Replace the displayed value.
    ///
    /// Setting a value equal to the current one does nothing. A real change
    /// clears the error state and then notifies every listener.
    fn set_value(&self, value: Self::Value);

    /// Register a value-change listener.
    fn add_value_change_listener(&self, listener: ValueChangeListener<Self::Value>)
    -> ListenerId;

    /// Remove a previously registered listener.
    fn remove_value_change_listener(&self, id: ListenerId) -> bool;

    /// Show `Some(message)` as the field's error, or clear it with `None`.
    fn set_error(&self, message: Option<String>);

    /// Currently displayed error message, if any.
    fn error(&self) -> Option<String>;

    /// Stable identifier of this field (shared by all clones of the handle).
    fn field_id(&self) -> String;

    /// Error for input the field could not turn into a value, if any.
    ///
    /// While this is set, the field's value is stale and the binder treats
    /// the field as invalid regardless of its validators.
    fn input_error(&self) -> Option<String> {
        None
    }

    /// Whether an error is currently displayed.
    fn has_error(&self) -> bool {
        self.error().is_some()
    }
}

/// Unique identifier for a field instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    kind: &'static str,
    seq: usize,
}

impl FieldId {
    pub(crate) fn new(kind: &'static str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self {
            kind,
            seq: COUNTER.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__{}_{}", self.kind, self.seq)
    }
}
