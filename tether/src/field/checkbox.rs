use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{
    ErrorDisplay, Field, FieldId, ListenerId, Listeners, ValueChangeEvent, ValueChangeListener,
};

#[derive(Debug, Default)]
struct CheckboxInner {
    checked: bool,
    label: String,
    error: Option<String>,
    error_display: ErrorDisplay,
}

/// A boolean field.
///
/// # Example
///
/// ```
/// use tether::field::{Checkbox, Field};
///
/// let terms = Checkbox::with_label("I accept the terms");
/// terms.toggle();
/// assert!(terms.value());
/// ```
#[derive(Debug)]
pub struct Checkbox {
    id: FieldId,
    inner: Arc<RwLock<CheckboxInner>>,
    listeners: Listeners<bool>,
    dirty: Arc<AtomicBool>,
}

impl Checkbox {
    /// Create a new unchecked checkbox without a label
    pub fn new() -> Self {
        Self::from_inner(CheckboxInner::default())
    }

    /// Create a checkbox with a label
    pub fn with_label(label: impl Into<String>) -> Self {
        Self::from_inner(CheckboxInner {
            label: label.into(),
            ..Default::default()
        })
    }

    fn from_inner(inner: CheckboxInner) -> Self {
        Self {
            id: FieldId::new("checkbox"),
            inner: Arc::new(RwLock::new(inner)),
            listeners: Listeners::new(),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Check if the checkbox is checked
    pub fn is_checked(&self) -> bool {
        self.inner.read().map(|guard| guard.checked).unwrap_or(false)
    }

    pub fn label(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.label.clone())
            .unwrap_or_default()
    }

    /// Set the checked state
    pub fn set_checked(&self, checked: bool) {
        let changed = match self.inner.write() {
            Ok(mut guard) if guard.checked != checked => {
                guard.checked = checked;
                guard.error = None;
                self.dirty.store(true, Ordering::SeqCst);
                true
            }
            _ => false,
        };
        if changed {
            log::trace!("{}: checked = {}", self.id, checked);
            self.listeners.notify(&ValueChangeEvent {
                old_value: !checked,
                value: checked,
            });
        }
    }

    /// Toggle the checked state (what a click does)
    pub fn toggle(&self) {
        self.set_checked(!self.is_checked());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub fn error_display(&self) -> ErrorDisplay {
        self.inner
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    pub fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_display = display;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}

impl Clone for Checkbox {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            listeners: self.listeners.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for Checkbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for Checkbox {
    type Value = bool;

    fn value(&self) -> bool {
        self.is_checked()
    }

    fn set_value(&self, value: bool) {
        self.set_checked(value)
    }

    fn add_value_change_listener(&self, listener: ValueChangeListener<bool>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_value_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut guard) = self.inner.write()
            && guard.error != message
        {
            guard.error = message;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn error(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    fn field_id(&self) -> String {
        self.id.to_string()
    }
}
