use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{
    ErrorDisplay, Field, FieldId, ListenerId, Listeners, ValueChangeEvent, ValueChangeListener,
};

/// Internal state for a TextField
#[derive(Debug, Default)]
struct TextFieldInner {
    /// Current text value
    value: String,
    /// Placeholder text
    placeholder: String,
    /// Cursor position (byte offset)
    cursor: usize,
    /// Validation error message (if any)
    error: Option<String>,
    /// How to display validation errors
    error_display: ErrorDisplay,
}

/// A single-line text field.
///
/// `TextField` is a cheap-clone handle: every clone shares the value, error
/// state and listeners. Hosts drive it through [`TextField::insert_char`] and
/// friends as the user types; application code and the binder use
/// [`TextField::set_value`].
///
/// # Example
///
/// ```
/// use tether::field::{Field, TextField};
///
/// let name = TextField::with_placeholder("First name");
/// name.set_value("Johannes");
/// assert_eq!(name.value(), "Johannes");
/// ```
#[derive(Debug)]
pub struct TextField {
    id: FieldId,
    inner: Arc<RwLock<TextFieldInner>>,
    listeners: Listeners<String>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl TextField {
    /// Create a new empty text field
    pub fn new() -> Self {
        Self::from_inner(TextFieldInner::default())
    }

    /// Create a text field with an initial value
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self::from_inner(TextFieldInner {
            value,
            cursor,
            ..Default::default()
        })
    }

    /// Create a text field with a placeholder
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self::from_inner(TextFieldInner {
            placeholder: placeholder.into(),
            ..Default::default()
        })
    }

    fn from_inner(inner: TextFieldInner) -> Self {
        Self {
            id: FieldId::new("text_field"),
            inner: Arc::new(RwLock::new(inner)),
            listeners: Listeners::new(),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.id
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn value(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Get the placeholder text
    pub fn placeholder(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    /// Get the cursor position (byte offset)
    pub fn cursor(&self) -> usize {
        self.inner.read().map(|guard| guard.cursor).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.value.is_empty())
            .unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the text value, moving the cursor to the end.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(move |inner| {
            inner.cursor = value.len();
            inner.value = value;
        });
    }

    /// Clear the text value
    pub fn clear(&self) {
        self.edit(|inner| {
            inner.value.clear();
            inner.cursor = 0;
        });
    }

    /// Set the placeholder text
    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.placeholder = placeholder.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Insert a character at the cursor position
    pub fn insert_char(&self, c: char) {
        self.edit(|inner| {
            let cursor = inner.cursor;
            inner.value.insert(cursor, c);
            inner.cursor += c.len_utf8();
        });
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before(&self) {
        self.edit(|inner| {
            if inner.cursor == 0 {
                return;
            }
            let prev_cursor = inner.value[..inner.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            inner.value.remove(prev_cursor);
            inner.cursor = prev_cursor;
        });
    }

    /// Apply an edit and, if the text changed, clear the error and notify
    /// listeners after the lock is released.
    fn edit(&self, f: impl FnOnce(&mut TextFieldInner)) {
        let event = match self.inner.write() {
            Ok(mut guard) => {
                let old_value = guard.value.clone();
                f(&mut guard);
                if guard.value == old_value {
                    None
                } else {
                    guard.error = None;
                    self.dirty.store(true, Ordering::SeqCst);
                    Some(ValueChangeEvent {
                        old_value,
                        value: guard.value.clone(),
                    })
                }
            }
            Err(_) => None,
        };
        if let Some(event) = event {
            log::trace!("{}: value changed to {:?}", self.id, event.value);
            self.listeners.notify(&event);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the field state has changed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Set a validation error message on this field.
    pub fn set_error(&self, msg: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error = Some(msg.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Clear the validation error.
    pub fn clear_error(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.error.is_some()
        {
            guard.error = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the current validation error message (if any).
    pub fn error(&self) -> Option<String> {
        self.inner
            .read()
            .map(|guard| guard.error.clone())
            .unwrap_or(None)
    }

    /// Get the error display mode.
    pub fn error_display(&self) -> ErrorDisplay {
        self.inner
            .read()
            .map(|guard| guard.error_display)
            .unwrap_or_default()
    }

    /// Set the error display mode.
    pub fn set_error_display(&self, display: ErrorDisplay) {
        if let Ok(mut guard) = self.inner.write() {
            guard.error_display = display;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}

impl Clone for TextField {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            listeners: self.listeners.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for TextField {
    type Value = String;

    fn value(&self) -> String {
        TextField::value(self)
    }

    fn set_value(&self, value: String) {
        TextField::set_value(self, value)
    }

    fn add_value_change_listener(&self, listener: ValueChangeListener<String>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_value_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn set_error(&self, message: Option<String>) {
        match message {
            Some(message) => TextField::set_error(self, message),
            None => self.clear_error(),
        }
    }

    fn error(&self) -> Option<String> {
        TextField::error(self)
    }

    fn field_id(&self) -> String {
        self.id.to_string()
    }
}
