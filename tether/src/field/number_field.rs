use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::{
    ErrorDisplay, Field, FieldId, ListenerId, Listeners, ValueChangeEvent, ValueChangeListener,
};

const DEFAULT_PARSE_ERROR: &str = "Please enter a whole number";

#[derive(Debug)]
struct NumberFieldInner {
    /// Parsed value; `None` when the text is empty.
    value: Option<i64>,
    /// Raw text as typed.
    text: String,
    parse_error: String,
    /// Set while `error` holds the parse error for `text`.
    parse_failed: bool,
    error: Option<String>,
    error_display: ErrorDisplay,
}

impl Default for NumberFieldInner {
    fn default() -> Self {
        Self {
            value: None,
            text: String::new(),
            parse_error: DEFAULT_PARSE_ERROR.to_string(),
            parse_failed: false,
            error: None,
            error_display: ErrorDisplay::default(),
        }
    }
}

/// An integer field backed by free text.
///
/// The field value is `Option<i64>`: empty text is `None`. Text that does not
/// parse leaves the value untouched and shows the parse error instead, so
/// listeners only ever see well-formed numbers.
#[derive(Debug)]
pub struct NumberField {
    id: FieldId,
    inner: Arc<RwLock<NumberFieldInner>>,
    listeners: Listeners<Option<i64>>,
    dirty: Arc<AtomicBool>,
}

impl NumberField {
    pub fn new() -> Self {
        Self {
            id: FieldId::new("number_field"),
            inner: Arc::new(RwLock::new(NumberFieldInner::default())),
            listeners: Listeners::new(),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the message shown for unparsable input.
    pub fn with_parse_error(self, message: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.parse_error = message.into();
        }
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The raw text currently displayed.
    pub fn text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.text.clone())
            .unwrap_or_default()
    }

    /// Replace the displayed text, as a host does on user input.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        let parsed = if trimmed.is_empty() {
            Ok(None)
        } else {
            trimmed.parse::<i64>().map(Some)
        };
        match parsed {
            Ok(value) => self.replace(value, Some(text)),
            Err(_) => {
                if let Ok(mut guard) = self.inner.write() {
                    log::trace!("{}: rejected input {:?}", self.id, text);
                    guard.text = text;
                    guard.error = Some(guard.parse_error.clone());
                    guard.parse_failed = true;
                    self.dirty.store(true, Ordering::SeqCst);
                }
            }
        }
    }

    fn replace(&self, value: Option<i64>, text: Option<String>) {
        let event = match self.inner.write() {
            Ok(mut guard) => {
                guard.text =
                    text.unwrap_or_else(|| value.map(|v| v.to_string()).unwrap_or_default());
                if std::mem::take(&mut guard.parse_failed) {
                    guard.error = None;
                    self.dirty.store(true, Ordering::SeqCst);
                }
                if guard.value == value {
                    None
                } else {
                    let old_value = guard.value;
                    guard.value = value;
                    guard.error = None;
                    self.dirty.store(true, Ordering::SeqCst);
                    Some(ValueChangeEvent { old_value, value })
                }
            }
            Err(_) => None,
        };
        if let Some(event) = event {
            log::trace!("{}: value changed to {:?}", self.id, event.value);
            self.listeners.notify(&event);
        }
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

impl Clone for NumberField {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            listeners: self.listeners.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for NumberField {
    fn default() -> Self {
        Self::new()
    }
}

impl Field for NumberField {
    type Value = Option<i64>;

    fn value(&self) -> Option<i64> {
        self.inner.read().map(|guard| guard.value).unwrap_or(None)
    }

    fn set_value(&self, value: Option<i64>) {
        self.replace(value, None)
    }

    fn add_value_change_listener(
        &self,
        listener: ValueChangeListener<Option<i64>>,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_value_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn set_error(&self, message: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            // The parse error stays until the text parses.
            let message = match message {
                None if guard.parse_failed => Some(guard.parse_error.clone()),
                message => message,
            };
            if guard.error != message {
                guard.error = message;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    fn input_error(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .filter(|guard| guard.parse_failed)
            .map(|guard| guard.parse_error.clone())
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
