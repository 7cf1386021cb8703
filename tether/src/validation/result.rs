/// Outcome of running one validator.
///
/// A passing result carries the (possibly transformed) value; a failing one
/// carries only the message. There is no warning state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult<T> {
    /// The value passed.
    Ok(T),
    /// The value was rejected with this message.
    Error(String),
}

impl<T> ValidationResult<T> {
    /// Create a failing result.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        !self.is_ok()
    }

    /// The failure message, if this result failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Error(message) => Some(message),
        }
    }

    /// The passing value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Transform the passing value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidationResult<U> {
        match self {
            Self::Ok(value) => ValidationResult::Ok(f(value)),
            Self::Error(message) => ValidationResult::Error(message),
        }
    }

    /// Feed the passing value into another validation step.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ValidationResult<U>) -> ValidationResult<U> {
        match self {
            Self::Ok(value) => f(value),
            Self::Error(message) => ValidationResult::Error(message),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        self.into()
    }
}

impl<T> From<Result<T, String>> for ValidationResult<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(message) => Self::Error(message),
        }
    }
}

impl<T> From<ValidationResult<T>> for Result<T, String> {
    fn from(result: ValidationResult<T>) -> Self {
        match result {
            ValidationResult::Ok(value) => Ok(value),
            ValidationResult::Error(message) => Err(message),
        }
    }
}

/// A failed binding, as reported by `Binder::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// `Field::field_id` of the field that failed.
    pub field_id: String,
    /// First failing validator's message.
    pub message: String,
}

impl ValidationError {
    pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: message.into(),
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_id, self.message)
    }
}

/// Non-empty set of validation errors carried by `BinderError::Validation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Get the first validation error.
    pub fn first(&self) -> Option<&ValidationError> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
