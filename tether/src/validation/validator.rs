//! The validator abstraction and the chain a binding runs.

use std::marker::PhantomData;

use super::result::ValidationResult;

/// A pure check on a candidate value.
///
/// Validators must not keep mutable state: the binder may call them any
/// number of times, for the same value, from whichever thread drives the
/// field. Any `Fn(T) -> ValidationResult<T>` closure is a validator.
pub trait Validator<T>: Send + Sync {
    /// Check `value`, returning it (possibly transformed) or a message.
    fn apply(&self, value: T) -> ValidationResult<T>;
}

impl<T, F> Validator<T> for F
where
    F: Fn(T) -> ValidationResult<T> + Send + Sync,
{
    fn apply(&self, value: T) -> ValidationResult<T> {
        self(value)
    }
}

/// Validator that accepts everything unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPass;

impl<T> Validator<T> for AlwaysPass {
    fn apply(&self, value: T) -> ValidationResult<T> {
        ValidationResult::Ok(value)
    }
}

/// Validator that accepts everything unchanged.
pub fn always_pass() -> AlwaysPass {
    AlwaysPass
}

/// Validator built from a predicate and a fixed failure message.
pub struct Predicate<T, P> {
    predicate: P,
    message: String,
    _value: PhantomData<fn(&T)>,
}

impl<T, P> Validator<T> for Predicate<T, P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    fn apply(&self, value: T) -> ValidationResult<T> {
        if (self.predicate)(&value) {
            ValidationResult::Ok(value)
        } else {
            ValidationResult::Error(self.message.clone())
        }
    }
}

impl<T, P> std::fmt::Debug for Predicate<T, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Validator that fails with `message` whenever `predicate` returns false.
pub fn from_predicate<T, P>(predicate: P, message: impl Into<String>) -> Predicate<T, P>
where
    P: Fn(&T) -> bool + Send + Sync,
{
    Predicate {
        predicate,
        message: message.into(),
        _value: PhantomData,
    }
}

/// Ordered validators, run first to last.
///
/// Each validator receives the value produced by the one before it, and the
/// first failure stops the chain.
pub struct ValidatorChain<T> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T> ValidatorChain<T> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator to the end of the chain.
    pub fn push(&mut self, validator: impl Validator<T> + 'static) {
        self.validators.push(Box::new(validator));
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T> Validator<T> for ValidatorChain<T> {
    fn apply(&self, value: T) -> ValidationResult<T> {
        self.validators
            .iter()
            .try_fold(value, |value, validator| validator.apply(value).into_result())
            .into()
    }
}

impl<T> Default for ValidatorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ValidatorChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("len", &self.validators.len())
            .finish()
    }
}
