//! Field binding and validation for server-side UI components.
//!
//! `tether` connects UI fields to properties of application beans: values
//! flow from the bean into the field when a bean is bound or loaded, and
//! valid edits flow back through a setter. Validators run on every change
//! and on demand, and the first failing message is shown on the field.

pub mod binder;
pub mod error;
pub mod field;
pub mod state;
pub mod validation;

pub use binder::{Binder, BinderConfig, Binding, BindingBuilder, WritePolicy};
pub use error::BinderError;
pub use state::State;

pub mod prelude {
    pub use crate::binder::{Binder, BinderConfig, Binding, BindingBuilder, WritePolicy};
    pub use crate::error::BinderError;
    pub use crate::field::{Checkbox, ErrorDisplay, Field, NumberField, TextField};
    pub use crate::state::State;
    pub use crate::validation::{
        ValidationError, ValidationResult, Validator, always_pass, from_predicate, rules,
    };
}
