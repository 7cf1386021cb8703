//! Validators and validation outcomes.
//!
//! A [`Validator`] turns a candidate value into a [`ValidationResult`]. A
//! binding runs its validators in the order they were added and surfaces
//! only the first failure, both on the field and as a [`ValidationError`].
//!
//! # Example
//!
//! ```
//! use tether::validation::{Validator, ValidationResult, from_predicate, rules};
//!
//! let not_bob = from_predicate(|v: &String| v != "bob", "No bobs");
//! assert!(not_bob.apply("alice".to_string()).is_ok());
//! assert_eq!(not_bob.apply("bob".to_string()).message(), Some("No bobs"));
//!
//! let required = rules::required("Name is required");
//! assert_eq!(
//!     required.apply("  ".to_string()),
//!     ValidationResult::Error("Name is required".into())
//! );
//! ```

mod result;
pub mod rules;
mod validator;

pub use result::{ValidationError, ValidationErrors, ValidationResult};
pub use validator::{AlwaysPass, Predicate, Validator, ValidatorChain, always_pass, from_predicate};
