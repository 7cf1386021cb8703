//! Two-way binding between fields and bean properties.
//!
//! A [`Binder`] owns a set of bindings and, optionally, the bean they are
//! currently bound to. Each binding connects one [`Field`] to a getter/setter
//! pair over the bean and runs a validator chain whenever the field changes.
//!
//! - [`Binder::bind`] attaches a bean and loads every field from it.
//! - Valid field edits are written back through the setter (see
//!   [`WritePolicy`]); invalid ones leave the bean untouched and show the
//!   first failing message on the field.
//! - [`Binder::save`] and [`Binder::load`] copy values to or from any bean
//!   without changing which bean is bound.
//! - [`Binder::validate`] re-checks every field and reports at most one
//!   [`ValidationError`] per binding.
//!
//! Everything runs synchronously on the caller's thread. A binder and its
//! fields must not be driven from two threads at once.
//!
//! # Example
//!
//! ```
//! use tether::binder::Binder;
//! use tether::field::{Field, TextField};
//! use tether::state::State;
//!
//! #[derive(Default)]
//! struct Person {
//!     first_name: String,
//! }
//!
//! let binder = Binder::<Person>::new();
//! let name = TextField::new();
//! binder.bind_field(
//!     &name,
//!     |p: &Person| p.first_name.clone(),
//!     |p: &mut Person, v| p.first_name = v,
//! );
//!
//! let person = State::new(Person { first_name: "Johannes".into() });
//! binder.bind(&person);
//! assert_eq!(name.value(), "Johannes");
//!
//! name.set_value("Henri".to_string());
//! assert_eq!(person.read(|p| p.first_name.clone()), "Henri");
//! ```

mod binding;
mod config;

use std::sync::{Arc, RwLock};

use log::debug;

pub use binding::{Binding, BindingBuilder};
pub use config::{BinderConfig, WritePolicy};

use self::binding::AnyBinding;
use crate::error::BinderError;
use crate::field::Field;
use crate::state::State;
use crate::validation::{ValidationError, ValidationErrors};

/// Slot holding the bean a binder is currently bound to.
pub(crate) type BeanSlot<B> = Arc<RwLock<Option<State<B>>>>;

/// Connects fields to the properties of a bean of type `B`.
///
/// `Binder` is a cheap-clone handle; clones share bindings and the bound
/// bean.
pub struct Binder<B> {
    config: Arc<BinderConfig>,
    bean: BeanSlot<B>,
    bindings: Arc<RwLock<Vec<Arc<dyn AnyBinding<B>>>>>,
}

impl<B> Binder<B>
where
    B: Send + Sync + 'static,
{
    /// Create an empty, unbound binder.
    pub fn new() -> Self {
        Self::with_config(BinderConfig::default())
    }

    /// Create an empty, unbound binder with the given configuration.
    pub fn with_config(config: BinderConfig) -> Self {
        Self {
            config: Arc::new(config),
            bean: Arc::new(RwLock::new(None)),
            bindings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// The configuration this binder was created with.
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Binding setup
    // -------------------------------------------------------------------------

    /// Start a binding for `field`.
    ///
    /// The returned builder has no accessors and no validators; nothing is
    /// registered until it is finalized.
    pub fn for_field<F>(&self, field: &F) -> BindingBuilder<'_, B, F>
    where
        F: Field + Clone + 'static,
    {
        BindingBuilder::new(self, field.clone())
    }

    /// Shortcut for `for_field(field).bind(getter, setter)`.
    pub fn bind_field<F, G, S>(&self, field: &F, getter: G, setter: S) -> Binding<B, F>
    where
        F: Field + Clone + 'static,
        G: Fn(&B) -> F::Value + Send + Sync + 'static,
        S: Fn(&mut B, F::Value) + Send + Sync + 'static,
    {
        self.for_field(field).bind(getter, setter)
    }

    /// Shortcut for `for_field(field).bind_read_only(getter)`.
    pub fn bind_field_read_only<F, G>(&self, field: &F, getter: G) -> Binding<B, F>
    where
        F: Field + Clone + 'static,
        G: Fn(&B) -> F::Value + Send + Sync + 'static,
    {
        self.for_field(field).bind_read_only(getter)
    }

    // -------------------------------------------------------------------------
    // Bean lifecycle
    // -------------------------------------------------------------------------

    /// Bind `bean`, replacing any previous one, and load every field from it.
    pub fn bind(&self, bean: &State<B>) {
        if let Ok(mut slot) = self.bean.write() {
            *slot = Some(bean.clone());
        }
        debug!("{}: bean bound", self.config.name);
        self.read_all(bean);
    }

    /// Forget the bound bean. Field values are left as they are.
    pub fn unbind(&self) {
        let previous = self.bean.write().ok().and_then(|mut slot| slot.take());
        if previous.is_some() {
            debug!("{}: bean unbound", self.config.name);
        }
    }

    /// The bound bean, if any.
    pub fn bean(&self) -> Option<State<B>> {
        self.bean.read().ok().and_then(|slot| slot.clone())
    }

    /// Reload every field from the bound bean.
    pub fn reload(&self) -> Result<(), BinderError> {
        let bean = self.bean().ok_or(BinderError::NotBound(self.config.name))?;
        self.read_all(&bean);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Explicit load / save
    // -------------------------------------------------------------------------

    /// Load every field from `bean` without binding it.
    pub fn load(&self, bean: &State<B>) {
        debug!("{}: loading fields", self.config.name);
        self.read_all(bean);
    }

    /// Write every writable field's current value into `bean`.
    ///
    /// Values are written as displayed, without validation. The bound bean
    /// (if any) is not affected unless it is `bean`.
    pub fn save(&self, bean: &State<B>) {
        let bindings = self.snapshot();
        debug!("{}: saving {} bindings", self.config.name, bindings.len());
        for binding in bindings {
            binding.write_to(bean);
        }
    }

    /// Validate every binding and, only if all pass, write the validated
    /// values into `bean`.
    pub fn save_if_valid(&self, bean: &State<B>) -> Result<(), BinderError> {
        let mut writes = Vec::new();
        let mut errors = Vec::new();
        for binding in self.snapshot() {
            match binding.prepare_write() {
                Ok(Some(write)) => writes.push(write),
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
        }

        if !errors.is_empty() {
            debug!(
                "{}: save rejected, {} invalid fields",
                self.config.name,
                errors.len()
            );
            return Err(BinderError::Validation(ValidationErrors(errors)));
        }
        if !writes.is_empty() {
            bean.update(|b| {
                for write in writes {
                    write(b);
                }
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate every binding against its field's live value.
    ///
    /// Returns one error per failing binding, in registration order. Fields
    /// that fail show their message; fields that pass have their error
    /// cleared.
    pub fn validate(&self) -> Vec<ValidationError> {
        let errors: Vec<ValidationError> = self
            .snapshot()
            .iter()
            .filter_map(|binding| binding.prepare_write().err())
            .collect();
        debug!(
            "{}: validation finished with {} errors",
            self.config.name,
            errors.len()
        );
        errors
    }

    /// Whether every binding currently validates.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Whether no bindings are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    pub(crate) fn bean_slot(&self) -> BeanSlot<B> {
        Arc::clone(&self.bean)
    }

    pub(crate) fn register(&self, binding: Arc<dyn AnyBinding<B>>) {
        if let Ok(mut guard) = self.bindings.write() {
            guard.push(binding);
        }
    }

    /// Copy of the binding list, so no lock is held while fields notify.
    fn snapshot(&self) -> Vec<Arc<dyn AnyBinding<B>>> {
        self.bindings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn read_all(&self, bean: &State<B>) {
        for binding in self.snapshot() {
            binding.read_from(bean);
        }
    }
}

impl<B> Clone for Binder<B> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            bean: Arc::clone(&self.bean),
            bindings: Arc::clone(&self.bindings),
        }
    }
}

impl<B> Default for Binder<B>
where
    B: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B> std::fmt::Debug for Binder<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("name", &self.config.name)
            .field(
                "bound",
                &self.bean.read().map(|slot| slot.is_some()).unwrap_or(false),
            )
            .field(
                "bindings",
                &self.bindings.read().map(|guard| guard.len()).unwrap_or(0),
            )
            .finish()
    }
}
