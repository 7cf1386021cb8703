//! Field-to-property bindings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use log::{debug, trace};

use super::config::WritePolicy;
use super::{BeanSlot, Binder};
use crate::field::{Field, ListenerId, ValueChangeEvent};
use crate::state::State;
use crate::validation::{
    ValidationError, ValidationResult, Validator, ValidatorChain, from_predicate,
};

/// Read accessor from bean to property value.
type Getter<B, V> = Box<dyn Fn(&B) -> V + Send + Sync>;

/// Write accessor from property value into bean.
type Setter<B, V> = Arc<dyn Fn(&mut B, V) + Send + Sync>;

/// A validated write waiting to be applied to a bean.
pub(crate) type PendingWrite<B> = Box<dyn FnOnce(&mut B) + Send>;

/// Type-erased binding operations used by [`Binder`].
pub(crate) trait AnyBinding<B>: Send + Sync {
    /// Push the property value of `bean` into the field.
    fn read_from(&self, bean: &State<B>);

    /// Write the field's current value into `bean`, unvalidated.
    fn write_to(&self, bean: &State<B>);

    /// Validate the live field value and update the field's error state.
    ///
    /// On success returns the write to apply, or `None` for a read-only
    /// binding.
    fn prepare_write(&self) -> Result<Option<PendingWrite<B>>, ValidationError>;
}

/// A field that has been handed to [`Binder::for_field`] but not bound yet.
///
/// Add validators, then finish with [`bind`](Self::bind) or
/// [`bind_read_only`](Self::bind_read_only). Both consume the builder, so a
/// binding can only be finalized once.
///
/// # Example
///
/// ```
/// use tether::binder::Binder;
/// use tether::field::TextField;
/// use tether::validation::rules;
///
/// #[derive(Default)]
/// struct Person {
///     email: String,
/// }
///
/// let binder = Binder::<Person>::new();
/// let email = TextField::new();
/// binder
///     .for_field(&email)
///     .with_validator(rules::email("Not an email"))
///     .bind(|p: &Person| p.email.clone(), |p: &mut Person, v| p.email = v);
/// ```
#[must_use = "a binding does nothing until `bind` is called"]
pub struct BindingBuilder<'a, B, F: Field> {
    binder: &'a Binder<B>,
    field: F,
    validators: ValidatorChain<F::Value>,
}

impl<'a, B, F> BindingBuilder<'a, B, F>
where
    B: Send + Sync + 'static,
    F: Field + 'static,
{
    pub(crate) fn new(binder: &'a Binder<B>, field: F) -> Self {
        Self {
            binder,
            field,
            validators: ValidatorChain::new(),
        }
    }

    /// Append a validator to this binding's chain.
    pub fn with_validator(mut self, validator: impl Validator<F::Value> + 'static) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append a validator that fails with `message` when `predicate` is false.
    pub fn with_predicate<P>(self, predicate: P, message: impl Into<String>) -> Self
    where
        P: Fn(&F::Value) -> bool + Send + Sync + 'static,
    {
        self.with_validator(from_predicate(predicate, message))
    }

    /// Finalize a read-write binding.
    ///
    /// Registers the binding with the binder and, if a bean is already bound,
    /// loads the property into the field straight away.
    pub fn bind<G, S>(self, getter: G, setter: S) -> Binding<B, F>
    where
        G: Fn(&B) -> F::Value + Send + Sync + 'static,
        S: Fn(&mut B, F::Value) + Send + Sync + 'static,
    {
        self.finish(Box::new(getter), Some(Arc::new(setter)))
    }

    /// Finalize a binding that never writes to the bean.
    pub fn bind_read_only<G>(self, getter: G) -> Binding<B, F>
    where
        G: Fn(&B) -> F::Value + Send + Sync + 'static,
    {
        self.finish(Box::new(getter), None)
    }

    fn finish(
        self,
        getter: Getter<B, F::Value>,
        setter: Option<Setter<B, F::Value>>,
    ) -> Binding<B, F> {
        let Self {
            binder,
            field,
            validators,
        } = self;

        let core = Arc::new_cyclic(|weak: &Weak<BindingCore<B, F>>| {
            let weak = weak.clone();
            let listener_id = field.add_value_change_listener(Arc::new(
                move |_: &ValueChangeEvent<F::Value>| {
                    if let Some(core) = weak.upgrade() {
                        core.on_value_change();
                    }
                },
            ));
            BindingCore {
                binder_name: binder.config().name,
                write_policy: binder.config().write_policy,
                bean: binder.bean_slot(),
                field,
                getter,
                setter,
                validators,
                reading: AtomicBool::new(false),
                listener_id,
            }
        });

        debug!(
            "{}: bound field {} ({} validators{})",
            core.binder_name,
            core.field.field_id(),
            core.validators.len(),
            if core.setter.is_none() { ", read-only" } else { "" }
        );

        binder.register(Arc::clone(&core) as Arc<dyn AnyBinding<B>>);
        if let Some(bean) = binder.bean() {
            core.read_from(&bean);
        }

        Binding { core }
    }
}

/// A finalized binding between a field and a bean property.
///
/// Handles are cheap to clone; the binder keeps its own.
pub struct Binding<B, F: Field> {
    core: Arc<BindingCore<B, F>>,
}

impl<B, F> Binding<B, F>
where
    B: Send + Sync + 'static,
    F: Field + 'static,
{
    /// The bound field.
    pub fn field(&self) -> &F {
        &self.core.field
    }

    /// Whether this binding was created without a setter.
    pub fn is_read_only(&self) -> bool {
        self.core.setter.is_none()
    }

    /// Run this binding's validators against the live field value and show
    /// or clear the field error accordingly.
    pub fn validate(&self) -> ValidationResult<F::Value> {
        self.core.run_validators()
    }
}

impl<B, F: Field> Clone for Binding<B, F> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<B, F: Field> std::fmt::Debug for Binding<B, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("field", &self.core.field.field_id())
            .field("validators", &self.core.validators.len())
            .field("read_only", &self.core.setter.is_none())
            .finish()
    }
}

struct BindingCore<B, F: Field> {
    binder_name: &'static str,
    write_policy: WritePolicy,
    /// The owning binder's current bean.
    bean: BeanSlot<B>,
    field: F,
    getter: Getter<B, F::Value>,
    setter: Option<Setter<B, F::Value>>,
    validators: ValidatorChain<F::Value>,
    /// Set while the read path pushes a bean value into the field. Changes
    /// made by other listeners during the push are replayed afterwards.
    reading: AtomicBool,
    listener_id: ListenerId,
}

impl<B, F> BindingCore<B, F>
where
    B: Send + Sync + 'static,
    F: Field + 'static,
{
    /// Validate the live field value and write it through. An earlier
    /// listener may already have replaced the value carried by the event.
    fn on_value_change(&self) {
        if self.reading.load(Ordering::SeqCst) {
            return;
        }

        let value = match self.validators.apply(self.field.value()) {
            ValidationResult::Ok(value) => value,
            ValidationResult::Error(message) => {
                debug!(
                    "{}: field {} rejected: {}",
                    self.binder_name,
                    self.field.field_id(),
                    message
                );
                self.field.set_error(Some(message));
                return;
            }
        };
        self.field.set_error(None);

        if self.write_policy == WritePolicy::Buffered {
            trace!("{}: buffered edit on {}", self.binder_name, self.field.field_id());
            return;
        }
        let Some(setter) = &self.setter else {
            return;
        };
        let bean = self.bean.read().ok().and_then(|slot| slot.clone());
        match bean {
            Some(bean) => bean.update(|b| setter(b, value)),
            None => trace!(
                "{}: no bean bound, edit on {} not written",
                self.binder_name,
                self.field.field_id()
            ),
        }
    }

    fn run_validators(&self) -> ValidationResult<F::Value> {
        let result = match self.field.input_error() {
            Some(message) => ValidationResult::Error(message),
            None => self.validators.apply(self.field.value()),
        };
        self.field.set_error(result.message().map(str::to_owned));
        result
    }
}

impl<B, F> AnyBinding<B> for BindingCore<B, F>
where
    B: Send + Sync + 'static,
    F: Field + 'static,
{
    fn read_from(&self, bean: &State<B>) {
        let value = bean.read(|b| (self.getter)(b));
        self.reading.store(true, Ordering::SeqCst);
        self.field.set_value(value.clone());
        self.reading.store(false, Ordering::SeqCst);
        self.field.set_error(None);

        // Another listener may have rewritten the value while it was loading.
        if self.field.value() != value {
            trace!(
                "{}: field {} changed during load",
                self.binder_name,
                self.field.field_id()
            );
            self.on_value_change();
        }
    }

    fn write_to(&self, bean: &State<B>) {
        if let Some(setter) = &self.setter {
            let value = self.field.value();
            bean.update(|b| setter(b, value));
        }
    }

    fn prepare_write(&self) -> Result<Option<PendingWrite<B>>, ValidationError> {
        match self.run_validators() {
            ValidationResult::Ok(value) => Ok(self.setter.as_ref().map(|setter| {
                let setter = Arc::clone(setter);
                Box::new(move |bean: &mut B| setter(bean, value)) as PendingWrite<B>
            })),
            ValidationResult::Error(message) => {
                Err(ValidationError::new(self.field.field_id(), message))
            }
        }
    }
}

impl<B, F: Field> Drop for BindingCore<B, F> {
    fn drop(&mut self) {
        self.field.remove_value_change_listener(self.listener_id);
    }
}
