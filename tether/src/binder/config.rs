//! Binder configuration types.

/// Per-binder configuration.
#[derive(Debug, Clone)]
pub struct BinderConfig {
    /// Name used to identify this binder in log output.
    pub name: &'static str,

    /// When valid field edits reach the bound bean.
    pub write_policy: WritePolicy,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            name: "Binder",
            write_policy: WritePolicy::Immediate,
        }
    }
}

impl BinderConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the write policy.
    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Only persist edits through `save` / `save_if_valid`.
    pub fn buffered(mut self) -> Self {
        self.write_policy = WritePolicy::Buffered;
        self
    }
}

/// When a binding writes a valid field edit to the bound bean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Write through the setter on every valid change.
    #[default]
    Immediate,

    /// Validate and display errors on change, but leave the bean alone
    /// until the application saves explicitly.
    Buffered,
}
