//! Descriptor Value Object
//!
//! Builders and visitors are configured with a descriptor that is one of:
//! - a bare type name (`"Concat"`)
//! - a type name plus a config table (`{ type = "Hash", config = { ... } }`)
//! - an already-constructed instance (programmatic use)
//!
//! A descriptor is resolved through a type registry at most once; the
//! resulting instance is memoized on the descriptor itself, so every holder
//! of the same descriptor shares one instance.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

/// What a descriptor says about the object to create
pub enum DescriptorSpec<T: ?Sized> {
    /// Ready-made instance
    Instance(Rc<T>),
    /// Registered type name, default config
    Named(String),
    /// Registered type name with its config table
    Typed {
        type_name: String,
        config: toml::Value,
    },
}

/// A configuration descriptor with its memoized instance
pub struct Descriptor<T: ?Sized> {
    spec: DescriptorSpec<T>,
    instance: OnceCell<Rc<T>>,
}

impl<T: ?Sized> Descriptor<T> {
    /// Descriptor naming a registered type
    pub fn named(type_name: impl Into<String>) -> Self {
        Self::from_spec(DescriptorSpec::Named(type_name.into()))
    }

    /// Descriptor naming a registered type with a config table
    pub fn typed(type_name: impl Into<String>, config: toml::Value) -> Self {
        Self::from_spec(DescriptorSpec::Typed {
            type_name: type_name.into(),
            config,
        })
    }

    /// Descriptor wrapping an existing instance
    pub fn instance(instance: Rc<T>) -> Self {
        Self::from_spec(DescriptorSpec::Instance(instance))
    }

    fn from_spec(spec: DescriptorSpec<T>) -> Self {
        Self {
            spec,
            instance: OnceCell::new(),
        }
    }

    /// The unresolved description
    pub fn spec(&self) -> &DescriptorSpec<T> {
        &self.spec
    }

    /// Type name, if the descriptor names one
    pub fn type_name(&self) -> Option<&str> {
        match &self.spec {
            DescriptorSpec::Instance(_) => None,
            DescriptorSpec::Named(name) | DescriptorSpec::Typed { type_name: name, .. } => {
                Some(name)
            }
        }
    }

    /// Instance created by an earlier resolution
    pub fn resolved(&self) -> Option<Rc<T>> {
        self.instance.get().cloned()
    }

    /// Remember the resolved instance; the first one stored wins
    pub fn memoize(&self, instance: Rc<T>) -> Rc<T> {
        self.instance.get_or_init(|| instance).clone()
    }
}

impl<T: ?Sized> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Descriptor");
        match &self.spec {
            DescriptorSpec::Instance(_) => s.field("spec", &"<instance>"),
            DescriptorSpec::Named(name) => s.field("type", name),
            DescriptorSpec::Typed { type_name, config } => {
                s.field("type", type_name).field("config", config)
            }
        };
        s.field("resolved", &self.instance.get().is_some()).finish()
    }
}
