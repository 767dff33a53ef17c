//! Type registry
//!
//! Maps type names used in configuration (`"Concat"`, `"Hash"`...) to
//! constructors, and resolves descriptors into shared instances. A
//! descriptor is resolved once: the instance is memoized on it.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;

use crate::domain::value_objects::{Descriptor, DescriptorSpec};
use crate::error::{PackError, PackResult};

/// Constructor taking the descriptor's config table
pub type Constructor<T> = Box<dyn Fn(&toml::Value) -> PackResult<Rc<T>>>;

/// Registry of constructors for one kind of object (builders, visitors)
pub struct TypeRegistry<T: ?Sized> {
    kind: &'static str,
    constructors: BTreeMap<String, Constructor<T>>,
}

impl<T: ?Sized> TypeRegistry<T> {
    /// Create an empty registry; `kind` names the objects in errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: BTreeMap::new(),
        }
    }

    /// Register (or replace) a constructor
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&toml::Value) -> PackResult<Rc<T>> + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Resolve a descriptor, constructing its instance on first use
    pub fn create(&self, descriptor: &Descriptor<T>) -> PackResult<Rc<T>> {
        if let Some(instance) = descriptor.resolved() {
            return Ok(instance);
        }

        let instance = match descriptor.spec() {
            DescriptorSpec::Instance(instance) => Rc::clone(instance),
            DescriptorSpec::Named(name) => self.construct(name, &empty_config())?,
            DescriptorSpec::Typed { type_name, config } => self.construct(type_name, config)?,
        };

        Ok(descriptor.memoize(instance))
    }

    fn construct(&self, name: &str, config: &toml::Value) -> PackResult<Rc<T>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| PackError::UnknownType {
                kind: self.kind,
                name: name.to_string(),
            })?;
        constructor(config)
    }
}

impl<T: ?Sized> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("kind", &self.kind)
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Config table used for bare type names
pub fn empty_config() -> toml::Value {
    toml::Value::Table(toml::value::Table::new())
}

/// Deserialize a descriptor's config table into a typed config struct
pub fn parse_config<C: DeserializeOwned>(name: &str, config: &toml::Value) -> PackResult<C> {
    config
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| PackError::InvalidConfig {
            name: name.to_string(),
            message: e.message().to_string(),
        })
}
