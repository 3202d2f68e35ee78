//! Name-to-builtin lookup table
//!
//! A registry is assembled once in a fixed order and then only read, so a
//! shared `&Registry` can be consulted from any number of threads.

use crate::adapter::Builtin;
use crate::error::RegistryError;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Registry {
    builtins: Vec<Builtin>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register(&mut self, builtin: Builtin) -> Result<(), RegistryError> {
        if builtin.name().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(builtin.name()) {
            return Err(RegistryError::Duplicate(builtin.name().to_string()));
        }
        self.index
            .insert(builtin.name().to_string(), self.builtins.len());
        self.builtins.push(builtin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.index.get(name).map(|&idx| &self.builtins[idx])
    }

    /// Builtin names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builtins.iter().map(Builtin::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Builtin> {
        self.builtins.iter()
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry
            .register(Builtin::raw("b", |_, _| Signal::Ok))
            .unwrap();
        registry
            .register(Builtin::raw("a", |_, _| Signal::Ok))
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(registry.get("a").is_some());
        assert!(registry.get("c").is_none());
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register(Builtin::raw("x", |_, _| Signal::Ok))
            .unwrap();
        let err = registry
            .register(Builtin::raw("x", |_, _| Signal::Ok))
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("x".to_string()));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = Registry::new();
        let err = registry
            .register(Builtin::raw("", |_, _| Signal::Ok))
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyName);
    }
}
