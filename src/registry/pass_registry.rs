// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pass type registration and pass instance creation.
//!
//! The registry maps a pass type name to the [`PassFactory`] that builds it.
//! Factories arrive either one at a time through [`PassRegistry::register`]
//! or a module at a time through [`PassRegistry::load_library`]; either way
//! the registry is handed its factories, it never goes looking for them.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::RegistryError;
use crate::graph::{ParameterSchema, Parameters, PassInstance};
use crate::observability::messages::registry::{
    PassCreationFailed, PassLibraryLoaded, PassTypeRegistered,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{PassFactory, PassLibrary};

/// Summary of a registered pass type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassInfo {
    pub type_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Library the type was loaded from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
}

struct Registration {
    factory: Arc<dyn PassFactory>,
    library: Option<String>,
}

#[derive(Default)]
pub struct PassRegistry {
    factories: HashMap<String, Registration>,
    order: Vec<String>,
    libraries: Vec<String>,
    /// Set while a library registers into a scratch registry
    staging: bool,
}

impl PassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with one library.
    pub fn with_library(library: &dyn PassLibrary) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.load_library(library)?;
        Ok(registry)
    }

    /// Register a factory under `type_name`.
    ///
    /// Fails with [`RegistryError::DuplicateType`] if the name is taken; the
    /// existing registration is kept.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        factory: impl PassFactory + 'static,
    ) -> Result<(), RegistryError> {
        self.register_shared(type_name, Arc::new(factory))
    }

    pub fn register_shared(
        &mut self,
        type_name: impl Into<String>,
        factory: Arc<dyn PassFactory>,
    ) -> Result<(), RegistryError> {
        self.insert(type_name.into(), factory, None)
    }

    /// Register every pass type of `library`.
    ///
    /// Loading is all-or-nothing: if the library fails, or declares a type
    /// that is already registered, nothing from it is kept. Returns the
    /// number of pass types added.
    pub fn load_library(&mut self, library: &dyn PassLibrary) -> Result<usize, RegistryError> {
        let mut scratch = PassRegistry {
            staging: true,
            ..Default::default()
        };
        library.register_passes(&mut scratch)?;

        if let Some(duplicate) = scratch.order.iter().find(|name| self.contains(name)) {
            return Err(RegistryError::DuplicateType {
                type_name: duplicate.clone(),
            });
        }

        let added = scratch.order.len();
        for type_name in scratch.order {
            if let Some(registration) = scratch.factories.remove(&type_name) {
                self.insert(
                    type_name,
                    registration.factory,
                    Some(library.name().to_string()),
                )?;
            }
        }
        self.libraries.push(library.name().to_string());

        PassLibraryLoaded {
            library: library.name(),
            pass_count: added,
        }
        .log();

        Ok(added)
    }

    /// Create a pass instance of `type_name` configured with `params`.
    ///
    /// Parameters are checked against the type's schema and completed with
    /// its defaults before the factory sees them. Every call builds a fresh
    /// body; instances never share state.
    pub fn create(&self, type_name: &str, params: &Parameters) -> Result<PassInstance, RegistryError> {
        let result = self.build_instance(type_name, params);
        if let Err(error) = &result {
            PassCreationFailed {
                type_name,
                error,
            }
            .log();
        }
        result
    }

    fn build_instance(&self, type_name: &str, params: &Parameters) -> Result<PassInstance, RegistryError> {
        let registration = self
            .factories
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        let factory = &registration.factory;

        let resolved = factory.schema().resolve(type_name, params)?;
        let ports = factory.reflect(&resolved);
        let body = factory.instantiate(type_name, &resolved);

        Ok(PassInstance::from_parts(
            type_name,
            resolved,
            ports,
            factory.priority(),
            body,
        ))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names in registration order
    pub fn type_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn info(&self, type_name: &str) -> Option<PassInfo> {
        self.factories.get(type_name).map(|registration| PassInfo {
            type_name: type_name.to_string(),
            description: registration.factory.description().to_string(),
            priority: registration.factory.priority(),
            library: registration.library.clone(),
        })
    }

    pub fn schema(&self, type_name: &str) -> Option<&ParameterSchema> {
        self.factories
            .get(type_name)
            .map(|registration| registration.factory.schema())
    }

    /// Names of the libraries loaded so far, in load order
    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    fn insert(
        &mut self,
        type_name: String,
        factory: Arc<dyn PassFactory>,
        library: Option<String>,
    ) -> Result<(), RegistryError> {
        if self.factories.contains_key(&type_name) {
            return Err(RegistryError::DuplicateType { type_name });
        }

        self.factories
            .insert(type_name.clone(), Registration { factory, library });
        self.order.push(type_name);

        if !self.staging {
            if let Some(type_name) = self.order.last() {
                PassTypeRegistered {
                    type_name,
                    registered_count: self.factories.len(),
                }
                .log();
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for PassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassRegistry")
            .field("types", &self.order)
            .field("libraries", &self.libraries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ParamKind, ParamSpec, Port};
    use crate::library::PassDescriptor;

    fn blur() -> PassDescriptor {
        PassDescriptor::new("Separable blur")
            .port(Port::input("src"))
            .port(Port::output("dst"))
            .param(ParamSpec::optional("radius", ParamKind::Int, 4))
    }

    struct TwoPassLibrary {
        name: &'static str,
        types: [&'static str; 2],
    }

    impl PassLibrary for TwoPassLibrary {
        fn name(&self) -> &str {
            self.name
        }

        fn register_passes(&self, registry: &mut PassRegistry) -> Result<(), RegistryError> {
            for type_name in self.types {
                registry.register(type_name, blur())?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_register_rejects_duplicate_type() {
        let mut registry = PassRegistry::new();
        registry.register("Blur", blur()).unwrap();

        let result = registry.register("Blur", blur());
        assert_eq!(
            result,
            Err(RegistryError::DuplicateType {
                type_name: "Blur".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_create_unknown_type() {
        let registry = PassRegistry::new();
        let result = registry.create("PathTracer", &Parameters::new());
        assert!(matches!(
            result,
            Err(RegistryError::UnknownType { type_name }) if type_name == "PathTracer"
        ));
    }

    #[test]
    fn test_create_resolves_parameters_and_ports() {
        let mut registry = PassRegistry::new();
        registry.register("Blur", blur()).unwrap();

        let instance = registry.create("Blur", &Parameters::new()).unwrap();
        assert_eq!(instance.name(), "Blur");
        assert_eq!(instance.type_name(), "Blur");
        assert_eq!(instance.parameters().get_int("radius"), Some(4));
        assert!(instance.input("src").is_some());
        assert!(instance.output("dst").is_some());

        let result = registry.create("Blur", &Parameters::new().with("radius", "wide"));
        assert!(matches!(
            result,
            Err(RegistryError::InvalidParameter { key, .. }) if key == "radius"
        ));
    }

    #[test]
    fn test_created_instances_do_not_alias() {
        let mut registry = PassRegistry::new();
        registry.register("Blur", blur()).unwrap();

        let first = registry.create("Blur", &Parameters::new()).unwrap();
        let second = registry.create("Blur", &Parameters::new()).unwrap();
        assert!(!Arc::ptr_eq(first.body(), second.body()));
    }

    #[test]
    fn test_load_library() {
        let mut registry = PassRegistry::new();
        let added = registry
            .load_library(&TwoPassLibrary { name: "blurs", types: ["BoxBlur", "GaussianBlur"] })
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(registry.type_names(), vec!["BoxBlur", "GaussianBlur"]);
        assert_eq!(registry.libraries(), &["blurs".to_string()]);

        let info = registry.info("BoxBlur").unwrap();
        assert_eq!(info.description, "Separable blur");
        assert_eq!(info.library.as_deref(), Some("blurs"));
    }

    #[test]
    fn test_load_library_is_all_or_nothing() {
        let mut registry = PassRegistry::new();
        registry.register("GaussianBlur", blur()).unwrap();

        let result = registry.load_library(&TwoPassLibrary { name: "blurs", types: ["BoxBlur", "GaussianBlur"] });
        assert_eq!(
            result,
            Err(RegistryError::DuplicateType {
                type_name: "GaussianBlur".to_string()
            })
        );
        assert!(!registry.contains("BoxBlur"));
        assert!(registry.libraries().is_empty());
    }

    #[test]
    fn test_library_with_internal_duplicate_fails() {
        let mut registry = PassRegistry::new();
        let result = registry.load_library(&TwoPassLibrary { name: "twice", types: ["Blur", "Blur"] });
        assert!(matches!(result, Err(RegistryError::DuplicateType { .. })));
        assert!(registry.is_empty());
    }
}
