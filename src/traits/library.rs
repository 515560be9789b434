use crate::errors::RegistryError;
use crate::registry::PassRegistry;

/// A module of pass types, the injected stand-in for a loadable pass plugin.
///
/// How the module gets into the process (statically linked, dynamically
/// loaded, generated) is the host's business; the engine only sees the
/// registration call.
pub trait PassLibrary {
    fn name(&self) -> &str;

    /// Register every pass type this library provides
    fn register_passes(&self, registry: &mut PassRegistry) -> Result<(), RegistryError>;
}
