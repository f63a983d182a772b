//! A loaded module: descriptor plus operation registry

use super::descriptor::ModuleDescriptor;
use super::registry::OperationRegistry;
use crate::error::RegistryError;

/// Everything a module exposes to a host
#[derive(Debug, Clone)]
pub struct Module {
    descriptor: ModuleDescriptor,
    registry: OperationRegistry,
}

impl Module {
    /// Pair a descriptor with its operations, validating the descriptor
    pub fn new(
        descriptor: ModuleDescriptor,
        registry: OperationRegistry,
    ) -> Result<Self, RegistryError> {
        descriptor.validate()?;
        Ok(Self {
            descriptor,
            registry,
        })
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}
