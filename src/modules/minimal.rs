//! Minimal module: a single greeting

use crate::error::RegistryError;
use crate::plugins::{Callable, Module, ModuleDescriptor, OperationEntry, OperationRegistry};

pub const NAME: &str = "Minimal Example";

pub const GREETING: &str = "Hello from ld-agent!";

pub fn hello_world() -> String {
    GREETING.to_string()
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new(NAME, "1.0.0").with_description("The simplest possible ld-agent plugin")
}

pub fn init() -> Result<Module, RegistryError> {
    let registry = OperationRegistry::builder()
        .register(OperationEntry::new(
            "hello_world",
            Callable::Text(hello_world),
            "Returns a simple greeting",
        ))
        .build()?;

    Module::new(descriptor(), registry)
}
