//! Plugin contract for ld-agent modules
//!
//! A module exposes a descriptor and an ordered registry of operations.
//! Operations are plain functions referenced by `fn` pointer and invoked
//! either directly or through a uniform argument-list interface.

mod catalog;
mod descriptor;
mod module;
mod operation;
mod protocol;
mod registry;

pub use catalog::{builtin_names, ModuleCatalog, BUILTIN_MODULES};
pub use descriptor::{EnvVarSpec, ModuleDescriptor};
pub use module::Module;
pub use operation::{BinaryFn, Callable, CheckedBinaryFn, OperationEntry, TextFn};
pub use protocol::{
    InvocationRequest, InvocationResponse, ParameterDef, Signature, ToolDefinition, Value,
    ValueType,
};
pub use registry::{OperationRegistry, RegistryBuilder};
