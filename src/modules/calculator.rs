//! Calculator module
//!
//! Four arithmetic operations over `f64`. Only division can fail.

use crate::error::{OperationError, RegistryError};
use crate::plugins::{
    Callable, Module, ModuleDescriptor, OperationEntry, OperationRegistry, ParameterDef,
};

pub const NAME: &str = "Simple Calculator";

pub fn add_numbers(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract_numbers(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply_numbers(a: f64, b: f64) -> f64 {
    a * b
}

/// Fails on a zero divisor, including `-0.0`
pub fn divide_numbers(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b)
}

pub fn descriptor() -> ModuleDescriptor {
    ModuleDescriptor::new(NAME, "1.0.0")
        .with_description("Basic arithmetic operations for demonstration")
        .with_author("ld-agent Team")
        .with_platform("any")
        .with_runtime_requirement(">=1.75")
}

/// Build the calculator's descriptor and operation registry
pub fn init() -> Result<Module, RegistryError> {
    let registry = OperationRegistry::builder()
        .register(
            OperationEntry::new(
                "add_numbers",
                Callable::Binary(add_numbers),
                "Add two numbers together",
            )
            .with_parameters(vec![
                ParameterDef::number("a", "First number to add"),
                ParameterDef::number("b", "Second number to add"),
            ]),
        )
        .register(
            OperationEntry::new(
                "subtract_numbers",
                Callable::Binary(subtract_numbers),
                "Subtract the second number from the first",
            )
            .with_parameters(vec![
                ParameterDef::number("a", "Number to subtract from"),
                ParameterDef::number("b", "Number to subtract"),
            ]),
        )
        .register(
            OperationEntry::new(
                "multiply_numbers",
                Callable::Binary(multiply_numbers),
                "Multiply two numbers together",
            )
            .with_parameters(vec![
                ParameterDef::number("a", "First number to multiply"),
                ParameterDef::number("b", "Second number to multiply"),
            ]),
        )
        .register(
            OperationEntry::new(
                "divide_numbers",
                Callable::CheckedBinary(divide_numbers),
                "Divide the first number by the second",
            )
            .with_parameters(vec![
                ParameterDef::number("a", "Number to divide"),
                ParameterDef::number("b", "Number to divide by"),
            ]),
        )
        .build()?;

    Module::new(descriptor(), registry)
}
