//! Example modules shipped with the crate

pub mod calculator;
pub mod minimal;
