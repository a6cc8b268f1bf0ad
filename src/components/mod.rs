//! Building blocks composed into actions.
//!
//! - [`Controller`]: get/set access to one host property
//! - [`Instruction`]: side effects run on press, while tracking and on release
//! - [`ValueSource`]: ordered domains re-read on every press

pub mod controller;
pub mod controllers;
pub mod instruction;
pub mod instructions;
pub mod sources;

pub use controller::{ControlledValue, Controller};
pub use instruction::{Instruction, InstructionHolder};
pub use sources::{CurrentLayerStack, PickStrategy, Tag, ValueSource};

#[cfg(test)]
mod tests;
