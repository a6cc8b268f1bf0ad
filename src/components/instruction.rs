//! Side effects bundled around an action.

use std::fmt;
use std::sync::Arc;

use crate::host::HostError;

/// Behaviour run when an action starts, while it tracks input, and when it ends.
///
/// Every hook defaults to doing nothing.
pub trait Instruction: Send + Sync {
    /// Runs on key press.
    fn enter(&self) -> Result<(), HostError> {
        Ok(())
    }

    /// Runs after a tracker changed the controlled value.
    fn update(&self) -> Result<(), HostError> {
        Ok(())
    }

    /// Runs on every key release.
    fn exit(&self) -> Result<(), HostError> {
        Ok(())
    }
}

/// Ordered list of instructions owned by one action.
///
/// Cloning is cheap; clones share the same instructions, which lets tracking
/// workers call [`InstructionHolder::update`].
#[derive(Clone, Default)]
pub struct InstructionHolder {
    instructions: Arc<Vec<Box<dyn Instruction>>>,
}

impl fmt::Debug for InstructionHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionHolder")
            .field("len", &self.instructions.len())
            .finish()
    }
}

impl InstructionHolder {
    pub fn new(instructions: Vec<Box<dyn Instruction>>) -> Self {
        Self {
            instructions: Arc::new(instructions),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Runs `enter` of every instruction in order, stopping at the first failure.
    pub fn enter(&self) -> Result<(), HostError> {
        self.instructions.iter().try_for_each(|i| i.enter())
    }

    /// Runs `update` of every instruction in order, stopping at the first failure.
    pub fn update(&self) -> Result<(), HostError> {
        self.instructions.iter().try_for_each(|i| i.update())
    }

    /// Runs `exit` of every instruction, even after a failure, and reports the
    /// first error.
    pub fn exit(&self) -> Result<(), HostError> {
        let mut first_error = None;
        for instruction in self.instructions.iter() {
            if let Err(err) = instruction.exit() {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl From<Vec<Box<dyn Instruction>>> for InstructionHolder {
    fn from(instructions: Vec<Box<dyn Instruction>>) -> Self {
        Self::new(instructions)
    }
}
