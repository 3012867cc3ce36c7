//! Pull interface between the trace reader and dispatch.

use std::collections::VecDeque;

use super::instruction::Instruction;

/// Supplies decoded instructions in program order.
///
/// Dispatch pulls at most one instruction per admission attempt. Returning
/// `None` signals end of trace; the simulator never pulls again after that.
pub trait InstructionSource {
    /// Returns the next instruction, or `None` once the trace is exhausted.
    fn next_instruction(&mut self) -> Option<Instruction>;
}

impl InstructionSource for std::vec::IntoIter<Instruction> {
    fn next_instruction(&mut self) -> Option<Instruction> {
        self.next()
    }
}

impl InstructionSource for VecDeque<Instruction> {
    fn next_instruction(&mut self) -> Option<Instruction> {
        self.pop_front()
    }
}

impl<S: InstructionSource + ?Sized> InstructionSource for &mut S {
    fn next_instruction(&mut self) -> Option<Instruction> {
        (**self).next_instruction()
    }
}

impl<S: InstructionSource + ?Sized> InstructionSource for Box<S> {
    fn next_instruction(&mut self) -> Option<Instruction> {
        (**self).next_instruction()
    }
}
