//! Shared definitions for the instruction set: opcodes, registers, I/O
//! registers, the 48-bit instruction encoding, and fixed-size memories.
//! Used by both the assembler and the simulator.

pub mod constants;
pub mod image;
pub mod instruction;
pub mod ioreg;
pub mod memory;
pub mod opcode;
pub mod register;

pub use instruction::Instruction;
pub use ioreg::{IoReg, IoRegisterFile};
pub use opcode::Opcode;
pub use register::{RegisterFile, RegisterId};
