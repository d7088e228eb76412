//! CPU execution unit (C8): arithmetic/logic/branch/memory/IO opcode
//! semantics and PC update, as a free function over borrowed state —
//! mirrors the teacher's `tick(registers, storage, instruction, pc)` shape.

use std::num::Wrapping;

use isa::instruction::Instruction;
use isa::ioreg::{io_register_from_index, IoReg, IoRegisterFile};
use isa::memory::DataMemory;
use isa::opcode::Opcode;
use isa::register::RegisterFile;

/// What the instruction just executed did to the program counter.
pub enum StepOutcome {
    /// No branch/jump: advance PC by one.
    Next,
    /// Branch, jump, or `jal` target (already masked to 12 bits).
    Jump(u32),
    /// `reti`: restore PC to the saved return address and leave the ISR.
    Reti(u32),
    /// `halt`: set the halt flag.
    Halt,
}

/// Whether an `in`/`out` access read from or wrote to the I/O register file.
pub enum IoAccessKind {
    Read,
    Write,
}

/// One `in` or `out` access, reported so the caller can log it without
/// re-deriving the target register from the instruction's operands.
pub struct IoAccess {
    pub kind: IoAccessKind,
    pub register: IoReg,
    pub value: u32,
}

fn w(v: u32) -> Wrapping<u32> {
    Wrapping(v)
}

fn signed(v: u32) -> i32 {
    v as i32
}

/// Executes one instruction, mutating registers, data memory, and I/O
/// registers in place. Returns the resulting PC effect and, for `in`/`out`,
/// the access that was made (so the caller can log it without re-deriving
/// the target register from operand state).
pub fn step(
    registers: &mut RegisterFile,
    data: &mut DataMemory,
    io: &mut IoRegisterFile,
    instruction: &Instruction,
    pc: u32,
) -> (StepOutcome, Option<IoAccess>) {
    let rs = registers.get(instruction.rs);
    let rt = registers.get(instruction.rt);
    let rm = registers.get(instruction.rm);
    let rd_current = registers.get(instruction.rd);

    match instruction.opcode {
        Opcode::Add => {
            registers.set(instruction.rd, (w(rs) + w(rt) + w(rm)).0);
        }
        Opcode::Sub => {
            registers.set(instruction.rd, (w(rs) - w(rt) - w(rm)).0);
        }
        Opcode::Mac => {
            let product = w(rs) * w(rt);
            registers.set(instruction.rd, (product + w(rm)).0);
        }
        Opcode::And => {
            registers.set(instruction.rd, rs & rt & rm);
        }
        Opcode::Or => {
            registers.set(instruction.rd, rs | rt | rm);
        }
        Opcode::Xor => {
            registers.set(instruction.rd, rs ^ rt ^ rm);
        }
        Opcode::Sll => {
            registers.set(instruction.rd, rs.wrapping_shl(rt & 31));
        }
        Opcode::Sra => {
            registers.set(instruction.rd, (signed(rs) >> (rt & 31)) as u32);
        }
        Opcode::Srl => {
            registers.set(instruction.rd, rs.wrapping_shr(rt & 31));
        }
        Opcode::Beq => {
            if rs == rt {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Bne => {
            if rs != rt {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Blt => {
            if signed(rs) < signed(rt) {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Bgt => {
            if signed(rs) > signed(rt) {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Ble => {
            if signed(rs) <= signed(rt) {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Bge => {
            if signed(rs) >= signed(rt) {
                return (StepOutcome::Jump(rm & 0xFFF), None);
            }
        }
        Opcode::Jal => {
            registers.set(instruction.rd, pc.wrapping_add(1));
            return (StepOutcome::Jump(rm & 0xFFF), None);
        }
        Opcode::Lw => {
            let address = (w(rs) + w(rt)).0;
            let value = (w(data.get(address)) + w(rm)).0;
            registers.set(instruction.rd, value);
        }
        Opcode::Sw => {
            let address = (w(rs) + w(rt)).0;
            data.set(address, (w(rm) + w(rd_current)).0);
        }
        Opcode::Reti => {
            return (StepOutcome::Reti(io.get(IoReg::IrqReturn)), None);
        }
        Opcode::In => {
            let index = (w(rs) + w(rt)).0;
            let register = io_register_from_index(index);
            let value = if register == IoReg::MonitorCmd { 0 } else { io.get_index(index) };
            registers.set(instruction.rd, value);
            return (StepOutcome::Next, Some(IoAccess { kind: IoAccessKind::Read, register, value }));
        }
        Opcode::Out => {
            let index = (w(rs) + w(rt)).0;
            io.set_index(index, rm);
            let register = io_register_from_index(index);
            return (StepOutcome::Next, Some(IoAccess { kind: IoAccessKind::Write, register, value: rm }));
        }
        Opcode::Halt => {
            return (StepOutcome::Halt, None);
        }
    }

    (StepOutcome::Next, None)
}
