//! The owning `Machine` value (C12): registers, I/O registers, memories,
//! and peripheral counters bundled into one struct passed by mutable
//! reference through `step`, plus the execution loop that drives it to
//! completion. Mirrors the teacher's `Core`/`tick` split but replaces the
//! process-wide mutable arrays the source machine used with fields owned
//! here.

use std::io::Write;

use isa::instruction::Instruction;
use isa::ioreg::{IoReg, IoRegisterFile};
use isa::memory::{DataMemory, DiskMemory, InstructionMemory, MonitorBuffer};
use isa::register::{RegisterFile, RegisterId};

use crate::cpu::{self, IoAccess, IoAccessKind, StepOutcome};
use crate::error::{RunError, SimError};
use crate::interrupt;
use crate::peripherals::{self, DiskTransfer, Irq2Schedule};
use crate::trace::{self, RegisterAccess};

pub struct Machine {
    pub registers: RegisterFile,
    pub io: IoRegisterFile,
    pub imem: InstructionMemory,
    pub dmem: DataMemory,
    pub disk: DiskMemory,
    pub monitor: MonitorBuffer,
    disk_transfer: DiskTransfer,
    irq2: Irq2Schedule,
    pc: u32,
    halted: bool,
    isr_active: bool,
    cycle: u64,
}

/// The set of sinks the execution loop writes to every cycle. Each is a
/// generic `Write` so tests can observe a run's effects in memory.
pub struct Sinks<'a, W1: Write, W2: Write, W3: Write, W4: Write> {
    pub instruction_trace: &'a mut W1,
    pub hwreg_trace: &'a mut W2,
    pub leds_log: &'a mut W3,
    pub sevenseg_log: &'a mut W4,
}

impl Machine {
    pub fn new(
        imem: InstructionMemory,
        dmem: DataMemory,
        disk: DiskMemory,
        irq2_schedule: Vec<u64>,
    ) -> Machine {
        Machine {
            registers: RegisterFile::new(),
            io: IoRegisterFile::new(),
            imem,
            dmem,
            disk,
            monitor: MonitorBuffer::new(),
            disk_transfer: DiskTransfer::default(),
            irq2: Irq2Schedule::new(irq2_schedule),
            pc: 0,
            halted: false,
            isr_active: false,
            cycle: 0,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    fn disk_busy(&self) -> bool {
        self.io.get(IoReg::DiskStatus) != 0
    }

    fn done(&self) -> bool {
        self.halted && !self.disk_busy()
    }

    /// Runs until `halt` has been issued and the disk is idle, or a decoded
    /// word names an opcode outside the table.
    pub fn run<W1: Write, W2: Write, W3: Write, W4: Write>(
        &mut self,
        sinks: &mut Sinks<W1, W2, W3, W4>,
    ) -> Result<(), RunError> {
        while !self.done() {
            self.step(sinks)?;
        }
        Ok(())
    }

    /// Executes exactly one cycle per §4.8: IRQ2 feed, fetch-or-stall,
    /// decode, imm write, trace, execute, peripherals, interrupt entry,
    /// clock increment, timer advance.
    pub fn step<W1: Write, W2: Write, W3: Write, W4: Write>(
        &mut self,
        sinks: &mut Sinks<W1, W2, W3, W4>,
    ) -> Result<(), RunError> {
        self.irq2.tick(self.cycle, &mut self.io);

        let fetch_pc = self.pc;
        let word = self.imem.get(fetch_pc);
        let instruction = Instruction::decode(word)
            .ok_or(SimError::InvalidOpcode { pc: fetch_pc, word })?;

        self.registers.set(RegisterId::Imm1, instruction.imm1 as u32);
        self.registers.set(RegisterId::Imm2, instruction.imm2 as u32);

        trace::write_instruction_trace(sinks.instruction_trace, fetch_pc, word, &self.registers)?;

        if !self.halted {
            let (outcome, io_access) = cpu::step(
                &mut self.registers,
                &mut self.dmem,
                &mut self.io,
                &instruction,
                fetch_pc,
            );

            if let Some(access) = io_access {
                self.log_io_access(sinks, access)?;
            }

            match outcome {
                StepOutcome::Next => self.pc = fetch_pc.wrapping_add(1) & 0xFFF,
                StepOutcome::Jump(target) => self.pc = target,
                StepOutcome::Reti(target) => {
                    self.isr_active = false;
                    self.pc = target & 0xFFF;
                }
                StepOutcome::Halt => self.halted = true,
            }
        }

        self.tick_peripherals();

        if !self.isr_active && interrupt::pending(&self.io) {
            let next_pc = self.pc;
            self.pc = interrupt::enter(&mut self.io, next_pc);
            self.isr_active = true;
        }

        self.advance_clock();
        Ok(())
    }

    fn tick_peripherals(&mut self) {
        peripherals::tick_disk(&mut self.disk_transfer, &mut self.io, &mut self.dmem, &mut self.disk);
        peripherals::tick_monitor(&mut self.io, &mut self.monitor);
    }

    fn log_io_access<W1: Write, W2: Write, W3: Write, W4: Write>(
        &mut self,
        sinks: &mut Sinks<W1, W2, W3, W4>,
        access: IoAccess,
    ) -> std::io::Result<()> {
        let verb = match access.kind {
            IoAccessKind::Read => RegisterAccess::Read,
            IoAccessKind::Write => RegisterAccess::Write,
        };
        trace::write_hwreg_trace(sinks.hwreg_trace, self.cycle, verb, access.register, access.value)?;

        if matches!(access.kind, IoAccessKind::Write) {
            match access.register {
                IoReg::Leds => trace::write_leds_log(sinks.leds_log, self.cycle, access.value)?,
                IoReg::Display7Seg => trace::write_7seg_log(sinks.sevenseg_log, self.cycle, access.value)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn advance_clock(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
        peripherals::tick_timer(&mut self.io);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isa::instruction::Instruction as Instr;
    use isa::opcode::Opcode;

    fn encode(op: Opcode, rd: RegisterId, rs: RegisterId, rt: RegisterId, rm: RegisterId, imm1: i32, imm2: i32) -> u64 {
        Instr {
            opcode: op,
            rd,
            rs,
            rt,
            rm,
            imm1,
            imm2,
        }
        .encode()
    }

    fn sinks<'a>(
        a: &'a mut Vec<u8>,
        b: &'a mut Vec<u8>,
        c: &'a mut Vec<u8>,
        d: &'a mut Vec<u8>,
    ) -> Sinks<'a, Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>> {
        Sinks {
            instruction_trace: a,
            hwreg_trace: b,
            leds_log: c,
            sevenseg_log: d,
        }
    }

    #[test]
    fn runs_an_add_then_halt_program() {
        let mut imem = InstructionMemory::new();
        imem.set(0, encode(Opcode::Add, RegisterId::T0, RegisterId::Imm1, RegisterId::Zero, RegisterId::Zero, 3, 0));
        imem.set(1, encode(Opcode::Halt, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, 0, 0));

        let mut machine = Machine::new(imem, DataMemory::new(), DiskMemory::new(), vec![]);
        let (mut a, mut b, mut c, mut d) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let mut s = sinks(&mut a, &mut b, &mut c, &mut d);
        machine.run(&mut s).unwrap();

        assert_eq!(machine.registers.get(RegisterId::T0), 3);
        assert!(machine.halted);
    }

    #[test]
    fn invalid_opcode_aborts_with_pc_and_word() {
        let mut imem = InstructionMemory::new();
        imem.set(0, 0xFF_0000_000000);
        let mut machine = Machine::new(imem, DataMemory::new(), DiskMemory::new(), vec![]);
        let (mut a, mut b, mut c, mut d) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let mut s = sinks(&mut a, &mut b, &mut c, &mut d);
        let err = machine.run(&mut s).unwrap_err();
        assert!(matches!(err, RunError::Sim(SimError::InvalidOpcode { pc: 0, .. })));
    }

    #[test]
    fn halt_stalls_pc_while_disk_is_busy() {
        let mut imem = InstructionMemory::new();
        imem.set(0, encode(Opcode::Halt, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, 0, 0));
        let mut machine = Machine::new(imem, DataMemory::new(), DiskMemory::new(), vec![]);
        machine.io.set(IoReg::DiskCmd, 1);

        let (mut a, mut b, mut c, mut d) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let mut s = sinks(&mut a, &mut b, &mut c, &mut d);
        machine.step(&mut s).unwrap();
        assert_eq!(machine.pc, 0);
        assert!(machine.halted);
    }

    #[test]
    fn interrupt_is_still_serviced_while_stalled_on_a_busy_disk() {
        let mut imem = InstructionMemory::new();
        imem.set(0, encode(Opcode::Halt, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, RegisterId::Zero, 0, 0));
        let mut machine = Machine::new(imem, DataMemory::new(), DiskMemory::new(), vec![]);
        machine.io.set(IoReg::DiskCmd, 1);

        let (mut a, mut b, mut c, mut d) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let mut s = sinks(&mut a, &mut b, &mut c, &mut d);
        machine.step(&mut s).unwrap();
        assert!(machine.halted);
        assert!(!machine.isr_active);

        // Now genuinely on the stall path: halted, disk still busy, and an
        // interrupt becomes pending. It must still be entered, not deferred
        // until the stall ends.
        machine.io.set(IoReg::IrqHandler, 42);
        machine.io.set(IoReg::Irq0Enable, 1);
        machine.io.set(IoReg::Irq0Status, 1);
        machine.step(&mut s).unwrap();

        assert!(machine.isr_active);
        assert_eq!(machine.pc, 42);
    }
}
