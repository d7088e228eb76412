//! Interrupt controller (C10): three maskable lines, edge-free level
//! sensing against the enable/status register pairs, and the single
//! in-service latch that `reti` clears.

use isa::ioreg::{IoReg, IoRegisterFile};

const LINES: [(IoReg, IoReg); 3] = [
    (IoReg::Irq0Enable, IoReg::Irq0Status),
    (IoReg::Irq1Enable, IoReg::Irq1Status),
    (IoReg::Irq2Enable, IoReg::Irq2Status),
];

/// True if any enabled line currently has its status bit set.
pub fn pending(io: &IoRegisterFile) -> bool {
    LINES
        .iter()
        .any(|(enable, status)| io.get(*enable) != 0 && io.get(*status) != 0)
}

/// Enters the interrupt handler: saves the return address and jumps to the
/// handler address. Callers must not call this while already in an ISR.
pub fn enter(io: &mut IoRegisterFile, return_pc: u32) -> u32 {
    io.set(IoReg::IrqReturn, return_pc);
    io.get(IoReg::IrqHandler) & 0xFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_line_pending_by_default() {
        let io = IoRegisterFile::new();
        assert!(!pending(&io));
    }

    #[test]
    fn pending_requires_both_enable_and_status() {
        let mut io = IoRegisterFile::new();
        io.set(IoReg::Irq0Status, 1);
        assert!(!pending(&io));
        io.set(IoReg::Irq0Enable, 1);
        assert!(pending(&io));
    }

    #[test]
    fn disabled_line_does_not_contribute() {
        let mut io = IoRegisterFile::new();
        io.set(IoReg::Irq1Enable, 1);
        io.set(IoReg::Irq2Status, 1);
        assert!(!pending(&io));
    }

    #[test]
    fn enter_jumps_to_masked_handler_address_and_saves_return() {
        let mut io = IoRegisterFile::new();
        io.set(IoReg::IrqHandler, 0x1234);
        assert_eq!(enter(&mut io, 7), 0x234);
        assert_eq!(io.get(IoReg::IrqReturn), 7);
    }
}
