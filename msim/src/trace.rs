//! Trace/log emitters (C11). Every output is written through a generic
//! `W: Write` sink rather than a hardcoded file handle, so a cycle's
//! effects can be asserted against an in-memory buffer in tests.

use std::io::{self, Write};

use isa::ioreg::IoReg;
use isa::register::RegisterFile;

/// Writes one instruction-trace line: `PC(3-hex) INSTR(12-hex) R0 R1 … R15`,
/// registers as 8-hex lowercase.
pub fn write_instruction_trace<W: Write>(w: &mut W, pc: u32, word: u64, registers: &RegisterFile) -> io::Result<()> {
    write!(w, "{:03X} {:012X}", pc, word)?;
    for value in registers.as_slice() {
        write!(w, " {:08x}", value)?;
    }
    writeln!(w)
}

/// A single register access, for the hardware-register trace.
pub enum RegisterAccess {
    Read,
    Write,
}

/// Writes one hardware-register trace line:
/// `<cycle> READ|WRITE <reg-name> <8-hex-lowercase-value>`.
pub fn write_hwreg_trace<W: Write>(
    w: &mut W,
    cycle: u64,
    access: RegisterAccess,
    reg: IoReg,
    value: u32,
) -> io::Result<()> {
    let verb = match access {
        RegisterAccess::Read => "READ",
        RegisterAccess::Write => "WRITE",
    };
    writeln!(w, "{} {} {} {:08x}", cycle, verb, reg, value)
}

/// Writes one LEDs-log line: `<cycle> <8-hex-lowercase>`.
pub fn write_leds_log<W: Write>(w: &mut W, cycle: u64, value: u32) -> io::Result<()> {
    writeln!(w, "{} {:08x}", cycle, value)
}

/// Writes one 7-seg-log line: `<cycle> <8-hex-uppercase>`.
pub fn write_7seg_log<W: Write>(w: &mut W, cycle: u64, value: u32) -> io::Result<()> {
    writeln!(w, "{} {:08X}", cycle, value)
}

/// Writes the final cycle count, a single decimal line.
pub fn write_cycle_count<W: Write>(w: &mut W, cycles: u64) -> io::Result<()> {
    writeln!(w, "{}", cycles)
}

/// Writes the register dump: registers 3..15 as 8-hex-uppercase, one per line.
pub fn write_register_dump<W: Write>(w: &mut W, registers: &RegisterFile) -> io::Result<()> {
    for value in &registers.as_slice()[3..] {
        writeln!(w, "{:08X}", value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use isa::register::RegisterId;

    #[test]
    fn instruction_trace_line_matches_expected_shape() {
        let registers = RegisterFile::new();
        let mut buf = Vec::new();
        write_instruction_trace(&mut buf, 1, 0xABCDEF012345, &registers).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.starts_with("001 ABCDEF012345 "));
        assert_eq!(line.trim_end().split(' ').count(), 18);
    }

    #[test]
    fn hwreg_trace_uses_lowercase_name_and_value() {
        let mut buf = Vec::new();
        write_hwreg_trace(&mut buf, 42, RegisterAccess::Write, IoReg::Leds, 0xFF).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "42 WRITE leds 000000ff\n");
    }

    #[test]
    fn leds_log_is_lowercase_sevenseg_is_uppercase() {
        let mut leds = Vec::new();
        write_leds_log(&mut leds, 1, 0xAB).unwrap();
        assert_eq!(String::from_utf8(leds).unwrap(), "1 000000ab\n");

        let mut seg = Vec::new();
        write_7seg_log(&mut seg, 1, 0xAB).unwrap();
        assert_eq!(String::from_utf8(seg).unwrap(), "1 000000AB\n");
    }

    #[test]
    fn register_dump_skips_zero_imm1_imm2() {
        let mut registers = RegisterFile::new();
        registers.set(RegisterId::V0, 1);
        let mut buf = Vec::new();
        write_register_dump(&mut buf, &registers).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "00000001");
    }
}
