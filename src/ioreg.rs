use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::constants::{DEFAULT_TIMER_MAX, IO_REGISTER_COUNT};

/// One of the 23 I/O register slots, addressed by `in`/`out`. Slots 18 and
/// 19 are reserved and carry no defined meaning.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive, EnumFromStr)]
pub enum IoReg {
    Irq0Enable,
    Irq1Enable,
    Irq2Enable,
    Irq0Status,
    Irq1Status,
    Irq2Status,
    IrqHandler,
    IrqReturn,
    Clks,
    Leds,
    Display7Seg,
    TimerEnable,
    TimerCurrent,
    TimerMax,
    DiskCmd,
    DiskSector,
    DiskBuffer,
    DiskStatus,
    Reserved18,
    Reserved19,
    MonitorAddr,
    MonitorData,
    MonitorCmd,
}

impl std::fmt::Display for IoReg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

#[inline]
pub fn io_register_index(reg: IoReg) -> usize {
    reg.to_u32().unwrap() as usize
}

/// Resolves a raw `in`/`out` index back to the register it names, wrapping
/// modulo [`IO_REGISTER_COUNT`].
#[inline]
pub fn io_register_from_index(index: u32) -> IoReg {
    IoReg::from_u32(index % IO_REGISTER_COUNT as u32).unwrap()
}

/// The flat 23-slot I/O register file. Index arithmetic performed by `in`
/// and `out` wraps modulo [`IO_REGISTER_COUNT`] rather than trapping.
#[derive(Clone)]
pub struct IoRegisterFile {
    slots: [u32; IO_REGISTER_COUNT],
}

impl IoRegisterFile {
    pub fn new() -> IoRegisterFile {
        let mut slots = [0u32; IO_REGISTER_COUNT];
        slots[io_register_index(IoReg::TimerMax)] = DEFAULT_TIMER_MAX;
        IoRegisterFile { slots }
    }

    pub fn get(&self, reg: IoReg) -> u32 {
        self.slots[io_register_index(reg)]
    }

    pub fn set(&mut self, reg: IoReg, value: u32) {
        self.slots[io_register_index(reg)] = value;
    }

    /// Raw index access used by `in`/`out`, wrapping modulo the slot count.
    pub fn get_index(&self, index: u32) -> u32 {
        self.slots[index as usize % IO_REGISTER_COUNT]
    }

    pub fn set_index(&mut self, index: u32, value: u32) {
        self.slots[index as usize % IO_REGISTER_COUNT] = value;
    }
}

impl Default for IoRegisterFile {
    fn default() -> IoRegisterFile {
        IoRegisterFile::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_max_defaults_to_all_ones() {
        let io = IoRegisterFile::new();
        assert_eq!(io.get(IoReg::TimerMax), DEFAULT_TIMER_MAX);
    }

    #[test]
    fn index_access_wraps_modulo_register_count() {
        let mut io = IoRegisterFile::new();
        io.set_index(0, 7);
        assert_eq!(io.get_index(IO_REGISTER_COUNT as u32), 7);
    }

    #[test]
    fn from_index_wraps_and_inverts_io_register_index() {
        assert_eq!(io_register_from_index(0), IoReg::Irq0Enable);
        assert_eq!(io_register_from_index(IO_REGISTER_COUNT as u32), IoReg::Irq0Enable);
        assert_eq!(
            io_register_from_index(io_register_index(IoReg::MonitorCmd) as u32),
            IoReg::MonitorCmd
        );
    }

    #[test]
    fn parses_compound_mnemonics() {
        assert_eq!(IoReg::from_str("irq0enable").unwrap(), IoReg::Irq0Enable);
        assert_eq!(IoReg::from_str("display7seg").unwrap(), IoReg::Display7Seg);
        assert_eq!(IoReg::from_str("monitorcmd").unwrap(), IoReg::MonitorCmd);
    }
}
