//! Peripheral subsystem (C9): timer, disk controller, monitor, and the
//! LED/7-seg output mirrors. Each peripheral is ticked once per cycle,
//! after instruction execute and before interrupt entry evaluation.

use isa::constants::{DISK_CYCLES_PER_WORD, DISK_SECTOR_WORDS};
use isa::ioreg::{IoReg, IoRegisterFile};
use isa::memory::{DataMemory, DiskMemory, MonitorBuffer};

/// Disk transfer progress, separate from the I/O register file because it
/// is not software-visible state.
#[derive(Clone, Copy, Default)]
pub struct DiskTransfer {
    active: bool,
    words_done: u32,
    cycles_into_word: u32,
}

/// A reader of a single "raise IRQ2 on this cycle" schedule, consumed in
/// monotone order.
pub struct Irq2Schedule {
    remaining: std::vec::IntoIter<u64>,
    next: Option<u64>,
}

impl Irq2Schedule {
    pub fn new(cycles: Vec<u64>) -> Irq2Schedule {
        let mut remaining = cycles.into_iter();
        let next = remaining.next();
        Irq2Schedule { remaining, next }
    }

    /// Raises `irq2status` if `cycle` matches the next scheduled event.
    pub fn tick(&mut self, cycle: u64, io: &mut IoRegisterFile) {
        if self.next == Some(cycle) {
            io.set(IoReg::Irq2Status, 1);
            self.next = self.remaining.next();
        }
    }
}

/// Advances `timercurrent`, wrapping at `timermax` and raising `irq0status`.
pub fn tick_timer(io: &mut IoRegisterFile) {
    if io.get(IoReg::TimerEnable) == 0 {
        return;
    }
    let current = io.get(IoReg::TimerCurrent);
    let max = io.get(IoReg::TimerMax);
    if current == max {
        io.set(IoReg::TimerCurrent, 0);
        io.set(IoReg::Irq0Status, 1);
    } else {
        io.set(IoReg::TimerCurrent, current + 1);
    }
}

/// Advances the disk controller one cycle, moving one word every
/// [`DISK_CYCLES_PER_WORD`] cycles and raising `irq1status` on completion.
/// `disksector`/`diskbuffer` are read fresh from `io` every call.
pub fn tick_disk(transfer: &mut DiskTransfer, io: &mut IoRegisterFile, data: &mut DataMemory, disk: &mut DiskMemory) {
    let cmd = io.get(IoReg::DiskCmd);

    if !transfer.active {
        if cmd == 0 {
            return;
        }
        transfer.active = true;
        transfer.words_done = 0;
        transfer.cycles_into_word = 0;
        io.set(IoReg::DiskStatus, 1);
    }

    transfer.cycles_into_word += 1;
    if transfer.cycles_into_word < DISK_CYCLES_PER_WORD {
        return;
    }
    transfer.cycles_into_word = 0;

    let sector = io.get(IoReg::DiskSector);
    let buffer = io.get(IoReg::DiskBuffer);
    let word_index = transfer.words_done;
    let disk_index = sector.wrapping_mul(DISK_SECTOR_WORDS as u32).wrapping_add(word_index);
    let data_index = buffer.wrapping_add(word_index);

    if cmd == 1 {
        let value = disk.get(disk_index);
        data.set(data_index, value);
    } else {
        let value = data.get(data_index);
        disk.set(disk_index, value);
    }

    transfer.words_done += 1;
    if transfer.words_done as usize == DISK_SECTOR_WORDS {
        io.set(IoReg::DiskCmd, 0);
        io.set(IoReg::DiskStatus, 0);
        io.set(IoReg::Irq1Status, 1);
        *transfer = DiskTransfer::default();
    }
}

/// Commits `monitordata`'s low byte into the frame buffer when `monitorcmd`
/// is 1, then clears the command register.
pub fn tick_monitor(io: &mut IoRegisterFile, monitor: &mut MonitorBuffer) {
    if io.get(IoReg::MonitorCmd) != 1 {
        return;
    }
    let address = io.get(IoReg::MonitorAddr);
    let value = io.get(IoReg::MonitorData) as u8;
    monitor.set(address, value);
    io.set(IoReg::MonitorCmd, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_wraps_and_raises_irq0() {
        let mut io = IoRegisterFile::new();
        io.set(IoReg::TimerEnable, 1);
        io.set(IoReg::TimerMax, 2);
        tick_timer(&mut io);
        assert_eq!(io.get(IoReg::TimerCurrent), 1);
        tick_timer(&mut io);
        assert_eq!(io.get(IoReg::TimerCurrent), 2);
        tick_timer(&mut io);
        assert_eq!(io.get(IoReg::TimerCurrent), 0);
        assert_eq!(io.get(IoReg::Irq0Status), 1);
    }

    #[test]
    fn disabled_timer_does_not_advance() {
        let mut io = IoRegisterFile::new();
        tick_timer(&mut io);
        assert_eq!(io.get(IoReg::TimerCurrent), 0);
    }

    #[test]
    fn disk_read_completes_after_full_sector() {
        let mut io = IoRegisterFile::new();
        let mut data = DataMemory::new();
        let mut disk = DiskMemory::new();
        let mut transfer = DiskTransfer::default();

        disk.set(0, 0xAAAA);
        io.set(IoReg::DiskCmd, 1);

        let total_cycles = DISK_CYCLES_PER_WORD as usize * DISK_SECTOR_WORDS;
        for _ in 0..total_cycles {
            tick_disk(&mut transfer, &mut io, &mut data, &mut disk);
        }

        assert_eq!(data.get(0), 0xAAAA);
        assert_eq!(io.get(IoReg::DiskCmd), 0);
        assert_eq!(io.get(IoReg::DiskStatus), 0);
        assert_eq!(io.get(IoReg::Irq1Status), 1);
    }

    #[test]
    fn disk_transfer_stays_busy_mid_sector() {
        let mut io = IoRegisterFile::new();
        let mut data = DataMemory::new();
        let mut disk = DiskMemory::new();
        let mut transfer = DiskTransfer::default();

        io.set(IoReg::DiskCmd, 1);
        tick_disk(&mut transfer, &mut io, &mut data, &mut disk);
        assert_eq!(io.get(IoReg::DiskStatus), 1);
        assert_eq!(io.get(IoReg::DiskCmd), 1);
    }

    #[test]
    fn monitor_commit_clears_command() {
        let mut io = IoRegisterFile::new();
        let mut monitor = MonitorBuffer::new();
        io.set(IoReg::MonitorCmd, 1);
        io.set(IoReg::MonitorAddr, 5);
        io.set(IoReg::MonitorData, 0x1FF);
        tick_monitor(&mut io, &mut monitor);
        assert_eq!(monitor.get(5), 0xFF);
        assert_eq!(io.get(IoReg::MonitorCmd), 0);
    }

    #[test]
    fn irq2_schedule_fires_on_matching_cycle_only() {
        let mut io = IoRegisterFile::new();
        let mut schedule = Irq2Schedule::new(vec![3, 10]);
        schedule.tick(1, &mut io);
        assert_eq!(io.get(IoReg::Irq2Status), 0);
        schedule.tick(3, &mut io);
        assert_eq!(io.get(IoReg::Irq2Status), 1);
    }
}
