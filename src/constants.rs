//! Bit layout of the 48-bit instruction word.
//!
//! ```text
//! [47:40] opcode (8)   [39:36] rd (4)    [35:32] rs (4)
//! [31:28] rt  (4)      [27:24] rm (4)
//! [23:12] imm1 (12, signed)   [11:0] imm2 (12, signed)
//! ```

pub const WORD_BITS: u32 = 48;

pub const OPCODE_WIDTH: u32 = 8;
pub const REG_ID_WIDTH: u32 = 4;
pub const IMMEDIATE_WIDTH: u32 = 12;

pub const OPCODE_OFFSET: u32 = 40;
pub const RD_OFFSET: u32 = 36;
pub const RS_OFFSET: u32 = 32;
pub const RT_OFFSET: u32 = 28;
pub const RM_OFFSET: u32 = 24;
pub const IMM1_OFFSET: u32 = 12;
pub const IMM2_OFFSET: u32 = 0;

pub const OPCODE_MASK: u64 = 0xFF << OPCODE_OFFSET;
pub const RD_MASK: u64 = 0xF << RD_OFFSET;
pub const RS_MASK: u64 = 0xF << RS_OFFSET;
pub const RT_MASK: u64 = 0xF << RT_OFFSET;
pub const RM_MASK: u64 = 0xF << RM_OFFSET;
pub const IMM1_MASK: u64 = 0xFFF << IMM1_OFFSET;
pub const IMM2_MASK: u64 = 0xFFF << IMM2_OFFSET;

/// Top bit of a 12-bit two's-complement field.
pub const IMMEDIATE_SIGN_BIT: u32 = 1 << (IMMEDIATE_WIDTH - 1);
pub const IMMEDIATE_EXTENSION: i32 = !0xFFF;

pub const REGISTER_COUNT: usize = 16;
pub const IO_REGISTER_COUNT: usize = 23;

pub const INSTRUCTION_MEMORY_WORDS: usize = 4096;
pub const DATA_MEMORY_WORDS: usize = 4096;

pub const DISK_SECTOR_WORDS: usize = 128;
pub const DISK_SECTOR_COUNT: usize = 128;
pub const DISK_MEMORY_WORDS: usize = DISK_SECTOR_WORDS * DISK_SECTOR_COUNT;

pub const MONITOR_WIDTH: usize = 256;
pub const MONITOR_HEIGHT: usize = 256;
pub const MONITOR_PIXELS: usize = MONITOR_WIDTH * MONITOR_HEIGHT;

/// Cycles between successive word transfers of a disk operation.
pub const DISK_CYCLES_PER_WORD: u32 = 8;
/// Total cycles to transfer one full sector (128 words).
pub const DISK_TRANSFER_CYCLES: u32 = DISK_CYCLES_PER_WORD * DISK_SECTOR_WORDS as u32;

pub const DEFAULT_TIMER_MAX: u32 = 0xFFFF_FFFF;
