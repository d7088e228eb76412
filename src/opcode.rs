use num_derive::{FromPrimitive, ToPrimitive};
use util::EnumFromStr;
use util_derive::EnumFromStr;

/// Mnemonics are matched case-insensitively against the lowercased variant
/// name (`Lw` matches `"lw"`, `Reti` matches `"reti"`) by the derive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive, EnumFromStr)]
pub enum Opcode {
    Add,  // rd = rs + rt + rm
    Sub,  // rd = rs - rt - rm
    Mac,  // rd = rs * rt + rm
    And,  // rd = rs & rt & rm
    Or,   // rd = rs | rt | rm
    Xor,  // rd = rs ^ rt ^ rm
    Sll,  // rd = rs << (rt & 31)
    Sra,  // rd = rs >> (rt & 31), arithmetic
    Srl,  // rd = rs >> (rt & 31), logical
    Beq,  // if rs == rt, PC = rm & 0xFFF
    Bne,  // if rs != rt, PC = rm & 0xFFF
    Blt,  // if rs < rt (signed), PC = rm & 0xFFF
    Bgt,  // if rs > rt (signed), PC = rm & 0xFFF
    Ble,  // if rs <= rt (signed), PC = rm & 0xFFF
    Bge,  // if rs >= rt (signed), PC = rm & 0xFFF
    Jal,  // rd = PC + 1; PC = rm & 0xFFF
    Lw,   // rd = data[rs + rt] + rm
    Sw,   // data[rs + rt] = rm + rd
    Reti, // PC = irqreturn; leave ISR
    In,   // rd = io[rs + rt]
    Out,  // io[rs + rt] = rm
    Halt, // set halt flag
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.mnemonic())
    }
}

impl Opcode {
    /// Lowercase mnemonic, as it appears in source and traces.
    pub fn mnemonic(&self) -> String {
        format!("{:?}", self).to_lowercase()
    }
}

#[inline]
pub fn opcode_value(op: Opcode) -> u32 {
    use num_traits::ToPrimitive;
    op.to_u32().unwrap()
}
