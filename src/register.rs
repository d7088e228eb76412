use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::ToPrimitive;
use util::EnumFromStr;
use util_derive::EnumFromStr;

use crate::constants::REGISTER_COUNT;

/// One of the 16 general-purpose register slots. `Zero` always reads as 0;
/// `Imm1`/`Imm2` are overwritten with the current instruction's immediate
/// fields before every instruction executes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive, EnumFromStr)]
pub enum RegisterId {
    Zero,
    Imm1,
    Imm2,
    V0,
    A0,
    A1,
    A2,
    T0,
    T1,
    T2,
    S0,
    S1,
    S2,
    Gp,
    Sp,
    Ra,
}

impl std::fmt::Display for RegisterId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "${}", format!("{:?}", self).to_lowercase())
    }
}

#[inline]
pub fn register_index(id: RegisterId) -> usize {
    id.to_u32().unwrap() as usize
}

/// Parses a `$name` register token (the leading `$` is required and stripped).
pub fn parse_register_token(token: &str) -> Result<RegisterId, util::ParseEnumError> {
    let name = token.strip_prefix('$').ok_or_else(|| util::ParseEnumError {
        value: token.to_string(),
        enum_name: "RegisterId",
    })?;
    RegisterId::from_str(name)
}

/// A 16-slot general-purpose register file with `Zero` hardwired to 0.
#[derive(Clone)]
pub struct RegisterFile {
    slots: [u32; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> RegisterFile {
        RegisterFile {
            slots: [0; REGISTER_COUNT],
        }
    }

    pub fn get(&self, id: RegisterId) -> u32 {
        self.slots[register_index(id)]
    }

    pub fn set(&mut self, id: RegisterId, value: u32) {
        if id != RegisterId::Zero {
            self.slots[register_index(id)] = value;
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.slots
    }
}

impl Default for RegisterFile {
    fn default() -> RegisterFile {
        RegisterFile::new()
    }
}
