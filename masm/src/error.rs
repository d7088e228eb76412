use std::{error, fmt};

/// Fatal assemble-time failures. Assembly aborts at the first one with a
/// single diagnostic naming the offending line and token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssembleError {
    UnknownOpcode { line: usize, token: String },
    UnknownRegister { line: usize, token: String },
    MalformedInstruction { line: usize, text: String },
    MalformedWord { line: usize, text: String },
    MalformedImmediate { line: usize, token: String },
    DuplicateLabel { line: usize, name: String },
    UndefinedLabel { line: usize, name: String },
    OverlappingWordTarget { line: usize, address: u32 },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssembleError::UnknownOpcode { line, token } => {
                write!(f, "line {}: unknown opcode \"{}\"", line, token)
            }
            AssembleError::UnknownRegister { line, token } => {
                write!(f, "line {}: unknown register \"{}\"", line, token)
            }
            AssembleError::MalformedInstruction { line, text } => write!(
                f,
                "line {}: malformed instruction \"{}\" (expected opcode rd rs rt rm imm1 imm2)",
                line, text
            ),
            AssembleError::MalformedWord { line, text } => {
                write!(f, "line {}: malformed .word directive \"{}\"", line, text)
            }
            AssembleError::MalformedImmediate { line, token } => {
                write!(f, "line {}: malformed immediate \"{}\"", line, token)
            }
            AssembleError::DuplicateLabel { line, name } => {
                write!(f, "line {}: label \"{}\" already defined", line, name)
            }
            AssembleError::UndefinedLabel { line, name } => {
                write!(f, "line {}: undefined label \"{}\"", line, name)
            }
            AssembleError::OverlappingWordTarget { line, address } => write!(
                f,
                "line {}: .word target {:#X} already has a non-zero value",
                line, address
            ),
        }
    }
}

impl error::Error for AssembleError {}
