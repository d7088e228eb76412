use std::{error, fmt};

/// The only simulate-time abort condition; everything else the execution
/// engine treats as defined behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimError {
    InvalidOpcode { pc: u32, word: u64 },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidOpcode { pc, word } => write!(
                f,
                "invalid opcode in word {:012X} at pc {:#05X}",
                word, pc
            ),
        }
    }
}

impl error::Error for SimError {}

/// Everything `Machine::run` can fail with: either a simulate-time abort
/// or a failure writing to one of the trace/log sinks.
#[derive(Debug)]
pub enum RunError {
    Sim(SimError),
    Io(std::io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::Sim(err) => write!(f, "{}", err),
            RunError::Io(err) => write!(f, "writing trace output failed: {}", err),
        }
    }
}

impl error::Error for RunError {}

impl From<SimError> for RunError {
    fn from(err: SimError) -> RunError {
        RunError::Sim(err)
    }
}

impl From<std::io::Error> for RunError {
    fn from(err: std::io::Error) -> RunError {
        RunError::Io(err)
    }
}
