//! Assembler for the [isa](../isa/index.html) toolchain.
//!
//! [`assemble_source`] is the single entry point: it takes the full text of
//! an assembly source file and returns the instruction image and data
//! image it produces, or the first fatal [`AssembleError`](error::AssembleError)
//! encountered.
//!
//! # Source language
//!
//! A line is either empty, a comment (starting with `#`), a bare label
//! definition (`name:`), a `.word ADDR VALUE` directive, or a whitespace- or
//! comma-separated instruction of the form `opcode rd rs rt rm imm1 imm2`.
//! `rd`/`rs`/`rt`/`rm` are `$`-prefixed register names; `imm1`/`imm2` are
//! decimal integers, `0x`-prefixed hex integers, or label references.

pub mod assembler;
pub mod error;
pub mod immediate;
pub mod labels;
pub mod normalize;

pub use assembler::{assemble_source, Assembled};
pub use error::AssembleError;
