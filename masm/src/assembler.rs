//! Two-pass assembler (C5): pass 1 resolves labels against instruction
//! count, pass 2 encodes instructions and places `.word` data.

use std::str::FromStr;

use isa::constants::DATA_MEMORY_WORDS;
use isa::instruction::Instruction;
use isa::opcode::Opcode;
use isa::register::parse_register_token;

use crate::error::AssembleError;
use crate::immediate::resolve_immediate;
use crate::labels::{define, label_definition, LabelMap};
use crate::normalize::normalize_line;

/// Assembled instruction and data images.
pub struct Assembled {
    pub instructions: Vec<u64>,
    pub data: Vec<u32>,
}

pub fn assemble_source(source: &str) -> Result<Assembled, AssembleError> {
    let labels = run_pass_one(source)?;
    run_pass_two(source, &labels)
}

fn run_pass_one(source: &str) -> Result<LabelMap, AssembleError> {
    let mut labels = LabelMap::new();
    let mut pc: u32 = 0;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let line = normalize_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(name) = label_definition(&line) {
            define(&mut labels, name, pc, line_number)?;
            continue;
        }

        if !line.starts_with(".word") {
            pc += 1;
        }
    }

    Ok(labels)
}

fn run_pass_two(source: &str, labels: &LabelMap) -> Result<Assembled, AssembleError> {
    let mut instructions = Vec::new();
    let mut data = vec![0u32; DATA_MEMORY_WORDS];
    let mut highest_used: Option<usize> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let line = normalize_line(raw_line);
        if line.is_empty() || label_definition(&line).is_some() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(".word") {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            if tokens.len() != 2 {
                return Err(AssembleError::MalformedWord {
                    line: line_number,
                    text: line.clone(),
                });
            }

            let address = resolve_immediate(tokens[0], labels, line_number)? as u32 as usize;
            let value = resolve_immediate(tokens[1], labels, line_number)? as u32;

            let address = address % DATA_MEMORY_WORDS;
            if data[address] != 0 {
                return Err(AssembleError::OverlappingWordTarget {
                    line: line_number,
                    address: address as u32,
                });
            }

            data[address] = value;
            highest_used = Some(highest_used.map_or(address, |h| h.max(address)));
            continue;
        }

        let instruction = encode_instruction_line(&line, labels, line_number)?;
        instructions.push(instruction.encode());
    }

    let data = match highest_used {
        Some(highest) => data[..=highest].to_vec(),
        None => Vec::new(),
    };

    Ok(Assembled { instructions, data })
}

fn encode_instruction_line(
    line: &str,
    labels: &LabelMap,
    line_number: usize,
) -> Result<Instruction, AssembleError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 7 {
        return Err(AssembleError::MalformedInstruction {
            line: line_number,
            text: line.to_string(),
        });
    }

    let opcode = Opcode::from_str(tokens[0]).map_err(|_| AssembleError::UnknownOpcode {
        line: line_number,
        token: tokens[0].to_string(),
    })?;

    let parse_reg = |token: &str| {
        parse_register_token(token).map_err(|_| AssembleError::UnknownRegister {
            line: line_number,
            token: token.to_string(),
        })
    };

    let rd = parse_reg(tokens[1])?;
    let rs = parse_reg(tokens[2])?;
    let rt = parse_reg(tokens[3])?;
    let rm = parse_reg(tokens[4])?;
    let imm1 = resolve_immediate(tokens[5], labels, line_number)?;
    let imm2 = resolve_immediate(tokens[6], labels, line_number)?;

    Ok(Instruction {
        opcode,
        rd,
        rs,
        rt,
        rm,
        imm1,
        imm2,
    })
}
