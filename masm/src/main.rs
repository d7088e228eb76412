#[macro_use]
extern crate clap;

use clap::Arg;
use isa::image::{write_instruction_image, write_word_image};
use masm::AssembleError;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum IoErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Assemble(AssembleError),
    Io(std::io::Error, IoErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Assemble(err) => write!(f, "{}", err),
            Error::Io(err, context, path) => write!(
                f,
                "{} file \"{}\" failed: {}",
                match context {
                    IoErrorContext::ReadInput => "reading input",
                    IoErrorContext::WriteOutput => "writing output",
                },
                path.display(),
                err
            ),
        }
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Assembly source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("IMEM_OUT")
                .help("Instruction image output file")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("DMEM_OUT")
                .help("Data image output file")
                .required(true)
                .index(3),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let imem_out = matches.value_of("IMEM_OUT").unwrap();
    let dmem_out = matches.value_of("DMEM_OUT").unwrap();

    if let Err(err) = run(input, imem_out, dmem_out) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(input: &str, imem_out: &str, dmem_out: &str) -> Result<(), Error> {
    let input_path = Path::new(input);

    let source = {
        let file = File::open(input_path)
            .map_err(|err| Error::Io(err, IoErrorContext::ReadInput, input_path.to_owned()))?;
        let mut source = String::new();
        BufReader::new(file)
            .read_to_string(&mut source)
            .map_err(|err| Error::Io(err, IoErrorContext::ReadInput, input_path.to_owned()))?;
        source
    };

    let assembled = masm::assemble_source(&source).map_err(Error::Assemble)?;

    let imem_path = PathBuf::from(imem_out);
    let imem_file = File::create(&imem_path)
        .map_err(|err| Error::Io(err, IoErrorContext::WriteOutput, imem_path.clone()))?;
    write_instruction_image(imem_file, &assembled.instructions)
        .map_err(|err| Error::Io(err, IoErrorContext::WriteOutput, imem_path))?;

    let dmem_path = PathBuf::from(dmem_out);
    let dmem_file = File::create(&dmem_path)
        .map_err(|err| Error::Io(err, IoErrorContext::WriteOutput, dmem_path.clone()))?;
    write_word_image(dmem_file, &assembled.data)
        .map_err(|err| Error::Io(err, IoErrorContext::WriteOutput, dmem_path))?;

    Ok(())
}
