#[macro_use]
extern crate clap;

use clap::Arg;
use isa::image::{
    read_instruction_image, read_irq2_schedule, read_word_image, write_monitor_text,
    write_monitor_yuv, write_word_image,
};
use isa::memory::{DataMemory, DiskMemory, InstructionMemory};
use msim::{Machine, RunError, Sinks};
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum IoErrorContext {
    ReadInput,
    WriteOutput,
}

#[derive(Debug)]
enum Error {
    Run(RunError),
    Io(std::io::Error, IoErrorContext, PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Run(err) => write!(f, "{}", err),
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

struct Args {
    imem_in: String,
    dmem_in: String,
    disk_in: String,
    irq2_in: String,
    dmem_out: String,
    reg_out: String,
    trace: String,
    hwreg_trace: String,
    cycles: String,
    leds: String,
    sevenseg: String,
    disk_out: String,
    monitor: String,
    monitor_yuv: String,
}

fn main() {
    let matches = app_from_crate!()
        .arg(Arg::with_name("IMEM_IN").required(true).index(1))
        .arg(Arg::with_name("DMEM_IN").required(true).index(2))
        .arg(Arg::with_name("DISK_IN").required(true).index(3))
        .arg(Arg::with_name("IRQ2_IN").required(true).index(4))
        .arg(Arg::with_name("DMEM_OUT").required(true).index(5))
        .arg(Arg::with_name("REG_OUT").required(true).index(6))
        .arg(Arg::with_name("TRACE").required(true).index(7))
        .arg(Arg::with_name("HWREG_TRACE").required(true).index(8))
        .arg(Arg::with_name("CYCLES").required(true).index(9))
        .arg(Arg::with_name("LEDS").required(true).index(10))
        .arg(Arg::with_name("SEVENSEG").required(true).index(11))
        .arg(Arg::with_name("DISK_OUT").required(true).index(12))
        .arg(Arg::with_name("MONITOR").required(true).index(13))
        .arg(Arg::with_name("MONITOR_YUV").required(true).index(14))
        .get_matches();

    let args = Args {
        imem_in: matches.value_of("IMEM_IN").unwrap().to_string(),
        dmem_in: matches.value_of("DMEM_IN").unwrap().to_string(),
        disk_in: matches.value_of("DISK_IN").unwrap().to_string(),
        irq2_in: matches.value_of("IRQ2_IN").unwrap().to_string(),
        dmem_out: matches.value_of("DMEM_OUT").unwrap().to_string(),
        reg_out: matches.value_of("REG_OUT").unwrap().to_string(),
        trace: matches.value_of("TRACE").unwrap().to_string(),
        hwreg_trace: matches.value_of("HWREG_TRACE").unwrap().to_string(),
        cycles: matches.value_of("CYCLES").unwrap().to_string(),
        leds: matches.value_of("LEDS").unwrap().to_string(),
        sevenseg: matches.value_of("SEVENSEG").unwrap().to_string(),
        disk_out: matches.value_of("DISK_OUT").unwrap().to_string(),
        monitor: matches.value_of("MONITOR").unwrap().to_string(),
        monitor_yuv: matches.value_of("MONITOR_YUV").unwrap().to_string(),
    };

    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn open_for_read(path: &str) -> Result<BufReader<File>, Error> {
    let p = Path::new(path);
    File::open(p)
        .map(BufReader::new)
        .map_err(|e| Error::Io(e, IoErrorContext::ReadInput, p.to_owned()))
}

fn create(path: &str) -> Result<File, Error> {
    let p = Path::new(path);
    File::create(p).map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, p.to_owned()))
}

fn run(args: &Args) -> Result<(), Error> {
    let imem_words = read_instruction_image(open_for_read(&args.imem_in)?)
        .map_err(|e| Error::Io(e, IoErrorContext::ReadInput, PathBuf::from(&args.imem_in)))?;
    let dmem_words = read_word_image(open_for_read(&args.dmem_in)?)
        .map_err(|e| Error::Io(e, IoErrorContext::ReadInput, PathBuf::from(&args.dmem_in)))?;
    let disk_words = read_word_image(open_for_read(&args.disk_in)?)
        .map_err(|e| Error::Io(e, IoErrorContext::ReadInput, PathBuf::from(&args.disk_in)))?;
    let irq2_schedule = read_irq2_schedule(open_for_read(&args.irq2_in)?)
        .map_err(|e| Error::Io(e, IoErrorContext::ReadInput, PathBuf::from(&args.irq2_in)))?;

    let mut imem = InstructionMemory::new();
    for (i, word) in imem_words.into_iter().enumerate() {
        imem.set(i as u32, word);
    }
    let mut dmem = DataMemory::new();
    for (i, word) in dmem_words.into_iter().enumerate() {
        dmem.set(i as u32, word);
    }
    let mut disk = DiskMemory::new();
    for (i, word) in disk_words.into_iter().enumerate() {
        disk.set(i as u32, word);
    }

    let mut machine = Machine::new(imem, dmem, disk, irq2_schedule);

    let mut trace = BufWriter::new(create(&args.trace)?);
    let mut hwreg_trace = BufWriter::new(create(&args.hwreg_trace)?);
    let mut leds = BufWriter::new(create(&args.leds)?);
    let mut sevenseg = BufWriter::new(create(&args.sevenseg)?);

    let mut sinks = Sinks {
        instruction_trace: &mut trace,
        hwreg_trace: &mut hwreg_trace,
        leds_log: &mut leds,
        sevenseg_log: &mut sevenseg,
    };

    machine.run(&mut sinks).map_err(Error::Run)?;

    let dmem_out_path = PathBuf::from(&args.dmem_out);
    let dmem_words = match machine.dmem.highest_nonzero() {
        Some(last) => &machine.dmem.as_slice()[..=last],
        None => &[],
    };
    write_word_image(create(&args.dmem_out)?, dmem_words)
        .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, dmem_out_path))?;

    let reg_out_path = PathBuf::from(&args.reg_out);
    msim::trace::write_register_dump(&mut create(&args.reg_out)?, &machine.registers)
        .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, reg_out_path))?;

    let cycles_path = PathBuf::from(&args.cycles);
    msim::trace::write_cycle_count(&mut create(&args.cycles)?, machine.cycle())
        .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, cycles_path))?;

    let disk_out_path = PathBuf::from(&args.disk_out);
    let disk_words = match machine.disk.highest_nonzero() {
        Some(last) => &machine.disk.as_slice()[..=last],
        None => &[],
    };
    write_word_image(create(&args.disk_out)?, disk_words)
        .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, disk_out_path))?;

    let monitor_path = PathBuf::from(&args.monitor);
    write_monitor_text(
        create(&args.monitor)?,
        machine.monitor.as_slice(),
        machine.monitor.highest_nonzero(),
    )
    .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, monitor_path))?;

    let monitor_yuv_path = PathBuf::from(&args.monitor_yuv);
    write_monitor_yuv(create(&args.monitor_yuv)?, machine.monitor.as_slice())
        .map_err(|e| Error::Io(e, IoErrorContext::WriteOutput, monitor_yuv_path))?;

    Ok(())
}
