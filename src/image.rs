//! Hex-line image I/O (C6): the assembler emits instruction/data images in
//! this format, and the simulator loads instruction/data/disk images and
//! the IRQ2 event schedule from it.

use std::io::{self, BufRead, Write};

/// Reads one 12-hex-digit instruction word per line.
pub fn read_instruction_image<R: BufRead>(reader: R) -> io::Result<Vec<u64>> {
    reader
        .lines()
        .map(|line| {
            let line = line?;
            let trimmed = line.trim();
            u64::from_str_radix(trimmed, 16)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}

/// Writes one 12-hex-digit instruction word per line, uppercase.
pub fn write_instruction_image<W: Write>(mut writer: W, words: &[u64]) -> io::Result<()> {
    for word in words {
        writeln!(writer, "{:012X}", word)?;
    }
    Ok(())
}

/// Reads one 8-hex-digit 32-bit word per line (data or disk images).
pub fn read_word_image<R: BufRead>(reader: R) -> io::Result<Vec<u32>> {
    reader
        .lines()
        .map(|line| {
            let line = line?;
            let trimmed = line.trim();
            u32::from_str_radix(trimmed, 16)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}

/// Writes one 8-hex-digit 32-bit word per line, uppercase.
pub fn write_word_image<W: Write>(mut writer: W, words: &[u32]) -> io::Result<()> {
    for word in words {
        writeln!(writer, "{:08X}", word)?;
    }
    Ok(())
}

/// Reads the IRQ2 event schedule: one decimal cycle number per line,
/// monotonically non-decreasing.
pub fn read_irq2_schedule<R: BufRead>(reader: R) -> io::Result<Vec<u64>> {
    reader
        .lines()
        .map(|line| {
            let line = line?;
            line.trim()
                .parse::<u64>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}

/// Writes the 2-hex-uppercase-byte monitor text image, from index 0 up to
/// and including the highest non-zero pixel. Empty if no pixel was written.
pub fn write_monitor_text<W: Write>(
    mut writer: W,
    pixels: &[u8],
    highest_nonzero: Option<usize>,
) -> io::Result<()> {
    if let Some(last) = highest_nonzero {
        for byte in &pixels[..=last] {
            writeln!(writer, "{:02X}", byte)?;
        }
    }
    Ok(())
}

/// Writes the raw monitor frame buffer bytes.
pub fn write_monitor_yuv<W: Write>(mut writer: W, pixels: &[u8]) -> io::Result<()> {
    writer.write_all(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_image_round_trips() {
        let words = vec![0x0000_0000_0001u64, 0xFFFF_FFFF_FFFFu64];
        let mut buf = Vec::new();
        write_instruction_image(&mut buf, &words).unwrap();
        assert_eq!(
            read_instruction_image(io::Cursor::new(buf)).unwrap(),
            words
        );
    }

    #[test]
    fn word_image_round_trips() {
        let words = vec![0u32, 0xDEAD_BEEFu32];
        let mut buf = Vec::new();
        write_word_image(&mut buf, &words).unwrap();
        assert_eq!(read_word_image(io::Cursor::new(buf)).unwrap(), words);
    }

    #[test]
    fn monitor_text_stops_at_highest_nonzero_pixel() {
        let pixels = [0u8, 1, 0, 2, 0, 0];
        let mut buf = Vec::new();
        write_monitor_text(&mut buf, &pixels, Some(3)).unwrap();
        assert_eq!(buf, b"00\n01\n00\n02\n");
    }

    #[test]
    fn monitor_text_is_empty_with_no_pixels() {
        let pixels = [0u8; 4];
        let mut buf = Vec::new();
        write_monitor_text(&mut buf, &pixels, None).unwrap();
        assert!(buf.is_empty());
    }
}
