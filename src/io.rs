use itertools::Itertools;
use std::io::Write;

/// Width at which plain (fasta) sequences are wrapped on output.
const FASTA_LINE_WIDTH: usize = 60;

/// One parsed read.
///
/// # Fields
///
/// * `id` - The original header text, with the leading sentinel stripped.
/// * `seq` - The full sequence, reassembled across line breaks.
/// * `qual` - Per-base quality scores as raw ordinal values; `None` for
///   fasta input. When present, the length always equals `seq.len()`.
#[derive(Debug, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub seq: String,
    pub qual: Option<Vec<u8>>,
}

/// Formats a read and writes it to the provided writer, mirroring the
/// input format: fastq when a quality string is given, fasta otherwise.
///
/// # Arguments
///
/// * `writer` - A mutable reference to an object that implements the `Write` trait. Since this is
///   `std::io::Write` and *not* `std::fmt::Write`, this does not accept Strings. It is acceptable
///   to use a `std::io::Cursor` instead.
/// * `name` - The synthetic read name to emit.
/// * `seq` - The sequence of the read.
/// * `qual` - Quality scores, written back as their raw character values.
///
/// # Returns
///
/// This function returns a `std::io::Result<()>` indicating the success or failure of the write operation.
pub fn write_read(
    writer: &mut impl Write,
    name: &str,
    seq: &str,
    qual: Option<&[u8]>,
) -> std::io::Result<()> {
    match qual {
        Some(qual) => {
            writeln!(writer, "@{name}\n{seq}\n+")?;
            writer.write_all(qual)?;
            writeln!(writer)
        }
        None => {
            writeln!(writer, ">{name}")?;
            for line in &seq.chars().chunks(FASTA_LINE_WIDTH) {
                writeln!(writer, "{}", line.collect::<String>())?;
            }
            Ok(())
        }
    }
}
