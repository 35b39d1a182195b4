use std::io::{BufRead, Lines};
use std::iter::Peekable;

use thiserror::Error;

use crate::io::Record;

/// Errors produced while pulling records off the input stream. All of them
/// abort the run; none are recoverable.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not read from the input stream")]
    Io(#[from] std::io::Error),

    #[error("record {record} is truncated: the stream ended inside its {section} block")]
    TruncatedRecord {
        record: usize,
        section: &'static str,
    },

    #[error(
        "record {record} has {qual_len} quality characters for a {seq_len} base sequence"
    )]
    QualityLengthMismatch {
        record: usize,
        seq_len: usize,
        qual_len: usize,
    },

    #[error("record {record} has a header but no sequence")]
    EmptySequence { record: usize },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Format {
    Fasta,
    Fastq,
}

/// A streaming fasta/fastq reader over any buffered source.
///
/// The format is sniffed from the first character of the very first line:
/// `>` means fasta, anything else is read as fastq. Records are yielded
/// lazily in a single pass; the reader cannot be restarted.
///
/// Both formats allow the sequence to span multiple lines. For fastq, the
/// quality block is also multi-line, and its first line may itself begin
/// with `@` - the reader keeps pulling physical lines until the quality
/// length catches up with the sequence length, so such a line is never
/// mistaken for the next record header.
pub struct FastxReader<R: BufRead> {
    lines: Peekable<Lines<R>>,
    format: Option<Format>,
    // 1-based ordinal of the record currently being parsed
    records: usize,
}

impl<R: BufRead> FastxReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines().peekable(),
            format: None,
            records: 0,
        }
    }

    /// Pull the next physical line off the stream, if one remains.
    fn next_line(&mut self) -> Result<Option<String>, ReadError> {
        Ok(self.lines.next().transpose()?)
    }

    /// The first character of the next physical line, without consuming it.
    /// Returns `None` at end of stream; a pending I/O error is also reported
    /// as `None` here and surfaces on the following `next_line` call.
    fn peek_first_char(&mut self) -> Option<char> {
        match self.lines.peek() {
            Some(Ok(line)) => line.chars().next(),
            _ => None,
        }
    }

    /// A fasta record: every following line up to the next `>` header (or
    /// the end of the stream) is sequence.
    fn read_fasta(&mut self, header: &str) -> Result<Record, ReadError> {
        let mut seq = String::new();

        while self.peek_first_char() != Some('>') {
            match self.next_line()? {
                Some(line) => seq.push_str(line.trim()),
                None => break,
            }
        }

        if seq.is_empty() {
            return Err(ReadError::EmptySequence {
                record: self.records,
            });
        }

        Ok(Record {
            id: strip_sentinel(header, '>'),
            seq,
            qual: None,
        })
    }

    /// A fastq record: sequence lines up to the `+` separator, then quality
    /// lines until the quality length equals the sequence length.
    fn read_fastq(&mut self, header: &str) -> Result<Record, ReadError> {
        let mut seq = String::new();

        loop {
            match self.next_line()? {
                Some(line) if line.starts_with('+') => break,
                Some(line) => seq.push_str(line.trim()),
                None => {
                    return Err(ReadError::TruncatedRecord {
                        record: self.records,
                        section: "sequence",
                    })
                }
            }
        }

        if seq.is_empty() {
            return Err(ReadError::EmptySequence {
                record: self.records,
            });
        }

        // Pull quality lines until the length catches up with the sequence.
        // While the quality is still short, the next line is quality content
        // no matter what character it starts with.
        let mut qual: Vec<u8> = Vec::with_capacity(seq.len());
        while qual.len() < seq.len() {
            match self.next_line()? {
                Some(line) => qual.extend(line.trim().bytes()),
                None => {
                    return Err(ReadError::TruncatedRecord {
                        record: self.records,
                        section: "quality",
                    })
                }
            }
        }

        if qual.len() != seq.len() {
            return Err(ReadError::QualityLengthMismatch {
                record: self.records,
                seq_len: seq.len(),
                qual_len: qual.len(),
            });
        }

        Ok(Record {
            id: strip_sentinel(header, '@'),
            seq,
            qual: Some(qual),
        })
    }
}

impl<R: BufRead> Iterator for FastxReader<R> {
    type Item = Result<Record, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = match self.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        self.records += 1;

        // the first line of the stream decides the format for the whole file
        let format = *self.format.get_or_insert_with(|| {
            if header.starts_with('>') {
                Format::Fasta
            } else {
                Format::Fastq
            }
        });

        let result = match format {
            Format::Fasta => self.read_fasta(&header),
            Format::Fastq => self.read_fastq(&header),
        };

        Some(result)
    }
}

fn strip_sentinel(header: &str, sentinel: char) -> String {
    let header = header.trim();
    header.strip_prefix(sentinel).unwrap_or(header).to_string()
}
