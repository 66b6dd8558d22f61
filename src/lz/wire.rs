//! On-the-wire factor stream encodings (spec.md §6.2): a human-readable
//! factor format and the binary dynamic-operation record format, in the
//! style of `json/validate.rs`'s hand-written error enum.

use std::fmt;
use std::io::{self, Read, Write};
use std::vec::Vec;

use super::factor::Factor;

/// Writes `factors` in the readable format: a literal is its raw byte, a
/// reference is `(src,len)`, with no separators between consecutive
/// records.
pub fn write_readable(factors: &[Factor], out: &mut impl Write) -> io::Result<()> {
    for f in factors {
        match *f {
            Factor::Literal(b) => out.write_all(&[b])?,
            Factor::Reference { src, len } => write!(out, "({src},{len})")?,
        }
    }
    Ok(())
}

/// A single dynamic-benchmark operation record (spec.md §6.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Insert(u64),
    Delete(u64),
    Query(u64),
}

impl Op {
    fn opcode(&self) -> u8 {
        match self {
            Op::Insert(_) => b'I',
            Op::Delete(_) => b'D',
            Op::Query(_) => b'Q',
        }
    }

    fn key(&self) -> u64 {
        match *self {
            Op::Insert(k) | Op::Delete(k) | Op::Query(k) => k,
        }
    }
}

/// Errors decoding a binary operation stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireErrorKind {
    /// Stream ended before a full opcode byte could be read.
    TruncatedOpcode,
    /// The opcode byte was not one of `'I'`, `'D'`, `'Q'`.
    UnknownOpcode { byte: u8 },
    /// Stream ended partway through the little-endian `u64` key.
    TruncatedKey,
}

impl fmt::Display for WireErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedOpcode => write!(f, "stream ended before an opcode byte"),
            Self::UnknownOpcode { byte } => write!(f, "unknown opcode byte 0x{byte:02X}"),
            Self::TruncatedKey => write!(f, "stream ended partway through a record's key"),
        }
    }
}

/// A malformed binary factor/operation stream, with the byte offset of the
/// record that failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireError {
    pub kind: WireErrorKind,
    pub record_offset: usize,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (record at byte offset {})", self.kind, self.record_offset)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WireError {}

/// Writes `ops` as a sequence of `(opcode: u8, key: u64 little-endian)`
/// records.
pub fn write_binary(ops: &[Op], out: &mut impl Write) -> io::Result<()> {
    for op in ops {
        out.write_all(&[op.opcode()])?;
        out.write_all(&op.key().to_le_bytes())?;
    }
    Ok(())
}

/// Decodes a binary operation stream produced by [`write_binary`].
pub fn read_binary(input: &mut impl Read) -> Result<Vec<Op>, WireError> {
    let mut ops = Vec::new();
    let mut offset = 0usize;

    loop {
        let mut opcode_buf = [0u8; 1];
        match input.read(&mut opcode_buf) {
            Ok(0) => return Ok(ops),
            Ok(_) => {}
            Err(_) => return Err(WireError { kind: WireErrorKind::TruncatedOpcode, record_offset: offset }),
        }

        let mut key_buf = [0u8; 8];
        if input.read_exact(&mut key_buf).is_err() {
            return Err(WireError { kind: WireErrorKind::TruncatedKey, record_offset: offset });
        }
        let key = u64::from_le_bytes(key_buf);

        let op = match opcode_buf[0] {
            b'I' => Op::Insert(key),
            b'D' => Op::Delete(key),
            b'Q' => Op::Query(key),
            byte => return Err(WireError { kind: WireErrorKind::UnknownOpcode { byte }, record_offset: offset }),
        };
        ops.push(op);
        offset += 9;
    }
}
