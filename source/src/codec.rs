//! Decoder for serialized transactions.
//!
//! Only the transaction prefix is decoded. Outputs are walked to reach the
//! lock time and expiry but not kept, since nothing downstream reads them.
//! Any witness data following the prefix is ignored.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! u32         version (low 16 bits) | serialization type (high 16 bits)
//! varint      input count
//!   [32]u8      previous outpoint hash
//!   u32         previous outpoint index
//!   i8          previous outpoint tree
//!   u32         sequence
//! varint      output count
//!   i64         value in atoms
//!   u16         script version
//!   varint      script length, then script bytes
//! u32         lock time
//! u32         expiry height
//! ```

use thiserror::Error;
use votetime_types::{OutPoint, TransactionBody, TxHash, TxInput};

/// Serialization carries prefix and witness.
const SER_FULL: u16 = 0;
/// Serialization carries the prefix only.
const SER_NO_WITNESS: u16 = 1;

/// Smallest possible encoded input: hash + index + tree + sequence.
const MIN_INPUT_SIZE: usize = 32 + 4 + 1 + 4;
/// Smallest possible encoded output: value + script version + empty script length.
const MIN_OUTPUT_SIZE: usize = 8 + 2 + 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(String),

    #[error("unexpected end of data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("unsupported serialization type {0}")]
    UnsupportedSerialization(u16),

    #[error("{what} count {count} exceeds remaining data")]
    CountTooLarge { what: &'static str, count: u64 },
}

/// Decode a hex-encoded serialized transaction.
pub fn decode_transaction_hex(s: &str) -> Result<TransactionBody, DecodeError> {
    let bytes = hex::decode(s.trim()).map_err(|e| DecodeError::Hex(e.to_string()))?;
    decode_transaction(&bytes)
}

/// Decode a serialized transaction.
pub fn decode_transaction(bytes: &[u8]) -> Result<TransactionBody, DecodeError> {
    let mut cursor = 0usize;

    let raw_version = read_u32(bytes, &mut cursor)?;
    let version = (raw_version & 0xffff) as u16;
    let ser_type = (raw_version >> 16) as u16;
    if ser_type != SER_FULL && ser_type != SER_NO_WITNESS {
        return Err(DecodeError::UnsupportedSerialization(ser_type));
    }

    let input_count = read_count(bytes, &mut cursor, "input", MIN_INPUT_SIZE)?;
    let mut inputs = Vec::with_capacity(input_count);
    for _ in 0..input_count {
        let hash = TxHash::new(read_array::<32>(bytes, &mut cursor)?);
        let index = read_u32(bytes, &mut cursor)?;
        let tree = read_u8(bytes, &mut cursor)? as i8;
        let sequence = read_u32(bytes, &mut cursor)?;
        inputs.push(TxInput {
            previous_outpoint: OutPoint::new(hash, index, tree),
            sequence,
        });
    }

    let output_count = read_count(bytes, &mut cursor, "output", MIN_OUTPUT_SIZE)?;
    for _ in 0..output_count {
        // value, script version
        take(bytes, &mut cursor, 8 + 2)?;
        let script_len = read_count(bytes, &mut cursor, "script byte", 1)?;
        take(bytes, &mut cursor, script_len)?;
    }

    let lock_time = read_u32(bytes, &mut cursor)?;
    let expiry = read_u32(bytes, &mut cursor)?;

    Ok(TransactionBody {
        version,
        inputs,
        lock_time,
        expiry,
    })
}

fn take<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    let remaining = bytes.len() - *cursor;
    if len > remaining {
        return Err(DecodeError::UnexpectedEof {
            offset: *cursor,
            needed: len - remaining,
        });
    }
    let data = &bytes[*cursor..*cursor + len];
    *cursor += len;
    Ok(data)
}

fn read_array<const N: usize>(bytes: &[u8], cursor: &mut usize) -> Result<[u8; N], DecodeError> {
    let mut array = [0u8; N];
    array.copy_from_slice(take(bytes, cursor, N)?);
    Ok(array)
}

fn read_u8(bytes: &[u8], cursor: &mut usize) -> Result<u8, DecodeError> {
    Ok(read_array::<1>(bytes, cursor)?[0])
}

fn read_u16(bytes: &[u8], cursor: &mut usize) -> Result<u16, DecodeError> {
    Ok(u16::from_le_bytes(read_array(bytes, cursor)?))
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<u32, DecodeError> {
    Ok(u32::from_le_bytes(read_array(bytes, cursor)?))
}

fn read_u64(bytes: &[u8], cursor: &mut usize) -> Result<u64, DecodeError> {
    Ok(u64::from_le_bytes(read_array(bytes, cursor)?))
}

/// Compact-size integer.
fn read_varint(bytes: &[u8], cursor: &mut usize) -> Result<u64, DecodeError> {
    match read_u8(bytes, cursor)? {
        0xff => read_u64(bytes, cursor),
        0xfe => read_u32(bytes, cursor).map(u64::from),
        0xfd => read_u16(bytes, cursor).map(u64::from),
        n => Ok(u64::from(n)),
    }
}

/// A varint item count, bounded by what the remaining data could hold.
fn read_count(
    bytes: &[u8],
    cursor: &mut usize,
    what: &'static str,
    min_item_size: usize,
) -> Result<usize, DecodeError> {
    let count = read_varint(bytes, cursor)?;
    let max = ((bytes.len() - *cursor) / min_item_size) as u64;
    if count > max {
        return Err(DecodeError::CountTooLarge { what, count });
    }
    Ok(count as usize)
}
