//! Huffman coding: build a minimum-redundancy prefix code from the byte
//! frequencies of a message, encode the message into a bit sequence with it,
//! and decode such a sequence back into the original message.
//!
//! [`Coder::build`] runs the whole pipeline and exposes the encode result,
//! the symbol-to-code table, and its bit-string-to-symbol inverse. Decoding
//! only needs the inverse table, so [`decode`] is a free function usable
//! against a table reloaded from [`ReverseTable::from_bytes`] without ever
//! rebuilding a tree. [`pack_bits`]/[`unpack_bits`] are the bit-to-byte
//! boundary for persistence; the packed form is lossy about trailing zero
//! bits, so the true bit count always travels with the bytes.
//!
//! [`compress`] and [`decompress`] bundle all of that into a self-contained
//! container for callers that just want a round trip.

mod code;
mod coder;
mod decode;
mod error;
mod freq;
mod pack;
mod tree;

pub use crate::{
    code::{CodeTable, ReverseTable},
    coder::Coder,
    decode::decode,
    error::CodingError,
    freq::FrequencyTable,
    pack::{pack_bits, unpack_bits},
    tree::HuffmanTree,
};

// Container framing ahead of the table and payload: the true bit count,
// then the serialized table's byte length.
const BIT_COUNT_LEN: usize = 8;
const TABLE_LEN_LEN: usize = 4;
const HEADER_LEN: usize = BIT_COUNT_LEN + TABLE_LEN_LEN;

/// Compresses `message` into a self-contained container: [`Coder::build`]
/// followed by [`Coder::container`].
pub fn compress(message: &[u8]) -> Result<Vec<u8>, CodingError> {
    let coder = Coder::build(message)?;
    Ok(coder.container())
}

/// Decompresses a container written by [`compress`] (or
/// [`Coder::container`]) back into the original message.
///
/// Fails with [`CodingError::TruncatedContainer`] when the buffer is shorter
/// than its framing claims, and with the decode errors of [`decode`] and
/// [`unpack_bits`] when the payload does not resolve.
pub fn decompress(buffer: &[u8]) -> Result<Vec<u8>, CodingError> {
    if buffer.len() < HEADER_LEN {
        return Err(CodingError::TruncatedContainer {
            needed: HEADER_LEN,
            available: buffer.len(),
        });
    }
    let (header, rest) = buffer.split_at(HEADER_LEN);

    let mut bit_count = [0u8; BIT_COUNT_LEN];
    bit_count.copy_from_slice(&header[..BIT_COUNT_LEN]);
    let bit_count = u64::from_le_bytes(bit_count) as usize;

    let mut table_len = [0u8; TABLE_LEN_LEN];
    table_len.copy_from_slice(&header[BIT_COUNT_LEN..]);
    let table_len = u32::from_le_bytes(table_len) as usize;

    if rest.len() < table_len {
        return Err(CodingError::TruncatedContainer {
            needed: HEADER_LEN + table_len,
            available: buffer.len(),
        });
    }
    let (table_bytes, payload) = rest.split_at(table_len);
    let (table, _) = ReverseTable::from_bytes(table_bytes)?;

    let bits = unpack_bits(payload, bit_count)?;
    decode(&bits, &table)
}
