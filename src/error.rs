use thiserror::Error;

/// Failure conditions of the coding engine.
///
/// Every variant is a deterministic function of the inputs; retrying the same
/// call with the same data yields the same result. A caller hitting
/// [`EmptyInput`](CodingError::EmptyInput) or
/// [`UnknownSymbol`](CodingError::UnknownSymbol) has a usage bug, not a
/// transient error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodingError {
    /// The message has zero symbols; no tree can be built from it.
    #[error("cannot build a code from an empty message")]
    EmptyInput,

    /// The encoder was asked for a symbol the code table has no entry for.
    #[error("symbol {symbol:#04x} has no entry in the code table")]
    UnknownSymbol {
        /// The symbol that had no code.
        symbol: u8,
    },

    /// The bit sequence cannot be resolved against the reverse table: it
    /// walks off the code set, ends in the middle of a code, or is nonempty
    /// while the table is empty.
    #[error("bit sequence does not resolve against the code table")]
    MalformedBitSequence,

    /// An unpack requested more bits than the packed buffer can hold.
    #[error("requested {requested} bits but the packed buffer holds at most {capacity}")]
    InvalidPackedLength {
        /// Bit count the caller asked for.
        requested: usize,
        /// Bits actually available, `bytes.len() * 8`.
        capacity: usize,
    },

    /// A serialized container is shorter than its framing claims.
    #[error("container truncated: needed {needed} bytes, had {available}")]
    TruncatedContainer {
        /// Bytes the framing required.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },
}
