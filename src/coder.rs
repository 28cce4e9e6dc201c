use {
    crate::{
        code::{CodeTable, ReverseTable},
        error::CodingError,
        freq::FrequencyTable,
        pack::pack_bits,
        tree::HuffmanTree,
    },
    bitvec::prelude::*,
};

/// A Huffman coder built from one message.
///
/// [`build`](Coder::build) runs the whole pipeline: count frequencies, grow
/// and merge the forest, derive both code tables, and encode the message.
/// Everything is immutable afterwards, so sharing a coder across read-only
/// uses is safe.
#[derive(Debug)]
pub struct Coder {
    tree: HuffmanTree,
    codes: CodeTable,
    reverse: ReverseTable,
    bits: BitVec<u8, Lsb0>,
}

impl Coder {
    /// Builds the code from `message` and encodes it. Fails with
    /// [`CodingError::EmptyInput`] when the message has no symbols.
    pub fn build(message: &[u8]) -> Result<Coder, CodingError> {
        let frequencies = FrequencyTable::of(message);
        log::trace!("symbol frequencies: {:?}", frequencies);

        let tree = HuffmanTree::build(&frequencies)?;
        let reverse = ReverseTable::from_tree(&tree);
        let codes = CodeTable::from_reverse(&reverse);

        let mut coder = Coder {
            tree,
            codes,
            reverse,
            bits: BitVec::new(),
        };
        coder.bits = coder.encode(message)?;
        log::debug!(
            "encoded {} symbols into {} bits",
            message.len(),
            coder.bits.len()
        );
        Ok(coder)
    }

    /// Encodes an arbitrary message against this coder's table by appending
    /// each symbol's code. Fails with [`CodingError::UnknownSymbol`] when a
    /// symbol has no entry; that cannot happen for the build message but can
    /// for any other.
    pub fn encode(&self, message: &[u8]) -> Result<BitVec<u8, Lsb0>, CodingError> {
        let mut bits = BitVec::new();
        for &symbol in message {
            let code = self
                .codes
                .get(symbol)
                .ok_or(CodingError::UnknownSymbol { symbol })?;
            bits.extend_from_bitslice(code);
        }
        Ok(bits)
    }

    /// The bit sequence of the build message.
    pub fn encoded_bits(&self) -> &BitSlice<u8, Lsb0> {
        &self.bits
    }

    /// The build message's bit sequence packed for storage. The true bit
    /// count is [`encoded_bits`](Coder::encoded_bits)`().len()` and must be
    /// persisted with these bytes.
    pub fn packed_bytes(&self) -> Vec<u8> {
        pack_bits(&self.bits)
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    pub fn reverse_table(&self) -> &ReverseTable {
        &self.reverse
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    /// A self-contained buffer holding everything decompression needs.
    ///
    /// Layout, little endian: the true bit count as a `u64`, the serialized
    /// reverse table's byte length as a `u32`, the table
    /// ([`ReverseTable::to_bytes`]), then the packed payload.
    pub fn container(&self) -> Vec<u8> {
        let table = self.reverse.to_bytes();
        let payload = pack_bits(&self.bits);
        let mut buffer = Vec::with_capacity(12 + table.len() + payload.len());
        buffer.extend_from_slice(&(self.bits.len() as u64).to_le_bytes());
        buffer.extend_from_slice(&(table.len() as u32).to_le_bytes());
        buffer.extend_from_slice(&table);
        buffer.extend_from_slice(&payload);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::decode::decode};

    const SCENARIO: &[u8] = b"ANNA HAS A BANANA IN A BANDANA";

    #[test]
    fn scenario_round_trips() {
        let coder = Coder::build(SCENARIO).unwrap();
        let decoded = decode(coder.encoded_bits(), coder.reverse_table()).unwrap();
        assert_eq!(decoded, SCENARIO);
    }

    #[test]
    fn scenario_bit_length_matches_the_code_cost() {
        let coder = Coder::build(SCENARIO).unwrap();
        let frequencies = FrequencyTable::of(SCENARIO);
        let cost: usize = frequencies
            .symbols()
            .map(|(symbol, count)| coder.code_table()[symbol].len() * count)
            .sum();
        assert_eq!(coder.encoded_bits().len(), cost);
        assert_eq!(cost, 74);
        // Strictly shorter than the 8-bit-per-symbol original.
        assert!(cost < SCENARIO.len() * 8);
    }

    #[test]
    fn packed_bytes_cover_the_bit_sequence() {
        let coder = Coder::build(SCENARIO).unwrap();
        let packed = coder.packed_bytes();
        assert_eq!(packed.len(), (coder.encoded_bits().len() + 7) / 8);
    }

    #[test]
    fn tree_weight_matches_the_message_length() {
        let coder = Coder::build(SCENARIO).unwrap();
        assert_eq!(coder.tree().weight(), SCENARIO.len());
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_eq!(Coder::build(b"").unwrap_err(), CodingError::EmptyInput);
    }

    #[test]
    fn encoding_a_foreign_symbol_fails() {
        let coder = Coder::build(b"AAAB").unwrap();
        assert_eq!(
            coder.encode(b"AZ").unwrap_err(),
            CodingError::UnknownSymbol { symbol: b'Z' }
        );
    }

    #[test]
    fn cached_bits_match_a_fresh_encode() {
        let coder = Coder::build(SCENARIO).unwrap();
        assert_eq!(coder.encode(SCENARIO).unwrap(), coder.encoded_bits());
    }
}
