use {
    crate::{
        error::CodingError,
        pack::{pack_bits, unpack_bits},
        tree::HuffmanTree,
    },
    arr_macro::arr,
    bitvec::prelude::*,
    std::{collections::HashMap, fmt, ops::Index},
};

/// Mapping from bit-string to symbol, read off the leaves of a Huffman tree.
///
/// The key set is prefix-free by construction, which is what makes greedy
/// left-to-right decoding unambiguous. Built once, never mutated.
#[derive(Debug)]
pub struct ReverseTable {
    entries: HashMap<BitBox<u8, Lsb0>, u8>,
}

impl ReverseTable {
    /// Walks the tree depth-first, accumulating a 0 per left descent and a 1
    /// per right descent, and records the accumulated bits at each leaf.
    ///
    /// A bare-leaf tree (single distinct symbol) gets the fixed one-bit code
    /// `0` instead of the empty path the generic walk would assign; an empty
    /// code would encode every occurrence to nothing.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut entries = HashMap::new();
        match tree {
            &HuffmanTree::Leaf { symbol, .. } => {
                entries.insert(bitvec![u8, Lsb0; 0].into_boxed_bitslice(), symbol);
            }
            HuffmanTree::Internal { .. } => {
                let mut path = BitVec::new();
                Self::walk(tree, &mut path, &mut entries);
            }
        }
        ReverseTable { entries }
    }

    fn walk(
        tree: &HuffmanTree,
        path: &mut BitVec<u8, Lsb0>,
        entries: &mut HashMap<BitBox<u8, Lsb0>, u8>,
    ) {
        match tree {
            &HuffmanTree::Leaf { symbol, .. } => {
                entries.insert(path.clone().into_boxed_bitslice(), symbol);
            }
            HuffmanTree::Internal { left, right, .. } => {
                path.push(false);
                Self::walk(left, path, entries);
                path.pop();
                path.push(true);
                Self::walk(right, path, entries);
                path.pop();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The (code, symbol) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&BitSlice<u8, Lsb0>, u8)> + '_ {
        self.entries
            .iter()
            .map(|(code, &symbol)| (code.as_bitslice(), symbol))
    }

    /// Serializes the table for persisting a decoder without its tree.
    ///
    /// Layout, little endian: a `u16` entry count, then per entry the symbol,
    /// its code length in bits, and the code packed LSB-first into
    /// `ceil(len / 8)` bytes. Entries are written in ascending symbol order
    /// so equal tables serialize identically.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut entries: Vec<_> = self.iter().map(|(code, symbol)| (symbol, code)).collect();
        entries.sort_unstable_by_key(|&(symbol, _)| symbol);

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        for (symbol, code) in entries {
            bytes.push(symbol);
            bytes.push(code.len() as u8);
            bytes.extend_from_slice(&pack_bits(code));
        }
        bytes
    }

    /// Inverse of [`to_bytes`](Self::to_bytes). Returns the table and the
    /// number of bytes consumed.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), CodingError> {
        if bytes.len() < 2 {
            return Err(CodingError::TruncatedContainer {
                needed: 2,
                available: bytes.len(),
            });
        }
        let count = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        let mut at = 2;
        let mut entries = HashMap::with_capacity(count);
        for _ in 0..count {
            if bytes.len() < at + 2 {
                return Err(CodingError::TruncatedContainer {
                    needed: at + 2,
                    available: bytes.len(),
                });
            }
            let symbol = bytes[at];
            let code_len = bytes[at + 1] as usize;
            at += 2;
            if code_len == 0 {
                // A zero-length code can never resolve a bit.
                return Err(CodingError::MalformedBitSequence);
            }
            let code_bytes = (code_len + 7) / 8;
            if bytes.len() < at + code_bytes {
                return Err(CodingError::TruncatedContainer {
                    needed: at + code_bytes,
                    available: bytes.len(),
                });
            }
            let code = unpack_bits(&bytes[at..at + code_bytes], code_len)?;
            at += code_bytes;
            entries.insert(code.into_boxed_bitslice(), symbol);
        }
        Ok((ReverseTable { entries }, at))
    }
}

/// Mapping from symbol to its code; the symbol-keyed inverse of a
/// [`ReverseTable`]. Built once, never mutated.
pub struct CodeTable {
    codes: [Option<BitBox<u8, Lsb0>>; 256],
}

impl CodeTable {
    pub fn from_reverse(reverse: &ReverseTable) -> Self {
        let mut this = CodeTable {
            codes: arr![None; 256],
        };
        for (code, symbol) in reverse.iter() {
            this.codes[symbol as usize] = Some(code.to_bitvec().into_boxed_bitslice());
        }
        log::debug!("code table holds {} symbols", reverse.len());
        this
    }

    /// The code for `symbol`, if it occurred in the source message.
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Lsb0>> {
        self.codes[symbol as usize].as_deref()
    }
}

impl Index<u8> for CodeTable {
    type Output = BitSlice<u8, Lsb0>;

    fn index(&self, symbol: u8) -> &BitSlice<u8, Lsb0> {
        self.codes[symbol as usize]
            .as_deref()
            .unwrap_or_else(|| panic!("symbol {:#04x} has no code", symbol))
    }
}

// The human-readable symbol-to-code dump the driver persists next to the
// packed payload. Cannot be derived because of the array size.
impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg_map = f.debug_map();
        for (symbol, code) in self.codes.iter().enumerate() {
            if let Some(code) = code {
                let bits: String = code
                    .iter()
                    .by_vals()
                    .map(|bit| if bit { '1' } else { '0' })
                    .collect();
                dbg_map.entry(&(symbol as u8 as char), &bits);
            }
        }
        dbg_map.finish()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::freq::FrequencyTable};

    fn tables_for(message: &[u8]) -> (CodeTable, ReverseTable) {
        let frequencies = FrequencyTable::of(message);
        let tree = HuffmanTree::build(&frequencies).unwrap();
        let reverse = ReverseTable::from_tree(&tree);
        (CodeTable::from_reverse(&reverse), reverse)
    }

    #[test]
    fn every_occurring_symbol_gets_one_nonempty_code() {
        let message = b"ANNA HAS A BANANA IN A BANDANA";
        let (codes, reverse) = tables_for(message);
        assert_eq!(reverse.len(), 8);
        for &symbol in b"ANB HSID" {
            let code = codes.get(symbol).unwrap();
            assert!(!code.is_empty());
        }
        assert!(codes.get(b'Z').is_none());
    }

    #[test]
    fn most_frequent_symbol_gets_a_minimal_code() {
        let (codes, _) = tables_for(b"ANNA HAS A BANANA IN A BANDANA");
        let shortest = (0u8..=255)
            .filter_map(|symbol| codes.get(symbol))
            .map(|code| code.len())
            .min()
            .unwrap();
        assert_eq!(codes[b'A'].len(), shortest);
    }

    #[test]
    fn single_symbol_tree_gets_the_fixed_one_bit_code() {
        let (codes, reverse) = tables_for(b"AAAA");
        assert_eq!(reverse.len(), 1);
        assert_eq!(codes.get(b'A').unwrap().to_bitvec(), bitvec![u8, Lsb0; 0]);
    }

    #[test]
    fn serialization_round_trips() {
        let (_, reverse) = tables_for(b"ANNA HAS A BANANA IN A BANDANA");
        let bytes = reverse.to_bytes();
        let (restored, consumed) = ReverseTable::from_bytes(&bytes).unwrap();
        assert_eq!(consumed, bytes.len());

        let mut original: Vec<_> = reverse.iter().map(|(c, s)| (s, c.to_bitvec())).collect();
        let mut roundtripped: Vec<_> = restored.iter().map(|(c, s)| (s, c.to_bitvec())).collect();
        original.sort();
        roundtripped.sort();
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn serialization_rejects_truncated_input() {
        let (_, reverse) = tables_for(b"ABC");
        let bytes = reverse.to_bytes();
        for len in 0..bytes.len() {
            assert!(ReverseTable::from_bytes(&bytes[..len]).is_err());
        }
    }

    #[test]
    fn debug_dump_lists_symbols_and_codes() {
        let (codes, _) = tables_for(b"AAAB");
        let dump = format!("{:?}", codes);
        assert!(dump.contains("'A'"));
        assert!(dump.contains("'B'"));
        assert!(dump.contains('1'));
        assert!(dump.contains('0'));
    }
}
