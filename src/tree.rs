use {
    crate::{error::CodingError, freq::FrequencyTable},
    std::{cmp::Ordering, collections::BinaryHeap},
};

/// A Huffman tree. Every internal node has exactly two children; the
/// single-symbol degenerate tree is a bare [`Leaf`](HuffmanTree::Leaf).
#[derive(Debug)]
pub enum HuffmanTree {
    Leaf {
        symbol: u8,
        weight: usize,
    },
    Internal {
        weight: usize,
        left: Box<HuffmanTree>,
        right: Box<HuffmanTree>,
    },
}

/// Forest entry: a tree ranked by weight, with an insertion sequence number
/// breaking ties FIFO so that builds are deterministic.
struct Ranked {
    weight: usize,
    seq: u64,
    tree: HuffmanTree,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap surfaces the lightest, oldest tree first.
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl HuffmanTree {
    pub fn weight(&self) -> usize {
        match *self {
            HuffmanTree::Leaf { weight, .. } | HuffmanTree::Internal { weight, .. } => weight,
        }
    }

    /// Builds the tree by greedy merging: wrap each occurring symbol in a
    /// leaf, then repeatedly merge the two lowest-weight trees under a new
    /// internal node until one remains.
    ///
    /// Leaves enter the forest in ascending symbol order and ties are broken
    /// by insertion order, so two builds from the same frequencies produce
    /// identical trees. Fails with [`CodingError::EmptyInput`] when no symbol
    /// occurs; a single occurring symbol yields its leaf directly, no merge.
    pub fn build(frequencies: &FrequencyTable) -> Result<HuffmanTree, CodingError> {
        let mut forest = BinaryHeap::new();
        let mut seq = 0u64;
        for (symbol, weight) in frequencies.symbols() {
            forest.push(Ranked {
                weight,
                seq,
                tree: HuffmanTree::Leaf { symbol, weight },
            });
            seq += 1;
        }
        if forest.is_empty() {
            return Err(CodingError::EmptyInput);
        }

        while forest.len() > 1 {
            let first = forest.pop().unwrap(); // guarded: at least two remain
            let second = forest.pop().unwrap();
            let weight = first.weight + second.weight;
            forest.push(Ranked {
                weight,
                seq,
                tree: HuffmanTree::Internal {
                    weight,
                    left: Box::new(first.tree),
                    right: Box::new(second.tree),
                },
            });
            seq += 1;
        }

        let root = forest.pop().unwrap().tree; // guarded: exactly one remains
        log::trace!("Huffman tree: {:?}", root);
        Ok(root)
    }
}
