use {
    crate::{code::ReverseTable, error::CodingError},
    bitvec::prelude::*,
    std::ptr,
};

/// One node of the decode trie rebuilt from a [`ReverseTable`]. Walking a
/// code's bits from the root lands on the node holding its symbol.
#[derive(Default)]
struct TrieNode {
    symbol: Option<u8>,
    zero: Option<Box<TrieNode>>,
    one: Option<Box<TrieNode>>,
}

fn build_trie(table: &ReverseTable) -> TrieNode {
    let mut root = TrieNode::default();
    for (code, symbol) in table.iter() {
        let mut node = &mut root;
        for bit in code.iter().by_vals() {
            let slot = if bit { &mut node.one } else { &mut node.zero };
            node = &mut **slot.get_or_insert_with(Box::default);
        }
        node.symbol = Some(symbol);
    }
    root
}

/// Greedily resolves `bits` against `table`, reconstructing the message.
///
/// Usable without a live [`Coder`](crate::Coder): the table may come from
/// [`ReverseTable::from_bytes`] instead of a freshly built tree. Because the
/// table's keys are prefix-free, each code resolves at exactly one point of
/// the walk.
///
/// Fails with [`CodingError::MalformedBitSequence`] when the walk leaves the
/// code set, when the sequence ends in the middle of a code (the tail is
/// never silently dropped), or when a nonempty sequence is decoded against
/// an empty table. An empty sequence decodes to an empty message.
pub fn decode(bits: &BitSlice<u8, Lsb0>, table: &ReverseTable) -> Result<Vec<u8>, CodingError> {
    if bits.is_empty() {
        return Ok(Vec::new());
    }
    if table.is_empty() {
        return Err(CodingError::MalformedBitSequence);
    }

    let root = build_trie(table);
    let mut message = Vec::new();
    let mut node = &root;
    for bit in bits.iter().by_vals() {
        let next = if bit { node.one.as_deref() } else { node.zero.as_deref() };
        node = next.ok_or(CodingError::MalformedBitSequence)?;
        if let Some(symbol) = node.symbol {
            message.push(symbol);
            node = &root;
        }
    }
    if !ptr::eq(node, &root) {
        return Err(CodingError::MalformedBitSequence);
    }
    Ok(message)
}
