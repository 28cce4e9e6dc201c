use std::{
    fmt,
    ops::{Index, IndexMut},
};

/// Occurrence count per distinct symbol of a message.
///
/// Array-backed over the full byte alphabet, so iteration order is always
/// ascending symbol order. Built once per message and never mutated after.
pub struct FrequencyTable {
    counts: [usize; 256],
}

impl FrequencyTable {
    /// Counts every symbol of `message`. An empty message yields an all-zero
    /// table.
    pub fn of(message: &[u8]) -> Self {
        let mut this = FrequencyTable::default();
        for &symbol in message {
            this[symbol] += 1;
        }
        this
    }

    /// Sum of all counts; equals the merged tree's root weight.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of distinct symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// The occurring symbols with their counts, in ascending symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl Index<u8> for FrequencyTable {
    type Output = usize;

    fn index(&self, symbol: u8) -> &usize {
        &self.counts[symbol as usize]
    }
}

impl IndexMut<u8> for FrequencyTable {
    fn index_mut(&mut self, symbol: u8) -> &mut usize {
        &mut self.counts[symbol as usize]
    }
}

// Cannot be derived because of the array size; only occurring symbols are
// worth printing anyway.
impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg_map = f.debug_map();
        for (symbol, count) in self.symbols() {
            dbg_map.entry(&symbol, &count);
        }
        dbg_map.finish()
    }
}
