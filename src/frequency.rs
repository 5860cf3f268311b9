use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{HuffmanError, Result};

/// Occurrence count for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqTable {
    counts: [u64; 256],
}

impl FreqTable {
    pub fn new() -> Self {
        FreqTable { counts: [0; 256] }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = FreqTable::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Counts the raw bytes of a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let table = FreqTable::from_bytes(&data);
        debug!(
            "Counted {} bytes ({} distinct) from {}",
            data.len(),
            table.distinct_count(),
            path.display()
        );
        Ok(table)
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    pub fn set(&mut self, byte: u8, count: u64) {
        self.counts[byte as usize] = count;
    }

    pub fn distinct_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts; fails if it does not fit in a `u64`.
    pub fn total(&self) -> Result<u64> {
        self.counts.iter().try_fold(0u64, |acc, &c| {
            acc.checked_add(c)
                .ok_or_else(|| HuffmanError::invalid_input("total frequency overflows u64"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(byte, &c)| (byte as u8, c))
    }
}

impl Default for FreqTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Repeated bytes accumulate, saturating at `u64::MAX`.
impl FromIterator<(u8, u64)> for FreqTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = FreqTable::new();
        for (byte, count) in iter {
            let slot = &mut table.counts[byte as usize];
            *slot = slot.saturating_add(count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_byte() {
        let freq = FreqTable::from_bytes(b"aabccc");
        assert_eq!(freq.get(b'a'), 2);
        assert_eq!(freq.get(b'b'), 1);
        assert_eq!(freq.get(b'c'), 3);
        assert_eq!(freq.get(b'd'), 0);
        assert_eq!(freq.distinct_count(), 3);
        assert_eq!(freq.total().unwrap(), 6);
    }

    #[test]
    fn iterates_in_byte_order() {
        let freq = FreqTable::from_bytes(b"zya\xff\x00");
        let bytes: Vec<u8> = freq.iter().map(|(b, _)| b).collect();
        assert_eq!(bytes, vec![0x00, b'a', b'y', b'z', 0xff]);
    }

    #[test]
    fn empty_source_has_no_entries() {
        let freq = FreqTable::from_bytes(b"");
        assert!(freq.is_empty());
        assert_eq!(freq.iter().count(), 0);
    }

    #[test]
    fn collects_from_pairs() {
        let freq: FreqTable = vec![(b'a', 2), (b'b', 1), (b'a', 1)].into_iter().collect();
        assert_eq!(freq.get(b'a'), 3);
        assert_eq!(freq.get(b'b'), 1);
    }

    #[test]
    fn huge_counts_saturate_and_total_reports_overflow() {
        let freq: FreqTable = vec![(b'a', u64::MAX), (b'a', 5)].into_iter().collect();
        assert_eq!(freq.get(b'a'), u64::MAX);
        assert_eq!(freq.total().unwrap(), u64::MAX);

        let mut freq = freq;
        freq.set(b'b', 1);
        let err = freq.total().unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidInput { .. }));
    }
}
