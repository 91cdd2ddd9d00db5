//! Shuffled permutation table used to hash lattice coordinates.

use crate::random::Random;

/// A 512-entry permutation table.
///
/// The first 256 entries are a Fisher-Yates shuffle of `0..=255`; the
/// second 256 entries mirror the first so that two chained lookups
/// (`table[table[x] + y]`) never index out of bounds. Immutable after
/// construction, so shared references are safe to read concurrently.
#[derive(Debug, Clone)]
pub struct PermutationTable {
    entries: [u8; 512],
}

impl PermutationTable {
    /// Build a table by shuffling the identity permutation with `random`.
    ///
    /// The shuffle walks i from 255 down to 1, exchanging entry i with a
    /// uniformly drawn entry in `[0, i]`.
    pub fn new<R: Random>(random: &mut R) -> Self {
        let mut half = [0u8; 256];
        for (i, entry) in half.iter_mut().enumerate() {
            *entry = i as u8;
        }

        for i in (1..256).rev() {
            let j = random.next_i32_bounded(i as i32 + 1) as usize;
            half.swap(i, j);
        }

        let mut entries = [0u8; 512];
        entries[..256].copy_from_slice(&half);
        entries[256..].copy_from_slice(&half);

        Self { entries }
    }

    /// Look up the table entry at `index`.
    ///
    /// # Panics
    /// Panics if `index >= 512`. The evaluator's chained lookups stay
    /// within bounds by construction: an entry (max 255) plus a masked
    /// lattice coordinate (max 255) plus 1 is at most 511.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> usize {
        usize::from(self.entries[index])
    }

    /// All 512 entries, in order.
    #[must_use]
    pub fn entries(&self) -> &[u8; 512] {
        &self.entries
    }
}
