/*!
 * Burst Sequence
 * Alternating CPU and I/O burst durations for a single process
 */

use crate::core::types::Millis;

/// Ordered burst durations; even indices are CPU bursts, odd indices are I/O
///
/// The length is fixed at creation. Only the burst currently executing on a
/// core is ever shortened, and only by the time it actually ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstSequence {
    durations: Vec<Millis>,
}

impl BurstSequence {
    pub fn new(durations: Vec<Millis>) -> Self {
        Self { durations }
    }

    #[inline(always)]
    pub const fn is_cpu(index: usize) -> bool {
        index % 2 == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    #[inline]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.durations.len()
    }

    /// Duration left at `index` (0 past the end)
    #[inline]
    pub fn get(&self, index: usize) -> Millis {
        self.durations.get(index).copied().unwrap_or(0)
    }

    /// Sum of the CPU burst entries as they stand right now
    pub fn remaining_cpu(&self) -> Millis {
        self.durations.iter().step_by(2).sum()
    }

    /// Total length of the I/O bursts that precede `cursor`
    pub fn io_before(&self, cursor: usize) -> Millis {
        self.durations
            .iter()
            .take(cursor)
            .skip(1)
            .step_by(2)
            .sum()
    }

    /// Shorten the burst at `index` by up to `elapsed`, returning the amount
    /// actually consumed
    pub fn consume(&mut self, index: usize, elapsed: Millis) -> Millis {
        match self.durations.get_mut(index) {
            Some(left) => {
                let used = elapsed.min(*left);
                *left -= used;
                used
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remaining_cpu_sums_even_entries() {
        let bursts = BurstSequence::new(vec![100, 40, 60, 20, 10]);
        assert_eq!(bursts.remaining_cpu(), 170);
    }

    #[test]
    fn test_io_before_cursor() {
        let bursts = BurstSequence::new(vec![100, 40, 60, 20, 10]);
        assert_eq!(bursts.io_before(0), 0);
        assert_eq!(bursts.io_before(1), 0);
        assert_eq!(bursts.io_before(2), 40);
        assert_eq!(bursts.io_before(4), 60);
        assert_eq!(bursts.io_before(5), 60);
    }

    #[test]
    fn test_consume_is_clamped() {
        let mut bursts = BurstSequence::new(vec![30, 10, 5]);

        assert_eq!(bursts.consume(0, 12), 12);
        assert_eq!(bursts.get(0), 18);

        // Overshoot never underflows
        assert_eq!(bursts.consume(0, 50), 18);
        assert_eq!(bursts.get(0), 0);

        assert_eq!(bursts.consume(9, 5), 0);
        assert_eq!(bursts.remaining_cpu(), 5);
    }

    #[test]
    fn test_is_last() {
        let bursts = BurstSequence::new(vec![30, 10, 5]);
        assert!(!bursts.is_last(0));
        assert!(!bursts.is_last(1));
        assert!(bursts.is_last(2));
        assert!(BurstSequence::is_cpu(2));
        assert!(!BurstSequence::is_cpu(1));
    }
}
