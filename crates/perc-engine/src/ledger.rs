//! The append-only epoch ledger.

use perc_core::EpochId;
use std::error::Error;
use std::fmt;

/// One recorded epoch: its index, simulated time, and mean density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochRecord {
    /// Epoch index, strictly increasing from 0.
    pub epoch: EpochId,
    /// Simulated time, `epoch × dt`.
    pub time: f64,
    /// Arithmetic mean of all cell densities at this epoch.
    pub mean_density: f64,
}

/// Error from ledger queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// A record was requested before any epoch was recorded.
    Empty,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "no epochs recorded yet"),
        }
    }
}

impl Error for LedgerError {}

/// Ordered, append-only record of completed epochs.
///
/// Indices are assigned by [`append`](EpochLedger::append), so the
/// strictly-increasing-from-zero invariant holds by construction. Entry 0
/// is the initial condition, recorded before any integration step.
#[derive(Clone, Debug, Default)]
pub struct EpochLedger {
    records: Vec<EpochRecord>,
}

impl EpochLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for the next epoch and return its index.
    pub fn append(&mut self, time: f64, mean_density: f64) -> EpochId {
        let epoch = EpochId(self.records.len() as u64);
        self.records.push(EpochRecord {
            epoch,
            time,
            mean_density,
        });
        epoch
    }

    /// All records in epoch order.
    pub fn all(&self) -> &[EpochRecord] {
        &self.records
    }

    /// Number of recorded epochs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no epoch has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently recorded epoch.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Empty`] if nothing has been recorded.
    pub fn latest(&self) -> Result<&EpochRecord, LedgerError> {
        self.records.last().ok_or(LedgerError::Empty)
    }

    /// The recorded times, in epoch order.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    /// The recorded mean densities, in epoch order.
    pub fn mean_densities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_density).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_ledger() {
        let ledger = EpochLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert_eq!(ledger.latest(), Err(LedgerError::Empty));
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut ledger = EpochLedger::new();
        assert_eq!(ledger.append(0.0, 0.5), EpochId(0));
        assert_eq!(ledger.append(0.1, 0.4), EpochId(1));
        assert_eq!(ledger.append(0.2, 0.3), EpochId(2));
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.latest().unwrap().epoch, EpochId(2));
    }

    #[test]
    fn bulk_extraction_preserves_order() {
        let mut ledger = EpochLedger::new();
        ledger.append(0.0, 0.9);
        ledger.append(0.1, 0.8);
        assert_eq!(ledger.times(), vec![0.0, 0.1]);
        assert_eq!(ledger.mean_densities(), vec![0.9, 0.8]);
    }

    proptest! {
        #[test]
        fn indices_strictly_increase_from_zero(
            entries in prop::collection::vec((0.0f64..1e6, -1e6f64..1e6), 1..64)
        ) {
            let mut ledger = EpochLedger::new();
            for (time, mean) in &entries {
                ledger.append(*time, *mean);
            }
            for (i, record) in ledger.all().iter().enumerate() {
                prop_assert_eq!(record.epoch, EpochId(i as u64));
            }
            prop_assert_eq!(ledger.len(), entries.len());
        }
    }
}
