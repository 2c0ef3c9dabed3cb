use financas_core::ExpenseRecord;

use crate::Ledger;
use crate::error::PersistenceError;

/// In-process ledger, used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Vec<ExpenseRecord>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }
}

impl Ledger for MemoryLedger {
    fn append(&mut self, records: &[ExpenseRecord]) -> Result<(), PersistenceError> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<ExpenseRecord>, PersistenceError> {
        Ok(self.records.clone())
    }
}
