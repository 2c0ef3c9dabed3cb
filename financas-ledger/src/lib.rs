//! financas-ledger: append-only expense ledger backed by a CSV file.
//!
//! Columns keep the spreadsheet's Portuguese headers:
//! data,despesa,valor,metodo,cartao,categoria,tipo despesa,unidade,parcela_a_pagar,parcela_total

pub mod csv_ledger;
pub mod error;
pub mod memory;
pub mod row;
pub mod submit;

pub use csv_ledger::CsvLedger;
pub use error::{PersistenceError, SubmitError};
pub use memory::MemoryLedger;
pub use submit::submit;

use financas_core::ExpenseRecord;

/// Append-only store of expense rows.
///
/// `append` is all-or-nothing: either every record lands, in order, or the
/// ledger is left as it was.
pub trait Ledger {
    fn append(&mut self, records: &[ExpenseRecord]) -> Result<(), PersistenceError>;
    fn read_all(&self) -> Result<Vec<ExpenseRecord>, PersistenceError>;
}
