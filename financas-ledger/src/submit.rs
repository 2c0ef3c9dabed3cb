//! Turn a purchase form into persisted ledger rows.

use financas_core::{ExpenseRecord, PurchaseInput, expand_purchase};
use tracing::info;

use crate::Ledger;
use crate::error::SubmitError;

/// Expand `input` and append the whole batch in a single write.
///
/// Invalid input is rejected before the ledger is touched.
pub fn submit<L: Ledger + ?Sized>(
    ledger: &mut L,
    input: &PurchaseInput,
) -> Result<Vec<ExpenseRecord>, SubmitError> {
    let records = expand_purchase(input)?;
    ledger.append(&records)?;

    info!(
        description = %input.description,
        rows = records.len(),
        "expense submitted"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::memory::MemoryLedger;
    use chrono::NaiveDate;
    use financas_core::{Account, Category, ExpenseType, PaymentMethod};
    use rust_decimal_macros::dec;

    struct BrokenLedger;

    impl Ledger for BrokenLedger {
        fn append(&mut self, _records: &[ExpenseRecord]) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(std::io::Error::other("disk full")))
        }

        fn read_all(&self) -> Result<Vec<ExpenseRecord>, PersistenceError> {
            Ok(Vec::new())
        }
    }

    fn input(count: Option<u32>) -> PurchaseInput {
        PurchaseInput {
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            statement_closing_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            description: "Notebook".to_string(),
            amount: dec!(350),
            payment_method: PaymentMethod::Credit,
            account: Account::Inter,
            category: Category::GastosPessoais,
            expense_type: ExpenseType::Variable,
            is_recurring: true,
            installment_count: count,
        }
    }

    #[test]
    fn test_submit_appends_batch_in_order() {
        let mut ledger = MemoryLedger::new();
        let rows = submit(&mut ledger, &input(Some(3))).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(ledger.records(), rows.as_slice());
    }

    #[test]
    fn test_submit_appends_after_existing_rows() {
        let existing = expand_purchase(&input(Some(2))).unwrap();
        let mut ledger = MemoryLedger::with_records(existing.clone());

        let rows = submit(&mut ledger, &input(Some(1))).unwrap();
        assert_eq!(ledger.records().len(), 3);
        assert_eq!(&ledger.records()[..2], existing.as_slice());
        assert_eq!(&ledger.records()[2..], rows.as_slice());
    }

    #[test]
    fn test_invalid_input_persists_nothing() {
        let existing = expand_purchase(&input(Some(1))).unwrap();
        let mut ledger = MemoryLedger::with_records(existing.clone());
        let err = submit(&mut ledger, &input(Some(0))).unwrap_err();
        assert!(matches!(err, SubmitError::InvalidInput(_)));
        assert_eq!(ledger.records(), existing.as_slice());
    }

    #[test]
    fn test_persistence_failure_surfaces() {
        let err = submit(&mut BrokenLedger, &input(Some(2))).unwrap_err();
        assert!(matches!(err, SubmitError::Persistence(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
