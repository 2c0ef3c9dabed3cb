//! Expand a purchase into the ledger rows it produces.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::ExpenseError;
use crate::expense::{ExpenseRecord, Installment, PurchaseInput};
use crate::statement::{closing_date_in_month, resolve_statement_month};

/// Upper bound on the installment count of one purchase (100 years of statements).
pub const MAX_INSTALLMENTS: u32 = 1200;

/// Build every row for `input`, or none at all.
///
/// A single purchase yields one row. A recurring purchase yields one row per
/// installment, in installment order, each repeating the entered amount.
pub fn expand_purchase(input: &PurchaseInput) -> Result<Vec<ExpenseRecord>, ExpenseError> {
    if !input.is_recurring {
        if let Some(n) = input.installment_count {
            return Err(ExpenseError::invalid(format!(
                "installment count {n} given for a non-recurring purchase"
            )));
        }
        let date = resolve_statement_month(input.purchase_date, input.statement_closing_date)?;
        return Ok(vec![record(input, date, None)]);
    }

    let count = match input.installment_count {
        Some(n) if (1..=MAX_INSTALLMENTS).contains(&n) => n,
        Some(0) => {
            return Err(ExpenseError::invalid(
                "installment count must be at least 1, got 0",
            ));
        }
        Some(n) => {
            return Err(ExpenseError::invalid(format!(
                "installment count {n} exceeds the limit of {MAX_INSTALLMENTS}"
            )));
        }
        None => {
            return Err(ExpenseError::invalid(
                "installment count is required for a recurring purchase",
            ));
        }
    };

    // the first installment is the purchase itself, so its dates must share a month
    let first = resolve_statement_month(input.purchase_date, input.statement_closing_date)?;
    let mut records = vec![record(input, first, Some(Installment::new(1, count)?))];

    let closing_day = input.statement_closing_date.day();
    for i in 1..count {
        let purchase = add_months(input.purchase_date, i)?;
        let closing = closing_date_in_month(purchase.year(), purchase.month(), closing_day)?;
        let date = resolve_statement_month(purchase, closing)?;
        records.push(record(input, date, Some(Installment::new(i + 1, count)?)));
    }

    Ok(records)
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ExpenseError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ExpenseError::invalid(format!("{date} plus {months} months is out of range")))
}

fn record(input: &PurchaseInput, date: NaiveDate, installment: Option<Installment>) -> ExpenseRecord {
    ExpenseRecord {
        date,
        description: input.description.clone(),
        amount: input.amount,
        payment_method: input.payment_method,
        account: input.account,
        category: input.category,
        expense_type: input.expense_type,
        unit: installment.map(|_| 1),
        installment,
    }
}
