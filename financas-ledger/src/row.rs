//! On-disk row layout of the ledger file.

use chrono::NaiveDate;
use financas_core::{ExpenseError, ExpenseRecord, Installment};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PersistenceError;

/// One CSV row, kept as text so bad cells can be reported with their line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRow {
    #[serde(rename = "data", alias = "date")]
    pub date: String,
    #[serde(rename = "despesa")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: String,
    #[serde(rename = "metodo")]
    pub payment_method: String,
    #[serde(rename = "cartao")]
    pub account: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "tipo despesa")]
    pub expense_type: String,
    #[serde(rename = "unidade", default)]
    pub unit: Option<String>,
    #[serde(rename = "parcela_a_pagar", default)]
    pub installment_index: Option<String>,
    #[serde(rename = "parcela_total", default)]
    pub installment_total: Option<String>,
}

impl From<&ExpenseRecord> for LedgerRow {
    fn from(r: &ExpenseRecord) -> Self {
        LedgerRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            description: r.description.clone(),
            amount: r.amount.to_string(),
            payment_method: r.payment_method.label().to_string(),
            account: r.account.label().to_string(),
            category: r.category.label().to_string(),
            expense_type: r.expense_type.label().to_string(),
            unit: r.unit.map(|n| n.to_string()),
            installment_index: r.installment.map(|i| i.index().to_string()),
            installment_total: r.installment.map(|i| i.total().to_string()),
        }
    }
}

impl LedgerRow {
    /// Validate and convert; `line` is only used in error messages.
    pub fn into_record(self, line: u64) -> Result<ExpenseRecord, PersistenceError> {
        let malformed = |reason: String| PersistenceError::MalformedRow { line, reason };

        let date = parse_date(&self.date)
            .ok_or_else(|| malformed(format!("invalid date '{}'", self.date)))?;
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|e| malformed(format!("invalid amount '{}': {e}", self.amount)))?;

        let unit = parse_count(self.unit.as_deref(), "unidade", line)?;
        let index = parse_count(self.installment_index.as_deref(), "parcela_a_pagar", line)?;
        let total = parse_count(self.installment_total.as_deref(), "parcela_total", line)?;

        let installment = match (index, total) {
            (Some(index), Some(total)) => {
                Some(Installment::new(index, total).map_err(|e| malformed(e.to_string()))?)
            }
            (None, None) => None,
            _ => {
                return Err(malformed(
                    "parcela_a_pagar and parcela_total must be both set or both empty".to_string(),
                ));
            }
        };

        Ok(ExpenseRecord {
            date,
            description: self.description,
            amount,
            payment_method: parse_label(&self.payment_method, line)?,
            account: parse_label(&self.account, line)?,
            category: parse_label(&self.category, line)?,
            expense_type: parse_label(&self.expense_type, line)?,
            unit,
            installment,
        })
    }
}

fn parse_label<T: FromStr<Err = ExpenseError>>(s: &str, line: u64) -> Result<T, PersistenceError> {
    s.parse().map_err(|e: ExpenseError| PersistenceError::MalformedRow {
        line,
        reason: e.to_string(),
    })
}

/// Whole-number cell; spreadsheet exports write counts as `3.0`.
fn parse_count(cell: Option<&str>, column: &str, line: u64) -> Result<Option<u32>, PersistenceError> {
    let Some(s) = cell.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(n) = s.parse::<u32>() {
        return Ok(Some(n));
    }
    Decimal::from_str(s)
        .ok()
        .filter(|d| d.fract().is_zero())
        .and_then(|d| d.to_u32())
        .map(Some)
        .ok_or_else(|| PersistenceError::MalformedRow {
            line,
            reason: format!("{column} must be a whole number, got '{s}'"),
        })
}

/// Accepts plain dates and the midnight timestamps spreadsheet exports produce.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use financas_core::{Account, Category, ExpenseType, PaymentMethod};
    use rust_decimal_macros::dec;

    fn row() -> LedgerRow {
        LedgerRow {
            date: "2024-03-01".to_string(),
            description: "Farmácia".to_string(),
            amount: "45.90".to_string(),
            payment_method: "crédito".to_string(),
            account: "inter".to_string(),
            category: "saúde".to_string(),
            expense_type: "variável".to_string(),
            unit: None,
            installment_index: None,
            installment_total: None,
        }
    }

    #[test]
    fn test_row_into_record() {
        let rec = row().into_record(2).unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(rec.amount, dec!(45.90));
        assert_eq!(rec.payment_method, PaymentMethod::Credit);
        assert_eq!(rec.account, Account::Inter);
        assert_eq!(rec.category, Category::Saude);
        assert_eq!(rec.expense_type, ExpenseType::Variable);
        assert!(!rec.is_installment());
    }

    #[test]
    fn test_spreadsheet_timestamp_date() {
        let mut r = row();
        r.date = "2024-03-01 00:00:00".to_string();
        assert!(r.into_record(2).is_ok());
    }

    #[test]
    fn test_half_installment_rejected() {
        let mut r = row();
        r.installment_index = Some("1".to_string());
        let err = r.into_record(7).unwrap_err();
        match err {
            PersistenceError::MalformedRow { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("both"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_index_past_total_rejected() {
        let mut r = row();
        r.installment_index = Some("4".to_string());
        r.installment_total = Some("3".to_string());
        assert!(r.into_record(3).is_err());
    }

    #[test]
    fn test_spreadsheet_float_counts() {
        let mut r = row();
        r.unit = Some("1.0".to_string());
        r.installment_index = Some("2.0".to_string());
        r.installment_total = Some(" 3.0 ".to_string());
        let rec = r.into_record(4).unwrap();
        assert_eq!(rec.unit, Some(1));
        assert_eq!(rec.installment, Some(Installment::new(2, 3).unwrap()));
    }

    #[test]
    fn test_fractional_count_reports_line() {
        let mut r = row();
        r.unit = Some("1".to_string());
        r.installment_index = Some("1.5".to_string());
        r.installment_total = Some("3".to_string());
        match r.into_record(9).unwrap_err() {
            PersistenceError::MalformedRow { line, reason } => {
                assert_eq!(line, 9);
                assert!(reason.contains("parcela_a_pagar"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let mut r = row();
        r.unit = Some("um".to_string());
        assert!(matches!(r.into_record(2), Err(PersistenceError::MalformedRow { line: 2, .. })));
    }

    #[test]
    fn test_bad_amount_and_label_rejected() {
        let mut r = row();
        r.amount = "abc".to_string();
        assert!(r.into_record(2).is_err());

        let mut r = row();
        r.account = "bradesco".to_string();
        let msg = r.into_record(2).unwrap_err().to_string();
        assert!(msg.contains("bradesco"), "{msg}");
    }

    #[test]
    fn test_record_to_row_uses_labels() {
        let rec = row().into_record(2).unwrap();
        let back = LedgerRow::from(&rec);
        assert_eq!(back.payment_method, "crédito");
        assert_eq!(back.category, "saúde");
        assert_eq!(back.amount, "45.90");
        assert_eq!(back.installment_total, None);
    }
}
