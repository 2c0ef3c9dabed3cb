//! Statement-month assignment.
//!
//! A purchase made on or before the card's closing day is booked to the
//! purchase month. A purchase made after the closing day lands on the
//! statement two months ahead.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::ExpenseError;

/// Resolve the statement month (as its first day) for a purchase.
///
/// Both dates must fall in the same calendar month; only the closing
/// date's day-of-month takes part in the comparison.
pub fn resolve_statement_month(
    purchase: NaiveDate,
    closing: NaiveDate,
) -> Result<NaiveDate, ExpenseError> {
    if purchase.year() != closing.year() || purchase.month() != closing.month() {
        return Err(ExpenseError::invalid(format!(
            "purchase date {purchase} and closing date {closing} must be in the same month"
        )));
    }

    let first = first_of_month(purchase);
    if purchase.day() <= closing.day() {
        return Ok(first);
    }

    first
        .checked_add_months(Months::new(2))
        .ok_or_else(|| ExpenseError::invalid(format!("statement month for {purchase} is out of range")))
}

/// Closing date for `closing_day` in the given month, clamped to the month's last day.
pub fn closing_date_in_month(
    year: i32,
    month: u32,
    closing_day: u32,
) -> Result<NaiveDate, ExpenseError> {
    if !(1..=31).contains(&closing_day) {
        return Err(ExpenseError::invalid(format!(
            "closing day {closing_day} must be between 1 and 31"
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ExpenseError::invalid(format!("invalid month {year}-{month:02}")))?;
    let day = closing_day.min(days_in_month(first));
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ExpenseError::invalid(format!("invalid date {year}-{month:02}-{day:02}")))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_before_closing_books_current_month() {
        assert_eq!(resolve_statement_month(d(2024, 3, 10), d(2024, 3, 20)).unwrap(), d(2024, 3, 1));
    }

    #[test]
    fn test_on_closing_day_books_current_month() {
        assert_eq!(resolve_statement_month(d(2024, 3, 20), d(2024, 3, 20)).unwrap(), d(2024, 3, 1));
    }

    #[test]
    fn test_after_closing_rolls_two_months() {
        assert_eq!(resolve_statement_month(d(2024, 3, 25), d(2024, 3, 20)).unwrap(), d(2024, 5, 1));
    }

    #[test]
    fn test_roll_crosses_year_end() {
        assert_eq!(resolve_statement_month(d(2024, 11, 30), d(2024, 11, 5)).unwrap(), d(2025, 1, 1));
        assert_eq!(resolve_statement_month(d(2024, 12, 15), d(2024, 12, 10)).unwrap(), d(2025, 2, 1));
    }

    #[test]
    fn test_every_day_of_month_matches_rule() {
        let closing = d(2023, 7, 12);
        for day in 1..=31 {
            let p = d(2023, 7, day);
            let expected = if day <= 12 { d(2023, 7, 1) } else { d(2023, 9, 1) };
            assert_eq!(resolve_statement_month(p, closing).unwrap(), expected, "day {day}");
        }
    }

    #[test]
    fn test_resolver_is_pure() {
        let a = resolve_statement_month(d(2024, 6, 28), d(2024, 6, 3));
        let b = resolve_statement_month(d(2024, 6, 28), d(2024, 6, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_cross_month_is_rejected() {
        let err = resolve_statement_month(d(2024, 4, 2), d(2024, 3, 20)).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidInput(_)));

        // same month number, different year
        assert!(resolve_statement_month(d(2025, 3, 2), d(2024, 3, 20)).is_err());
    }

    #[test]
    fn test_closing_day_clamped_to_month_end() {
        assert_eq!(closing_date_in_month(2024, 2, 31).unwrap(), d(2024, 2, 29));
        assert_eq!(closing_date_in_month(2023, 2, 30).unwrap(), d(2023, 2, 28));
        assert_eq!(closing_date_in_month(2024, 4, 31).unwrap(), d(2024, 4, 30));
        assert_eq!(closing_date_in_month(2024, 1, 20).unwrap(), d(2024, 1, 20));
    }

    #[test]
    fn test_closing_day_out_of_range() {
        assert!(closing_date_in_month(2024, 1, 0).is_err());
        assert!(closing_date_in_month(2024, 1, 32).is_err());
        assert!(closing_date_in_month(2024, 13, 10).is_err());
    }
}
