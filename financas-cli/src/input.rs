//! Parsing of command-line values typed the way they appear on a receipt.

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};
use financas_core::{PaymentMethod, closing_date_in_month};
use financas_report::parse_month;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a money amount: `12.5`, `12,50`, `R$ 1.234,56`, `1,234.56`.
///
/// When both separators appear the last one is the decimal mark; a lone comma
/// is a decimal mark; repeated separators are thousands groups.
pub fn parse_amount(s: &str) -> Result<Decimal, String> {
    let prefix = Regex::new(r"^\s*(R\$)?\s*").map_err(|e| e.to_string())?;
    let raw = prefix.replace(s, "").replace(' ', "");

    let commas = raw.matches(',').count();
    let dots = raw.matches('.').count();
    let normalized = match (commas, dots) {
        (0, 0) => raw.clone(),
        (c, d) if c > 0 && d > 0 => {
            if raw.rfind(',') > raw.rfind('.') {
                raw.replace('.', "").replace(',', ".")
            } else {
                raw.replace(',', "")
            }
        }
        (1, 0) => raw.replace(',', "."),
        (_, 0) => raw.replace(',', ""),
        (0, 1) => raw.clone(),
        _ => raw.replace('.', ""),
    };

    let shape = Regex::new(r"^\d+(\.\d+)?$").map_err(|e| e.to_string())?;
    if !shape.is_match(&normalized) {
        return Err(format!("invalid amount '{s}'"));
    }

    let amount = Decimal::from_str(&normalized).map_err(|e| format!("invalid amount '{s}': {e}"))?;
    if amount.is_zero() {
        return Err("amount must be greater than zero".to_string());
    }
    Ok(amount)
}

/// `YYYY-MM-DD` or the Brazilian `DD/MM/YYYY`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| format!("invalid date '{s}' (use YYYY-MM-DD or DD/MM/YYYY)"))
}

pub fn parse_month_arg(s: &str) -> Result<u32, String> {
    parse_month(s).ok_or_else(|| format!("invalid month '{s}' (1-12 or a month name)"))
}

/// Pick the statement closing date for a purchase.
///
/// An explicit date wins, then a closing day (placed in the purchase month).
/// Non-credit payments without either are booked to the purchase month.
pub fn closing_date(
    purchase: NaiveDate,
    method: PaymentMethod,
    explicit: Option<NaiveDate>,
    closing_day: Option<u32>,
) -> Result<NaiveDate> {
    if let Some(date) = explicit {
        return Ok(date);
    }
    if let Some(day) = closing_day {
        return Ok(closing_date_in_month(purchase.year(), purchase.month(), day)?);
    }
    if method != PaymentMethod::Credit {
        return Ok(purchase);
    }
    bail!("credit purchases need a closing date: pass --closing-date or --closing-day, or set statement.closing_day in config.toml")
}
