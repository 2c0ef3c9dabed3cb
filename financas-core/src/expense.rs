//! Expense ledger rows and the purchase form they are built from.
//!
//! Enum labels follow the Portuguese wording used in the ledger file
//! (`crédito`, `gastos pessoais`, `variável`, ...). Parsing is lenient about
//! case, accents and `-`/`_` separators so labels can be typed on a plain
//! keyboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;

/// One persisted ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    /// Statement month the expense is booked to (always day 1)
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub account: Account,
    pub category: Category,
    pub expense_type: ExpenseType,
    /// Set to 1 on rows that belong to an installment plan
    pub unit: Option<u32>,
    pub installment: Option<Installment>,
}

impl ExpenseRecord {
    pub fn is_installment(&self) -> bool {
        self.installment.is_some()
    }
}

/// Position of a row inside an installment plan.
///
/// Always satisfies `1 <= index <= total`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "InstallmentParts")]
pub struct Installment {
    index: u32,
    total: u32,
}

#[derive(Deserialize)]
struct InstallmentParts {
    index: u32,
    total: u32,
}

impl Installment {
    pub fn new(index: u32, total: u32) -> Result<Self, ExpenseError> {
        if index == 0 || index > total {
            return Err(ExpenseError::invalid(format!(
                "installment {index} of {total} is out of range"
            )));
        }
        Ok(Self { index, total })
    }

    /// 1-based position in the plan
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

impl TryFrom<InstallmentParts> for Installment {
    type Error = ExpenseError;

    fn try_from(parts: InstallmentParts) -> Result<Self, Self::Error> {
        Installment::new(parts.index, parts.total)
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

/// A purchase as entered on the form. Never persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseInput {
    pub purchase_date: NaiveDate,
    /// Only the day-of-month is meaningful when expanding installments
    pub statement_closing_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub account: Account,
    pub category: Category,
    pub expense_type: ExpenseType,
    pub is_recurring: bool,
    /// Required iff `is_recurring`
    pub installment_count: Option<u32>,
}

/// Lowercase, drop accents, and treat `-`/`_` as spaces.
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            '-' | '_' => ' ',
            c => c,
        })
        .collect()
}

fn unknown_label(kind: &str, value: &str, expected: &[&str]) -> ExpenseError {
    ExpenseError::invalid(format!(
        "unknown {kind} '{value}' (expected one of: {})",
        expected.join(", ")
    ))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentMethod {
    #[serde(rename = "crédito", alias = "credito")]
    Credit,
    #[serde(rename = "débito", alias = "debito")]
    Debit,
    #[serde(rename = "pix")]
    Pix,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Credit, PaymentMethod::Debit, PaymentMethod::Pix];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "crédito",
            PaymentMethod::Debit => "débito",
            PaymentMethod::Pix => "pix",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "credito" | "credit" => Ok(PaymentMethod::Credit),
            "debito" | "debit" => Ok(PaymentMethod::Debit),
            "pix" => Ok(PaymentMethod::Pix),
            _ => Err(unknown_label(
                "payment method",
                s,
                &PaymentMethod::ALL.map(|m| m.label()),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Account {
    #[serde(rename = "inter")]
    Inter,
    #[serde(rename = "nubank")]
    Nubank,
    #[serde(rename = "efi")]
    Efi,
    #[serde(rename = "meli")]
    Meli,
}

impl Account {
    pub const ALL: [Account; 4] = [Account::Inter, Account::Nubank, Account::Efi, Account::Meli];

    pub fn label(&self) -> &'static str {
        match self {
            Account::Inter => "inter",
            Account::Nubank => "nubank",
            Account::Efi => "efi",
            Account::Meli => "meli",
        }
    }
}

impl FromStr for Account {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "inter" => Ok(Account::Inter),
            "nubank" => Ok(Account::Nubank),
            "efi" => Ok(Account::Efi),
            "meli" => Ok(Account::Meli),
            _ => Err(unknown_label("account", s, &Account::ALL.map(|a| a.label()))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "casa")]
    Casa,
    #[serde(rename = "transporte")]
    Transporte,
    #[serde(rename = "lazer")]
    Lazer,
    #[serde(rename = "gastos pessoais")]
    GastosPessoais,
    #[serde(rename = "saúde", alias = "saude")]
    Saude,
    #[serde(rename = "comida")]
    Comida,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Casa,
        Category::Transporte,
        Category::Lazer,
        Category::GastosPessoais,
        Category::Saude,
        Category::Comida,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Casa => "casa",
            Category::Transporte => "transporte",
            Category::Lazer => "lazer",
            Category::GastosPessoais => "gastos pessoais",
            Category::Saude => "saúde",
            Category::Comida => "comida",
        }
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "casa" => Ok(Category::Casa),
            "transporte" => Ok(Category::Transporte),
            "lazer" => Ok(Category::Lazer),
            "gastos pessoais" => Ok(Category::GastosPessoais),
            "saude" => Ok(Category::Saude),
            "comida" => Ok(Category::Comida),
            _ => Err(unknown_label("category", s, &Category::ALL.map(|c| c.label()))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseType {
    #[serde(rename = "fixo")]
    Fixed,
    #[serde(rename = "variável", alias = "variavel")]
    Variable,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 2] = [ExpenseType::Fixed, ExpenseType::Variable];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Fixed => "fixo",
            ExpenseType::Variable => "variável",
        }
    }
}

impl FromStr for ExpenseType {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "fixo" | "fixed" => Ok(ExpenseType::Fixed),
            "variavel" | "variable" => Ok(ExpenseType::Variable),
            _ => Err(unknown_label(
                "expense type",
                s,
                &ExpenseType::ALL.map(|t| t.label()),
            )),
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(PaymentMethod, Account, Category, ExpenseType);
