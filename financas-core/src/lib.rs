//! financas-core: expense types, statement-month resolution and installment expansion

pub mod error;
pub mod expense;
pub mod installments;
pub mod statement;

pub use error::ExpenseError;
pub use expense::{
    Account, Category, ExpenseRecord, ExpenseType, Installment, PaymentMethod, PurchaseInput,
};
pub use installments::{MAX_INSTALLMENTS, expand_purchase};
pub use statement::{closing_date_in_month, resolve_statement_month};
